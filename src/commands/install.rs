use anyhow::{bail, Result};
use serde::Serialize;
use std::path::Path;
use which::which;

use crate::pm;

#[derive(Debug, Serialize)]
pub struct InstallResult {
    pub project_dir: String,
    pub tool: String,
    pub fell_back: bool,
    pub exit_code: Option<i32>,
}

impl InstallResult {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Output is streamed rather than captured. Only a missing pnpm executable
/// triggers the npm fallback; a pnpm run that starts and fails is reported
/// as a failure.
pub fn cmd_install(project_dir: &Path) -> Result<InstallResult> {
    if !project_dir.exists() {
        bail!("project directory missing at {}", project_dir.display());
    }

    eprintln!("Starting pnpm install with updated dependencies...");

    let (tool, args, fell_back) = match which("pnpm") {
        Ok(_) => ("pnpm", vec!["install", "--no-frozen-lockfile"], false),
        Err(_) => {
            eprintln!("pnpm not found in PATH, using npm instead...");
            ("npm", vec!["install"], true)
        }
    };

    let status = pm::stream(project_dir, tool, &args)?;

    Ok(InstallResult {
        project_dir: project_dir.display().to_string(),
        tool: tool.to_string(),
        fell_back,
        exit_code: status.code(),
    })
}

pub fn format_install_human(result: &InstallResult) -> String {
    if result.succeeded() {
        if result.fell_back {
            "✓ Dependencies installed with npm!".to_string()
        } else {
            "✓ Dependencies installed successfully!".to_string()
        }
    } else {
        format!(
            "✗ Installation failed ({} exit code: {})",
            result.tool,
            result
                .exit_code
                .map_or("signal".to_string(), |c| c.to_string())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmd_install_missing_dir_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let gone = tmp.path().join("no-such-project");
        let result = cmd_install(&gone);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("project directory missing"));
    }

    #[test]
    fn format_success_without_fallback() {
        let result = InstallResult {
            project_dir: "/tmp/project".to_string(),
            tool: "pnpm".to_string(),
            fell_back: false,
            exit_code: Some(0),
        };
        assert_eq!(
            format_install_human(&result),
            "✓ Dependencies installed successfully!"
        );
    }

    #[test]
    fn format_success_with_fallback_names_npm() {
        let result = InstallResult {
            project_dir: "/tmp/project".to_string(),
            tool: "npm".to_string(),
            fell_back: true,
            exit_code: Some(0),
        };
        assert_eq!(
            format_install_human(&result),
            "✓ Dependencies installed with npm!"
        );
    }

    #[test]
    fn format_failure_reports_tool_and_code() {
        let result = InstallResult {
            project_dir: "/tmp/project".to_string(),
            tool: "pnpm".to_string(),
            fell_back: false,
            exit_code: Some(2),
        };
        let text = format_install_human(&result);
        assert!(text.contains("Installation failed"));
        assert!(text.contains("pnpm exit code: 2"));
    }
}
