use anyhow::{bail, Result};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

use crate::pm::{self, Wait};

/// Bound on the install when generating a lockfile from scratch.
pub const LOCKFILE_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
pub struct CreateResult {
    pub project_dir: String,
    pub outcome: CreateOutcome,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum CreateOutcome {
    Created {
        stdout: String,
        stderr: String,
    },
    Failed {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    TimedOut {
        seconds: u64,
    },
}

impl CreateResult {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, CreateOutcome::Created { .. })
    }
}

pub fn cmd_create(project_dir: &Path, timeout: Duration) -> Result<CreateResult> {
    if !project_dir.exists() {
        bail!("project directory missing at {}", project_dir.display());
    }

    eprintln!(
        "Running pnpm install without frozen-lockfile in {}...",
        project_dir.display()
    );

    let wait = pm::capture_deadline(
        project_dir,
        "pnpm",
        &["install", "--no-frozen-lockfile"],
        timeout,
    )?;

    let outcome = match wait {
        Wait::Completed(run) if run.status.success() => CreateOutcome::Created {
            stdout: run.stdout,
            stderr: run.stderr,
        },
        Wait::Completed(run) => CreateOutcome::Failed {
            exit_code: run.status.code(),
            stdout: run.stdout,
            stderr: run.stderr,
        },
        Wait::TimedOut => CreateOutcome::TimedOut {
            seconds: timeout.as_secs(),
        },
    };

    Ok(CreateResult {
        project_dir: project_dir.display().to_string(),
        outcome,
    })
}

pub fn format_create_human(result: &CreateResult) -> String {
    match &result.outcome {
        CreateOutcome::Created { stdout, stderr } => format!(
            "STDOUT: {}\nSTDERR: {}\nReturn code: 0\n✓ Successfully created fresh pnpm-lock.yaml",
            stdout.trim_end(),
            stderr.trim_end()
        ),
        CreateOutcome::Failed {
            exit_code,
            stdout,
            stderr,
        } => format!(
            "STDOUT: {}\nSTDERR: {}\nReturn code: {}\n✗ Failed to create lockfile",
            stdout.trim_end(),
            stderr.trim_end(),
            exit_code.map_or("signal".to_string(), |c| c.to_string())
        ),
        CreateOutcome::TimedOut { seconds } => {
            format!("✗ Command timed out after {}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmd_create_missing_dir_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let gone = tmp.path().join("no-such-project");
        let result = cmd_create(&gone, LOCKFILE_TIMEOUT);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("no-such-project"), "unexpected error: {}", err);
    }

    #[test]
    fn format_success_mentions_lockfile() {
        let result = CreateResult {
            project_dir: "/tmp/project".to_string(),
            outcome: CreateOutcome::Created {
                stdout: "Packages are up to date\n".to_string(),
                stderr: String::new(),
            },
        };
        let text = format_create_human(&result);
        assert!(text.contains("Successfully created fresh pnpm-lock.yaml"));
        assert!(text.contains("Packages are up to date"));
        assert!(text.contains("Return code: 0"));
    }

    #[test]
    fn format_failure_reports_stderr_and_code() {
        let result = CreateResult {
            project_dir: "/tmp/project".to_string(),
            outcome: CreateOutcome::Failed {
                exit_code: Some(2),
                stdout: String::new(),
                stderr: "ERR_PNPM_OUTDATED_LOCKFILE\n".to_string(),
            },
        };
        let text = format_create_human(&result);
        assert!(text.contains("ERR_PNPM_OUTDATED_LOCKFILE"));
        assert!(text.contains("Return code: 2"));
        assert!(text.contains("Failed to create lockfile"));
    }

    #[test]
    fn format_timeout_names_the_bound() {
        let result = CreateResult {
            project_dir: "/tmp/project".to_string(),
            outcome: CreateOutcome::TimedOut { seconds: 120 },
        };
        let text = format_create_human(&result);
        assert!(text.contains("timed out after 120s"));
    }
}
