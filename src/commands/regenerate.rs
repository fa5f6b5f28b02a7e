use anyhow::{bail, Result};
use serde::Serialize;
use std::path::Path;

use crate::pm;

#[derive(Debug, Serialize)]
pub struct RegenerateResult {
    pub project_dir: String,
    pub outcome: RegenerateOutcome,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum RegenerateOutcome {
    Regenerated {
        stdout: String,
    },
    Failed {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

impl RegenerateResult {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, RegenerateOutcome::Regenerated { .. })
    }
}

pub fn cmd_regenerate(project_dir: &Path) -> Result<RegenerateResult> {
    if !project_dir.exists() {
        bail!("project directory missing at {}", project_dir.display());
    }

    eprintln!("Regenerating pnpm-lock.yaml in {}...", project_dir.display());

    let run = pm::capture(project_dir, "pnpm", &["install"])?;

    let outcome = if run.status.success() {
        RegenerateOutcome::Regenerated { stdout: run.stdout }
    } else {
        RegenerateOutcome::Failed {
            exit_code: run.status.code(),
            stdout: run.stdout,
            stderr: run.stderr,
        }
    };

    Ok(RegenerateResult {
        project_dir: project_dir.display().to_string(),
        outcome,
    })
}

pub fn format_regenerate_human(result: &RegenerateResult) -> String {
    match &result.outcome {
        RegenerateOutcome::Regenerated { stdout } => format!(
            "{}\n✓ Successfully regenerated pnpm-lock.yaml",
            stdout.trim_end()
        ),
        RegenerateOutcome::Failed { stdout, stderr, .. } => {
            format!("{}\n✗ Error: {}", stdout.trim_end(), stderr.trim_end())
        }
    }
}
