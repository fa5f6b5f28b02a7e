use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project checkout operated on when no config file overrides it.
pub const DEFAULT_PROJECT_DIR: &str = "/vercel/share/v0-project";

pub const CONFIG_PATH_ENV: &str = "RELOCK_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub project: ProjectConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub project_dir: PathBuf,
}

pub fn default_config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    let proj = directories::ProjectDirs::from("", "", "relock")
        .context("could not determine config directory")?;
    Ok(proj.config_dir().join("config.toml"))
}

pub fn load_default_config() -> Result<ResolvedConfig> {
    let path = default_config_path()?;
    load_or_default(&path)
}

/// Missing config is not an error: the tool falls back to the pinned
/// default directory.
pub fn load_or_default(path: &Path) -> Result<ResolvedConfig> {
    if !path.exists() {
        return Ok(ResolvedConfig {
            project_dir: PathBuf::from(DEFAULT_PROJECT_DIR),
        });
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<ResolvedConfig> {
    let raw: Config = toml::from_str(contents).context("failed to parse config TOML")?;

    let project_dir = expand_tilde(raw.project.dir.to_str().unwrap_or(""));
    if project_dir.as_os_str().is_empty() {
        bail!("project dir must not be empty");
    }

    Ok(ResolvedConfig { project_dir })
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    } else if path == "~" {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home);
        }
    }
    PathBuf::from(path)
}
