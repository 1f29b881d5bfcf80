use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = ".refpane.json";

const CONFIG_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub log: LogConfig,
    pub groups: GroupConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            log: LogConfig::default(),
            groups: GroupConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` level filter (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    pub level: String,
    /// Log file for the interactive UI. Headless commands log to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    pub branches_expanded: bool,
    pub remote_branches_expanded: bool,
    pub tags_expanded: bool,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            branches_expanded: true,
            remote_branches_expanded: false,
            tags_expanded: false,
        }
    }
}

impl GroupConfig {
    pub fn all_expanded() -> Self {
        Self {
            branches_expanded: true,
            remote_branches_expanded: true,
            tags_expanded: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse {}", path.display()))?;
        if cfg.version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {} (expected {})",
                cfg.version,
                path.display(),
                CONFIG_VERSION
            );
        }
        Ok(cfg)
    }

    /// Loads `explicit` if given, else `<repo_root>/.refpane.json` if present, else defaults.
    pub fn discover(explicit: Option<&Path>, repo_root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = repo_root.join(CONFIG_FILE);
        if candidate.is_file() {
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }
}
