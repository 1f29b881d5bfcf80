use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file. Used by the interactive UI, which owns stdout.
    File(PathBuf),
    Stderr,
    Off,
}

/// Installs the global subscriber. `RUST_LOG` directives take precedence over `level`.
pub fn init(level: &str, target: LogTarget) -> Result<()> {
    let level: LevelFilter = level
        .parse()
        .with_context(|| format!("invalid log level {:?}", level))?;
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    match target {
        LogTarget::Off => Ok(()),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow!("install log subscriber: {}", err))
        }
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .try_init()
            .map_err(|err| anyhow!("install log subscriber: {}", err)),
    }
}
