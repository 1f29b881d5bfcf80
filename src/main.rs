use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use refpane::config::{Config, GroupConfig};
use refpane::logging::{self, LogTarget};
use refpane::repo::{GitRepoData, RepoData};

#[derive(Parser)]
#[command(name = "refpane")]
#[command(about = "Browse and filter git branches and tags", long_about = None)]
struct Cli {
    /// Repository to open (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    repo: Option<PathBuf>,

    /// Config file (defaults to .refpane.json in the work tree)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace, off)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log file for the interactive UI
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive ref view (default)
    Tui,

    /// Print the ref view rows
    List {
        /// Filter query; repeat to stack filters
        #[arg(long = "filter", value_name = "QUERY")]
        filters: Vec<String>,
        /// Expand every ref group
        #[arg(long)]
        expand_all: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;

    let repo_path = match cli.repo {
        Some(path) => path,
        None => std::env::current_dir().context("resolve current directory")?,
    };
    let repo = GitRepoData::open(&repo_path, runtime.handle().clone())?;
    let config = Config::discover(cli.config.as_deref(), repo.root())?;

    let level = cli.log_level.unwrap_or(config.log.level);
    let root = repo.root().to_path_buf();
    let repo_data: Arc<dyn RepoData> = Arc::new(repo);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let target = match cli.log_file.or(config.log.file) {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Off,
            };
            logging::init(&level, target)?;
            info!(path = %root.display(), "opened repository");
            refpane::tui::run(repo_data, config.groups)
        }
        Commands::List {
            filters,
            expand_all,
        } => {
            logging::init(&level, LogTarget::Stderr)?;
            info!(path = %root.display(), "opened repository");
            let groups = if expand_all {
                GroupConfig::all_expanded()
            } else {
                config.groups
            };
            let mut stdout = io::stdout().lock();
            refpane::headless::list_refs(repo_data, groups, &filters, &mut stdout)
        }
    }
}
