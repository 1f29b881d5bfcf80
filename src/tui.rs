use std::io::{self, IsTerminal};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::GroupConfig;
use crate::repo::RepoData;

mod app;
mod guard;
mod input;
mod keymap;
mod render;
mod theme;

pub use app::StatusListener;

use app::App;
use guard::TerminalGuard;

pub fn run(repo_data: Arc<dyn RepoData>, groups: GroupConfig) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        bail!("refpane requires an interactive terminal (TTY)");
    }

    // Initialise before touching the terminal so HEAD errors print normally.
    let mut app = App::new(repo_data, groups)?;

    let _guard = TerminalGuard::enter(io::stdout())?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    app.run_loop(&mut terminal)
}
