use std::io::Write;

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

/// Puts the terminal back on drop: raw mode off, main screen, cursor visible.
pub(super) struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    pub(super) fn new(out: W) -> Self {
        Self { out }
    }

    pub(super) fn enter(out: W) -> Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        let mut guard = Self::new(out);
        execute!(guard.out, EnterAlternateScreen).context("enter alternate screen")?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        disable_raw_mode().ok();
        execute!(self.out, LeaveAlternateScreen, Show).ok();
    }
}

#[cfg(test)]
#[path = "../tests/tui/guard_tests.rs"]
mod tests;
