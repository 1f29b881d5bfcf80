use anyhow::{Result, bail};
use tracing::debug;

use crate::action::{Action, ActionArg, ActionKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Not a search action.
    Unhandled,
    Handled,
    Match(usize),
}

#[derive(Clone, Debug, Default)]
pub struct ViewSearch {
    pattern: Option<String>,
    last_found: bool,
}

impl ViewSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active pattern and whether the last search found it.
    pub fn search_active(&self) -> Option<(&str, bool)> {
        self.pattern.as_deref().map(|p| (p, self.last_found))
    }

    pub fn handle_action(
        &mut self,
        action: &Action,
        lines: &[&str],
        selected: usize,
    ) -> Result<SearchOutcome> {
        match action.kind {
            ActionKind::Search => {
                let pattern = match action.args.first() {
                    Some(ActionArg::Str(p)) if !p.is_empty() => p.clone(),
                    Some(ActionArg::Str(_)) => bail!("Search pattern must not be empty"),
                    Some(_) => bail!("Expected search pattern argument to have type string"),
                    None => bail!("Expected search pattern argument"),
                };
                debug!(%pattern, "starting search");
                self.pattern = Some(pattern);
                Ok(self.find(lines, selected, Direction::Forward))
            }
            ActionKind::SearchNext => Ok(self.find(lines, selected, Direction::Forward)),
            ActionKind::SearchPrev => Ok(self.find(lines, selected, Direction::Backward)),
            ActionKind::ClearSearch => {
                self.pattern = None;
                self.last_found = false;
                Ok(SearchOutcome::Handled)
            }
            _ => Ok(SearchOutcome::Unhandled),
        }
    }

    fn find(&mut self, lines: &[&str], selected: usize, direction: Direction) -> SearchOutcome {
        let Some(pattern) = &self.pattern else {
            return SearchOutcome::Handled;
        };
        let n = lines.len();
        if n == 0 {
            self.last_found = false;
            return SearchOutcome::Handled;
        }

        let needle = pattern.to_lowercase();
        let start = selected.min(n - 1);
        let found = (1..=n)
            .map(|step| match direction {
                Direction::Forward => (start + step) % n,
                Direction::Backward => (start + n - step) % n,
            })
            .find(|&i| lines[i].to_lowercase().contains(&needle));

        self.last_found = found.is_some();
        match found {
            Some(index) => SearchOutcome::Match(index),
            None => {
                debug!(pattern = %needle, "no search match");
                SearchOutcome::Handled
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
