use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{Action, ActionKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum KeyCommand {
    Quit,
    ToggleActive,
    Action(Action),
}

pub(super) fn command_for(key: KeyEvent) -> Option<KeyCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(KeyCommand::Quit),
            KeyCode::Char('f') => Some(action(ActionKind::NextPage)),
            KeyCode::Char('b') => Some(action(ActionKind::PrevPage)),
            _ => None,
        };
    }

    let kind = match key.code {
        KeyCode::Char('q') => return Some(KeyCommand::Quit),
        KeyCode::Tab => return Some(KeyCommand::ToggleActive),
        KeyCode::Up | KeyCode::Char('k') => ActionKind::PrevLine,
        KeyCode::Down | KeyCode::Char('j') => ActionKind::NextLine,
        KeyCode::PageUp => ActionKind::PrevPage,
        KeyCode::PageDown => ActionKind::NextPage,
        KeyCode::Home | KeyCode::Char('g') => ActionKind::FirstLine,
        KeyCode::End | KeyCode::Char('G') => ActionKind::LastLine,
        KeyCode::Left | KeyCode::Char('h') => ActionKind::ScrollLeft,
        KeyCode::Right | KeyCode::Char('l') => ActionKind::ScrollRight,
        KeyCode::Enter => ActionKind::Select,
        KeyCode::Char('f') => ActionKind::FilterPrompt,
        KeyCode::Char('F') => ActionKind::RemoveFilter,
        KeyCode::Char('/') => ActionKind::SearchPrompt,
        KeyCode::Char('n') => ActionKind::SearchNext,
        KeyCode::Char('N') => ActionKind::SearchPrev,
        KeyCode::Esc => ActionKind::ClearSearch,
        _ => return None,
    };
    Some(action(kind))
}

fn action(kind: ActionKind) -> KeyCommand {
    KeyCommand::Action(Action::new(kind))
}

pub(super) fn key_label(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::PrevLine => "k",
        ActionKind::NextLine => "j",
        ActionKind::PrevPage => "PgUp",
        ActionKind::NextPage => "PgDn",
        ActionKind::FirstLine => "g",
        ActionKind::LastLine => "G",
        ActionKind::ScrollLeft => "h",
        ActionKind::ScrollRight => "l",
        ActionKind::Select => "Enter",
        ActionKind::FilterPrompt | ActionKind::AddFilter => "f",
        ActionKind::RemoveFilter => "F",
        ActionKind::SearchPrompt | ActionKind::Search => "/",
        ActionKind::SearchNext => "n",
        ActionKind::SearchPrev => "N",
        ActionKind::ClearSearch => "Esc",
    }
}

#[cfg(test)]
#[path = "../tests/tui/keymap_tests.rs"]
mod tests;
