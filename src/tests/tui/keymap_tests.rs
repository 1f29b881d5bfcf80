use super::*;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn kind_for(code: KeyCode) -> Option<ActionKind> {
    match command_for(key(code)) {
        Some(KeyCommand::Action(action)) => Some(action.kind),
        _ => None,
    }
}

#[test]
fn vim_and_arrow_keys_share_actions() {
    assert_eq!(kind_for(KeyCode::Up), Some(ActionKind::PrevLine));
    assert_eq!(kind_for(KeyCode::Char('k')), Some(ActionKind::PrevLine));
    assert_eq!(kind_for(KeyCode::Down), Some(ActionKind::NextLine));
    assert_eq!(kind_for(KeyCode::Char('j')), Some(ActionKind::NextLine));
    assert_eq!(kind_for(KeyCode::Home), Some(ActionKind::FirstLine));
    assert_eq!(kind_for(KeyCode::Char('G')), Some(ActionKind::LastLine));
    assert_eq!(kind_for(KeyCode::Char('l')), Some(ActionKind::ScrollRight));
}

#[test]
fn filter_and_search_keys() {
    assert_eq!(kind_for(KeyCode::Char('f')), Some(ActionKind::FilterPrompt));
    assert_eq!(kind_for(KeyCode::Char('F')), Some(ActionKind::RemoveFilter));
    assert_eq!(kind_for(KeyCode::Char('/')), Some(ActionKind::SearchPrompt));
    assert_eq!(kind_for(KeyCode::Char('N')), Some(ActionKind::SearchPrev));
    assert_eq!(kind_for(KeyCode::Esc), Some(ActionKind::ClearSearch));
}

#[test]
fn control_keys() {
    assert_eq!(command_for(key(KeyCode::Char('q'))), Some(KeyCommand::Quit));
    assert_eq!(
        command_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Some(KeyCommand::Quit)
    );
    assert_eq!(command_for(key(KeyCode::Tab)), Some(KeyCommand::ToggleActive));
    assert_eq!(
        command_for(KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL)),
        Some(KeyCommand::Action(Action::new(ActionKind::NextPage)))
    );
    assert_eq!(command_for(key(KeyCode::Char('z'))), None);
}

#[test]
fn help_labels_match_bindings() {
    assert_eq!(key_label(ActionKind::Select), "Enter");
    assert_eq!(key_label(ActionKind::FilterPrompt), "f");
    assert_eq!(key_label(ActionKind::RemoveFilter), "F");
}
