use super::*;

fn typed(s: &str) -> Input {
    let mut input = Input::default();
    for c in s.chars() {
        input.insert_char(c);
    }
    input
}

#[test]
fn editing_respects_multibyte_chars() {
    let mut input = typed("näme");
    input.move_left();
    input.move_left();
    input.backspace();
    assert_eq!(input.as_str(), "nme");
    assert_eq!(input.cursor(), 1);

    input.insert_char('å');
    assert_eq!(input.as_str(), "nåme");
}

#[test]
fn cursor_stays_in_bounds() {
    let mut input = typed("ab");
    input.move_right();
    assert_eq!(input.cursor(), 2);
    input.move_left();
    input.move_left();
    input.move_left();
    assert_eq!(input.cursor(), 0);
    input.backspace();
    assert_eq!(input.as_str(), "ab");
}

#[test]
fn submit_trims_and_records_history() {
    let mut input = typed("  name = main ");
    assert_eq!(input.submit(), "name = main");
    assert_eq!(input.as_str(), "");

    for line in ["type = tag", "type = tag"] {
        for c in line.chars() {
            input.insert_char(c);
        }
        input.submit();
    }

    input.history_up();
    assert_eq!(input.as_str(), "type = tag");
    input.history_up();
    assert_eq!(input.as_str(), "name = main");
    input.history_up();
    assert_eq!(input.as_str(), "name = main");

    input.history_down();
    assert_eq!(input.as_str(), "type = tag");
    input.history_down();
    assert_eq!(input.as_str(), "");
}

#[test]
fn blank_submit_is_not_recorded() {
    let mut input = typed("   ");
    assert_eq!(input.submit(), "");
    input.history_up();
    assert_eq!(input.as_str(), "");
}
