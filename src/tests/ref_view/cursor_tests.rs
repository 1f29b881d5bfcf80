use super::*;

#[test]
fn first_line_reports_whether_it_moved() {
    let mut cursor = ViewCursor::new();
    assert!(!cursor.move_to_first_line());

    cursor.set_selected_index(4);
    assert!(cursor.move_to_first_line());
    assert_eq!(cursor.selected_index(), 0);
}

#[test]
fn last_line_handles_empty_and_already_last() {
    let mut cursor = ViewCursor::new();
    assert!(!cursor.move_to_last_line(0));

    assert!(cursor.move_to_last_line(5));
    assert_eq!(cursor.selected_index(), 4);
    assert!(!cursor.move_to_last_line(5));
}

#[test]
fn horizontal_scroll_moves_half_a_width() {
    let mut cursor = ViewCursor::new();
    assert!(!cursor.move_page_left(80));

    cursor.move_page_right(80);
    cursor.move_page_right(80);
    assert_eq!(cursor.view_start_column(), 80);

    assert!(cursor.move_page_left(80));
    assert_eq!(cursor.view_start_column(), 40);

    // a 1-column window still scrolls
    cursor.move_page_right(1);
    assert_eq!(cursor.view_start_column(), 41);
}

#[test]
fn scroll_left_stops_at_column_zero() {
    let mut cursor = ViewCursor::new();
    cursor.move_page_right(10);
    cursor.move_page_right(3);
    assert_eq!(cursor.view_start_column(), 6);

    assert!(cursor.move_page_left(20));
    assert_eq!(cursor.view_start_column(), 0);
}

#[test]
fn view_start_follows_selection_down_and_up() {
    let mut cursor = ViewCursor::new();
    cursor.set_selected_index(7);
    cursor.determine_view_start(5, 20);
    assert_eq!(cursor.view_start_index(), 3);
    assert_eq!(cursor.selected_row_in_view(), 4);

    cursor.set_selected_index(5);
    cursor.determine_view_start(5, 20);
    assert_eq!(cursor.view_start_index(), 3);

    cursor.set_selected_index(1);
    cursor.determine_view_start(5, 20);
    assert_eq!(cursor.view_start_index(), 1);
    assert_eq!(cursor.selected_row_in_view(), 0);
}

#[test]
fn view_start_pulls_back_when_list_shrinks() {
    let mut cursor = ViewCursor::new();
    cursor.set_selected_index(15);
    cursor.determine_view_start(5, 20);
    assert_eq!(cursor.view_start_index(), 11);

    cursor.set_selected_index(6);
    cursor.determine_view_start(5, 8);
    assert_eq!(cursor.view_start_index(), 3);
    assert_eq!(cursor.selected_row_in_view(), 3);
}
