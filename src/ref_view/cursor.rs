#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewCursor {
    selected_index: usize,
    view_start_index: usize,
    view_start_column: usize,
}

impl ViewCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn view_start_index(&self) -> usize {
        self.view_start_index
    }

    pub fn view_start_column(&self) -> usize {
        self.view_start_column
    }

    /// Position of the selected row inside the visible window.
    pub fn selected_row_in_view(&self) -> usize {
        self.selected_index.saturating_sub(self.view_start_index)
    }

    pub fn set_selected_index(&mut self, index: usize) {
        self.selected_index = index;
    }

    pub fn move_to_first_line(&mut self) -> bool {
        if self.selected_index == 0 {
            return false;
        }
        self.selected_index = 0;
        true
    }

    pub fn move_to_last_line(&mut self, total_rows: usize) -> bool {
        let last = total_rows.saturating_sub(1);
        if total_rows == 0 || self.selected_index == last {
            return false;
        }
        self.selected_index = last;
        true
    }

    pub fn move_page_right(&mut self, cols: usize) {
        self.view_start_column += page_width(cols);
    }

    /// Returns false when already at column 0.
    pub fn move_page_left(&mut self, cols: usize) -> bool {
        if self.view_start_column == 0 {
            return false;
        }
        self.view_start_column = self.view_start_column.saturating_sub(page_width(cols));
        true
    }

    /// Scrolls the minimum amount that keeps the selected row inside `rows` visible rows.
    pub fn determine_view_start(&mut self, rows: usize, total_rows: usize) {
        if rows == 0 {
            self.view_start_index = self.selected_index;
            return;
        }

        if self.view_start_index > self.selected_index {
            self.view_start_index = self.selected_index;
        } else if self.selected_index - self.view_start_index >= rows {
            self.view_start_index = self.selected_index + 1 - rows;
        }

        // Don't leave empty space below the last row when the list shrank.
        let max_start = total_rows.saturating_sub(rows);
        if self.view_start_index > max_start {
            self.view_start_index = max_start.min(self.selected_index);
        }
    }
}

fn page_width(cols: usize) -> usize {
    (cols / 2).max(1)
}

#[cfg(test)]
#[path = "../tests/ref_view/cursor_tests.rs"]
mod tests;
