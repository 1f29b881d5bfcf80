/// Single-line prompt buffer. The cursor counts characters, not bytes.
#[derive(Debug, Default)]
pub(super) struct Input {
    buf: String,
    cursor: usize,
    history: Vec<String>,
    history_pos: Option<usize>,
}

impl Input {
    pub(super) fn as_str(&self) -> &str {
        &self.buf
    }

    pub(super) fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buf
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.buf.len())
    }

    fn len_chars(&self) -> usize {
        self.buf.chars().count()
    }

    pub(super) fn clear(&mut self) {
        self.buf.clear();
        self.cursor = 0;
        self.history_pos = None;
    }

    pub(super) fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.buf.insert(at, c);
        self.cursor += 1;
    }

    pub(super) fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.buf.remove(at);
    }

    pub(super) fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(super) fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len_chars());
    }

    fn set(&mut self, s: String) {
        self.buf = s;
        self.cursor = self.len_chars();
    }

    /// Returns the trimmed buffer, records it in history and clears the prompt.
    pub(super) fn submit(&mut self) -> String {
        let line = self.buf.trim().to_string();
        if !line.is_empty() && self.history.last() != Some(&line) {
            self.history.push(line.clone());
        }
        self.clear();
        line
    }

    pub(super) fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = match self.history_pos {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.history_pos = Some(next);
        self.set(self.history[next].clone());
    }

    pub(super) fn history_down(&mut self) {
        let Some(i) = self.history_pos else {
            return;
        };
        if i + 1 >= self.history.len() {
            self.clear();
            return;
        }
        self.history_pos = Some(i + 1);
        self.set(self.history[i + 1].clone());
    }
}

#[cfg(test)]
#[path = "../tests/tui/input_tests.rs"]
mod tests;
