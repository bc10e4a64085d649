use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line text field used for answer entry, search, and user names.
/// The cursor is a char index into `value`.
#[derive(Clone, Debug, Default)]
pub struct LineInput {
    value: String,
    cursor: usize,
}

impl LineInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Take the current value, leaving the field empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, ch: char) {
        let idx = self.byte_index();
        self.value.insert(idx, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index();
        self.value.remove(idx);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Route an editing key into the field. Returns true if the key was
    /// consumed; Enter and Esc are left for the caller.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('u') {
                self.clear();
                return true;
            }
            return false;
        }
        match key.code {
            KeyCode::Char(ch) => {
                self.insert(ch);
                true
            }
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            KeyCode::Delete => {
                self.delete();
                true
            }
            KeyCode::Left => {
                self.move_left();
                true
            }
            KeyCode::Right => {
                self.move_right();
                true
            }
            KeyCode::Home => {
                self.move_home();
                true
            }
            KeyCode::End => {
                self.move_end();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> LineInput {
        let mut input = LineInput::new();
        for ch in text.chars() {
            input.insert(ch);
        }
        input
    }

    #[test]
    fn insert_and_backspace_at_cursor() {
        let mut input = typed("word");
        input.move_left();
        input.insert('l');
        assert_eq!(input.value(), "world");

        input.backspace();
        assert_eq!(input.value(), "word");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut input = typed("ab");
        input.move_home();
        input.backspace();
        assert_eq!(input.value(), "ab");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn delete_removes_under_cursor() {
        let mut input = typed("abc");
        input.move_home();
        input.delete();
        assert_eq!(input.value(), "bc");
        input.move_end();
        input.delete();
        assert_eq!(input.value(), "bc");
    }

    #[test]
    fn multibyte_chars_edit_cleanly() {
        let mut input = typed("버리다");
        assert_eq!(input.cursor(), 3);
        input.backspace();
        assert_eq!(input.value(), "버리");
        input.move_home();
        input.insert('다');
        assert_eq!(input.value(), "다버리");
    }

    #[test]
    fn take_drains_and_resets() {
        let mut input = typed("hello");
        assert_eq!(input.take(), "hello");
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn ctrl_u_clears_the_line() {
        let mut input = typed("abandon");
        let consumed = input.handle_key(KeyEvent::new(
            KeyCode::Char('u'),
            KeyModifiers::CONTROL,
        ));
        assert!(consumed);
        assert!(input.is_empty());
    }

    #[test]
    fn enter_is_not_consumed() {
        let mut input = typed("x");
        let consumed = input.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(!consumed);
        assert_eq!(input.value(), "x");
    }
}
