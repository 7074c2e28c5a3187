//! Edit Buffer
//!
//! Multi-line text document with a byte-addressed cursor. The cursor column
//! is a byte offset that always sits on a UTF-8 char boundary (or at line
//! end), and every operation preserves that by construction.

/// Zero-based cursor location: `column` is a byte offset into the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

/// Ordered sequence of text lines plus the cursor editing them. Never
/// empty: a document always holds at least one (possibly blank) line.
#[derive(Debug, Clone)]
pub struct EditBuffer {
    lines: Vec<String>,
    cursor: CursorPosition,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EditBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: CursorPosition::default(),
        }
    }

    /// Builds a buffer from existing lines, cursor at the document head.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            cursor: CursorPosition::default(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn current_line(&self) -> &str {
        &self.lines[self.cursor.line]
    }

    /// The whole document, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Places the cursor, clamping the line into range and the column onto
    /// the nearest char boundary at or before the requested offset.
    pub fn set_cursor(&mut self, line: usize, column: usize) {
        self.cursor.line = line.min(self.lines.len() - 1);
        self.cursor.column = boundary_at_or_before(self.current_line_ref(), column);
    }

    pub fn on_line_head(&self) -> bool {
        self.cursor.column == 0
    }

    pub fn on_line_end(&self) -> bool {
        self.cursor.column >= self.current_line().len()
    }

    pub fn on_document_head(&self) -> bool {
        self.cursor.line == 0 && self.cursor.column == 0
    }

    /// Inserts the bytes of exactly one character (one ASCII byte or one
    /// whole UTF-8 rune) at the cursor.
    ///
    /// # Panics
    ///
    /// Panics on empty input: a zero-length insertion is a programmer
    /// error, not a recoverable state.
    pub fn insert(&mut self, text: &str) {
        assert!(!text.is_empty(), "insert called with empty input");
        let CursorPosition { line, column } = self.cursor;
        self.lines[line].insert_str(column, text);
        self.cursor.column += text.len();
    }

    /// Splits the current line at the cursor: the suffix becomes a new line
    /// inserted immediately after, and the cursor moves to its head. All
    /// following lines shift down by one.
    pub fn split_line(&mut self) {
        let CursorPosition { line, column } = self.cursor;
        let suffix = self.lines[line].split_off(column);
        self.lines.insert(line + 1, suffix);
        self.cursor.line += 1;
        self.cursor.column = 0;
    }

    /// Deletes the character before the cursor. At a line head the current
    /// line merges onto the end of the previous one; at the document head
    /// this is a no-op.
    pub fn backspace(&mut self) {
        let CursorPosition { line, column } = self.cursor;
        if column == 0 {
            if line == 0 {
                return;
            }
            let removed = self.lines.remove(line);
            let merge_at = self.lines[line - 1].len();
            self.lines[line - 1].push_str(&removed);
            self.cursor.line -= 1;
            self.cursor.column = merge_at;
        } else {
            let start = boundary_at_or_before(&self.lines[line], column - 1);
            self.lines[line].replace_range(start..column, "");
            self.cursor.column = start;
        }
    }

    /// Deletes the character at the cursor without moving it. At a line end
    /// the next line merges onto the current one; on the last line this is
    /// a no-op.
    pub fn delete_forward(&mut self) {
        let CursorPosition { line, column } = self.cursor;
        if column >= self.lines[line].len() {
            if line + 1 < self.lines.len() {
                let next = self.lines.remove(line + 1);
                self.lines[line].push_str(&next);
            }
            return;
        }
        let end = boundary_after(&self.lines[line], column + 1);
        self.lines[line].replace_range(column..end, "");
    }

    pub fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.clamp_column();
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor.line + 1 < self.lines.len() {
            self.cursor.line += 1;
            self.clamp_column();
        }
    }

    /// Moves one character left, crossing multi-byte characters atomically.
    /// At a line head the cursor wraps to the end of the previous line; at
    /// the document head this is a no-op.
    pub fn move_left(&mut self) {
        if self.cursor.column > 0 {
            self.cursor.column = boundary_at_or_before(self.current_line_ref(), self.cursor.column - 1);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.column = self.current_line().len();
        }
    }

    /// Moves one character right. Does not wrap at a line end.
    pub fn move_right(&mut self) {
        let line = self.current_line_ref();
        if self.cursor.column < line.len() {
            self.cursor.column = boundary_after(line, self.cursor.column + 1);
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor.column = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor.column = self.current_line().len();
    }

    /// Visible (display cell) column for the current cursor position. A
    /// multi-byte rune counts its leading byte plus one extra cell for its
    /// continuation run, approximating double-width rendering.
    pub fn visible_column(&self) -> usize {
        visible_width_until(self.current_line(), self.cursor.column)
    }

    /// Visible width of the whole current line.
    pub fn visible_line_width(&self) -> usize {
        let line = self.current_line();
        visible_width_until(line, line.len())
    }

    fn clamp_column(&mut self) {
        let line = self.current_line_ref();
        self.cursor.column = boundary_at_or_before(line, self.cursor.column.min(line.len()));
    }

    // Borrow helper: current line without holding &self across a cursor
    // mutation.
    fn current_line_ref(&self) -> &str {
        &self.lines[self.cursor.line]
    }
}

/// Nearest char boundary at or before `at` (clamped to the line length).
/// End-of-line is always a valid boundary.
fn boundary_at_or_before(s: &str, at: usize) -> usize {
    let mut i = at.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Nearest char boundary at or after `at` (clamped to the line length).
fn boundary_after(s: &str, at: usize) -> usize {
    let mut i = at.min(s.len());
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Walks the line once, counting one cell per non-continuation byte and one
/// extra cell per run of continuation bytes, stopping at byte offset `stop`.
fn visible_width_until(line: &str, stop: usize) -> usize {
    let mut count = 0;
    let mut in_run = false;
    for (i, b) in line.bytes().enumerate() {
        if i >= stop {
            break;
        }
        if b & 0xc0 == 0x80 {
            if !in_run {
                count += 1;
            }
            in_run = true;
        } else {
            in_run = false;
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EditBuffer {
        EditBuffer::from_lines([
            "Haruninari",
            "Nosonoso",
            "Kumasan",
            "Okimashita",
            "Aayokunetato",
            "Akubishinagara",
        ])
    }

    #[test]
    fn test_new_buffer_has_one_blank_line() {
        let buf = EditBuffer::new();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.current_line(), "");
        assert!(buf.on_document_head());
    }

    #[test]
    fn test_split_line_in_middle() {
        let mut buf = sample();
        buf.set_cursor(3, 5);
        buf.split_line();
        assert_eq!(buf.lines()[3], "Okima");
        assert_eq!(buf.lines()[4], "shita");
        assert_eq!(buf.lines()[5], "Aayokunetato");
        assert_eq!(buf.line_count(), 7);
        assert_eq!(buf.cursor(), CursorPosition { line: 4, column: 0 });
    }

    #[test]
    fn test_split_line_preserves_content() {
        // Splitting anywhere must neither lose nor duplicate text.
        let positions = [(0, 0), (3, 0), (3, 10), (5, 14), (5, 13)];
        for (line, column) in positions {
            let mut buf = sample();
            let joined = buf.lines().concat();
            buf.set_cursor(line, column);
            buf.split_line();
            assert_eq!(buf.lines().concat(), joined, "split at {line}:{column}");
            assert_eq!(buf.line_count(), 7);
        }
    }

    #[test]
    fn test_split_at_line_head_inserts_blank_before_content() {
        let mut buf = sample();
        buf.set_cursor(3, 0);
        buf.split_line();
        assert_eq!(buf.lines()[3], "");
        assert_eq!(buf.lines()[4], "Okimashita");
        assert_eq!(buf.cursor(), CursorPosition { line: 4, column: 0 });
    }

    #[test]
    fn test_split_at_line_end_inserts_blank_after() {
        let mut buf = sample();
        buf.set_cursor(3, 10);
        buf.split_line();
        assert_eq!(buf.lines()[3], "Okimashita");
        assert_eq!(buf.lines()[4], "");
    }

    #[test]
    fn test_backspace_at_line_head_merges_lines() {
        let mut buf = sample();
        buf.set_cursor(3, 0);
        buf.backspace();
        assert_eq!(buf.lines()[2], "KumasanOkimashita");
        assert_eq!(buf.lines()[3], "Aayokunetato");
        assert_eq!(buf.line_count(), 5);
        assert_eq!(buf.cursor(), CursorPosition { line: 2, column: 7 });
    }

    #[test]
    fn test_backspace_at_document_head_is_noop() {
        let mut buf = sample();
        buf.backspace();
        assert_eq!(buf.line_count(), 6);
        assert_eq!(buf.lines()[0], "Haruninari");
        assert!(buf.on_document_head());
    }

    #[test]
    fn test_backspace_removes_whole_multibyte_char() {
        let mut buf = EditBuffer::from_lines(["aあb"]);
        buf.set_cursor(0, 4); // after あ
        buf.backspace();
        assert_eq!(buf.lines()[0], "ab");
        assert_eq!(buf.cursor().column, 1);
    }

    #[test]
    fn test_delete_forward_in_line() {
        let mut buf = EditBuffer::from_lines(["aあb"]);
        buf.set_cursor(0, 1);
        buf.delete_forward();
        assert_eq!(buf.lines()[0], "ab");
        assert_eq!(buf.cursor().column, 1);
    }

    #[test]
    fn test_delete_forward_at_line_end_merges_next_line() {
        let mut buf = sample();
        buf.set_cursor(2, 7);
        buf.delete_forward();
        assert_eq!(buf.lines()[2], "KumasanOkimashita");
        assert_eq!(buf.line_count(), 5);
        assert_eq!(buf.cursor(), CursorPosition { line: 2, column: 7 });
    }

    #[test]
    fn test_delete_forward_at_document_end_is_noop() {
        let mut buf = sample();
        buf.set_cursor(5, 14);
        buf.delete_forward();
        assert_eq!(buf.line_count(), 6);
        assert_eq!(buf.lines()[5], "Akubishinagara");
    }

    #[test]
    fn test_insert_advances_cursor_by_byte_length() {
        let mut buf = sample();
        buf.set_cursor(1, 3);
        buf.insert("ね");
        assert_eq!(buf.lines()[1], "Nosねonoso");
        assert_eq!(buf.cursor().column, 6);
        buf.move_left();
        assert_eq!(buf.cursor().column, 3);
    }

    #[test]
    #[should_panic(expected = "empty input")]
    fn test_insert_empty_panics() {
        EditBuffer::new().insert("");
    }

    #[test]
    fn test_up_down_clamp_at_document_edges() {
        let mut buf = sample();
        buf.move_up();
        assert_eq!(buf.cursor().line, 0);
        buf.set_cursor(5, 2);
        buf.move_down();
        assert_eq!(buf.cursor().line, 5);
        assert_eq!(buf.cursor().column, 2);
    }

    #[test]
    fn test_vertical_move_clamps_column_to_shorter_line() {
        let mut buf = sample();
        buf.set_cursor(4, 12); // end of Aayokunetato
        buf.move_up();
        assert_eq!(buf.cursor(), CursorPosition { line: 3, column: 10 });
    }

    #[test]
    fn test_vertical_move_lands_on_char_boundary() {
        let mut buf = EditBuffer::from_lines(["aaaa", "bあcd"]);
        buf.set_cursor(0, 3);
        buf.move_down();
        // Column 3 is inside あ; the cursor walks back to its start.
        assert_eq!(buf.cursor(), CursorPosition { line: 1, column: 1 });
    }

    #[test]
    fn test_left_right_cross_multibyte_atomically() {
        let mut buf = EditBuffer::from_lines(["aあb"]);
        buf.set_cursor(0, 0);
        buf.move_right();
        assert_eq!(buf.cursor().column, 1);
        buf.move_right();
        assert_eq!(buf.cursor().column, 4);
        buf.move_right();
        assert_eq!(buf.cursor().column, 5);
        buf.move_right(); // at line end, no wrap
        assert_eq!(buf.cursor().column, 5);
        buf.move_left();
        assert_eq!(buf.cursor().column, 4);
        buf.move_left();
        assert_eq!(buf.cursor().column, 1);
    }

    #[test]
    fn test_left_at_line_head_wraps_to_previous_line_end() {
        let mut buf = sample();
        buf.set_cursor(1, 0);
        buf.move_left();
        assert_eq!(buf.cursor(), CursorPosition { line: 0, column: 10 });
    }

    #[test]
    fn test_left_at_document_head_is_noop() {
        let mut buf = sample();
        buf.move_left();
        assert!(buf.on_document_head());
    }

    #[test]
    fn test_visible_column_counts_multibyte_as_two_cells() {
        let mut buf = EditBuffer::from_lines(["aあb"]);
        buf.set_cursor(0, 1);
        assert_eq!(buf.visible_column(), 1);
        buf.set_cursor(0, 4);
        // 'a' (1) + あ (1 lead + 1 continuation run) = 3 cells.
        assert_eq!(buf.visible_column(), 3);
        assert_eq!(buf.visible_line_width(), 4);
    }

    #[test]
    fn test_text_round_trip() {
        let buf = sample();
        assert_eq!(
            buf.text(),
            "Haruninari\nNosonoso\nKumasan\nOkimashita\nAayokunetato\nAkubishinagara"
        );
    }

    #[test]
    fn test_set_cursor_clamps_into_boundary() {
        let mut buf = EditBuffer::from_lines(["あいう"]);
        buf.set_cursor(9, 4);
        assert_eq!(buf.cursor().line, 0);
        assert_eq!(buf.cursor().column, 3); // inside い walks back to its start
    }
}
