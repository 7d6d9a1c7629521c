// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Line storage and the primitive cursor-addressed edits.

/// A cursor position in the buffer, addressed in characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Column in characters from the start of the line.
    pub col: usize,
    /// Row index into the line vector.
    pub row: usize,
}

/// A vector of lines plus a cursor.
///
/// The buffer always contains at least one (possibly empty) line. Columns
/// count characters; conversion to byte offsets happens internally, so every
/// edit lands on a character boundary. A stale column beyond the end of the
/// current line (left behind by vertical motion) is treated as the line end
/// by the editing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: Cursor,
}

/// Byte offset of character `col` in `line`, saturating at the line end.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

/// Length of `line` in characters.
fn char_len(line: &str) -> usize {
    line.chars().count()
}

impl TextBuffer {
    /// Creates a buffer holding a single empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Cursor::default(),
        }
    }

    /// Creates a buffer from existing lines, cursor at the origin.
    ///
    /// An empty vector still produces the single-empty-line buffer.
    pub fn from_lines(lines: Vec<String>) -> Self {
        let mut buffer = Self::new();
        buffer.replace_lines(lines);
        buffer.cursor = Cursor::default();
        buffer
    }

    /// All lines in order.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The line at `row`, if it exists.
    #[inline]
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// Number of lines; always at least 1.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The current cursor position.
    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The line the cursor is on.
    pub fn current_line(&self) -> &str {
        &self.lines[self.cursor.row.min(self.lines.len() - 1)]
    }

    /// Whether a backspace at the current position would be a no-op.
    pub fn at_buffer_start(&self) -> bool {
        let row = self.cursor.row.min(self.lines.len() - 1);
        row == 0 && self.cursor.col.min(char_len(&self.lines[0])) == 0
    }

    /// Inserts `text` at the cursor and advances the cursor past it.
    ///
    /// The text is inserted into the current line as-is; it is not split on
    /// newlines (see [`insert_newline`](Self::insert_newline) for breaking a
    /// line).
    pub fn insert_text(&mut self, text: &str) {
        let row = self.cursor.row.min(self.lines.len() - 1);
        let line = &mut self.lines[row];
        let col = self.cursor.col.min(char_len(line));
        line.insert_str(byte_index(line, col), text);
        self.cursor.row = row;
        self.cursor.col = col + char_len(text);
    }

    /// Breaks the current line at the cursor.
    ///
    /// The new line inherits the leading blanks (spaces and tabs) of the
    /// whole current line, and the cursor lands after that indentation.
    pub fn insert_newline(&mut self) {
        let row = self.cursor.row.min(self.lines.len() - 1);
        let col = self.cursor.col.min(char_len(&self.lines[row]));
        let at = byte_index(&self.lines[row], col);

        let indent: String = self.lines[row]
            .chars()
            .take_while(|&c| c == ' ' || c == '\t')
            .collect();
        let tail = self.lines[row].split_off(at);

        self.lines.insert(row + 1, format!("{indent}{tail}"));
        self.cursor.row = row + 1;
        self.cursor.col = char_len(&indent);
    }

    /// Deletes the character before the cursor.
    ///
    /// At column 0 the current line is merged into the previous one and the
    /// cursor lands at the join. At the very start of the buffer this is a
    /// no-op.
    pub fn backspace(&mut self) {
        let row = self.cursor.row.min(self.lines.len() - 1);
        let col = self.cursor.col.min(char_len(&self.lines[row]));

        if col > 0 {
            let at = byte_index(&self.lines[row], col - 1);
            self.lines[row].remove(at);
            self.cursor.row = row;
            self.cursor.col = col - 1;
        } else if row > 0 {
            let removed = self.lines.remove(row);
            let prev_len = char_len(&self.lines[row - 1]);
            self.lines[row - 1].push_str(&removed);
            self.cursor.row = row - 1;
            self.cursor.col = prev_len;
        }
    }

    /// Moves one column left, stopping at column 0.
    pub fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        }
    }

    /// Moves one column right, stopping at the end of the line.
    pub fn move_right(&mut self) {
        let row = self.cursor.row.min(self.lines.len() - 1);
        if self.cursor.col < char_len(&self.lines[row]) {
            self.cursor.col += 1;
        }
    }

    /// Moves one row up, clamping the column to the new line's length.
    pub fn move_up(&mut self) {
        if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.cursor.col.min(char_len(&self.lines[self.cursor.row]));
        }
    }

    /// Moves one row down, clamping the column to the new line's length.
    pub fn move_down(&mut self) {
        if self.cursor.row + 1 < self.lines.len() {
            self.cursor.row += 1;
            self.cursor.col = self.cursor.col.min(char_len(&self.lines[self.cursor.row]));
        }
    }

    /// Jumps to column 0.
    pub fn move_line_start(&mut self) {
        self.cursor.col = 0;
    }

    /// Jumps past the last character of the current line.
    pub fn move_line_end(&mut self) {
        let row = self.cursor.row.min(self.lines.len() - 1);
        self.cursor.col = char_len(&self.lines[row]);
    }

    /// Moves the cursor `rows` rows up, saturating at the first line. The
    /// column is left untouched.
    pub fn move_rows_up(&mut self, rows: usize) {
        self.cursor.row = self.cursor.row.saturating_sub(rows);
    }

    /// Moves the cursor `rows` rows down, saturating at the last line. The
    /// column is left untouched.
    pub fn move_rows_down(&mut self, rows: usize) {
        self.cursor.row = (self.cursor.row + rows).min(self.lines.len() - 1);
    }

    /// Finds the first occurrence of `query` at or after `from`, wrapping
    /// around the buffer end. Returns the match position, or `None` when the
    /// query is empty or absent.
    pub fn find_from(&self, from: Cursor, query: &str) -> Option<Cursor> {
        if query.is_empty() {
            return None;
        }
        let rows = self.lines.len();
        let start_row = from.row.min(rows - 1);

        // 0..=rows visits the starting row twice: first from the cursor
        // column, then from column 0 after wrapping.
        for step in 0..=rows {
            let row = (start_row + step) % rows;
            let line = &self.lines[row];
            let from_col = if step == 0 {
                from.col.min(char_len(line))
            } else {
                0
            };
            let from_byte = byte_index(line, from_col);
            if let Some(found) = line[from_byte..].find(query) {
                let at = from_byte + found;
                return Some(Cursor {
                    col: line[..at].chars().count(),
                    row,
                });
            }
        }
        None
    }

    /// Moves the cursor to `cursor`, without bounds checking. Callers that
    /// need a valid position should follow with [`clamp_cursor`](Self::clamp_cursor).
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Resets the cursor to the buffer origin.
    pub fn reset_cursor(&mut self) {
        self.cursor = Cursor::default();
    }

    /// Pulls the cursor back inside the buffer bounds.
    pub fn clamp_cursor(&mut self) {
        self.cursor.row = self.cursor.row.min(self.lines.len() - 1);
        self.cursor.col = self.cursor.col.min(char_len(&self.lines[self.cursor.row]));
    }

    /// Replaces the whole line vector, re-establishing the non-empty
    /// invariant and clamping the cursor into the new bounds.
    pub fn replace_lines(&mut self, mut lines: Vec<String>) {
        if lines.is_empty() {
            lines.push(String::new());
        }
        self.lines = lines;
        self.clamp_cursor();
    }

    /// The buffer serialized for saving: every line followed by `\n`.
    pub fn contents(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
