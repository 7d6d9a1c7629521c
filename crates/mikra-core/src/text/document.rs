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

//! The editor document: buffer, history, clipboard, file binding, and the
//! status line every operation reports through.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use super::buffer::{Cursor, TextBuffer};
use super::history::History;

/// A text document under edit.
///
/// Wraps the [`TextBuffer`] with everything an editor session needs around
/// it: snapshot-based undo/redo, an internal clipboard, the bound file path,
/// the vertical scroll offset, the dark/light theme flag, and a status
/// message describing the last operation. Mutating operations snapshot the
/// line vector *before* the edit, so one undo step reverts one operation.
#[derive(Debug)]
pub struct Document {
    buffer: TextBuffer,
    history: History,
    clipboard: String,
    status: String,
    dark_theme: bool,
    scroll: usize,
    search_query: String,
    path: Option<PathBuf>,
}

impl Document {
    /// Creates an empty document with the dark theme and no bound file.
    pub fn new() -> Self {
        Self {
            buffer: TextBuffer::new(),
            history: History::new(),
            clipboard: String::new(),
            status: String::new(),
            dark_theme: true,
            scroll: 0,
            search_query: String::new(),
            path: None,
        }
    }

    // --- Accessors ---

    /// The underlying line buffer.
    #[inline]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The cursor position, in characters.
    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.buffer.cursor()
    }

    /// The status-bar message of the most recent operation.
    #[inline]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Replaces the status-bar message.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Whether the dark theme is active.
    #[inline]
    pub fn dark_theme(&self) -> bool {
        self.dark_theme
    }

    /// First visible row of the text area.
    #[inline]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// The file this document is bound to, if any.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The last confirmed search query.
    #[inline]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// The internal clipboard contents.
    #[inline]
    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    fn snapshot(&mut self) {
        self.history.record(self.buffer.lines().to_vec());
    }

    // --- Editing ---

    /// Inserts `text` at the cursor. One undo step per call.
    pub fn insert_text(&mut self, text: &str) {
        self.snapshot();
        self.buffer.insert_text(text);
    }

    /// Breaks the line at the cursor, inheriting leading blanks.
    pub fn insert_newline(&mut self) {
        self.snapshot();
        self.buffer.insert_newline();
    }

    /// Deletes the character before the cursor, merging lines at column 0.
    ///
    /// At the very start of the buffer nothing happens and no history entry
    /// is recorded.
    pub fn backspace(&mut self) {
        if self.buffer.at_buffer_start() {
            return;
        }
        self.snapshot();
        self.buffer.backspace();
    }

    /// Reverts the most recent edit, if any.
    pub fn undo(&mut self) {
        if let Some(previous) = self.history.undo(self.buffer.lines().to_vec()) {
            self.buffer.replace_lines(previous);
            self.status = "Undo performed".to_string();
        }
    }

    /// Re-applies the most recently undone edit, if any.
    pub fn redo(&mut self) {
        if let Some(next) = self.history.redo(self.buffer.lines().to_vec()) {
            self.buffer.replace_lines(next);
            self.status = "Redo performed".to_string();
        }
    }

    /// Copies the current line into the internal clipboard.
    pub fn copy_line(&mut self) {
        self.clipboard = self.buffer.current_line().to_string();
        self.status = "Text copied to clipboard".to_string();
    }

    /// Inserts the clipboard contents at the cursor. Empty clipboards paste
    /// nothing and leave the status untouched.
    pub fn paste(&mut self) {
        if self.clipboard.is_empty() {
            return;
        }
        self.snapshot();
        let text = self.clipboard.clone();
        self.buffer.insert_text(&text);
        self.status = "Text pasted from clipboard".to_string();
    }

    // --- Cursor motion ---

    /// Moves one column left.
    pub fn move_left(&mut self) {
        self.buffer.move_left();
    }

    /// Moves one column right.
    pub fn move_right(&mut self) {
        self.buffer.move_right();
    }

    /// Moves one row up.
    pub fn move_up(&mut self) {
        self.buffer.move_up();
    }

    /// Moves one row down.
    pub fn move_down(&mut self) {
        self.buffer.move_down();
    }

    /// Jumps to the start of the line.
    pub fn move_line_start(&mut self) {
        self.buffer.move_line_start();
    }

    /// Jumps to the end of the line.
    pub fn move_line_end(&mut self) {
        self.buffer.move_line_end();
    }

    /// Moves cursor and scroll up by `lines` rows, both saturating at the
    /// top of the buffer.
    pub fn page_up(&mut self, lines: usize) {
        self.buffer.move_rows_up(lines);
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Moves cursor and scroll down by `lines` rows. The cursor saturates
    /// at the last line; the scroll offset stops where a full page still
    /// fits (or at 0 for buffers shorter than a page).
    pub fn page_down(&mut self, lines: usize) {
        self.buffer.move_rows_down(lines);
        self.scroll = (self.scroll + lines).min(self.buffer.line_count().saturating_sub(lines));
    }

    // --- Search ---

    /// Confirms a search: remembers the query, reports it in the status
    /// line, and jumps to the first occurrence at or after the cursor,
    /// wrapping past the end of the buffer. Returns whether a match was
    /// found.
    pub fn find_next(&mut self, query: &str) -> bool {
        self.search_query = query.to_string();
        self.status = format!("Search activated for: {query}");
        match self.buffer.find_from(self.buffer.cursor(), query) {
            Some(hit) => {
                self.buffer.set_cursor(hit);
                true
            }
            None => false,
        }
    }

    // --- Files ---

    /// Resets to a single empty line with no bound file.
    ///
    /// The undo history is kept, so the reset itself can not be undone but
    /// older edits of the previous content can still be stepped back to.
    pub fn new_file(&mut self) {
        self.buffer.replace_lines(Vec::new());
        self.buffer.reset_cursor();
        self.scroll = 0;
        self.path = None;
        self.status = "New file created".to_string();
    }

    /// Loads `path` into the buffer, binding the document to it.
    ///
    /// On success the cursor and scroll reset to the top. On failure the
    /// buffer is left untouched and the error is also reflected in the
    /// status line.
    pub fn open(&mut self, path: &Path) -> Result<(), DocumentError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(source) => {
                self.status = format!("Error opening file: {}", path.display());
                return Err(DocumentError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        self.buffer
            .replace_lines(content.lines().map(String::from).collect());
        self.buffer.reset_cursor();
        self.scroll = 0;
        self.path = Some(path.to_path_buf());
        self.status = format!("File opened: {}", path.display());
        Ok(())
    }

    /// Writes the buffer to `path`, or to the bound path when `None`.
    ///
    /// Every line is terminated with `\n`. On success the document binds to
    /// the written path.
    pub fn save(&mut self, path: Option<&Path>) -> Result<(), DocumentError> {
        let target = match path.or(self.path.as_deref()) {
            Some(target) => target.to_path_buf(),
            None => {
                self.status = "No filename provided for saving.".to_string();
                return Err(DocumentError::NoPath);
            }
        };

        if let Err(source) = std::fs::write(&target, self.buffer.contents()) {
            self.status = format!("Error saving file: {}", target.display());
            return Err(DocumentError::Write {
                path: target,
                source,
            });
        }

        self.status = format!("File saved: {}", target.display());
        self.path = Some(target);
        Ok(())
    }

    // --- Theme ---

    /// Flips between the dark and light palettes.
    pub fn toggle_theme(&mut self) {
        self.dark_theme = !self.dark_theme;
        self.status = if self.dark_theme {
            "Dark theme enabled".to_string()
        } else {
            "Light theme enabled".to_string()
        };
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// An error from document file I/O.
#[derive(Debug)]
pub enum DocumentError {
    /// The file could not be read.
    Read {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The file could not be written.
    Write {
        /// The path that failed to save.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// A save was requested with no path bound and none provided.
    NoPath,
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Read { path, source } => {
                write!(f, "Failed to read '{}': {source}", path.display())
            }
            DocumentError::Write { path, source } => {
                write!(f, "Failed to write '{}': {source}", path.display())
            }
            DocumentError::NoPath => write!(f, "No file path bound to the document"),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::Read { source, .. } | DocumentError::Write { source, .. } => {
                Some(source)
            }
            DocumentError::NoPath => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(lines: &[&str]) -> Document {
        let mut doc = Document::new();
        doc.buffer
            .replace_lines(lines.iter().map(|s| s.to_string()).collect());
        doc
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mikra_document_test_{name}"))
    }

    #[test]
    fn typing_then_undo_then_redo() {
        let mut doc = Document::new();
        doc.insert_text("a");
        doc.insert_text("b");
        assert_eq!(doc.buffer().current_line(), "ab");

        doc.undo();
        assert_eq!(doc.buffer().current_line(), "a");
        assert_eq!(doc.status(), "Undo performed");

        doc.undo();
        assert_eq!(doc.buffer().current_line(), "");

        doc.redo();
        assert_eq!(doc.buffer().current_line(), "a");
        assert_eq!(doc.status(), "Redo performed");
    }

    #[test]
    fn undo_on_empty_history_changes_nothing() {
        let mut doc = doc_with(&["keep me"]);
        doc.set_status("initial");
        doc.undo();
        assert_eq!(doc.buffer().current_line(), "keep me");
        // No status change when there was nothing to undo.
        assert_eq!(doc.status(), "initial");
    }

    #[test]
    fn undo_clamps_a_cursor_left_past_the_restored_text() {
        let mut doc = Document::new();
        doc.insert_text("0123456789");
        assert_eq!(doc.cursor().col, 10);

        doc.undo();
        // The restored buffer is empty; the cursor cannot stay at column 10.
        assert_eq!(doc.cursor(), Cursor { col: 0, row: 0 });
    }

    #[test]
    fn backspace_at_origin_records_no_history() {
        let mut doc = Document::new();
        doc.backspace();
        doc.set_status("untouched");
        doc.undo();
        assert_eq!(doc.status(), "untouched");
    }

    #[test]
    fn copy_and_paste_round_trip() {
        let mut doc = doc_with(&["source line", ""]);
        doc.copy_line();
        assert_eq!(doc.status(), "Text copied to clipboard");
        assert_eq!(doc.clipboard(), "source line");

        doc.move_down();
        doc.paste();
        assert_eq!(doc.buffer().line(1), Some("source line"));
        assert_eq!(doc.status(), "Text pasted from clipboard");
    }

    #[test]
    fn empty_clipboard_pastes_nothing() {
        let mut doc = doc_with(&["text"]);
        doc.set_status("before");
        doc.paste();
        assert_eq!(doc.buffer().current_line(), "text");
        assert_eq!(doc.status(), "before");
    }

    #[test]
    fn page_motion_saturates_on_short_buffers() {
        let mut doc = doc_with(&["a", "b", "c"]);
        doc.page_down(10);
        assert_eq!(doc.cursor().row, 2);
        // A 3-line buffer cannot scroll a 10-line page anywhere.
        assert_eq!(doc.scroll(), 0);

        doc.page_up(10);
        assert_eq!(doc.cursor().row, 0);
        assert_eq!(doc.scroll(), 0);
    }

    #[test]
    fn page_down_walks_scroll_and_cursor_together() {
        let lines: Vec<String> = (0..40).map(|i| format!("line {i}")).collect();
        let mut doc = Document::new();
        doc.buffer.replace_lines(lines);

        doc.page_down(10);
        assert_eq!(doc.cursor().row, 10);
        assert_eq!(doc.scroll(), 10);

        doc.page_down(10);
        doc.page_down(10);
        doc.page_down(10);
        assert_eq!(doc.cursor().row, 39);
        // Scroll stops where the last full page starts.
        assert_eq!(doc.scroll(), 30);
    }

    #[test]
    fn find_reports_and_jumps() {
        let mut doc = doc_with(&["alpha", "needle beta", "needle gamma"]);

        assert!(doc.find_next("needle"));
        assert_eq!(doc.status(), "Search activated for: needle");
        assert_eq!(doc.cursor(), Cursor { col: 0, row: 1 });
        assert_eq!(doc.search_query(), "needle");

        // From just past the first hit, the search wraps forward.
        doc.move_right();
        assert!(doc.find_next("needle"));
        assert_eq!(doc.cursor(), Cursor { col: 0, row: 2 });
    }

    #[test]
    fn find_miss_still_reports_the_query() {
        let mut doc = doc_with(&["nothing here"]);
        assert!(!doc.find_next("absent"));
        assert_eq!(doc.status(), "Search activated for: absent");
        assert_eq!(doc.cursor(), Cursor { col: 0, row: 0 });
    }

    #[test]
    fn new_file_resets_everything_but_history() {
        let mut doc = doc_with(&["old content"]);
        doc.insert_text("!");
        doc.page_down(1);
        doc.new_file();

        assert_eq!(doc.buffer().lines(), &[String::new()]);
        assert_eq!(doc.cursor(), Cursor::default());
        assert_eq!(doc.scroll(), 0);
        assert!(doc.path().is_none());
        assert_eq!(doc.status(), "New file created");

        // The pre-reset content is still reachable through undo.
        doc.undo();
        assert_eq!(doc.buffer().current_line(), "old content");
    }

    #[test]
    fn save_and_reopen_round_trip() {
        let path = temp_path("roundtrip.txt");
        let mut doc = doc_with(&["first", "second"]);

        doc.save(Some(&path)).expect("save should succeed");
        assert_eq!(doc.status(), format!("File saved: {}", path.display()));
        assert_eq!(doc.path(), Some(path.as_path()));

        let mut reopened = Document::new();
        reopened.open(&path).expect("open should succeed");
        std::fs::remove_file(&path).ok();

        assert_eq!(
            reopened.buffer().lines(),
            &["first".to_string(), "second".to_string()]
        );
        assert_eq!(
            reopened.status(),
            format!("File opened: {}", path.display())
        );
        assert_eq!(reopened.cursor(), Cursor::default());
    }

    #[test]
    fn save_without_any_path_is_rejected() {
        let mut doc = Document::new();
        match doc.save(None) {
            Err(DocumentError::NoPath) => {}
            other => panic!("expected NoPath, got {other:?}"),
        }
        assert_eq!(doc.status(), "No filename provided for saving.");
    }

    #[test]
    fn save_rebinds_to_the_written_path() {
        let path = temp_path("rebind.txt");
        let mut doc = Document::new();
        doc.insert_text("content");

        doc.save(Some(&path)).expect("save should succeed");
        // A later pathless save reuses the binding.
        doc.insert_text("!");
        doc.save(None).expect("pathless save should reuse the bound path");
        let on_disk = std::fs::read_to_string(&path).expect("file should exist");
        std::fs::remove_file(&path).ok();
        assert_eq!(on_disk, "content!\n");
    }

    #[test]
    fn open_missing_file_keeps_buffer_and_reports() {
        let path = temp_path("does_not_exist.txt");
        let mut doc = doc_with(&["untouched"]);

        match doc.open(&path) {
            Err(DocumentError::Read { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected a read error, got {other:?}"),
        }
        assert_eq!(doc.buffer().current_line(), "untouched");
        assert_eq!(
            doc.status(),
            format!("Error opening file: {}", path.display())
        );
        assert!(doc.path().is_none());
    }

    #[test]
    fn open_empty_file_yields_one_empty_line() {
        let path = temp_path("empty.txt");
        std::fs::write(&path, "").expect("temp write should succeed");

        let mut doc = Document::new();
        doc.open(&path).expect("open should succeed");
        std::fs::remove_file(&path).ok();

        assert_eq!(doc.buffer().lines(), &[String::new()]);
    }

    #[test]
    fn theme_toggle_flips_and_reports() {
        let mut doc = Document::new();
        assert!(doc.dark_theme());

        doc.toggle_theme();
        assert!(!doc.dark_theme());
        assert_eq!(doc.status(), "Light theme enabled");

        doc.toggle_theme();
        assert!(doc.dark_theme());
        assert_eq!(doc.status(), "Dark theme enabled");
    }

    #[test]
    fn error_display_names_the_path() {
        let err = DocumentError::Write {
            path: PathBuf::from("out.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let text = err.to_string();
        assert!(text.contains("out.txt"));
        assert!(text.contains("denied"));
        assert_eq!(DocumentError::NoPath.to_string(), "No file path bound to the document");
    }
}
