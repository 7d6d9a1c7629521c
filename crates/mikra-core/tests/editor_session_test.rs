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

use mikra_core::text::{highlight_line, Cursor, Document, SpanKind};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mikra_editor_session_{name}"))
}

/// Types a small C snippet the way key events would deliver it, one piece
/// at a time, and checks the buffer, the auto-indent, and the highlighter
/// agree on the result.
#[test]
fn typing_a_snippet_with_auto_indent() {
    let mut doc = Document::new();

    for ch in "int main() {".chars() {
        doc.insert_text(&ch.to_string());
    }
    doc.insert_newline();
    for ch in "    return 0;".chars() {
        doc.insert_text(&ch.to_string());
    }
    doc.insert_newline();
    doc.insert_text("}");

    assert_eq!(
        doc.buffer().lines(),
        &[
            "int main() {".to_string(),
            "    return 0;".to_string(),
            // The newline inherited the four leading spaces.
            "    }".to_string(),
        ]
    );

    let spans = highlight_line(doc.buffer().line(1).unwrap());
    let keywords: Vec<&str> = spans
        .iter()
        .filter(|s| s.kind == SpanKind::Keyword)
        .map(|s| s.text)
        .collect();
    assert_eq!(keywords, vec!["return"]);
}

/// A full session: edit, save, start a new file, reopen, search, undo.
/// Verifies the status line after each stage, since the demos surface it
/// verbatim.
#[test]
fn save_new_open_search_undo_session() {
    let path = temp_path("session.txt");
    let mut doc = Document::new();

    doc.insert_text("#include <iostream>");
    doc.insert_newline();
    doc.insert_text("int value = 42;");

    doc.save(Some(&path)).expect("save should succeed");
    assert_eq!(doc.status(), format!("File saved: {}", path.display()));

    doc.new_file();
    assert_eq!(doc.status(), "New file created");
    assert_eq!(doc.buffer().lines(), &[String::new()]);

    doc.open(&path).expect("open should succeed");
    assert_eq!(doc.status(), format!("File opened: {}", path.display()));
    assert_eq!(doc.buffer().line_count(), 2);
    assert_eq!(doc.cursor(), Cursor::default());

    assert!(doc.find_next("value"));
    assert_eq!(doc.status(), "Search activated for: value");
    assert_eq!(doc.cursor(), Cursor { col: 4, row: 1 });

    // Edit at the match, then unwind it.
    doc.insert_text("X");
    assert_eq!(doc.buffer().line(1), Some("int Xvalue = 42;"));
    doc.undo();
    assert_eq!(doc.buffer().line(1), Some("int value = 42;"));
    assert_eq!(doc.status(), "Undo performed");

    std::fs::remove_file(&path).ok();
}

/// The undo history survives opening a file, so stepping back past the
/// open restores the pre-open edits.
#[test]
fn undo_reaches_back_across_an_open() {
    let path = temp_path("across_open.txt");
    std::fs::write(&path, "from disk\n").expect("temp write should succeed");

    let mut doc = Document::new();
    doc.insert_text("typed before open");
    doc.open(&path).expect("open should succeed");
    assert_eq!(doc.buffer().current_line(), "from disk");

    // The open itself records no snapshot; undo rewinds the typing edit.
    doc.undo();
    assert_eq!(doc.buffer().current_line(), "");

    std::fs::remove_file(&path).ok();
}

/// Paging through a file longer than the window moves cursor and scroll in
/// lockstep and saturates cleanly at both ends.
#[test]
fn paging_through_a_long_file() {
    let path = temp_path("long.txt");
    let body: String = (0..100).map(|i| format!("row {i}\n")).collect();
    std::fs::write(&path, body).expect("temp write should succeed");

    let mut doc = Document::new();
    doc.open(&path).expect("open should succeed");
    std::fs::remove_file(&path).ok();

    for _ in 0..12 {
        doc.page_down(10);
    }
    assert_eq!(doc.cursor().row, 99);
    assert_eq!(doc.scroll(), 90);

    for _ in 0..12 {
        doc.page_up(10);
    }
    assert_eq!(doc.cursor().row, 0);
    assert_eq!(doc.scroll(), 0);
}
