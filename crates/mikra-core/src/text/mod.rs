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

//! The text editing model.
//!
//! [`buffer`] holds lines and a cursor and performs the primitive edits.
//! [`history`] keeps bounded undo/redo snapshots of the line vector.
//! [`document`] ties both together with the clipboard, file binding, theme,
//! scroll position, and the status-bar messages every operation reports.
//! [`highlight`] splits a line into keyword/plain spans for rendering.
//!
//! Everything in here is cursor- and column-addressed in **characters**, not
//! bytes, so multi-byte input behaves like any other glyph.

pub mod buffer;
pub mod document;
pub mod highlight;
pub mod history;

pub use buffer::{Cursor, TextBuffer};
pub use document::{Document, DocumentError};
pub use highlight::{highlight_line, Span, SpanKind};
pub use history::History;
