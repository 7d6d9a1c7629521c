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

//! Rudimentary keyword highlighting for C-family source lines.
//!
//! A line is split into runs of word characters and runs of delimiters.
//! Word runs matching one of the [`KEYWORDS`] are tagged for the renderer;
//! everything else stays plain. There is no real lexer here: strings and
//! comments are not recognized, matching the intentionally small scope.

/// Tokens highlighted as keywords, compared against whole word runs.
pub const KEYWORDS: [&str; 15] = [
    "int", "return", "if", "else", "for", "while", "struct", "void", "#include", "using",
    "namespace", "std", "class", "break", "continue",
];

/// How a span should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Default text color.
    Plain,
    /// Keyword accent color.
    Keyword,
}

/// A classified slice of a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    /// Render classification.
    pub kind: SpanKind,
    /// The underlying text, borrowed from the line.
    pub text: &'a str,
}

/// Whether `token` is one of the highlighted keywords.
pub fn is_keyword(token: &str) -> bool {
    KEYWORDS.contains(&token)
}

/// Characters that form word runs. `#` is included so that preprocessor
/// directives like `#include` classify as single tokens.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '#'
}

/// Splits `line` into contiguous spans covering the whole line.
///
/// Adjacent characters of the same class (word / delimiter) share a span;
/// concatenating the spans reproduces the input exactly. An empty line
/// yields no spans.
pub fn highlight_line(line: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut run_start = 0;
    let mut run_is_word = None;

    for (i, c) in line.char_indices() {
        let word = is_word_char(c);
        match run_is_word {
            Some(current) if current == word => {}
            Some(current) => {
                spans.push(classify(&line[run_start..i], current));
                run_start = i;
                run_is_word = Some(word);
            }
            None => run_is_word = Some(word),
        }
    }
    if let Some(current) = run_is_word {
        spans.push(classify(&line[run_start..], current));
    }
    spans
}

fn classify(text: &str, is_word: bool) -> Span<'_> {
    let kind = if is_word && is_keyword(text) {
        SpanKind::Keyword
    } else {
        SpanKind::Plain
    };
    Span { kind, text }
}
