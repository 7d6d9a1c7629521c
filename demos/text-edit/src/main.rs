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

//! A minimal plain-text editor on the Mikra shell: line numbers, C-family
//! keyword highlighting, snapshot undo/redo, and file open/save. All the
//! editing logic lives in [`Document`]; this binary only maps keys to
//! document operations and paints the result once per frame.

use std::path::Path;

use anyhow::Result;
use mikra_core::input::{InputEvent, Modifiers};
use mikra_core::math::LinearRgba;
use mikra_core::text::{highlight_line, Document, SpanKind};
use mikra_core::ShellConfig;
use mikra_shell::{dialog, run, Application, Painter, ShellContext};

/// Height of the status bar at the bottom of the window, in pixels.
const STATUS_BAR_HEIGHT: f32 = 24.0;

/// Vertical distance between consecutive text rows, in pixels.
const LINE_HEIGHT: f32 = 20.0;

/// Padding between the window edge and the first column of content.
const MARGIN: f32 = 10.0;

/// Width reserved for the line-number column, in pixels.
const LINE_NUMBER_WIDTH: f32 = 40.0;

/// Rows jumped by PageUp / PageDown.
const PAGE_JUMP: usize = 10;

/// Default target for Ctrl+S when the document is not bound to a file yet.
const FALLBACK_SAVE_PATH: &str = "output.txt";

/// The palette for one theme, resolved from the document's dark/light flag.
struct Theme {
    background: LinearRgba,
    plain: LinearRgba,
    keyword: LinearRgba,
    line_number: LinearRgba,
    status_fill: LinearRgba,
    cursor: LinearRgba,
}

impl Theme {
    fn for_document(doc: &Document) -> Self {
        if doc.dark_theme() {
            Self {
                background: LinearRgba::from_srgb_u8(30, 30, 30),
                plain: LinearRgba::from_srgb_u8(230, 230, 230),
                keyword: LinearRgba::from_srgb_u8(0, 200, 255),
                line_number: LinearRgba::from_srgb_u8(150, 150, 150),
                status_fill: LinearRgba::from_srgb_u8(50, 50, 50),
                cursor: LinearRgba::from_srgb_u8(255, 0, 0),
            }
        } else {
            Self {
                background: LinearRgba::from_srgb_u8(255, 255, 255),
                plain: LinearRgba::from_srgb_u8(0, 0, 0),
                keyword: LinearRgba::from_srgb_u8(0, 0, 200),
                line_number: LinearRgba::from_srgb_u8(100, 100, 100),
                status_fill: LinearRgba::from_srgb_u8(220, 220, 220),
                cursor: LinearRgba::from_srgb_u8(0, 0, 0),
            }
        }
    }
}

/// The editor application: a [`Document`] plus the transient state of the
/// status-bar search prompt.
struct EditorApp {
    doc: Document,
    /// Query being typed while the search prompt is open; `None` otherwise.
    prompt: Option<String>,
}

impl EditorApp {
    /// Keystrokes while the search prompt is open. Every key is consumed so
    /// the document does not edit underneath the prompt.
    fn handle_prompt_key(&mut self, key_code: &str) {
        match key_code {
            "Enter" => {
                let query = self.prompt.take().unwrap_or_default();
                if !query.is_empty() {
                    self.doc.find_next(&query);
                }
            }
            "Escape" => {
                self.prompt = None;
            }
            "Backspace" => {
                if let Some(query) = self.prompt.as_mut() {
                    query.pop();
                }
            }
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key_code: &str, modifiers: Modifiers) {
        let ctrl = modifiers.control;
        match key_code {
            "Enter" => self.doc.insert_newline(),
            "Backspace" => self.doc.backspace(),
            "ArrowLeft" if ctrl => self.doc.move_line_start(),
            "ArrowLeft" => self.doc.move_left(),
            "ArrowRight" if ctrl => self.doc.move_line_end(),
            "ArrowRight" => self.doc.move_right(),
            "ArrowUp" => self.doc.move_up(),
            "ArrowDown" => self.doc.move_down(),
            "PageUp" => self.doc.page_up(PAGE_JUMP),
            "PageDown" => self.doc.page_down(PAGE_JUMP),
            "KeyZ" if ctrl => self.doc.undo(),
            "KeyY" if ctrl => self.doc.redo(),
            "KeyS" if ctrl => self.save(),
            "KeyO" if ctrl => self.open_from_dialog(),
            "KeyN" if ctrl => self.doc.new_file(),
            "KeyC" if ctrl => self.doc.copy_line(),
            "KeyV" if ctrl => self.doc.paste(),
            "KeyT" if ctrl => self.doc.toggle_theme(),
            "KeyF" if ctrl => self.prompt = Some(String::new()),
            _ => {}
        }
    }

    /// Ctrl+S. Documents not bound to a file yet fall back to
    /// [`FALLBACK_SAVE_PATH`]. Failures already show up in the status bar,
    /// so they are only logged here.
    fn save(&mut self) {
        let result = if self.doc.path().is_none() {
            self.doc.save(Some(Path::new(FALLBACK_SAVE_PATH)))
        } else {
            self.doc.save(None)
        };
        if let Err(e) = result {
            log::warn!("Save failed: {e}");
        }
    }

    /// Ctrl+O. A cancelled dialog leaves the document untouched.
    fn open_from_dialog(&mut self) {
        if let Some(path) = dialog::pick_file() {
            if let Err(e) = self.doc.open(&path) {
                log::warn!("Open failed: {e}");
            }
        }
    }

    /// Line numbers and highlighted text for every row the viewport fits
    /// above the status bar.
    fn draw_text_area(&self, painter: &mut Painter, theme: &Theme, height: f32) {
        let first = self.doc.scroll();
        let max_rows = ((height - STATUS_BAR_HEIGHT - MARGIN) / LINE_HEIGHT).max(0.0) as usize;
        for i in 0..max_rows {
            let line = match self.doc.buffer().line(first + i) {
                Some(line) => line,
                None => break,
            };
            let y = MARGIN + i as f32 * LINE_HEIGHT;
            let number = (first + i + 1).to_string();
            painter.text(&number, MARGIN, y, theme.line_number);

            let mut x = MARGIN + LINE_NUMBER_WIDTH;
            for span in highlight_line(line) {
                let color = match span.kind {
                    SpanKind::Keyword => theme.keyword,
                    SpanKind::Plain => theme.plain,
                };
                x += painter.text(span.text, x, y, color);
            }
        }
    }

    /// A 2 px vertical bar at the measured width of the text before the
    /// cursor. Rows scrolled out of the viewport land off-screen and are
    /// clipped, matching the page-key-driven scrolling model.
    fn draw_cursor(&self, painter: &mut Painter, theme: &Theme) {
        let cursor = self.doc.buffer().cursor();
        let row_on_screen = cursor.row as f32 - self.doc.scroll() as f32;
        let y = MARGIN + row_on_screen * LINE_HEIGHT;

        let prefix: String = self
            .doc
            .buffer()
            .current_line()
            .chars()
            .take(cursor.col)
            .collect();
        let x = MARGIN + LINE_NUMBER_WIDTH + painter.measure_text(&prefix);
        painter.rect(x, y, 2.0, LINE_HEIGHT, theme.cursor);
    }

    /// The full-width bar along the bottom edge. While the search prompt is
    /// open it shows the query being typed instead of the document status.
    fn draw_status_bar(&self, painter: &mut Painter, theme: &Theme, width: f32, height: f32) {
        let top = height - STATUS_BAR_HEIGHT;
        painter.rect(0.0, top, width, STATUS_BAR_HEIGHT, theme.status_fill);

        let message = match &self.prompt {
            Some(query) => format!("Find: {query}"),
            None => self.doc.status().to_string(),
        };
        let text_y = top + (STATUS_BAR_HEIGHT - LINE_HEIGHT) / 2.0;
        painter.text(&message, MARGIN, text_y, theme.plain);
    }
}

impl Application for EditorApp {
    fn new(_context: &mut ShellContext) -> Result<Self> {
        let mut doc = Document::new();
        doc.set_status("Welcome to Mikra Text Editor");
        Ok(Self { doc, prompt: None })
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyPressed {
                key_code,
                modifiers,
            } => {
                if self.prompt.is_some() {
                    self.handle_prompt_key(key_code);
                } else {
                    self.handle_editor_key(key_code, *modifiers);
                }
            }
            InputEvent::TextEntered { text } => {
                if let Some(query) = self.prompt.as_mut() {
                    query.push_str(text);
                } else {
                    self.doc.insert_text(text);
                }
            }
            _ => {}
        }
    }

    fn update(&mut self, _dt: f32) {}

    fn draw(&mut self, painter: &mut Painter) {
        let theme = Theme::for_document(&self.doc);
        painter.begin_frame(theme.background);

        let (width, height) = painter.screen_size();
        self.draw_text_area(painter, &theme, height);
        self.draw_cursor(painter, &theme);
        self.draw_status_bar(painter, &theme, width, height);
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .init();

    let config = ShellConfig::load_or_default("mikra.json")?
        .with_title("Mikra Text Editor")
        .with_resizable(true);
    run::<EditorApp>(config)
}
