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

//! The backend-agnostic input event model.
//!
//! Applications consume these events instead of any windowing library's own
//! types; the shell crate owns the translation from the concrete backend.

use serde::{Deserialize, Serialize};

/// A user input action, decoupled from the windowing backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A keyboard key was pressed (including auto-repeats while held).
    KeyPressed {
        /// A string representation of the physical key code, e.g. `"KeyZ"`,
        /// `"Enter"`, `"ArrowLeft"`.
        key_code: String,
        /// Modifier keys held at the time of the press.
        modifiers: Modifiers,
    },
    /// A keyboard key was released.
    KeyReleased {
        /// A string representation of the physical key code.
        key_code: String,
        /// Modifier keys held at the time of the release.
        modifiers: Modifiers,
    },
    /// Printable text produced by a key press, after layout mapping.
    TextEntered {
        /// The produced text, usually a single grapheme.
        text: String,
    },
    /// A mouse button was pressed.
    MouseButtonPressed {
        /// The mouse button that was pressed.
        button: MouseButton,
    },
    /// A mouse button was released.
    MouseButtonReleased {
        /// The mouse button that was released.
        button: MouseButton,
    },
    /// The mouse cursor moved.
    MouseMoved {
        /// The new x-coordinate of the cursor, in logical pixels.
        x: f32,
        /// The new y-coordinate of the cursor, in logical pixels.
        y: f32,
    },
    /// The mouse wheel was scrolled.
    MouseWheelScrolled {
        /// The horizontal scroll delta.
        delta_x: f32,
        /// The vertical scroll delta.
        delta_y: f32,
    },
}

/// A mouse button, decoupled from the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
    /// The back mouse button (typically on the side).
    Back,
    /// The forward mouse button (typically on the side).
    Forward,
    /// Another mouse button, identified by a numeric code.
    Other(u16),
}

/// The modifier keys held while a key event fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    /// Either Control key.
    pub control: bool,
    /// Either Shift key.
    pub shift: bool,
    /// Either Alt key.
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        control: false,
        shift: false,
        alt: false,
    };

    /// Only Control held. Convenient for tests and key-map tables.
    pub const CONTROL: Self = Self {
        control: true,
        shift: false,
        alt: false,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    #[test]
    fn input_events_round_trip_through_serde() {
        let events = vec![
            InputEvent::KeyPressed {
                key_code: "KeyZ".to_string(),
                modifiers: Modifiers::CONTROL,
            },
            InputEvent::TextEntered {
                text: "a".to_string(),
            },
            InputEvent::MouseButtonPressed {
                button: MouseButton::Left,
            },
            InputEvent::MouseMoved { x: 12.5, y: -3.0 },
        ];

        let json = serde_json::to_string(&events).expect("events should serialize");
        let back: Vec<InputEvent> = serde_json::from_str(&json).expect("events should deserialize");
        assert_eq!(back, events);
    }
}
