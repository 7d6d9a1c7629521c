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

//! Provides translation from the concrete windowing backend (`winit`) to the
//! shell's abstract input events.
//!
//! This module acts as an adapter layer, decoupling applications from the
//! specific input event format of the `winit` crate.

use mikra_core::{InputEvent, Modifiers, MouseButton};
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Translates a `winit::event::WindowEvent` into the shell's [`InputEvent`]s.
///
/// A single window event can carry more than one meaning for an application:
/// a printable key press is both a key action ("KeyA went down") and entered
/// text ("a"), so the result is a small vector rather than an `Option`. Key
/// repeats are forwarded, which is what lets held keys keep editing. Entered
/// text is suppressed while Control is held so shortcuts do not also type.
///
/// Mouse coordinates are reported in physical pixels, exactly as winit
/// delivers them; the caller decides whether to rescale.
///
/// # Arguments
///
/// * `event`: A reference to a `WindowEvent` from the `winit` library.
/// * `modifiers`: The modifier state tracked by the caller from
///   `WindowEvent::ModifiersChanged`.
///
/// # Returns
///
/// The recognized input actions, in order; empty for non-input events.
pub fn translate_winit_input(event: &WindowEvent, modifiers: Modifiers) -> Vec<InputEvent> {
    match event {
        WindowEvent::KeyboardInput {
            event: key_event, ..
        } => {
            let mut translated = Vec::with_capacity(2);
            if let PhysicalKey::Code(keycode) = key_event.physical_key {
                let key_code = map_keycode_to_string(keycode);
                match key_event.state {
                    ElementState::Pressed => {
                        translated.push(InputEvent::KeyPressed {
                            key_code,
                            modifiers,
                        });
                        if !modifiers.control {
                            if let Some(text) = key_event.text.as_ref() {
                                if is_printable(text) {
                                    translated.push(InputEvent::TextEntered {
                                        text: text.to_string(),
                                    });
                                }
                            }
                        }
                    }
                    ElementState::Released => {
                        translated.push(InputEvent::KeyReleased {
                            key_code,
                            modifiers,
                        });
                    }
                }
            }
            translated
        }
        WindowEvent::CursorMoved { position, .. } => vec![InputEvent::MouseMoved {
            x: position.x as f32,
            y: position.y as f32,
        }],
        WindowEvent::MouseInput { state, button, .. } => {
            let shell_button = map_mouse_button(*button);
            match state {
                ElementState::Pressed => vec![InputEvent::MouseButtonPressed {
                    button: shell_button,
                }],
                ElementState::Released => vec![InputEvent::MouseButtonReleased {
                    button: shell_button,
                }],
            }
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let (dx, dy): (f32, f32) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
            };
            if dx != 0.0 || dy != 0.0 {
                vec![InputEvent::MouseWheelScrolled {
                    delta_x: dx,
                    delta_y: dy,
                }]
            } else {
                Vec::new()
            }
        }
        _ => Vec::new(),
    }
}

// --- Private Helper Functions ---

/// (Internal) Maps a `winit::keyboard::KeyCode` to a string representation.
fn map_keycode_to_string(keycode: KeyCode) -> String {
    format!("{keycode:?}")
}

/// (Internal) Maps a `winit::event::MouseButton` to the shell's `MouseButton` enum.
fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(id) => MouseButton::Other(id),
    }
}

/// (Internal) Whether a key event's `text` should become [`InputEvent::TextEntered`].
///
/// Enter, Backspace, Tab, and Escape all arrive with control-character text
/// attached; those keys are handled through their key codes instead.
fn is_printable(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| !c.is_control())
}
