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

//! # Mikra Shell
//!
//! The platform host for mikra applications: the winit event loop and
//! window, the wgpu surface with an immediate-mode painter, font loading
//! and glyph rasterization, input translation to the platform-free event
//! model, and native file dialogs.
//!
//! A demo implements [`Application`] and hands its config to [`run`];
//! everything platform-specific stays on this side of the boundary.

pub mod app;
pub mod dialog;
pub mod graphics;
pub mod input;
pub mod window;

pub use app::{run, Application, ShellContext};
pub use graphics::{FontAtlas, FontError, GpuContext, GraphicsError, Painter};
pub use input::translate_winit_input;
pub use window::{ShellWindow, ShellWindowBuilder};
