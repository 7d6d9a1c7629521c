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

//! # Mikra Core
//!
//! Platform-free foundation of the mikra demos: 2D math, the spring
//! simulation with its helix geometry, the text editing model, and the
//! shared plumbing (input events, the shell event bus, timing, config).
//!
//! Nothing in this crate touches a window, the GPU, or the filesystem
//! beyond explicit document and config I/O, which keeps all of it unit
//! testable.

#![warn(missing_docs)]

pub mod config;
pub mod event;
pub mod input;
pub mod math;
pub mod physics;
pub mod text;
pub mod time;

pub use config::{ConfigError, ShellConfig};
pub use event::{EventBus, ShellEvent};
pub use input::{InputEvent, Modifiers, MouseButton};
pub use time::{FrameClock, Stopwatch};
