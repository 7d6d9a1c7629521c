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

//! GPU-facing half of the shell: device and surface setup, the glyph
//! atlas, and the immediate-mode painter applications draw through.

pub mod context;
pub mod error;
pub mod painter;
pub mod shaders;
pub mod text;

pub use context::GpuContext;
pub use error::{FontError, GraphicsError};
pub use painter::Painter;
pub use text::{FontAtlas, GlyphInfo};
