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

//! Built-in shader sources for the painter's two pipelines.
//!
//! Both shaders share the same vertex stage: logical-pixel positions with a
//! top-left origin are mapped to NDC through a screen-size uniform.
//!
//! # Available Shaders
//!
//! - [`SOLID_WGSL`] - Flat vertex-colored triangles (rects, thick lines)
//! - [`GLYPH_WGSL`] - Vertex color modulated by R8 atlas coverage (text)

/// Solid-color 2D shader for rects and thick lines.
///
/// Outputs the interpolated vertex color directly, which is what gives
/// gradient lines their per-end colors.
pub const SOLID_WGSL: &str = include_str!("solid.wgsl");

/// Glyph shader sampling coverage from the R8 font atlas.
///
/// The vertex color's alpha is multiplied by the sampled coverage, so text
/// antialiasing comes from the rasterizer, not the GPU.
pub const GLYPH_WGSL: &str = include_str!("glyph.wgsl");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_shader_valid() {
        assert!(SOLID_WGSL.contains("@vertex"));
        assert!(SOLID_WGSL.contains("@fragment"));
    }

    #[test]
    fn test_glyph_shader_valid() {
        assert!(GLYPH_WGSL.contains("@vertex"));
        assert!(GLYPH_WGSL.contains("@fragment"));
        assert!(GLYPH_WGSL.contains("atlas_texture"));
    }
}
