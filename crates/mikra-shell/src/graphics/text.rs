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

//! CPU glyph rasterization into a GPU atlas texture.
//!
//! Glyphs are rasterized on first use with `fontdue` and packed into a
//! single R8 texture with a shelf packer; the painter samples coverage from
//! it. The font comes either from an explicit file in the config or from a
//! `fontdb` query for a system monospace face.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::FontError;

/// Side length of the square glyph atlas texture, in pixels.
pub const ATLAS_SIZE: u32 = 1024;

/// Placement and metrics of one rasterized glyph inside the atlas.
#[derive(Debug, Clone, Copy)]
pub struct GlyphInfo {
    /// Top-left corner of the glyph's atlas region, in UV space.
    pub uv_min: [f32; 2],
    /// Bottom-right corner of the glyph's atlas region, in UV space.
    pub uv_max: [f32; 2],
    /// Bitmap width in pixels. Zero for whitespace.
    pub width: f32,
    /// Bitmap height in pixels. Zero for whitespace.
    pub height: f32,
    /// Horizontal bearing: offset from the pen position to the bitmap's left edge.
    pub left: f32,
    /// Vertical bearing: distance from the baseline up to the bitmap's top row.
    pub top: f32,
    /// Horizontal pen advance to the next glyph.
    pub advance: f32,
}

impl GlyphInfo {
    /// A glyph that occupies no pixels but still advances the pen.
    fn blank(advance: f32) -> Self {
        GlyphInfo {
            uv_min: [0.0, 0.0],
            uv_max: [0.0, 0.0],
            width: 0.0,
            height: 0.0,
            left: 0.0,
            top: 0.0,
            advance,
        }
    }
}

/// Row-based rectangle packer for the atlas.
///
/// Allocations walk left to right along the current shelf; when a rectangle
/// no longer fits, the packer opens a new shelf below the tallest rectangle
/// seen on the current one. Freed space is never reclaimed, which is fine
/// for an append-only glyph cache.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    shelf_height: u32,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: 0,
            cursor_y: 0,
            shelf_height: 0,
        }
    }

    /// Reserves a `width` x `height` region, returning its top-left corner,
    /// or `None` when the atlas is exhausted.
    fn alloc(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        if width > self.size || height > self.size {
            return None;
        }
        if self.cursor_x + width > self.size {
            self.cursor_y += self.shelf_height;
            self.cursor_x = 0;
            self.shelf_height = 0;
        }
        if self.cursor_y + height > self.size {
            return None;
        }
        let position = (self.cursor_x, self.cursor_y);
        self.cursor_x += width;
        self.shelf_height = self.shelf_height.max(height);
        Some(position)
    }
}

/// Loads the raw bytes of the font to use, plus the face index within them.
///
/// An explicit `font_path` wins. Otherwise the system font database is
/// queried for a monospace face (sans-serif as fallback), following the
/// resolution scheme of the font systems this shell descends from.
fn load_font_bytes(font_path: Option<&Path>) -> Result<(Vec<u8>, u32), FontError> {
    if let Some(path) = font_path {
        let bytes = fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded font from configured path '{}'.", path.display());
        return Ok((bytes, 0));
    }

    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    // `faces()` is an iterator; check emptiness by `next()`.
    if db.faces().next().is_none() {
        return Err(FontError::NoFontsAvailable);
    }

    let families = [fontdb::Family::Monospace, fontdb::Family::SansSerif];
    let query = fontdb::Query {
        families: &families,
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };

    let id = db
        .query(&query)
        .unwrap_or_else(|| db.faces().next().unwrap().id);
    let face = db.face(id).ok_or(FontError::NoFontsAvailable)?;

    let (path, index) = match &face.source {
        fontdb::Source::File(p) => (p.clone(), face.index),
        _ => return Err(FontError::NonFileBackedFace),
    };

    log::info!(
        "Resolved system font '{}' from '{}'.",
        face.families
            .first()
            .map(|(name, _)| name.as_str())
            .unwrap_or("unknown"),
        path.display()
    );

    let bytes = fs::read(&path).map_err(|source| FontError::Read { path, source })?;
    Ok((bytes, index))
}

/// Lazily populated glyph cache backed by one R8 GPU texture.
pub struct FontAtlas {
    font: fontdue::Font,
    px: f32,
    ascent: f32,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    packer: ShelfPacker,
    glyphs: HashMap<char, GlyphInfo>,
}

impl FontAtlas {
    /// Loads the font and creates the (initially empty) atlas texture.
    pub fn new(
        device: &wgpu::Device,
        font_path: Option<&Path>,
        px: f32,
    ) -> Result<Self, FontError> {
        let (bytes, index) = load_font_bytes(font_path)?;

        let font = fontdue::Font::from_bytes(
            bytes,
            fontdue::FontSettings {
                collection_index: index,
                ..fontdue::FontSettings::default()
            },
        )
        .map_err(|detail| FontError::Parse {
            detail: detail.to_string(),
        })?;

        // Fonts without horizontal line metrics are rare enough that an
        // eyeballed ascent keeps text on screen.
        let ascent = font
            .horizontal_line_metrics(px)
            .map(|metrics| metrics.ascent)
            .unwrap_or(px * 0.8);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Glyph Atlas Texture"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            font,
            px,
            ascent,
            texture,
            view,
            packer: ShelfPacker::new(ATLAS_SIZE),
            glyphs: HashMap::new(),
        })
    }

    /// The configured font size in pixels.
    pub fn px(&self) -> f32 {
        self.px
    }

    /// Distance from the top of a line box down to the baseline.
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    /// The atlas texture view, for the painter's glyph bind group.
    pub fn texture_view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Returns the placement info for `ch`, rasterizing and uploading it on
    /// first use.
    pub fn glyph(&mut self, ch: char, queue: &wgpu::Queue) -> GlyphInfo {
        if let Some(info) = self.glyphs.get(&ch) {
            return *info;
        }

        let (metrics, bitmap) = self.font.rasterize(ch, self.px);
        let info = if metrics.width == 0 || metrics.height == 0 {
            GlyphInfo::blank(metrics.advance_width)
        } else {
            // One pixel of padding on the right/bottom keeps linear
            // sampling from bleeding between neighbors.
            match self
                .packer
                .alloc(metrics.width as u32 + 1, metrics.height as u32 + 1)
            {
                Some((x, y)) => {
                    queue.write_texture(
                        wgpu::TexelCopyTextureInfo {
                            texture: &self.texture,
                            mip_level: 0,
                            origin: wgpu::Origin3d { x, y, z: 0 },
                            aspect: wgpu::TextureAspect::All,
                        },
                        &bitmap,
                        wgpu::TexelCopyBufferLayout {
                            offset: 0,
                            bytes_per_row: Some(metrics.width as u32),
                            rows_per_image: None,
                        },
                        wgpu::Extent3d {
                            width: metrics.width as u32,
                            height: metrics.height as u32,
                            depth_or_array_layers: 1,
                        },
                    );

                    let size = ATLAS_SIZE as f32;
                    GlyphInfo {
                        uv_min: [x as f32 / size, y as f32 / size],
                        uv_max: [
                            (x as f32 + metrics.width as f32) / size,
                            (y as f32 + metrics.height as f32) / size,
                        ],
                        width: metrics.width as f32,
                        height: metrics.height as f32,
                        left: metrics.xmin as f32,
                        top: metrics.height as f32 + metrics.ymin as f32,
                        advance: metrics.advance_width,
                    }
                }
                None => {
                    log::warn!("Glyph atlas is full; '{ch}' will render blank.");
                    GlyphInfo::blank(metrics.advance_width)
                }
            }
        };

        self.glyphs.insert(ch, info);
        info
    }

    /// The pen advance for `ch`, from the cache when present.
    pub fn advance(&self, ch: char) -> f32 {
        match self.glyphs.get(&ch) {
            Some(info) => info.advance,
            None => self.font.metrics(ch, self.px).advance_width,
        }
    }

    /// The advance-summed width of `text` in logical pixels.
    pub fn measure(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.advance(ch)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packer_walks_a_shelf_left_to_right() {
        let mut packer = ShelfPacker::new(64);
        assert_eq!(packer.alloc(10, 12), Some((0, 0)));
        assert_eq!(packer.alloc(10, 8), Some((10, 0)));
        assert_eq!(packer.alloc(10, 12), Some((20, 0)));
    }

    #[test]
    fn packer_opens_a_new_shelf_below_the_tallest_entry() {
        let mut packer = ShelfPacker::new(32);
        assert_eq!(packer.alloc(20, 10), Some((0, 0)));
        assert_eq!(packer.alloc(20, 6), Some((0, 10)));
        // The second shelf starts right below the first's tallest entry.
        assert_eq!(packer.alloc(20, 6), Some((0, 16)));
    }

    #[test]
    fn packer_rejects_rectangles_wider_than_the_atlas() {
        let mut packer = ShelfPacker::new(16);
        assert_eq!(packer.alloc(17, 4), None);
        assert_eq!(packer.alloc(4, 17), None);
    }

    #[test]
    fn packer_reports_exhaustion() {
        let mut packer = ShelfPacker::new(16);
        assert_eq!(packer.alloc(16, 8), Some((0, 0)));
        assert_eq!(packer.alloc(16, 8), Some((0, 8)));
        assert_eq!(packer.alloc(1, 1), None);
    }

    #[test]
    fn explicit_missing_font_path_is_a_read_error() {
        let result = load_font_bytes(Some(Path::new("definitely/not/a/font.ttf")));
        match result {
            Err(FontError::Read { path, .. }) => {
                assert_eq!(path, Path::new("definitely/not/a/font.ttf"));
            }
            other => panic!("expected a read error, got {:?}", other.map(|(b, i)| (b.len(), i))),
        }
    }
}
