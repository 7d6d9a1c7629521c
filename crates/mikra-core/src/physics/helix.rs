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

//! Maps spring state onto drawable helix geometry.
//!
//! The spring is rendered as a coil of line segments between the anchor and
//! the mass. Deformation drives every visual channel at once: the coil radius
//! tightens, the stroke width changes, and the color slides from a neutral
//! grey toward a stretch or compression tint.

use super::spring::Deformation;
use crate::math::{FRAC_PI_2, LinearRgba, TAU, Vec2};

/// Polyline samples generated per full coil turn.
pub const SEGMENTS_PER_COIL: u32 = 20;

/// Fraction of the base radius removed per unit of deformation.
const RADIUS_SHRINK: f32 = 0.3;

/// The coil radius never drops below this fraction of the base radius.
const MIN_RADIUS_SCALE: f32 = 0.3;

/// Fraction of the base thickness added (compression) or removed (stretch)
/// per unit of deformation.
const THICKNESS_GAIN: f32 = 0.5;

/// Lower stroke-width bound in pixels.
const MIN_THICKNESS: f32 = 1.0;

/// Blend positions of the per-segment gradient endpoints between the neutral
/// color and the fully deformed tint.
const GRADIENT_START_MIX: f32 = 0.3;
const GRADIENT_END_MIX: f32 = 0.7;

/// Visual parameters of the rendered coil.
#[derive(Debug, Clone, PartialEq)]
pub struct HelixStyle {
    /// Number of full turns between the anchor and the mass.
    pub coils: u32,
    /// Coil radius in pixels when the spring is at rest.
    pub radius: f32,
    /// Stroke width in pixels when the spring is at rest.
    pub base_thickness: f32,
    /// Wire color near rest length.
    pub neutral: LinearRgba,
    /// Tint blended in as the spring approaches its maximum length.
    pub stretch: LinearRgba,
    /// Tint blended in as the spring approaches its minimum length.
    pub compress: LinearRgba,
    /// Deformation below this magnitude renders as fully neutral.
    pub deformation_threshold: f32,
}

impl Default for HelixStyle {
    fn default() -> Self {
        Self {
            coils: 9,
            radius: 25.0,
            base_thickness: 3.0,
            neutral: LinearRgba::from_srgb_u8(200, 200, 200),
            stretch: LinearRgba::from_srgb_u8(255, 50, 50),
            compress: LinearRgba::from_srgb_u8(50, 50, 105),
            deformation_threshold: 0.2,
        }
    }
}

impl HelixStyle {
    /// Coil radius after deformation, floored so extreme stretch never
    /// collapses the helix into a straight line.
    fn dynamic_radius(&self, deformation: Deformation) -> f32 {
        let shrunk = self.radius * (1.0 - deformation.factor * RADIUS_SHRINK);
        shrunk.max(self.radius * MIN_RADIUS_SCALE)
    }

    /// Stroke width for the current deformation.
    ///
    /// Compression thickens the wire, stretch thins it, both proportionally
    /// to the deformation factor and clamped to `[1.0, 2 * base_thickness]`.
    pub fn wire_thickness(&self, deformation: Deformation) -> f32 {
        let scale = if deformation.compressed {
            1.0 + deformation.factor * THICKNESS_GAIN
        } else {
            1.0 - deformation.factor * THICKNESS_GAIN
        };
        (self.base_thickness * scale).clamp(MIN_THICKNESS, self.base_thickness * 2.0)
    }

    /// Overall wire color for the current deformation.
    ///
    /// Inside the threshold the wire stays neutral. Beyond it, the color
    /// blends toward the stretch or compression tint with the deformation
    /// factor, saturating at the full tint.
    pub fn body_color(&self, deformation: Deformation) -> LinearRgba {
        if deformation.factor < self.deformation_threshold {
            return self.neutral;
        }
        let target = if deformation.compressed {
            self.compress
        } else {
            self.stretch
        };
        LinearRgba::lerp(self.neutral, target, deformation.factor.min(1.0))
    }

    /// Gradient endpoint colors applied across each coil segment.
    ///
    /// Both stops sit between neutral and the deformed tint so adjacent
    /// segments shimmer without hiding the overall body color.
    pub fn segment_gradient(&self, deformation: Deformation) -> (LinearRgba, LinearRgba) {
        let target = if deformation.compressed {
            self.compress
        } else {
            self.stretch
        };
        (
            LinearRgba::lerp(self.neutral, target, GRADIENT_START_MIX),
            LinearRgba::lerp(self.neutral, target, GRADIENT_END_MIX),
        )
    }
}

/// Samples the helix polyline between `anchor` and `end`.
///
/// Returns `coils * SEGMENTS_PER_COIL + 1` points. Each sample advances
/// linearly along the anchor-to-end axis and oscillates sideways along the
/// perpendicular with the deformation-adjusted radius, tracing
/// [`HelixStyle::coils`] full turns. The first point is exactly `anchor`;
/// the last lands on `end` up to floating-point error in the turn count.
pub fn helix_points(anchor: Vec2, end: Vec2, style: &HelixStyle, deformation: Deformation) -> Vec<Vec2> {
    let delta = end - anchor;
    let length = delta.length();
    let axis_angle = delta.angle();

    let axis = Vec2::from_angle(axis_angle);
    let perp = Vec2::from_angle(axis_angle + FRAC_PI_2);
    let radius = style.dynamic_radius(deformation);

    let total = (style.coils * SEGMENTS_PER_COIL).max(1);
    let mut points = Vec::with_capacity(total as usize + 1);
    for i in 0..=total {
        let t = i as f32 / total as f32;
        let coil_angle = t * style.coils as f32 * TAU;
        points.push(anchor + axis * (t * length) + perp * (radius * coil_angle.sin()));
    }
    points
}
