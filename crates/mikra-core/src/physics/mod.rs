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

//! The damped-spring simulation and the helix geometry derived from it.
//!
//! [`spring`] integrates a single mass hanging from an anchored spring,
//! including mouse-drag interaction and hard length limits. [`helix`] turns
//! the simulated state into the polyline, colors, and stroke widths the
//! demos draw. Both are pure: no platform or GPU types appear here.

pub mod helix;
pub mod spring;

pub use helix::{helix_points, HelixStyle, SEGMENTS_PER_COIL};
pub use spring::{Deformation, SpringParams, SpringSim};
