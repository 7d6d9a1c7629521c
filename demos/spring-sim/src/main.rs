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

// Mikra Spring Demo
// Grab the mass with the mouse and throw it; the spring renders as a helix
// whose radius, thickness and color follow the deformation.

use anyhow::Result;
use mikra_core::input::{InputEvent, MouseButton};
use mikra_core::math::{LinearRgba, Vec2};
use mikra_core::physics::{helix_points, HelixStyle, SpringParams, SpringSim};
use mikra_core::ShellConfig;
use mikra_shell::{run, Application, Painter, ShellContext};

/// A press closer to the mass than this many pixels grabs it.
const GRAB_RADIUS: f32 = 10.0;

/// Side length of the anchor and mass marker squares.
const MARKER_SIZE: f32 = 10.0;

/// Alpha of the soft glow pass layered over the coil.
const GLOW_ALPHA: f32 = 30.0 / 255.0;

struct SpringApp {
    sim: SpringSim,
    style: HelixStyle,
    cursor: Vec2,
    dragging: bool,
}

impl Application for SpringApp {
    fn new(context: &mut ShellContext) -> Result<Self> {
        let (width, _) = context.window_size;
        let params = SpringParams::default();
        let anchor = Vec2::new(width / 2.0, 100.0);
        let position = anchor + Vec2::new(0.0, params.rest_length);

        log::info!("Spring demo ready; grab the red mass and throw it.");
        Ok(Self {
            sim: SpringSim::new(anchor, position, params),
            style: HelixStyle::default(),
            cursor: position,
            dragging: false,
        })
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::MouseMoved { x, y } => {
                self.cursor = Vec2::new(*x, *y);
                if self.dragging {
                    self.sim.drag_to(self.cursor);
                }
            }
            InputEvent::MouseButtonPressed {
                button: MouseButton::Left,
            } => {
                if self.cursor.distance(self.sim.position) < GRAB_RADIUS {
                    self.dragging = true;
                    self.sim.drag_to(self.cursor);
                }
            }
            InputEvent::MouseButtonReleased {
                button: MouseButton::Left,
            } => {
                if self.dragging {
                    self.dragging = false;
                    self.sim.release();
                }
            }
            _ => {}
        }
    }

    fn update(&mut self, dt: f32) {
        self.sim.step(dt);
    }

    fn draw(&mut self, painter: &mut Painter) {
        painter.begin_frame(LinearRgba::BLACK);

        let deformation = self.sim.deformation();
        let points = helix_points(self.sim.anchor, self.sim.position, &self.style, deformation);
        let thickness = self.style.wire_thickness(deformation);
        let (gradient_start, gradient_end) = self.style.segment_gradient(deformation);

        for pair in points.windows(2) {
            painter.gradient_line(pair[0], pair[1], thickness, gradient_start, gradient_end);
        }

        // Soft glow: the same coil again in the body color, barely opaque.
        let glow = self.style.body_color(deformation).with_alpha(GLOW_ALPHA);
        painter.polyline(&points, thickness, glow);

        painter.rect(
            self.sim.anchor.x - MARKER_SIZE / 2.0,
            self.sim.anchor.y - MARKER_SIZE / 2.0,
            MARKER_SIZE,
            MARKER_SIZE,
            LinearRgba::GREEN,
        );
        painter.rect(
            self.sim.position.x - MARKER_SIZE / 2.0,
            self.sim.position.y - MARKER_SIZE / 2.0,
            MARKER_SIZE,
            MARKER_SIZE,
            LinearRgba::RED,
        );
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .init();

    let config =
        ShellConfig::load_or_default("mikra.json")?.with_title("Interactive Spring Simulation");
    run::<SpringApp>(config)
}
