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

//! # Damped Spring Simulation
//!
//! A single point mass hanging from a fixed anchor on a damped spring,
//! integrated with semi-implicit Euler. The spring length is hard-clamped
//! to a `[min_length, max_length]` band; hitting a limit reflects the
//! velocity with energy loss. The mass can be grabbed and dragged, in which
//! case integration is suspended and the drag speed is sampled so a release
//! throws the mass with the hand's velocity.

use crate::math::Vec2;

/// Downward gravitational acceleration, in simulation units per second squared.
const GRAVITY: f32 = 9.8;

/// Energy retained (and sign flipped) when the spring slams into a length limit.
const LIMIT_RESTITUTION: f32 = -0.5;

/// Physical constants of the spring-mass system.
#[derive(Debug, Clone, Copy)]
pub struct SpringParams {
    /// Natural length of the spring.
    pub rest_length: f32,
    /// Spring constant (force per unit of elongation).
    pub stiffness: f32,
    /// Velocity-proportional damping coefficient.
    pub damping: f32,
    /// Mass of the hanging object.
    pub mass: f32,
    /// Minimum compressed length (solid length).
    pub min_length: f32,
    /// Maximum extended length.
    pub max_length: f32,
}

impl SpringParams {
    /// Creates the default parameter set used by the spring demo.
    pub fn new() -> Self {
        Self {
            rest_length: 200.0,
            stiffness: 100.0,
            damping: 0.3,
            mass: 1.0,
            min_length: 100.0,
            max_length: 450.0,
        }
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::new()
    }
}

/// How far the spring currently deviates from its rest length, normalized
/// against the reachable range on the violated side.
///
/// `factor` is `0.0` at rest length and `1.0` at the corresponding hard
/// limit; `compressed` selects which side of rest the spring sits on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deformation {
    /// Normalized deviation from rest length, `0.0 ..= 1.0` within limits.
    pub factor: f32,
    /// `true` when the spring is shorter than its rest length.
    pub compressed: bool,
}

/// The spring-mass simulation state.
///
/// Positions are in the same 2D coordinate space the demos draw in
/// (y grows downward, hence the positive gravity constant).
#[derive(Debug, Clone)]
pub struct SpringSim {
    /// Physical constants.
    pub params: SpringParams,
    /// Fixed upper attachment point.
    pub anchor: Vec2,
    /// Current position of the hanging mass.
    pub position: Vec2,
    /// Current velocity of the hanging mass.
    pub velocity: Vec2,
    dragged: bool,
    limit_latched: bool,
    last_drag: Vec2,
    release_velocity: Vec2,
}

impl SpringSim {
    /// Creates a simulation with the mass at `position`, at rest.
    pub fn new(anchor: Vec2, position: Vec2, params: SpringParams) -> Self {
        Self {
            params,
            anchor,
            position,
            velocity: Vec2::ZERO,
            dragged: false,
            limit_latched: false,
            last_drag: position,
            release_velocity: Vec2::ZERO,
        }
    }

    /// Whether the mass is currently held by a drag.
    #[inline]
    pub fn is_dragged(&self) -> bool {
        self.dragged
    }

    /// Current distance between the anchor and the mass.
    #[inline]
    pub fn length(&self) -> f32 {
        (self.position - self.anchor).length()
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// While dragged, no forces are applied; instead the per-frame drag
    /// delta is sampled into a release velocity so that letting go of the
    /// mass continues its motion.
    pub fn step(&mut self, dt: f32) {
        if self.dragged {
            // Sample the hand speed since the previous frame. A zero dt
            // (first frame, paused clock) yields no sample rather than a
            // division by zero.
            if dt > 0.0 {
                self.release_velocity = (self.position - self.last_drag) / dt;
                self.last_drag = self.position;
            }
            return;
        }

        // 1. A stored throw velocity replaces the current one exactly once.
        if self.release_velocity != Vec2::ZERO {
            self.velocity = self.release_velocity;
            self.release_velocity = Vec2::ZERO;
        }

        // 2. Accumulate forces: Hooke spring pull along the axis, linear
        //    damping, and gravity on the mass.
        let delta = self.position - self.anchor;
        let length = delta.length();
        let direction = delta.normalize();

        let spring_force = direction * (-self.params.stiffness * (length - self.params.rest_length));
        let damping_force = self.velocity * -self.params.damping;
        let gravity_force = Vec2::new(0.0, self.params.mass * GRAVITY);

        // 3. Semi-implicit Euler: velocity first, then position.
        let total_force = spring_force + damping_force + gravity_force;
        self.velocity += total_force / self.params.mass * dt;
        self.position += self.velocity * dt;

        // 4. Enforce the length band, reflecting velocity with energy loss
        //    when a limit is hit.
        let delta = self.position - self.anchor;
        let length = delta.length();
        if length < self.params.min_length {
            self.position = self.project_to_length(delta, self.params.min_length);
            self.velocity = self.velocity * LIMIT_RESTITUTION;
        } else if length > self.params.max_length {
            self.position = self.project_to_length(delta, self.params.max_length);
            self.velocity = self.velocity * LIMIT_RESTITUTION;
        }
    }

    /// Grabs the mass and moves it toward `target`.
    ///
    /// Inside the length band the mass snaps to the pointer and its velocity
    /// is zeroed. Beyond a limit, the position is projected onto the limit
    /// circle once and latched; the latch releases as soon as the pointer
    /// returns inside the band, so the mass does not chatter along the rim.
    pub fn drag_to(&mut self, target: Vec2) {
        let started = !self.dragged;
        self.dragged = true;

        let delta = target - self.anchor;
        let potential_length = delta.length();

        if potential_length >= self.params.min_length && potential_length <= self.params.max_length
        {
            self.position = target;
            self.velocity = Vec2::ZERO;
            self.limit_latched = false;
        } else if !self.limit_latched {
            let limit = if potential_length < self.params.min_length {
                self.params.min_length
            } else {
                self.params.max_length
            };
            self.position = self.project_to_length(delta, limit);
            self.limit_latched = true;
        }

        // The first drag event anchors the speed sampling at the grabbed
        // position, otherwise the old resting position would read as a jump.
        if started {
            self.last_drag = self.position;
        }
    }

    /// Releases a held mass. The most recent sampled drag speed becomes the
    /// throw velocity on the next [`step`](Self::step).
    pub fn release(&mut self) {
        self.dragged = false;
        self.limit_latched = false;
    }

    /// Normalized deviation from rest length, for the visual mapping.
    pub fn deformation(&self) -> Deformation {
        let length = self.length();
        if length < self.params.rest_length {
            Deformation {
                factor: (self.params.rest_length - length)
                    / (self.params.rest_length - self.params.min_length),
                compressed: true,
            }
        } else {
            Deformation {
                factor: (length - self.params.rest_length)
                    / (self.params.max_length - self.params.rest_length),
                compressed: false,
            }
        }
    }

    /// Places the mass at `wanted_length` from the anchor, along the
    /// direction of `delta` (positive X when `delta` is zero, as `atan2`
    /// defines it).
    fn project_to_length(&self, delta: Vec2, wanted_length: f32) -> Vec2 {
        self.anchor + Vec2::from_angle(delta.angle()) * wanted_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hanging_sim() -> SpringSim {
        SpringSim::new(
            Vec2::new(400.0, 100.0),
            Vec2::new(400.0, 300.0),
            SpringParams::default(),
        )
    }

    #[test]
    fn test_starts_at_rest_length() {
        let sim = hanging_sim();
        assert_relative_eq!(sim.length(), 200.0, epsilon = 1e-4);
        assert!(!sim.is_dragged());
    }

    #[test]
    fn test_gravity_pulls_the_mass_down() {
        let mut sim = hanging_sim();
        sim.step(0.016);
        // At exactly rest length the spring force is zero, so the only
        // acceleration is gravity.
        assert!(sim.velocity.y > 0.0);
        assert!(sim.position.y > 300.0);
        assert_relative_eq!(sim.velocity.x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_stretched_spring_pulls_back() {
        let mut sim = hanging_sim();
        sim.position = Vec2::new(400.0, 500.0); // 400 long, well past rest
        sim.step(0.016);
        // Spring force (-100 * 200) dominates gravity (9.8); net upward.
        assert!(sim.velocity.y < 0.0);
    }

    #[test]
    fn test_length_clamps_to_max_and_reflects_velocity() {
        let mut sim = hanging_sim();
        // Just inside the limit with a downward velocity large enough to
        // overpower one frame of spring pull and cross max_length.
        sim.position = Vec2::new(400.0, 540.0);
        sim.velocity = Vec2::new(0.0, 3000.0);
        sim.step(0.016);
        assert_relative_eq!(sim.length(), sim.params.max_length, epsilon = 1e-3);
        assert!(sim.velocity.y < 0.0, "velocity should reverse at the limit");
    }

    #[test]
    fn test_drag_inside_band_snaps_and_zeroes_velocity() {
        let mut sim = hanging_sim();
        sim.velocity = Vec2::new(50.0, 50.0);
        sim.drag_to(Vec2::new(450.0, 350.0));
        assert!(sim.is_dragged());
        assert_eq!(sim.position, Vec2::new(450.0, 350.0));
        assert_eq!(sim.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_drag_beyond_max_projects_onto_limit_once() {
        let mut sim = hanging_sim();
        sim.drag_to(Vec2::new(400.0, 700.0)); // 600 below anchor, past max 450
        assert_relative_eq!(sim.length(), 450.0, epsilon = 1e-3);
        let clamped = sim.position;

        // Latched: pushing further out does not re-project.
        sim.drag_to(Vec2::new(400.0, 900.0));
        assert_eq!(sim.position, clamped);

        // Coming back inside the band releases the latch and follows again.
        sim.drag_to(Vec2::new(400.0, 400.0));
        assert_eq!(sim.position, Vec2::new(400.0, 400.0));
        sim.drag_to(Vec2::new(400.0, 700.0));
        assert_relative_eq!(sim.length(), 450.0, epsilon = 1e-3);
    }

    #[test]
    fn test_drag_below_min_projects_onto_limit() {
        let mut sim = hanging_sim();
        sim.drag_to(Vec2::new(400.0, 150.0)); // 50 from anchor, under min 100
        assert_relative_eq!(sim.length(), 100.0, epsilon = 1e-3);
    }

    #[test]
    fn test_release_throws_with_sampled_drag_speed() {
        let mut sim = hanging_sim();
        sim.drag_to(Vec2::new(400.0, 350.0));
        sim.step(0.016); // anchors the sample at the grab point
        sim.drag_to(Vec2::new(410.0, 360.0));
        sim.step(0.016); // samples (10, 10) / 0.016
        sim.release();
        sim.step(0.016);
        // The throw velocity replaces the held (zero) velocity, then one
        // frame of forces applies on top; direction must survive.
        assert!(sim.velocity.x > 0.0);
        assert!(sim.velocity.y > 0.0);
    }

    #[test]
    fn test_holding_still_releases_without_a_throw() {
        let mut sim = hanging_sim();
        sim.drag_to(Vec2::new(400.0, 350.0));
        sim.step(0.016);
        sim.step(0.016); // no motion between steps: sampled speed is zero
        sim.release();
        sim.step(0.016);
        // Only gravity and spring forces act; x stays untouched.
        assert_relative_eq!(sim.velocity.x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_dt_while_dragged_is_safe() {
        let mut sim = hanging_sim();
        sim.drag_to(Vec2::new(400.0, 350.0));
        sim.step(0.0);
        assert!(sim.velocity.x.is_finite());
        assert!(sim.velocity.y.is_finite());
    }

    #[test]
    fn test_deformation_sign_and_scale() {
        let mut sim = hanging_sim();

        sim.position = Vec2::new(400.0, 300.0); // rest
        let d = sim.deformation();
        assert_relative_eq!(d.factor, 0.0, epsilon = 1e-4);

        sim.position = Vec2::new(400.0, 550.0); // length 450 = max
        let d = sim.deformation();
        assert!(!d.compressed);
        assert_relative_eq!(d.factor, 1.0, epsilon = 1e-4);

        sim.position = Vec2::new(400.0, 200.0); // length 100 = min
        let d = sim.deformation();
        assert!(d.compressed);
        assert_relative_eq!(d.factor, 1.0, epsilon = 1e-4);
    }
}
