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

use mikra_core::math::Vec2;
use mikra_core::physics::{SpringParams, SpringSim};

const DT: f32 = 1.0 / 120.0;

fn default_sim() -> SpringSim {
    SpringSim::new(
        Vec2::new(400.0, 100.0),
        Vec2::new(400.0, 300.0),
        SpringParams::default(),
    )
}

#[test]
fn settles_at_the_gravity_loaded_equilibrium() {
    let mut sim = default_sim();
    let params = sim.params;

    // The light damping (ratio ~0.015) needs a couple of simulated minutes
    // to bleed the oscillation off.
    for _ in 0..20_000 {
        sim.step(DT);
    }

    // At rest the spring stretch balances gravity: rest + m*g/k.
    let expected = params.rest_length + params.mass * 9.8 / params.stiffness;
    let length = sim.length();
    assert!(
        (length - expected).abs() < 1e-2,
        "settled length {length} should approach {expected}"
    );
    assert!(
        sim.velocity.length() < 1e-3,
        "residual velocity {:?} should be negligible",
        sim.velocity
    );
    // The mass hangs straight below the anchor.
    assert!(
        (sim.position.x - sim.anchor.x).abs() < 1e-2,
        "mass x {} should align with anchor x {}",
        sim.position.x,
        sim.anchor.x
    );
}

#[test]
fn length_band_holds_through_a_violent_throw() {
    let mut sim = default_sim();

    // Grab the mass, yank it sideways fast, and let go.
    sim.drag_to(Vec2::new(400.0, 300.0));
    sim.step(DT);
    sim.drag_to(Vec2::new(430.0, 330.0));
    sim.step(DT);
    sim.release();

    let min = sim.params.min_length;
    let max = sim.params.max_length;
    for step in 0..2_000 {
        sim.step(DT);
        let length = sim.length();
        assert!(
            length >= min - 1e-3 && length <= max + 1e-3,
            "length {length} escaped [{min}, {max}] at step {step}"
        );
    }
}

#[test]
fn released_mass_carries_the_drag_speed() {
    let mut sim = default_sim();

    sim.drag_to(Vec2::new(400.0, 300.0));
    sim.step(DT);
    // One frame of fast rightward motion: 24 px in one 120 Hz frame.
    sim.drag_to(Vec2::new(424.0, 300.0));
    sim.step(DT);
    sim.release();

    let before_x = sim.position.x;
    sim.step(DT);
    assert!(
        sim.position.x > before_x + 10.0 * DT,
        "the throw should carry the mass rightward, moved {}",
        sim.position.x - before_x
    );
}

#[test]
fn dragging_pins_the_mass_against_gravity() {
    let mut sim = default_sim();
    let held = Vec2::new(380.0, 280.0);
    sim.drag_to(held);

    for _ in 0..500 {
        sim.step(DT);
    }
    assert_eq!(
        sim.position, held,
        "a held mass must not integrate forces"
    );
}
