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

//! Wall-clock helpers for startup timing and the per-frame delta.

use std::time::{Duration, Instant};

/// Frame deltas are clamped to this many seconds so that a stall (window
/// drag, debugger pause, laptop sleep) does not slingshot the simulation.
pub const MAX_FRAME_DT: f32 = 0.1;

/// A simple monotonic stopwatch, used for one-off duration measurements
/// such as initialization timing.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start_time: Option<Instant>,
}

impl Stopwatch {
    /// Creates and starts a stopwatch.
    #[inline]
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
        }
    }

    /// Elapsed time since the stopwatch was started, or `None` if it has no
    /// start time.
    #[inline]
    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|start| start.elapsed())
    }

    /// Elapsed whole milliseconds since the start.
    #[inline]
    pub fn elapsed_ms(&self) -> Option<u64> {
        self.elapsed().map(|d| d.as_millis() as u64)
    }

    /// Elapsed whole microseconds since the start.
    #[inline]
    pub fn elapsed_us(&self) -> Option<u64> {
        self.elapsed().map(|d| d.as_micros() as u64)
    }

    /// Elapsed seconds since the start as `f64`.
    #[inline]
    pub fn elapsed_secs_f64(&self) -> Option<f64> {
        self.elapsed().map(|d| d.as_secs_f64())
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces the per-frame time step for simulation updates.
///
/// Each [`tick`](FrameClock::tick) returns the seconds elapsed since the
/// previous tick, clamped to [`MAX_FRAME_DT`].
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    /// Creates a clock whose first tick measures from now.
    #[inline]
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the previous tick, clamped to [`MAX_FRAME_DT`].
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last).as_secs_f32();
        self.last = now;
        dt.min(MAX_FRAME_DT)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const SMALL_DURATION_MS: u64 = 15;
    const SLEEP_DURATION_MS: u64 = 50;
    const SLEEP_MARGIN_MS: u64 = 200;

    #[test]
    fn stopwatch_creation_starts_timer() {
        let watch = Stopwatch::new();
        assert!(watch.elapsed().is_some());
        assert!(watch.elapsed_ms().is_some());
        assert!(watch.elapsed_us().is_some());
        assert!(watch.elapsed_secs_f64().is_some());
    }

    #[test]
    fn stopwatch_elapsed_time_near_zero_initially() {
        let watch = Stopwatch::new();
        let elapsed = watch.elapsed().expect("should have elapsed duration");
        assert!(
            elapsed < Duration::from_millis(SMALL_DURATION_MS),
            "initial elapsed duration ({elapsed:?}) should be very small"
        );
    }

    #[test]
    fn stopwatch_elapsed_time_after_delay() {
        let watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(SLEEP_DURATION_MS));

        let elapsed_ms = watch.elapsed_ms().expect("should have elapsed ms");
        assert!(
            elapsed_ms >= SLEEP_DURATION_MS,
            "elapsed ms ({elapsed_ms}) should cover the sleep"
        );
        assert!(
            elapsed_ms < SLEEP_DURATION_MS + SLEEP_MARGIN_MS,
            "elapsed ms ({elapsed_ms}) should not wildly exceed the sleep"
        );
    }

    #[test]
    fn stopwatch_implements_default() {
        let watch = Stopwatch::default();
        assert!(watch.elapsed().is_some());
    }

    #[test]
    fn frame_clock_first_tick_is_small() {
        let mut clock = FrameClock::new();
        let dt = clock.tick();
        assert!(dt >= 0.0);
        assert!(dt < MAX_FRAME_DT);
    }

    #[test]
    fn frame_clock_measures_sleep() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(SLEEP_DURATION_MS));
        let dt = clock.tick();
        assert!(dt >= SLEEP_DURATION_MS as f32 / 1000.0);
    }

    #[test]
    fn frame_clock_clamps_long_stalls() {
        let mut clock = FrameClock {
            last: Instant::now() - Duration::from_secs(5),
        };
        assert_eq!(clock.tick(), MAX_FRAME_DT);
    }
}
