// Copyright 2025 John Brosnihan
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
//! Frame-to-tick step control
//!
//! Game loops measure wall-clock frame times, which spike. [`StepController`]
//! turns a raw frame delta into at most one engine tick:
//!
//! - deltas are clamped to `max_delta`
//! - deltas at or below `min_delta` are skipped
//! - while paused nothing runs, except one tick per [`StepController::request_step`]

use crate::config::EngineConfig;
use crate::engine::{PhysicsEngine, TickReport};
use crate::error::EngineError;
use tracing::debug;

/// Pause, single-step and delta clamping for a game loop
///
/// # Examples
///
/// ```
/// use rigid_physics::clock::StepController;
///
/// let mut clock = StepController::new(1e-5, 0.05);
/// assert_eq!(clock.next_delta(0.5), Some(0.05));
/// assert_eq!(clock.next_delta(0.0), None);
///
/// clock.toggle_pause();
/// assert_eq!(clock.next_delta(0.016), None);
/// clock.request_step();
/// assert_eq!(clock.next_delta(0.016), Some(0.016));
/// assert_eq!(clock.next_delta(0.016), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StepController {
    min_delta: f64,
    max_delta: f64,
    paused: bool,
    step_requested: bool,
}

impl StepController {
    /// Create a controller with explicit bounds
    pub fn new(min_delta: f64, max_delta: f64) -> Self {
        StepController {
            min_delta,
            max_delta,
            paused: false,
            step_requested: false,
        }
    }

    /// Create a controller using an engine configuration's bounds
    pub fn from_config(config: &EngineConfig) -> Self {
        StepController::new(config.min_delta, config.max_delta)
    }

    /// Whether ticks are currently suppressed
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop ticking
    pub fn pause(&mut self) {
        self.paused = true;
        debug!("simulation paused");
    }

    /// Resume ticking and drop any pending single-step request
    pub fn resume(&mut self) {
        self.paused = false;
        self.step_requested = false;
        debug!("simulation resumed");
    }

    /// Flip between paused and running
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Advance exactly one tick on the next frame while paused
    pub fn request_step(&mut self) {
        self.step_requested = true;
    }

    /// Delta to tick with for this frame, or `None` to skip the tick
    ///
    /// A single-step request ignores `min_delta`; non-finite raw deltas are
    /// always skipped.
    pub fn next_delta(&mut self, raw: f64) -> Option<f64> {
        if !raw.is_finite() {
            return None;
        }
        let delta = raw.clamp(0.0, self.max_delta);

        if self.paused {
            if self.step_requested {
                self.step_requested = false;
                debug!(delta, "single step");
                return Some(delta);
            }
            return None;
        }

        if delta > self.min_delta {
            Some(delta)
        } else {
            None
        }
    }

    /// Tick `engine` for this frame if the controller allows it
    pub fn advance(&mut self, engine: &mut PhysicsEngine, raw: f64) -> Result<Option<TickReport>, EngineError> {
        match self.next_delta(raw) {
            Some(delta) => engine.tick(delta).map(Some),
            None => Ok(None),
        }
    }
}

impl Default for StepController {
    fn default() -> Self {
        StepController::from_config(&EngineConfig::default())
    }
}
