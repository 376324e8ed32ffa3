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
//! Physics engine
//!
//! [`PhysicsEngine`] owns every body, force field and trigger and advances
//! them with [`PhysicsEngine::tick`].
//!
//! # Tick Stages
//!
//! Each tick runs these stages in order:
//!
//! 1. **Forces**: force fields are accumulated into each dynamic body
//! 2. **Integration**: semi-implicit Euler for each dynamic body
//! 3. **Broad phase**: sort-and-sweep over world bounds
//! 4. **Narrow phase and resolution**: contacts for every candidate pair are
//!    generated from the post-integration poses, then resolved one by one in
//!    candidate pair order
//! 5. **Triggers**: containment diff and enter handlers, in trigger order
//! 6. **Cleanup**: force accumulators are reset
//!
//! Every stage walks bodies, fields and triggers in slot order, so the same
//! sequence of calls produces bit-identical results.

use crate::body::RigidBody;
use crate::broad_phase::{candidate_pairs, Proxy};
use crate::collider::WorldShape;
use crate::collision::{intersect, Contact};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::force_field::{apply_fields, FieldHandle, ForceField};
use crate::handle::Arena;
use crate::integration::{Integrator, SymplecticEuler};
use crate::layers::LayerFilter;
use crate::solver::{resolve_contact, CorrectionParams};
use crate::trigger::{BodyHandle, Trigger, TriggerEvent, TriggerFault, TriggerHandle};
use tracing::{debug, debug_span, info, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Tick number, starting at 1
    pub tick: u64,
    /// Pairs that survived the broad phase
    pub candidate_pairs: usize,
    /// Pairs with a narrow-phase contact
    pub contacts: usize,
    /// Contacts that received a normal impulse
    pub impulses: usize,
    /// Trigger enter events, in trigger then body order
    pub trigger_events: Vec<TriggerEvent>,
    /// Handler failures
    pub faults: Vec<TriggerFault>,
}

/// Owner of the simulated world
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use glam::DVec3;
/// use rigid_physics::{Collider, PhysicsEngine, PhysicsMaterial, RigidBody};
///
/// let mut engine = PhysicsEngine::new();
/// let floor = Arc::new(Collider::aabb(DVec3::new(-2.0, -2.0, -2.0), DVec3::new(2.0, 2.0, 2.0)).unwrap());
/// let cube = Arc::new(Collider::aabb(DVec3::new(-1.0, -1.0, -1.0), DVec3::new(1.0, 1.0, 1.0)).unwrap());
///
/// engine.add_rigid_body(RigidBody::fixed(floor, PhysicsMaterial::default(), 0, DVec3::ZERO));
/// let h = engine.add_rigid_body(RigidBody::new(
///     cube,
///     1.0,
///     PhysicsMaterial::default(),
///     0,
///     DVec3::new(0.0, 5.0, 0.0),
///     DVec3::ZERO,
///     DVec3::ZERO,
/// ));
///
/// let report = engine.tick(1.0 / 60.0).unwrap();
/// assert_eq!(report.tick, 1);
/// assert!(engine.body(h).unwrap().position().y < 5.0);
/// ```
pub struct PhysicsEngine {
    config: EngineConfig,
    bodies: Arena<RigidBody>,
    fields: Arena<ForceField>,
    triggers: Arena<Trigger>,
    layers: LayerFilter,
    integrator: Box<dyn Integrator>,
    tick_count: u64,
}

impl PhysicsEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// Create an engine with a validated configuration
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        PhysicsEngine {
            config,
            bodies: Arena::new(),
            fields: Arena::new(),
            triggers: Arena::new(),
            layers: LayerFilter::new(),
            integrator: Box::new(SymplecticEuler),
            tick_count: 0,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the integrator
    pub fn set_integrator(&mut self, integrator: Box<dyn Integrator>) {
        info!(integrator = integrator.name(), "integrator replaced");
        self.integrator = integrator;
    }

    /// Active integrator
    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }

    /// Layer interaction rules
    pub fn layers(&self) -> &LayerFilter {
        &self.layers
    }

    /// Edit layer interaction rules
    pub fn layers_mut(&mut self) -> &mut LayerFilter {
        &mut self.layers
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Register a body
    pub fn add_rigid_body(&mut self, body: RigidBody) -> BodyHandle {
        let is_static = body.is_static();
        let handle = self.bodies.insert(body);
        info!(body = %handle, is_static, "rigid body added");
        handle
    }

    /// Remove a body and purge it from every trigger's containment set
    pub fn remove_rigid_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let body = self.bodies.remove(handle)?;
        for (_, trigger) in self.triggers.iter_mut() {
            trigger.forget(handle);
        }
        info!(body = %handle, "rigid body removed");
        Some(body)
    }

    /// Look up a body
    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    /// Look up a body for mutation between ticks
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    /// Bodies in slot order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies.iter()
    }

    /// Number of registered bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Register a force field
    pub fn add_force_field(&mut self, field: ForceField) -> FieldHandle {
        let handle = self.fields.insert(field);
        info!(field = %handle, "force field added");
        handle
    }

    /// Remove a force field
    pub fn remove_force_field(&mut self, handle: FieldHandle) -> Option<ForceField> {
        let field = self.fields.remove(handle)?;
        info!(field = %handle, "force field removed");
        Some(field)
    }

    /// Look up a force field
    pub fn force_field(&self, handle: FieldHandle) -> Option<&ForceField> {
        self.fields.get(handle)
    }

    /// Number of registered force fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Register a trigger
    pub fn add_trigger(&mut self, trigger: Trigger) -> TriggerHandle {
        let handle = self.triggers.insert(trigger);
        info!(trigger = %handle, "trigger added");
        handle
    }

    /// Remove a trigger
    pub fn remove_trigger(&mut self, handle: TriggerHandle) -> Option<Trigger> {
        let trigger = self.triggers.remove(handle)?;
        info!(trigger = %handle, "trigger removed");
        Some(trigger)
    }

    /// Look up a trigger
    pub fn trigger(&self, handle: TriggerHandle) -> Option<&Trigger> {
        self.triggers.get(handle)
    }

    /// Number of registered triggers
    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Advance the simulation by `delta` seconds
    ///
    /// `delta` must be finite and non-negative. Deltas above the configured
    /// `max_delta` are simulated as given, with a warning.
    pub fn tick(&mut self, delta: f64) -> Result<TickReport, EngineError> {
        if !(delta.is_finite() && delta >= 0.0) {
            return Err(EngineError::InvalidDelta(delta));
        }
        if delta > self.config.max_delta {
            warn!(delta, max_delta = self.config.max_delta, "tick delta above configured bound");
        }

        self.tick_count += 1;
        let span = debug_span!("tick", tick = self.tick_count);
        let _enter = span.enter();

        let mut report = TickReport {
            tick: self.tick_count,
            ..TickReport::default()
        };

        self.accumulate_forces();
        self.integrate(delta);

        let (handles, shapes, proxies) = self.snapshot();
        let pairs = candidate_pairs(&proxies, &self.layers);
        report.candidate_pairs = pairs.len();

        let contacts = detect_contacts(&pairs, &shapes);
        report.contacts = contacts.len();
        report.impulses = self.resolve(&handles, &contacts);

        self.evaluate_triggers(delta, &mut report);

        for (_, body) in self.bodies.iter_mut() {
            body.clear_force();
        }

        debug!(
            candidate_pairs = report.candidate_pairs,
            contacts = report.contacts,
            impulses = report.impulses,
            trigger_events = report.trigger_events.len(),
            faults = report.faults.len(),
            "tick complete"
        );

        Ok(report)
    }

    fn accumulate_forces(&mut self) {
        let max_force = self.config.max_force_magnitude;
        for (handle, body) in self.bodies.iter_mut() {
            apply_fields(&self.fields, handle, body, max_force);
        }
    }

    fn integrate(&mut self, delta: f64) {
        let gravity = self.config.gravity;
        for (handle, body) in self.bodies.iter_mut() {
            self.integrator.integrate(handle, body, gravity, delta);
        }
    }

    fn snapshot(&self) -> (Vec<BodyHandle>, Vec<WorldShape>, Vec<Proxy>) {
        let mut handles = Vec::with_capacity(self.bodies.len());
        let mut shapes = Vec::with_capacity(self.bodies.len());
        let mut proxies = Vec::with_capacity(self.bodies.len());
        for (handle, body) in self.bodies.iter() {
            let shape = body.world_shape();
            proxies.push(Proxy {
                bounds: shape.bounds(),
                layer: body.layer(),
                is_static: body.is_static(),
            });
            shapes.push(shape);
            handles.push(handle);
        }
        (handles, shapes, proxies)
    }

    fn resolve(&mut self, handles: &[BodyHandle], contacts: &[(usize, usize, Contact)]) -> usize {
        let params = CorrectionParams {
            fraction: self.config.correction_fraction,
            slop: self.config.penetration_slop,
        };

        let mut impulses = 0;
        for (i, j, contact) in contacts {
            let (ha, hb) = (handles[*i], handles[*j]);
            let Some((a, b)) = self.bodies.get2_mut(ha, hb) else {
                continue;
            };
            let resolution = resolve_contact(a, b, contact, params);
            trace!(
                a = %ha,
                b = %hb,
                depth = contact.depth,
                normal = ?contact.normal,
                impulse = resolution.normal_impulse,
                "contact resolved"
            );
            if resolution.applied_impulse() {
                impulses += 1;
            }
        }
        impulses
    }

    fn evaluate_triggers(&mut self, delta: f64, report: &mut TickReport) {
        for (handle, trigger) in self.triggers.iter_mut() {
            let outcome = trigger.evaluate(handle, &mut self.bodies, delta);
            report.trigger_events.extend(outcome.events);
            report.faults.extend(outcome.faults);
        }
    }
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PhysicsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsEngine")
            .field("config", &self.config)
            .field("bodies", &self.bodies.len())
            .field("fields", &self.fields.len())
            .field("triggers", &self.triggers.len())
            .field("integrator", &self.integrator.name())
            .field("tick_count", &self.tick_count)
            .finish()
    }
}

#[cfg(not(feature = "parallel"))]
fn detect_contacts(pairs: &[(usize, usize)], shapes: &[WorldShape]) -> Vec<(usize, usize, Contact)> {
    pairs
        .iter()
        .filter_map(|&(i, j)| intersect(&shapes[i], &shapes[j]).map(|c| (i, j, c)))
        .collect()
}

// Order-preserving collect keeps resolution order identical to the serial path.
#[cfg(feature = "parallel")]
fn detect_contacts(pairs: &[(usize, usize)], shapes: &[WorldShape]) -> Vec<(usize, usize, Contact)> {
    pairs
        .par_iter()
        .filter_map(|&(i, j)| intersect(&shapes[i], &shapes[j]).map(|c| (i, j, c)))
        .collect()
}
