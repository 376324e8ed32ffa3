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
//! Trigger zones
//!
//! A [`Trigger`] is a non-colliding region. Each tick it computes which
//! dynamic bodies are inside, diffs that against the previous tick, and calls
//! its [`TriggerHandler`] once for every body that just entered. Bodies that
//! stay inside are not reported again; leaving is silent.
//!
//! The new containment set is stored before any handler runs, so a handler
//! that fails (or panics) cannot leave the set half-updated. A handler may
//! move the body it is given, for instance teleporting it out of the zone.

use crate::body::RigidBody;
use crate::collider::Collider;
use crate::collision::intersect;
use crate::error::TriggerError;
use crate::handle::{Arena, Handle};
use crate::math::Pose;
use std::collections::BTreeSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::warn;

/// Handle to a trigger registered with an engine
pub type TriggerHandle = Handle<Trigger>;

/// Handle to a body registered with an engine
pub type BodyHandle = Handle<RigidBody>;

/// How a body is tested against the zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Containment {
    /// Body position lies inside the zone
    #[default]
    Origin,
    /// Body collider overlaps the zone
    Overlap,
}

/// Receives enter events
///
/// Implemented for any `FnMut(BodyHandle, &mut RigidBody, f64) -> Result<(), TriggerError> + Send`.
pub trait TriggerHandler: Send {
    /// Called once when `body` enters the zone; `delta` is the tick delta
    fn on_enter(&mut self, handle: BodyHandle, body: &mut RigidBody, delta: f64) -> Result<(), TriggerError>;
}

impl<F> TriggerHandler for F
where
    F: FnMut(BodyHandle, &mut RigidBody, f64) -> Result<(), TriggerError> + Send,
{
    fn on_enter(&mut self, handle: BodyHandle, body: &mut RigidBody, delta: f64) -> Result<(), TriggerError> {
        self(handle, body, delta)
    }
}

/// A body entered a trigger zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    /// Zone that fired
    pub trigger: TriggerHandle,
    /// Body that entered
    pub body: BodyHandle,
}

/// A trigger handler returned an error or panicked
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerFault {
    /// Zone whose handler failed
    pub trigger: TriggerHandle,
    /// Body being reported
    pub body: BodyHandle,
    /// What went wrong
    pub error: TriggerError,
}

/// Outcome of evaluating one trigger for one tick
#[derive(Debug, Default)]
pub struct TriggerOutcome {
    /// Bodies that entered, in handle order
    pub events: Vec<TriggerEvent>,
    /// Handler failures
    pub faults: Vec<TriggerFault>,
}

/// Zone collider plus containment tracking and an enter handler
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use glam::DVec3;
/// use rigid_physics::collider::Collider;
/// use rigid_physics::math::Pose;
/// use rigid_physics::trigger::Trigger;
///
/// let zone = Arc::new(Collider::aabb(DVec3::splat(-1.0), DVec3::splat(1.0)).unwrap());
/// let trigger = Trigger::new(zone, Pose::IDENTITY, |_, body, _| {
///     body.set_position(DVec3::new(0.0, 45.0, 0.0));
///     Ok(())
/// });
/// assert!(trigger.contained().is_empty());
/// ```
pub struct Trigger {
    collider: Arc<Collider>,
    pose: Pose,
    containment: Containment,
    handler: Box<dyn TriggerHandler>,
    inside: BTreeSet<BodyHandle>,
}

impl Trigger {
    /// Create a trigger with a closure handler, using [`Containment::Origin`]
    pub fn new<F>(collider: Arc<Collider>, pose: Pose, handler: F) -> Self
    where
        F: FnMut(BodyHandle, &mut RigidBody, f64) -> Result<(), TriggerError> + Send + 'static,
    {
        Trigger::with_handler(collider, pose, handler)
    }

    /// Create a trigger with any [`TriggerHandler`], using [`Containment::Origin`]
    pub fn with_handler<H>(collider: Arc<Collider>, pose: Pose, handler: H) -> Self
    where
        H: TriggerHandler + 'static,
    {
        Trigger {
            collider,
            pose,
            containment: Containment::default(),
            handler: Box::new(handler),
            inside: BTreeSet::new(),
        }
    }

    /// Choose how bodies are tested against the zone
    pub fn with_containment(mut self, containment: Containment) -> Self {
        self.containment = containment;
        self
    }

    /// Zone shape
    pub fn collider(&self) -> &Arc<Collider> {
        &self.collider
    }

    /// Zone placement
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Containment mode
    pub fn containment(&self) -> Containment {
        self.containment
    }

    /// Bodies inside as of the last evaluation
    pub fn contained(&self) -> &BTreeSet<BodyHandle> {
        &self.inside
    }

    /// Whether a body currently satisfies the containment test
    pub fn contains(&self, body: &RigidBody) -> bool {
        match self.containment {
            Containment::Origin => self.collider.contains_point(&self.pose, body.position()),
            Containment::Overlap => intersect(&self.collider.at(&self.pose), &body.world_shape()).is_some(),
        }
    }

    /// Drop a body from the containment set
    pub fn forget(&mut self, body: BodyHandle) -> bool {
        self.inside.remove(&body)
    }

    /// Update containment and fire the handler for bodies that just entered
    pub fn evaluate(&mut self, own: TriggerHandle, bodies: &mut Arena<RigidBody>, delta: f64) -> TriggerOutcome {
        let now: BTreeSet<BodyHandle> = bodies
            .iter()
            .filter(|(_, body)| body.is_dynamic() && self.contains(body))
            .map(|(handle, _)| handle)
            .collect();
        let entered: Vec<BodyHandle> = now.difference(&self.inside).copied().collect();
        self.inside = now;

        let mut outcome = TriggerOutcome::default();
        for handle in entered {
            let Some(body) = bodies.get_mut(handle) else {
                continue;
            };
            outcome.events.push(TriggerEvent { trigger: own, body: handle });

            let handler = &mut self.handler;
            let result = catch_unwind(AssertUnwindSafe(|| handler.on_enter(handle, body, delta)))
                .unwrap_or_else(|payload| Err(TriggerError::Handler(panic_message(payload.as_ref()))));

            if let Err(error) = result {
                warn!(trigger = %own, body = %handle, %error, "trigger handler failed");
                outcome.faults.push(TriggerFault {
                    trigger: own,
                    body: handle,
                    error,
                });
            }
        }

        outcome
    }
}

impl std::fmt::Debug for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trigger")
            .field("collider", &self.collider)
            .field("pose", &self.pose)
            .field("containment", &self.containment)
            .field("inside", &self.inside)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}
