// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Frame driver: rigid-body integration, first-hit contact resolution, and
//! collider enter/exit tracking.
//!
//! Nodes are processed one at a time in insertion order. A two-body impulse
//! writes the other body's velocity immediately, so a body stepped later in
//! the same frame sees the post-impulse value. That order dependence is part
//! of the contract.

use tracing::{debug, instrument, trace, warn};
use vela_math::Vec3;

use crate::collider::TriggerEvent;
use crate::contact::{bounce, pair_impulse, vertical_contact, Contact};
use crate::error::{SceneError, SceneResult};
use crate::ident::NodeId;
use crate::rigid_body::RigidBody;
use crate::scene::Scene;
use crate::settings::PhysicsSettings;

/// Solid contact resolved for one body during a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionRecord {
    /// Body that moved.
    pub body: NodeId,
    /// Obstacle it hit first.
    pub other: NodeId,
    /// Contact normal, pointing from `other` toward `body`.
    pub normal: Vec3,
    /// Whether the normal velocity was snapped to zero (resting contact).
    pub resting: bool,
}

/// Everything observed during one frame or one node update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// New overlaps, in the order they were detected.
    pub entered: Vec<TriggerEvent>,
    /// Lost overlaps (including partners that were despawned or deactivated).
    pub exited: Vec<TriggerEvent>,
    /// Solid contacts, at most one per body.
    pub collisions: Vec<CollisionRecord>,
}

impl StepReport {
    /// Returns `true` when nothing happened.
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty() && self.collisions.is_empty()
    }
}

/// Geometry of the moving body gathered before the candidate scan.
struct Motion {
    position: Vec3,
    target: Vec3,
    scale: Vec3,
}

impl Scene {
    /// Advances every active node by `dt` seconds in insertion order.
    ///
    /// `dt` above `max_delta_time` is clamped.
    ///
    /// # Errors
    /// [`SceneError::InvalidDeltaTime`] if `dt` is negative or not finite.
    #[instrument(level = "debug", skip(self), fields(nodes = self.len()))]
    pub fn update(&mut self, dt: f32) -> SceneResult<StepReport> {
        let dt = self.checked_dt(dt)?;
        let mut report = StepReport::default();
        let ids = self.ids().to_vec();
        for id in ids {
            self.step_node(id, dt, &mut report)?;
        }
        Ok(report)
    }

    /// Advances a single node: rigid body first, then the collider's
    /// enter/exit pass. Inactive nodes are left untouched.
    pub fn update_node(&mut self, id: NodeId, dt: f32, report: &mut StepReport) -> SceneResult<()> {
        self.node(id)?;
        let dt = self.checked_dt(dt)?;
        self.step_node(id, dt, report)
    }

    fn checked_dt(&self, dt: f32) -> SceneResult<f32> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(SceneError::InvalidDeltaTime(dt));
        }
        let max = self.settings().max_delta_time;
        if dt > max {
            warn!(dt, max, "delta time clamped");
            return Ok(max);
        }
        Ok(dt)
    }

    fn step_node(&mut self, id: NodeId, dt: f32, report: &mut StepReport) -> SceneResult<()> {
        let Some(node) = self.get(id) else {
            return Ok(());
        };
        if !node.is_active() {
            return Ok(());
        }
        let has_collider = node.collider().is_some();
        if node.body().is_some() {
            self.step_body(id, dt, report)?;
        }
        if has_collider {
            self.collider_pass(id, report)?;
        }
        Ok(())
    }

    fn step_body(&mut self, id: NodeId, dt: f32, report: &mut StepReport) -> SceneResult<()> {
        let settings = self.settings().clone();
        let Some(mut body) = self.node_mut(id)?.body.take() else {
            return Ok(());
        };
        let result = self.advance_body(id, &mut body, dt, &settings, report);
        if let Some(node) = self.get_mut(id) {
            node.body = Some(body);
        }
        result
    }

    fn advance_body(
        &mut self,
        id: NodeId,
        body: &mut RigidBody,
        dt: f32,
        settings: &PhysicsSettings,
        report: &mut StepReport,
    ) -> SceneResult<()> {
        if body.use_gravity() {
            body.accelerate(body.gravity());
        }
        body.integrate(dt);

        let this: &Self = self;
        let node = this.node(id)?;
        let position = node.transform().global_position(this);
        let motion = Motion {
            position,
            target: position + body.velocity() * dt,
            scale: node.transform().global_scale(this),
        };
        let own = node.collider().map(|c| {
            (
                c.is_trigger(),
                c.bounds(motion.position, motion.scale),
                c.bounds(motion.target, motion.scale),
            )
        });

        let Some((own_trigger, current, tentative)) = own else {
            self.commit(id, &motion, motion.target)?;
            body.clear_acceleration();
            return Ok(());
        };

        let mut hit = None;
        for other in self.active_colliders() {
            if other == id {
                continue;
            }
            let other_trigger = self
                .get(other)
                .and_then(|n| n.collider())
                .is_some_and(|c| c.is_trigger());
            let other_bounds = self.bounds(other)?;
            if own_trigger || other_trigger {
                if current.overlaps(&other_bounds) {
                    self.register_trigger_contact(id, own_trigger, other, other_trigger, report);
                }
                continue;
            }
            if let Some(contact) = Contact::between(&tentative, &other_bounds) {
                hit = Some((other, contact));
                break;
            }
        }

        let Some((other, contact)) = hit else {
            self.commit(id, &motion, motion.target)?;
            body.clear_acceleration();
            return Ok(());
        };

        let normal = contact.normal;
        let restitution = body.restitution();
        let mut velocity = body.velocity();
        if let Some(other_body) = self.get_mut(other).and_then(|n| n.body.as_mut()) {
            if let Some((mine, theirs)) = pair_impulse(
                velocity,
                body.mass(),
                other_body.velocity(),
                other_body.mass(),
                normal,
                restitution,
            ) {
                velocity = mine;
                other_body.set_velocity_unchecked(theirs);
            }
        }
        velocity = bounce(velocity, normal, restitution);
        let mut resting = false;
        if contact.is_vertical(settings.vertical_normal_threshold) {
            (velocity, resting) =
                vertical_contact(velocity, normal, body.friction(), settings.contact_epsilon);
        }
        body.set_velocity_unchecked(velocity);
        self.commit(id, &motion, motion.target + contact.push_out)?;

        debug!(body = %id, other = %other, axis = ?contact.axis, resting, "collision resolved");
        report.collisions.push(CollisionRecord {
            body: id,
            other,
            normal,
            resting,
        });

        if body.try_sleep(settings.sleep_epsilon) {
            trace!(body = %id, "asleep");
            return Ok(());
        }
        body.clear_acceleration();
        Ok(())
    }

    /// Moves the node so its global position becomes `destination`.
    ///
    /// Global position is the plain sum of local positions, so the global
    /// delta is also the local delta.
    fn commit(&mut self, id: NodeId, motion: &Motion, destination: Vec3) -> SceneResult<()> {
        self.node_mut(id)?
            .transform_mut()
            .translate(destination - motion.position);
        Ok(())
    }

    fn register_trigger_contact(
        &mut self,
        id: NodeId,
        own_trigger: bool,
        other: NodeId,
        other_trigger: bool,
        report: &mut StepReport,
    ) {
        let sides = [(own_trigger, id, other), (other_trigger, other, id)];
        for (is_trigger, observer, partner) in sides {
            if !is_trigger {
                continue;
            }
            let entered = self
                .get_mut(observer)
                .and_then(|n| n.collider.as_mut())
                .is_some_and(|c| c.enter(observer, partner));
            if entered {
                trace!(collider = %observer, other = %partner, "trigger enter");
                report.entered.push(TriggerEvent {
                    collider: observer,
                    other: partner,
                });
            }
        }
    }

    fn collider_pass(&mut self, id: NodeId, report: &mut StepReport) -> SceneResult<()> {
        let own = self.bounds(id)?;
        let overlapping: Vec<NodeId> = self
            .active_colliders()
            .into_iter()
            .filter(|other| *other != id)
            .filter(|other| self.bounds(*other).is_ok_and(|b| own.overlaps(&b)))
            .collect();
        let Some(collider) = self.get_mut(id).and_then(|n| n.collider.as_mut()) else {
            return Ok(());
        };
        let (entered, exited) = collider.observe(id, &overlapping);
        for other in entered {
            trace!(collider = %id, other = %other, "enter");
            report.entered.push(TriggerEvent {
                collider: id,
                other,
            });
        }
        for other in exited {
            trace!(collider = %id, other = %other, "exit");
            report.exited.push(TriggerEvent {
                collider: id,
                other,
            });
        }
        Ok(())
    }
}
