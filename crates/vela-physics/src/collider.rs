// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Axis-aligned box colliders with edge-triggered overlap tracking.

use core::fmt;

use rustc_hash::FxHashSet;
use vela_geom::Aabb;
use vela_math::Vec3;

use crate::error::{SceneError, SceneResult};
use crate::ident::NodeId;

/// Payload handed to trigger callbacks when a new overlap begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerEvent {
    /// Node whose collider observed the overlap.
    pub collider: NodeId,
    /// Node it started overlapping.
    pub other: NodeId,
}

/// Callback invoked synchronously on every enter transition.
pub type TriggerCallback = Box<dyn FnMut(&TriggerEvent)>;

/// Axis-aligned box attached to a node.
///
/// The box is centred on the node's global position and sized by
/// `half_extents ⊙ |global_scale|`; it does not follow rotation. World bounds
/// are recomputed on every query.
///
/// `touching` holds the nodes this collider overlapped as of its last
/// observation. It changes only through enter/exit transitions, which is what
/// keeps the callback edge-triggered.
pub struct Collider {
    half_extents: Vec3,
    is_trigger: bool,
    on_trigger: Option<TriggerCallback>,
    touching: FxHashSet<NodeId>,
}

impl fmt::Debug for Collider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collider")
            .field("half_extents", &self.half_extents)
            .field("is_trigger", &self.is_trigger)
            .field("has_callback", &self.on_trigger.is_some())
            .field("touching", &self.touching.len())
            .finish()
    }
}

impl Collider {
    /// Solid collider with the given half-extents.
    ///
    /// # Errors
    /// [`SceneError::InvalidExtents`] if any component is negative or not
    /// finite.
    pub fn new(half_extents: Vec3) -> SceneResult<Self> {
        let ok = half_extents.is_finite()
            && half_extents.x() >= 0.0
            && half_extents.y() >= 0.0
            && half_extents.z() >= 0.0;
        if !ok {
            return Err(SceneError::InvalidExtents(half_extents.to_array()));
        }
        Ok(Self {
            half_extents,
            is_trigger: false,
            on_trigger: None,
            touching: FxHashSet::default(),
        })
    }

    /// Solid collider from full edge lengths (`size / 2` per axis).
    pub fn from_size(size: Vec3) -> SceneResult<Self> {
        Self::new(size.scale(0.5))
    }

    /// Trigger collider: reports overlaps, never blocks motion.
    pub fn trigger(half_extents: Vec3) -> SceneResult<Self> {
        Ok(Self::new(half_extents)?.with_trigger(true))
    }

    /// Sets the trigger flag.
    #[must_use]
    pub fn with_trigger(mut self, is_trigger: bool) -> Self {
        self.is_trigger = is_trigger;
        self
    }

    /// Installs the enter callback.
    #[must_use]
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&TriggerEvent) + 'static,
    {
        self.on_trigger = Some(Box::new(callback));
        self
    }

    /// Replaces (or clears) the enter callback.
    pub fn set_callback(&mut self, callback: Option<TriggerCallback>) {
        self.on_trigger = callback;
    }

    /// Half-extents in local units.
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Whether this collider is a trigger.
    pub fn is_trigger(&self) -> bool {
        self.is_trigger
    }

    /// Toggles trigger behaviour at runtime.
    pub fn set_trigger(&mut self, is_trigger: bool) {
        self.is_trigger = is_trigger;
    }

    /// Whether `other` is currently in the touching set.
    pub fn is_touching(&self, other: NodeId) -> bool {
        self.touching.contains(&other)
    }

    /// Touching set in ascending handle order.
    pub fn touching(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.touching.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// World bounds for an owner at `center` with global scale `scale`.
    pub fn bounds(&self, center: Vec3, scale: Vec3) -> Aabb {
        Aabb::from_center_half_extents(center, self.half_extents.mul_elem(&scale.abs()))
    }

    /// Records an overlap with `other`. Fires the callback and returns `true`
    /// only when the overlap is new.
    pub(crate) fn enter(&mut self, own: NodeId, other: NodeId) -> bool {
        if !self.touching.insert(other) {
            return false;
        }
        if let Some(callback) = self.on_trigger.as_mut() {
            callback(&TriggerEvent {
                collider: own,
                other,
            });
        }
        true
    }

    /// Reconciles the touching set with the full list of nodes overlapping
    /// this collider right now.
    ///
    /// Returns `(entered, exited)`: entries follow `overlapping` order, exits
    /// are sorted by handle. Nodes absent from `overlapping` are dropped,
    /// which also purges despawned and deactivated nodes.
    pub(crate) fn observe(
        &mut self,
        own: NodeId,
        overlapping: &[NodeId],
    ) -> (Vec<NodeId>, Vec<NodeId>) {
        let mut entered = Vec::new();
        for &other in overlapping {
            if self.enter(own, other) {
                entered.push(other);
            }
        }
        let current: FxHashSet<NodeId> = overlapping.iter().copied().collect();
        let mut exited: Vec<NodeId> = self
            .touching
            .iter()
            .filter(|id| !current.contains(*id))
            .copied()
            .collect();
        exited.sort_unstable();
        for id in &exited {
            self.touching.remove(id);
        }
        (entered, exited)
    }
}
