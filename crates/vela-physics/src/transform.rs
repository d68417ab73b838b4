// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Hierarchical node transforms.
//!
//! A `Transform` owns a node's local position, rotation, and scale plus an
//! incrementally maintained local model matrix. Global queries walk the parent
//! chain through a [`TransformSource`] (normally the [`crate::Scene`]).
//!
//! Composition rules:
//! - `global_model = parent.global_model * local_model * scale(local_scale)`
//! - `global_position = parent.global_position + local_position`
//! - `global_rotation = normalize(parent.global_rotation * local_rotation)`
//! - `global_scale = parent.global_scale ⊙ local_scale`
//!
//! A parent handle that no longer resolves is treated as "no parent".

use vela_math::{Mat4, Quat, Vec3};

use crate::ident::NodeId;

/// Read access to transforms by handle, used to walk parent chains.
pub trait TransformSource {
    /// Returns the transform of a live node.
    fn transform(&self, id: NodeId) -> Option<&Transform>;
}

/// World-space position and rotation of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalPose {
    /// Global position.
    pub position: Vec3,
    /// Global rotation (unit).
    pub rotation: Quat,
}

impl Default for GlobalPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::identity(),
        }
    }
}

/// Local transform of a scene node.
///
/// Invariant: `local_model` equals `T(local_position) * R(local_rotation)` up
/// to the rounding accumulated by folding deltas in place. Scale is kept out
/// of `local_model` and applied only when composing the global matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    local_position: Vec3,
    local_rotation: Quat,
    local_scale: Vec3,
    local_model: Mat4,
    parent: Option<NodeId>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform with unit scale and no parent.
    pub const fn identity() -> Self {
        Self {
            local_position: Vec3::ZERO,
            local_rotation: Quat::identity(),
            local_scale: Vec3::ONE,
            local_model: Mat4::identity(),
            parent: None,
        }
    }

    /// Creates a root transform from components. `rotation` is normalised.
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        let rotation = rotation.normalize();
        Self {
            local_position: position,
            local_rotation: rotation,
            local_scale: scale,
            local_model: Mat4::from_rotation_translation(&rotation, position),
            parent: None,
        }
    }

    /// Local position relative to the parent.
    pub fn local_position(&self) -> Vec3 {
        self.local_position
    }

    /// Local rotation relative to the parent (unit).
    pub fn local_rotation(&self) -> Quat {
        self.local_rotation
    }

    /// Local scale.
    pub fn local_scale(&self) -> Vec3 {
        self.local_scale
    }

    /// Local model matrix (translation and rotation only).
    pub fn local_model(&self) -> Mat4 {
        self.local_model
    }

    /// Parent handle, if any. The handle may be stale.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn set_parent_handle(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    /// Moves the node to `position` (local space).
    pub fn set_position(&mut self, position: Vec3) {
        let delta = position.sub(&self.local_position);
        self.local_position = position;
        self.local_model = Mat4::from_translation(delta).multiply(&self.local_model);
    }

    /// Moves the node by `delta` (local space).
    pub fn translate(&mut self, delta: Vec3) {
        self.local_position = self.local_position.add(&delta);
        self.local_model = Mat4::from_translation(delta).multiply(&self.local_model);
    }

    /// Replaces the local rotation. Zero-length input is stored as identity.
    pub fn set_rotation(&mut self, rotation: Quat) {
        let next = rotation.normalize();
        let delta = self.local_rotation.inverse().multiply(&next).normalize();
        self.local_rotation = next;
        // T * R_old * R(old⁻¹ * new) = T * R_new; the translation column is
        // untouched.
        self.local_model = self.local_model.multiply(&delta.to_mat4());
    }

    /// Applies `rotation` on top of the current one, in the parent's frame.
    pub fn rotate(&mut self, rotation: Quat) {
        let next = rotation.normalize().multiply(&self.local_rotation);
        self.set_rotation(next);
    }

    /// Applies Euler angles in degrees (`X`, then `Y`, then `Z`).
    pub fn rotate_euler_degrees(&mut self, degrees: Vec3) {
        self.rotate(Quat::from_euler_degrees(degrees));
    }

    /// Replaces the local scale. Applied only at global composition time, so
    /// repeated calls never compound.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.local_scale = scale;
    }

    /// Euclidean distance from the local position to `point`.
    pub fn distance_from(&self, point: Vec3) -> f32 {
        self.local_position.distance(&point)
    }

    fn parent_transform<'s, S>(&self, source: &'s S) -> Option<&'s Transform>
    where
        S: TransformSource + ?Sized,
    {
        self.parent.and_then(|id| source.transform(id))
    }

    /// Global model matrix: `parent.global_model * local_model * scale`.
    pub fn global_model<S>(&self, source: &S) -> Mat4
    where
        S: TransformSource + ?Sized,
    {
        let local = self
            .local_model
            .multiply(&Mat4::from_scale(self.local_scale));
        match self.parent_transform(source) {
            Some(parent) => parent.global_model(source).multiply(&local),
            None => local,
        }
    }

    /// Global position: sum of local positions along the ancestor chain.
    pub fn global_position<S>(&self, source: &S) -> Vec3
    where
        S: TransformSource + ?Sized,
    {
        match self.parent_transform(source) {
            Some(parent) => parent.global_position(source).add(&self.local_position),
            None => self.local_position,
        }
    }

    /// Global rotation, renormalised at every level.
    pub fn global_rotation<S>(&self, source: &S) -> Quat
    where
        S: TransformSource + ?Sized,
    {
        match self.parent_transform(source) {
            Some(parent) => parent
                .global_rotation(source)
                .multiply(&self.local_rotation)
                .normalize(),
            None => self.local_rotation,
        }
    }

    /// Global scale: component-wise product of local scales along the chain.
    pub fn global_scale<S>(&self, source: &S) -> Vec3
    where
        S: TransformSource + ?Sized,
    {
        match self.parent_transform(source) {
            Some(parent) => parent.global_scale(source).mul_elem(&self.local_scale),
            None => self.local_scale,
        }
    }

    /// Global position and rotation together.
    pub fn global_pose<S>(&self, source: &S) -> GlobalPose
    where
        S: TransformSource + ?Sized,
    {
        GlobalPose {
            position: self.global_position(source),
            rotation: self.global_rotation(source),
        }
    }

    /// View matrix: inverse of the global model. `None` when singular.
    pub fn global_view<S>(&self, source: &S) -> Option<Mat4>
    where
        S: TransformSource + ?Sized,
    {
        self.global_model(source).inverse()
    }

    /// Turns the node so its forward axis (−Z) points at `target` in world
    /// space.
    ///
    /// `parent` is the parent's global pose (`None` for roots); the world
    /// rotation is converted to local by undoing the parent's rotation.
    /// Returns `false` and leaves the rotation untouched when `target`
    /// coincides with the node's global position.
    pub fn look_at(&mut self, target: Vec3, up: Vec3, parent: Option<&GlobalPose>) -> bool {
        let parent = parent.copied().unwrap_or_default();
        let eye = parent.position.add(&self.local_position);
        let Some(world) = Quat::look_rotation(target.sub(&eye), up) else {
            return false;
        };
        let local = parent.rotation.inverse().multiply(&world);
        self.set_rotation(local);
        true
    }
}
