// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node registry: generational slots, unique names, insertion order.

use rustc_hash::FxHashMap;
use tracing::debug;
use vela_geom::{Aabb, AllPairs, BroadPhase};
use vela_math::{Mat4, Quat, Vec3};

use crate::collider::Collider;
use crate::error::{SceneError, SceneResult};
use crate::ident::NodeId;
use crate::rigid_body::RigidBody;
use crate::settings::PhysicsSettings;
use crate::transform::{GlobalPose, Transform, TransformSource};

/// A scene object: transform plus optional collider and rigid body.
#[derive(Debug)]
pub struct Node {
    name: String,
    active: bool,
    transform: Transform,
    pub(crate) collider: Option<Collider>,
    pub(crate) body: Option<RigidBody>,
}

impl Node {
    fn new(name: String) -> Self {
        Self {
            name,
            active: true,
            transform: Transform::identity(),
            collider: None,
            body: None,
        }
    }

    /// Unique name within the owning scene.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inactive nodes are skipped by the frame driver and ignored as contact
    /// candidates.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Local transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable local transform. Re-parenting goes through
    /// [`Scene::set_parent`].
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Attached collider, if any.
    pub fn collider(&self) -> Option<&Collider> {
        self.collider.as_ref()
    }

    /// Mutable collider, if any.
    pub fn collider_mut(&mut self) -> Option<&mut Collider> {
        self.collider.as_mut()
    }

    /// Attached rigid body, if any.
    pub fn body(&self) -> Option<&RigidBody> {
        self.body.as_ref()
    }

    /// Mutable rigid body, if any.
    pub fn body_mut(&mut self) -> Option<&mut RigidBody> {
        self.body.as_mut()
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Owner of every node plus the shared physics settings.
///
/// Iteration order is insertion order of live nodes; slots freed by
/// [`Scene::despawn`] are reused with a bumped generation so old handles stop
/// resolving.
#[derive(Debug)]
pub struct Scene {
    settings: PhysicsSettings,
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<NodeId>,
    names: FxHashMap<String, NodeId>,
}

impl TransformSource for Scene {
    fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.get(id).map(Node::transform)
    }
}

impl Scene {
    /// Empty scene with validated settings.
    pub fn new(settings: PhysicsSettings) -> SceneResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
            names: FxHashMap::default(),
        })
    }

    /// Current settings.
    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    /// Replaces the settings after validating them. Existing bodies keep
    /// their gravity.
    pub fn set_settings(&mut self, settings: PhysicsSettings) -> SceneResult<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` when the scene has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Live node handles in insertion order.
    pub fn ids(&self) -> &[NodeId] {
        &self.order
    }

    /// Whether `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Creates a root node with an identity transform.
    ///
    /// # Errors
    /// [`SceneError::DuplicateName`] if `name` is taken.
    pub fn spawn(&mut self, name: impl Into<String>) -> SceneResult<NodeId> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(SceneError::DuplicateName(name));
        }
        let id = if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(Node::new(name.clone()));
            NodeId::new(index, slot.generation)
        } else {
            let index = u32::try_from(self.slots.len())
                .map_err(|_| SceneError::CapacityExhausted)?;
            self.slots.push(Slot {
                generation: 0,
                node: Some(Node::new(name.clone())),
            });
            NodeId::new(index, 0)
        };
        debug!(node = %id, name = %name, "spawned");
        self.names.insert(name, id);
        self.order.push(id);
        Ok(id)
    }

    /// Creates a root node at `position`.
    pub fn spawn_at(&mut self, name: impl Into<String>, position: Vec3) -> SceneResult<NodeId> {
        let id = self.spawn(name)?;
        self.node_mut(id)?.transform_mut().set_position(position);
        Ok(id)
    }

    /// Removes a node and returns it. Children are not removed; their parent
    /// handle goes stale and they behave as roots.
    pub fn despawn(&mut self, id: NodeId) -> SceneResult<Node> {
        let slot = self
            .slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation() && slot.node.is_some())
            .ok_or(SceneError::UnknownNode(id))?;
        let node = slot.node.take().ok_or(SceneError::UnknownNode(id))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        self.order.retain(|live| *live != id);
        self.names.remove(node.name());
        debug!(node = %id, name = %node.name(), "despawned");
        Ok(node)
    }

    /// Looks a node up by name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
    }

    /// Borrows a live node.
    pub fn node(&self, id: NodeId) -> SceneResult<&Node> {
        self.get(id).ok_or(SceneError::UnknownNode(id))
    }

    /// Mutably borrows a live node.
    pub fn node_mut(&mut self, id: NodeId) -> SceneResult<&mut Node> {
        self.get_mut(id).ok_or(SceneError::UnknownNode(id))
    }

    /// Activates or deactivates a node.
    pub fn set_active(&mut self, id: NodeId, active: bool) -> SceneResult<()> {
        self.node_mut(id)?.active = active;
        Ok(())
    }

    /// Re-parents `child` under `parent` (or detaches it with `None`).
    ///
    /// The local transform is kept as-is, so the global pose changes with
    /// the new parent.
    ///
    /// # Errors
    /// - [`SceneError::UnknownNode`] for a stale `child` or `parent`.
    /// - [`SceneError::HierarchyCycle`] if `parent` is `child` or one of its
    ///   descendants.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> SceneResult<()> {
        self.node(child)?;
        if let Some(parent) = parent {
            self.node(parent)?;
            let mut cursor = Some(parent);
            while let Some(current) = cursor {
                if current == child {
                    return Err(SceneError::HierarchyCycle { child, parent });
                }
                cursor = self
                    .get(current)
                    .and_then(|node| node.transform.parent());
            }
        }
        self.node_mut(child)?.transform.set_parent_handle(parent);
        Ok(())
    }

    /// Live parent of `id`, if any. A stale parent handle yields `None`.
    pub fn parent(&self, id: NodeId) -> SceneResult<Option<NodeId>> {
        Ok(self
            .node(id)?
            .transform
            .parent()
            .filter(|parent| self.contains(*parent)))
    }

    /// Live children of `id` in insertion order.
    pub fn children(&self, id: NodeId) -> SceneResult<Vec<NodeId>> {
        self.node(id)?;
        Ok(self
            .order
            .iter()
            .copied()
            .filter(|candidate| {
                self.get(*candidate)
                    .is_some_and(|node| node.transform.parent() == Some(id))
            })
            .collect())
    }

    /// Attaches a collider.
    ///
    /// # Errors
    /// [`SceneError::ComponentOccupied`] if the node already has one.
    pub fn attach_collider(&mut self, id: NodeId, collider: Collider) -> SceneResult<()> {
        let node = self.node_mut(id)?;
        if node.collider.is_some() {
            return Err(SceneError::ComponentOccupied {
                node: id,
                kind: "collider",
            });
        }
        node.collider = Some(collider);
        Ok(())
    }

    /// Attaches a rigid body.
    ///
    /// # Errors
    /// [`SceneError::ComponentOccupied`] if the node already has one.
    pub fn attach_body(&mut self, id: NodeId, body: RigidBody) -> SceneResult<()> {
        let node = self.node_mut(id)?;
        if node.body.is_some() {
            return Err(SceneError::ComponentOccupied {
                node: id,
                kind: "rigid body",
            });
        }
        node.body = Some(body);
        Ok(())
    }

    /// Removes and returns the collider.
    pub fn detach_collider(&mut self, id: NodeId) -> SceneResult<Collider> {
        self.node_mut(id)?
            .collider
            .take()
            .ok_or(SceneError::MissingComponent {
                node: id,
                kind: "collider",
            })
    }

    /// Removes and returns the rigid body.
    pub fn detach_body(&mut self, id: NodeId) -> SceneResult<RigidBody> {
        self.node_mut(id)?
            .body
            .take()
            .ok_or(SceneError::MissingComponent {
                node: id,
                kind: "rigid body",
            })
    }

    /// New rigid body whose gravity comes from the scene settings.
    pub fn make_body(&self, mass: f32) -> SceneResult<RigidBody> {
        RigidBody::new(mass)?.with_gravity(self.settings.gravity())
    }

    fn transform_of(&self, id: NodeId) -> SceneResult<&Transform> {
        self.node(id).map(Node::transform)
    }

    /// Global model matrix of `id`.
    pub fn global_model(&self, id: NodeId) -> SceneResult<Mat4> {
        Ok(self.transform_of(id)?.global_model(self))
    }

    /// Global position of `id`.
    pub fn global_position(&self, id: NodeId) -> SceneResult<Vec3> {
        Ok(self.transform_of(id)?.global_position(self))
    }

    /// Global rotation of `id`.
    pub fn global_rotation(&self, id: NodeId) -> SceneResult<Quat> {
        Ok(self.transform_of(id)?.global_rotation(self))
    }

    /// Global scale of `id`.
    pub fn global_scale(&self, id: NodeId) -> SceneResult<Vec3> {
        Ok(self.transform_of(id)?.global_scale(self))
    }

    /// View matrix (inverse global model) of `id`.
    ///
    /// # Errors
    /// [`SceneError::SingularTransform`] when the global model has no inverse.
    pub fn global_view(&self, id: NodeId) -> SceneResult<Mat4> {
        self.transform_of(id)?
            .global_view(self)
            .ok_or(SceneError::SingularTransform(id))
    }

    /// Points the node's −Z axis at `target` (world space). Returns `false`
    /// when `target` is the node's own position.
    pub fn look_at(&mut self, id: NodeId, target: Vec3, up: Vec3) -> SceneResult<bool> {
        let this: &Self = self;
        let parent_pose: Option<GlobalPose> = this
            .parent(id)?
            .and_then(|parent| this.get(parent))
            .map(|parent| parent.transform.global_pose(this));
        Ok(self
            .node_mut(id)?
            .transform
            .look_at(target, up, parent_pose.as_ref()))
    }

    /// World bounds of the node's collider.
    ///
    /// # Errors
    /// [`SceneError::MissingComponent`] if the node has no collider.
    pub fn bounds(&self, id: NodeId) -> SceneResult<Aabb> {
        let node = self.node(id)?;
        let collider = node.collider().ok_or(SceneError::MissingComponent {
            node: id,
            kind: "collider",
        })?;
        Ok(collider.bounds(
            node.transform.global_position(self),
            node.transform.global_scale(self),
        ))
    }

    /// Whether the colliders of `a` and `b` overlap right now.
    pub fn overlaps(&self, a: NodeId, b: NodeId) -> SceneResult<bool> {
        Ok(self.bounds(a)?.overlaps(&self.bounds(b)?))
    }

    /// Accumulates a force on the node's rigid body.
    pub fn apply_force(&mut self, id: NodeId, force: Vec3) -> SceneResult<()> {
        self.node_mut(id)?
            .body_mut()
            .ok_or(SceneError::MissingComponent {
                node: id,
                kind: "rigid body",
            })?
            .apply_force(force)
    }

    /// Active nodes carrying a collider, in insertion order.
    pub(crate) fn active_colliders(&self) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|id| {
                self.get(*id)
                    .is_some_and(|node| node.active && node.collider.is_some())
            })
            .collect()
    }

    /// Canonical list of overlapping collider pairs among active nodes.
    pub fn overlapping_pairs(&self) -> Vec<(NodeId, NodeId)> {
        let mut broad = AllPairs::new();
        for id in self.active_colliders() {
            if let Ok(aabb) = self.bounds(id) {
                broad.upsert(id, aabb);
            }
        }
        broad.pairs()
    }
}
