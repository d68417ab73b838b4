// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Vela spatial core: hierarchical transforms, box colliders, and rigid-body
//! stepping.
//!
//! A [`Scene`] owns every node. Each node has a [`Transform`] and may carry a
//! [`Collider`] and a [`RigidBody`]. [`Scene::update`] advances the whole
//! scene by one frame:
//!
//! 1. For each active node in insertion order, the rigid body (if any)
//!    receives gravity, integrates, scans the other colliders, and resolves
//!    against the first solid hit.
//! 2. The node's collider (if any) then reconciles its touching set and
//!    fires its callback on new overlaps.
//!
//! Everything runs on the caller's thread; there is no global frame state,
//! `dt` and the scene are explicit parameters.
//!
//! ```
//! use vela_math::Vec3;
//! use vela_physics::{Collider, PhysicsSettings, Scene};
//!
//! # fn main() -> Result<(), vela_physics::SceneError> {
//! let mut scene = Scene::new(PhysicsSettings::default())?;
//! let floor = scene.spawn_at("floor", Vec3::new(0.0, -1.0, 0.0))?;
//! scene.attach_collider(floor, Collider::new(Vec3::new(10.0, 1.0, 10.0))?)?;
//!
//! let crate_id = scene.spawn_at("crate", Vec3::new(0.0, 2.0, 0.0))?;
//! scene.attach_collider(crate_id, Collider::new(Vec3::splat(0.5))?)?;
//! let body = scene.make_body(1.0)?;
//! scene.attach_body(crate_id, body)?;
//!
//! for _ in 0..240 {
//!     scene.update(1.0 / 60.0)?;
//! }
//! let y = scene.global_position(crate_id)?.y();
//! assert!((y - 0.5).abs() < 1e-3);
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod collider;
pub mod contact;
mod error;
mod ident;
mod rigid_body;
mod scene;
mod settings;
mod step;
mod transform;

pub use collider::{Collider, TriggerCallback, TriggerEvent};
pub use error::{SceneError, SceneResult};
pub use ident::NodeId;
pub use rigid_body::RigidBody;
pub use scene::{Node, Scene};
pub use settings::PhysicsSettings;
pub use step::{CollisionRecord, StepReport};
pub use transform::{GlobalPose, Transform, TransformSource};
