// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Demo scenes.

use tracing::info;
use vela_math::Vec3;
use vela_physics::{Collider, NodeId, Scene, SceneResult};

fn floor(scene: &mut Scene) -> SceneResult<NodeId> {
    let id = scene.spawn_at("floor", Vec3::new(0.0, -1.0, 0.0))?;
    scene.attach_collider(id, Collider::new(Vec3::new(20.0, 1.0, 20.0))?)?;
    Ok(id)
}

/// A crate falls onto the floor and settles.
pub(crate) fn drop_crate(scene: &mut Scene) -> SceneResult<Vec<NodeId>> {
    floor(scene)?;
    let id = scene.spawn_at("crate", Vec3::new(0.0, 4.0, 0.0))?;
    scene.attach_collider(id, Collider::from_size(Vec3::splat(1.0))?)?;
    let body = scene.make_body(1.0)?.with_friction(0.2)?;
    scene.attach_body(id, body)?;
    Ok(vec![id])
}

/// Two equal elastic boxes meet head-on and swap velocities.
pub(crate) fn bounce(scene: &mut Scene) -> SceneResult<Vec<NodeId>> {
    let left = scene.spawn_at("left", Vec3::new(-4.0, 0.0, 0.0))?;
    let right = scene.spawn_at("right", Vec3::new(4.0, 0.0, 0.0))?;
    for (id, vx) in [(left, 3.0), (right, -3.0)] {
        scene.attach_collider(id, Collider::new(Vec3::splat(0.5))?)?;
        let body = scene
            .make_body(1.0)?
            .with_use_gravity(false)
            .with_restitution(1.0)?
            .with_velocity(Vec3::new(vx, 0.0, 0.0))?;
        scene.attach_body(id, body)?;
    }
    Ok(vec![left, right])
}

/// A weightless puck glides through a trigger volume and into a wall.
pub(crate) fn triggers(scene: &mut Scene) -> SceneResult<Vec<NodeId>> {
    let goal = scene.spawn_at("goal", Vec3::new(6.0, 1.0, 0.0))?;
    let zone = Collider::trigger(Vec3::new(1.0, 1.0, 2.0))?.with_callback(|event| {
        info!(zone = %event.collider, visitor = %event.other, "goal entered");
    });
    scene.attach_collider(goal, zone)?;

    let wall = scene.spawn_at("wall", Vec3::new(12.0, 1.0, 0.0))?;
    scene.attach_collider(wall, Collider::new(Vec3::new(0.5, 3.0, 3.0))?)?;

    let puck = scene.spawn_at("puck", Vec3::new(0.0, 1.0, 0.0))?;
    scene.attach_collider(puck, Collider::new(Vec3::splat(0.5))?)?;
    let body = scene
        .make_body(0.5)?
        .with_use_gravity(false)
        .with_restitution(0.3)?
        .with_velocity(Vec3::new(8.0, 0.0, 0.0))?;
    scene.attach_body(puck, body)?;
    Ok(vec![puck])
}
