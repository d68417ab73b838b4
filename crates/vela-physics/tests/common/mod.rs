// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use vela_math::{Quat, Vec3};
use vela_physics::{Collider, NodeId, PhysicsSettings, RigidBody, Scene};

pub const EPS: f32 = 1e-4;

pub fn approx(a: f32, b: f32) {
    let diff = (a - b).abs();
    assert!(diff <= EPS, "expected {b}, got {a} (diff {diff})");
}

pub fn approx3(a: Vec3, b: [f32; 3]) {
    let a = a.to_array();
    for i in 0..3 {
        assert!((a[i] - b[i]).abs() <= EPS, "component {i}: {a:?} vs {b:?}");
    }
}

pub fn approx_quat(a: Quat, b: Quat) {
    let (a, b) = (a.to_array(), b.to_array());
    // q and -q encode the same rotation.
    let same = (0..4).all(|i| (a[i] - b[i]).abs() <= EPS);
    let flipped = (0..4).all(|i| (a[i] + b[i]).abs() <= EPS);
    assert!(same || flipped, "{a:?} vs {b:?}");
}

/// Scene with default settings.
pub fn scene() -> Scene {
    Scene::new(PhysicsSettings::default()).expect("default settings are valid")
}

/// Scene without gravity.
pub fn weightless_scene() -> Scene {
    let settings = PhysicsSettings {
        gravity: [0.0, 0.0, 0.0],
        ..PhysicsSettings::default()
    };
    Scene::new(settings).expect("valid settings")
}

/// Static solid box (collider, no body).
pub fn wall(scene: &mut Scene, name: &str, center: Vec3, half: Vec3) -> NodeId {
    let id = scene.spawn_at(name, center).expect("spawn");
    scene
        .attach_collider(id, Collider::new(half).expect("extents"))
        .expect("attach collider");
    id
}

/// Unit-half-extent dynamic box.
pub fn dynamic_box(scene: &mut Scene, name: &str, center: Vec3, body: RigidBody) -> NodeId {
    let id = scene.spawn_at(name, center).expect("spawn");
    scene
        .attach_collider(id, Collider::new(Vec3::ONE).expect("extents"))
        .expect("attach collider");
    scene.attach_body(id, body).expect("attach body");
    id
}
