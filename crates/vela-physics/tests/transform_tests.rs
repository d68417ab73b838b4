// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Transform composition, hierarchy bookkeeping, and view/look-at queries.

mod common;

use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestCaseError, TestRng, TestRunner};

use common::{approx, approx3, approx_quat, scene};
use vela_math::{Mat4, Quat, Vec3};
use vela_physics::{NodeId, Scene, SceneError, Transform};

type Link = ([f32; 3], [f32; 4], [f32; 3]);

fn link_strategy() -> impl Strategy<Value = Link> {
    (
        prop::array::uniform3(-10.0f32..10.0),
        prop::array::uniform4(-1.0f32..1.0),
        prop::array::uniform3(0.25f32..2.0),
    )
}

fn build_chain(scene: &mut Scene, links: &[Link]) -> Vec<NodeId> {
    let mut ids: Vec<NodeId> = Vec::new();
    for (i, (pos, rot, scale)) in links.iter().enumerate() {
        let id = scene.spawn(format!("link-{i}")).expect("spawn");
        let t = scene.node_mut(id).expect("live").transform_mut();
        t.set_position(Vec3::from(*pos));
        t.set_rotation(Quat::new(rot[0], rot[1], rot[2], rot[3]));
        t.set_scale(Vec3::from(*scale));
        if let Some(parent) = ids.last() {
            scene.set_parent(id, Some(*parent)).expect("acyclic");
        }
        ids.push(id);
    }
    ids
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-3 * b.abs().max(1.0)
}

fn check_chain(links: &[Link]) -> Result<(), TestCaseError> {
    let mut scene = scene();
    let ids = build_chain(&mut scene, links);

    let mut model = Mat4::identity();
    let mut position = Vec3::ZERO;
    let mut rotation = Quat::identity();
    let mut scale = Vec3::ONE;
    for (id, (pos, rot, s)) in ids.iter().zip(links) {
        let q = Quat::new(rot[0], rot[1], rot[2], rot[3]).normalize();
        let local = Mat4::from_rotation_translation(&q, Vec3::from(*pos))
            .multiply(&Mat4::from_scale(Vec3::from(*s)));
        model = model.multiply(&local);
        position = position + Vec3::from(*pos);
        rotation = rotation.multiply(&q).normalize();
        scale = scale.mul_elem(&Vec3::from(*s));

        let got = scene.global_model(*id).expect("live").to_array();
        let want = model.to_array();
        for i in 0..16 {
            prop_assert!(close(got[i], want[i]), "model[{i}]: {got:?} vs {want:?}");
        }
        let got = scene.global_position(*id).expect("live").to_array();
        for (g, w) in got.iter().zip(position.to_array()) {
            prop_assert!(close(*g, w), "position {got:?} vs {position:?}");
        }
        let got = scene.global_scale(*id).expect("live").to_array();
        for (g, w) in got.iter().zip(scale.to_array()) {
            prop_assert!(close(*g, w), "scale {got:?} vs {scale:?}");
        }
        let got = scene.global_rotation(*id).expect("live");
        prop_assert!((got.length() - 1.0).abs() <= 1e-4);
        let (g, w) = (got.to_array(), rotation.to_array());
        let same = (0..4).all(|i| (g[i] - w[i]).abs() <= 1e-3);
        let flipped = (0..4).all(|i| (g[i] + w[i]).abs() <= 1e-3);
        prop_assert!(same || flipped, "rotation {g:?} vs {w:?}");
    }
    Ok(())
}

proptest! {
    #[test]
    fn global_queries_compose_along_chains(
        links in prop::collection::vec(link_strategy(), 1..=5)
    ) {
        check_chain(&links)?;
    }

    #[test]
    fn rotation_stays_unit_after_any_sequence(
        ops in prop::collection::vec((any::<bool>(), prop::array::uniform4(-2.0f32..2.0)), 1..32)
    ) {
        let mut t = Transform::identity();
        for (replace, q) in ops {
            let q = Quat::new(q[0], q[1], q[2], q[3]);
            if replace {
                t.set_rotation(q);
            } else {
                t.rotate(q);
            }
            prop_assert!((t.local_rotation().length() - 1.0).abs() <= 1e-5);
        }
    }
}

// Same composition property with a pinned seed so a failure reproduces
// identically on every machine. Override locally with PROPTEST_SEED.
#[test]
fn composition_with_pinned_seed() {
    const SEED_BYTES: [u8; 32] = [
        0x56, 0x45, 0x4c, 0x41, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0,
    ];
    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES);
    let mut runner = TestRunner::new_with_rng(PropConfig::default(), rng);
    let chains = prop::collection::vec(link_strategy(), 1..=5);
    runner
        .run(&chains, |links| check_chain(&links))
        .expect("pinned-seed composition property");
}

#[test]
fn zero_quaternion_is_stored_as_identity() {
    let mut t = Transform::identity();
    t.rotate(Quat::from_axis_angle(Vec3::UNIT_Y, 0.5));
    t.set_rotation(Quat::new(0.0, 0.0, 0.0, 0.0));
    approx_quat(t.local_rotation(), Quat::identity());
    let m = t.local_model().to_array();
    let id = Mat4::identity().to_array();
    for i in 0..16 {
        approx(m[i], id[i]);
    }
}

#[test]
fn rotating_keeps_translation_and_model_in_sync() {
    let mut t = Transform::identity();
    t.set_position(Vec3::new(3.0, -1.0, 2.0));
    t.rotate(Quat::from_axis_angle(Vec3::UNIT_Y, 0.8));
    t.rotate_euler_degrees(Vec3::new(10.0, 0.0, 45.0));
    t.translate(Vec3::new(1.0, 1.0, 1.0));
    approx3(t.local_position(), [4.0, 0.0, 3.0]);
    approx3(t.local_model().translation_part(), [4.0, 0.0, 3.0]);
    let expected = Mat4::from_rotation_translation(&t.local_rotation(), t.local_position());
    let (got, want) = (t.local_model().to_array(), expected.to_array());
    for i in 0..16 {
        approx(got[i], want[i]);
    }
}

#[test]
fn rotate_composes_in_parent_frame() {
    let a = Quat::from_axis_angle(Vec3::UNIT_X, 0.3);
    let b = Quat::from_axis_angle(Vec3::UNIT_Z, 1.2);
    let mut t = Transform::identity();
    t.set_rotation(a);
    t.rotate(b);
    approx_quat(t.local_rotation(), b.multiply(&a).normalize());
}

#[test]
fn euler_rotation_matches_axis_product() {
    let mut t = Transform::identity();
    t.rotate_euler_degrees(Vec3::new(90.0, 0.0, 0.0));
    let v = t.local_rotation().rotate_vec3(&Vec3::UNIT_Y);
    approx3(v, [0.0, 0.0, 1.0]);
}

#[test]
fn set_scale_is_idempotent_and_keeps_local_model() {
    let mut scene = scene();
    let id = scene.spawn_at("scaled", Vec3::new(1.0, 2.0, 3.0)).expect("spawn");
    let before = scene.node(id).expect("live").transform().local_model();
    for _ in 0..3 {
        scene
            .node_mut(id)
            .expect("live")
            .transform_mut()
            .set_scale(Vec3::new(2.0, 3.0, 4.0));
    }
    assert_eq!(scene.node(id).expect("live").transform().local_model(), before);
    approx3(scene.global_scale(id).expect("live"), [2.0, 3.0, 4.0]);
    let m = scene.global_model(id).expect("live");
    approx(m.at(0, 0), 2.0);
    approx(m.at(1, 1), 3.0);
    approx(m.at(2, 2), 4.0);
}

#[test]
fn view_is_inverse_of_model() {
    let mut scene = scene();
    let id = scene.spawn_at("camera", Vec3::new(0.0, 5.0, 10.0)).expect("spawn");
    scene
        .node_mut(id)
        .expect("live")
        .transform_mut()
        .rotate(Quat::from_axis_angle(Vec3::UNIT_X, -0.4));
    let model = scene.global_model(id).expect("live");
    let view = scene.global_view(id).expect("invertible");
    let (got, want) = (view.multiply(&model).to_array(), Mat4::identity().to_array());
    for i in 0..16 {
        approx(got[i], want[i]);
    }
}

#[test]
fn zero_scale_view_is_singular() {
    let mut scene = scene();
    let id = scene.spawn("flat").expect("spawn");
    scene
        .node_mut(id)
        .expect("live")
        .transform_mut()
        .set_scale(Vec3::new(1.0, 0.0, 1.0));
    assert_eq!(scene.global_view(id), Err(SceneError::SingularTransform(id)));
}

#[test]
fn look_at_points_forward_axis_at_target() {
    let mut scene = scene();
    let id = scene.spawn_at("eye", Vec3::new(1.0, 0.0, 0.0)).expect("spawn");
    assert!(scene
        .look_at(id, Vec3::new(1.0, 0.0, 5.0), Vec3::UNIT_Y)
        .expect("live"));
    let forward = scene
        .global_rotation(id)
        .expect("live")
        .rotate_vec3(&Vec3::new(0.0, 0.0, -1.0));
    approx3(forward, [0.0, 0.0, 1.0]);
}

#[test]
fn look_at_under_rotated_parent_uses_world_target() {
    let mut scene = scene();
    let parent = scene.spawn_at("rig", Vec3::new(0.0, 2.0, 0.0)).expect("spawn");
    scene
        .node_mut(parent)
        .expect("live")
        .transform_mut()
        .rotate(Quat::from_axis_angle(Vec3::UNIT_Y, 1.0));
    let eye = scene.spawn_at("eye", Vec3::new(0.0, 1.0, 0.0)).expect("spawn");
    scene.set_parent(eye, Some(parent)).expect("acyclic");

    let target = Vec3::new(4.0, 3.0, 0.0);
    assert!(scene.look_at(eye, target, Vec3::UNIT_Y).expect("live"));
    let forward = scene
        .global_rotation(eye)
        .expect("live")
        .rotate_vec3(&Vec3::new(0.0, 0.0, -1.0));
    let eye_pos = scene.global_position(eye).expect("live");
    approx3(eye_pos, [0.0, 3.0, 0.0]);
    approx3(forward, (target - eye_pos).normalize().to_array());
}

#[test]
fn look_at_own_position_is_a_no_op() {
    let mut scene = scene();
    let id = scene.spawn_at("eye", Vec3::new(2.0, 2.0, 2.0)).expect("spawn");
    let q = Quat::from_axis_angle(Vec3::UNIT_Z, 0.3);
    scene.node_mut(id).expect("live").transform_mut().set_rotation(q);
    assert!(!scene
        .look_at(id, Vec3::new(2.0, 2.0, 2.0), Vec3::UNIT_Y)
        .expect("live"));
    approx_quat(scene.global_rotation(id).expect("live"), q);
}

#[test]
fn despawned_parent_leaves_child_as_root() {
    let mut scene = scene();
    let parent = scene.spawn_at("parent", Vec3::new(10.0, 0.0, 0.0)).expect("spawn");
    let child = scene.spawn_at("child", Vec3::new(1.0, 0.0, 0.0)).expect("spawn");
    scene.set_parent(child, Some(parent)).expect("acyclic");
    approx3(scene.global_position(child).expect("live"), [11.0, 0.0, 0.0]);

    scene.despawn(parent).expect("live");
    // Reuse the freed slot; the old handle must not resolve to the newcomer.
    let newcomer = scene.spawn_at("newcomer", Vec3::new(50.0, 0.0, 0.0)).expect("spawn");
    assert_eq!(newcomer.index(), parent.index());
    assert_ne!(newcomer, parent);

    assert!(scene.contains(child));
    assert_eq!(scene.parent(child).expect("live"), None);
    approx3(scene.global_position(child).expect("live"), [1.0, 0.0, 0.0]);
    assert_eq!(scene.node(parent).err(), Some(SceneError::UnknownNode(parent)));
}

#[test]
fn cycles_and_self_parenting_are_rejected() {
    let mut scene = scene();
    let a = scene.spawn("a").expect("spawn");
    let b = scene.spawn("b").expect("spawn");
    let c = scene.spawn("c").expect("spawn");
    scene.set_parent(b, Some(a)).expect("acyclic");
    scene.set_parent(c, Some(b)).expect("acyclic");

    assert_eq!(
        scene.set_parent(a, Some(c)),
        Err(SceneError::HierarchyCycle { child: a, parent: c })
    );
    assert_eq!(
        scene.set_parent(a, Some(a)),
        Err(SceneError::HierarchyCycle { child: a, parent: a })
    );
    assert_eq!(scene.children(a).expect("live"), vec![b]);
    scene.set_parent(c, None).expect("detach");
    assert!(scene.children(b).expect("live").is_empty());
}

#[test]
fn names_are_unique_and_searchable() {
    let mut scene = scene();
    let ball = scene.spawn("ball").expect("spawn");
    assert_eq!(
        scene.spawn("ball"),
        Err(SceneError::DuplicateName("ball".to_owned()))
    );
    assert_eq!(scene.find("ball"), Some(ball));
    scene.despawn(ball).expect("live");
    assert_eq!(scene.find("ball"), None);
    let again = scene.spawn("ball").expect("name freed");
    assert_eq!(scene.ids(), &[again]);
}

#[test]
fn distance_from_uses_local_position() {
    let mut t = Transform::identity();
    t.set_position(Vec3::new(3.0, 4.0, 0.0));
    approx(t.distance_from(Vec3::ZERO), 5.0);
}
