// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
use core::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use proptest::prelude::*;
use vela_math::{self as math, Mat4, Quat, Vec3};

const EPS: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) {
    let diff = (a - b).abs();
    assert!(diff <= EPS, "expected {b}, got {a} (diff {diff})");
}

fn approx_eq3(a: Vec3, b: [f32; 3]) {
    let a = a.to_array();
    for i in 0..3 {
        approx_eq(a[i], b[i]);
    }
}

fn approx_eq16(a: [f32; 16], b: [f32; 16]) {
    for i in 0..16 {
        assert!((a[i] - b[i]).abs() <= 1e-4, "index {i}: {a:?} vs {b:?}");
    }
}

#[test]
fn vec3_normalize_degenerate_returns_zero() {
    let v = Vec3::new(1e-12, -1e-12, 0.0);
    assert_eq!(v.normalize().to_array(), [0.0, 0.0, 0.0]);
}

#[test]
fn vec3_operators_match_methods() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 0.5, 2.0);
    assert_eq!((a + b).to_array(), a.add(&b).to_array());
    assert_eq!((a - b).to_array(), a.sub(&b).to_array());
    assert_eq!((a * 2.0).to_array(), a.scale(2.0).to_array());
    assert_eq!((-a).to_array(), [-1.0, -2.0, -3.0]);
    assert_eq!(a.mul_elem(&b).to_array(), [-4.0, 1.0, 6.0]);
    approx_eq(a.distance(&Vec3::ZERO), 14.0f32.sqrt());
}

#[test]
fn degrees_convert_to_radians() {
    approx_eq(math::deg_to_rad(0.0), 0.0);
    approx_eq(math::deg_to_rad(45.0), FRAC_PI_4);
    approx_eq(math::deg_to_rad(-90.0), -FRAC_PI_2);
    approx_eq(math::deg_to_rad(180.0), PI);
}

#[test]
fn quat_zero_length_normalizes_to_identity() {
    let q = Quat::new(0.0, 0.0, 0.0, 0.0).normalize();
    assert_eq!(q.to_array(), Quat::identity().to_array());
    let nan = Quat::new(f32::NAN, 0.0, 0.0, 1.0).normalize();
    assert_eq!(nan.to_array(), Quat::identity().to_array());
}

#[test]
fn quat_inverse_cancels_rotation() {
    let q = Quat::from_axis_angle(Vec3::new(1.0, 2.0, -1.0), 0.7);
    let id = q.inverse().multiply(&q);
    let [x, y, z, w] = id.to_array();
    approx_eq(x, 0.0);
    approx_eq(y, 0.0);
    approx_eq(z, 0.0);
    approx_eq(w, 1.0);
}

#[test]
fn quat_rotate_vec3_matches_matrix() {
    let q = Quat::from_axis_angle(Vec3::new(0.3, 1.0, 0.2), 1.1);
    let v = Vec3::new(2.0, -1.0, 0.5);
    let via_quat = q.rotate_vec3(&v);
    let via_mat = q.to_mat4().transform_point(&v);
    approx_eq3(via_quat, via_mat.to_array());
}

#[test]
fn euler_degrees_compose_x_then_y_then_z() {
    let e = Quat::from_euler_degrees(Vec3::new(30.0, 45.0, 60.0));
    let qx = Quat::from_axis_angle(Vec3::UNIT_X, math::deg_to_rad(30.0));
    let qy = Quat::from_axis_angle(Vec3::UNIT_Y, math::deg_to_rad(45.0));
    let qz = Quat::from_axis_angle(Vec3::UNIT_Z, math::deg_to_rad(60.0));
    let expected = (qx * qy * qz).normalize();
    let a = e.to_array();
    let b = expected.to_array();
    for i in 0..4 {
        approx_eq(a[i], b[i]);
    }
}

#[test]
fn look_rotation_points_negative_z_at_target() {
    let forward = Vec3::new(1.0, 0.0, 0.0);
    let q = Quat::look_rotation(forward, Vec3::UNIT_Y).expect("non-degenerate");
    approx_eq3(q.rotate_vec3(&Vec3::new(0.0, 0.0, -1.0)), [1.0, 0.0, 0.0]);
    approx_eq3(q.rotate_vec3(&Vec3::UNIT_Y), [0.0, 1.0, 0.0]);
}

#[test]
fn look_rotation_handles_parallel_up_and_degenerate_forward() {
    let q = Quat::look_rotation(Vec3::UNIT_Y, Vec3::UNIT_Y).expect("fallback up");
    approx_eq3(q.rotate_vec3(&Vec3::new(0.0, 0.0, -1.0)), [0.0, 1.0, 0.0]);
    assert!(Quat::look_rotation(Vec3::ZERO, Vec3::UNIT_Y).is_none());
}

#[test]
fn mat4_mul_operator_matches_method() {
    let s = Mat4::scale(2.0, 3.0, 4.0);
    let r = Quat::from_axis_angle(Vec3::UNIT_X, FRAC_PI_4).to_mat4();
    approx_eq16((r * s).to_array(), r.multiply(&s).to_array());
    let mut m = r;
    m *= s;
    approx_eq16(m.to_array(), r.multiply(&s).to_array());
}

#[test]
fn mat4_inverse_roundtrips_affine_transform() {
    let m = Mat4::from_translation(Vec3::new(3.0, -2.0, 5.0))
        .multiply(&Quat::from_axis_angle(Vec3::UNIT_Y, FRAC_PI_2).to_mat4())
        .multiply(&Mat4::scale(2.0, 0.5, 4.0));
    let inv = m.inverse().expect("invertible");
    approx_eq16(m.multiply(&inv).to_array(), Mat4::identity().to_array());
    let p = Vec3::new(1.0, 2.0, 3.0);
    approx_eq3(inv.transform_point(&m.transform_point(&p)), p.to_array());
}

#[test]
fn mat4_inverse_rejects_zero_scale() {
    let m = Mat4::scale(1.0, 0.0, 1.0);
    assert!(m.inverse().is_none());
    approx_eq(m.determinant(), 0.0);
}

#[test]
fn rotation_translation_composition_keeps_translation_column() {
    let q = Quat::from_axis_angle(Vec3::UNIT_Z, 0.4);
    let m = Mat4::from_rotation_translation(&q, Vec3::new(1.0, 2.0, 3.0));
    approx_eq3(m.translation_part(), [1.0, 2.0, 3.0]);
}

proptest! {
    #[test]
    fn normalized_quats_have_unit_length(
        x in -100.0f32..100.0,
        y in -100.0f32..100.0,
        z in -100.0f32..100.0,
        w in -100.0f32..100.0,
    ) {
        let q = Quat::new(x, y, z, w).normalize();
        prop_assert!((q.length() - 1.0).abs() <= 1e-5);
    }
}
