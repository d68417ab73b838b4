// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Float32 math helpers for the Vela spatial core: scalar utilities, 3D
//! vectors, quaternions, and column-major 4×4 matrices.
//!
//! All operations round to `f32` to mirror the renderer's float32 uniforms.
#![forbid(unsafe_code)]

use std::f32::consts::TAU;

mod mat4;
mod quat;
mod vec3;

pub use mat4::Mat4;
pub use quat::Quat;
pub use vec3::Vec3;

/// Global epsilon used by math routines when detecting degenerate values.
pub const EPSILON: f32 = 1e-6;

/// Converts degrees to radians with float32 precision.
pub fn deg_to_rad(value: f32) -> f32 {
    value * (TAU / 360.0)
}
