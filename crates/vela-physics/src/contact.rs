// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Single-contact narrow phase and velocity response.

use vela_geom::{Aabb, Axis};
use vela_math::Vec3;

/// Contact between a moving box and an obstacle box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Axis of shallowest penetration.
    pub axis: Axis,
    /// Unit normal on `axis`, pointing from the obstacle toward the body.
    pub normal: Vec3,
    /// Signed offset along `normal` that makes the boxes touch face to face.
    pub push_out: Vec3,
}

impl Contact {
    /// Builds the contact for `body` against `obstacle`, or `None` when they
    /// do not overlap.
    pub fn between(body: &Aabb, obstacle: &Aabb) -> Option<Self> {
        if !body.overlaps(obstacle) {
            return None;
        }
        let axis = body.shallowest_axis(obstacle);
        let i = axis.index();
        let toward_body = body.center().component(i) >= obstacle.center().component(i);
        let (normal, offset) = if toward_body {
            (axis.unit(), obstacle.max().component(i) - body.min().component(i))
        } else {
            (
                -axis.unit(),
                obstacle.min().component(i) - body.max().component(i),
            )
        };
        Some(Self {
            axis,
            normal,
            push_out: Vec3::ZERO.with_component(i, offset),
        })
    }

    /// Whether the normal is predominantly vertical (floor or ceiling).
    pub fn is_vertical(&self, threshold: f32) -> bool {
        self.normal.y().abs() > threshold
    }
}

/// Two-body impulse along `normal` for bodies `(v1, m1)` and `(v2, m2)`.
///
/// Returns the updated velocities, or `None` when the bodies are not
/// approaching (`dot(v1 - v2, normal) >= 0`).
pub fn pair_impulse(
    v1: Vec3,
    m1: f32,
    v2: Vec3,
    m2: f32,
    normal: Vec3,
    restitution: f32,
) -> Option<(Vec3, Vec3)> {
    let relative = (v1 - v2).dot(&normal);
    if relative >= 0.0 {
        return None;
    }
    let j = -(1.0 + restitution) * relative / (1.0 / m1 + 1.0 / m2);
    Some((v1 + normal * (j / m1), v2 - normal * (j / m2)))
}

/// Reflects `velocity` about `normal` and scales it by `restitution` when it
/// points into the surface; otherwise returns it unchanged.
pub fn bounce(velocity: Vec3, normal: Vec3, restitution: f32) -> Vec3 {
    let into = velocity.dot(&normal);
    if into >= 0.0 {
        return velocity;
    }
    (velocity - normal * (2.0 * into)) * restitution
}

/// Floor/ceiling response: scales the horizontal components by
/// `1 - friction` and snaps the normal component to zero when its magnitude
/// is below `epsilon`. Returns the new velocity and whether it snapped.
pub fn vertical_contact(velocity: Vec3, normal: Vec3, friction: f32, epsilon: f32) -> (Vec3, bool) {
    let keep = 1.0 - friction;
    let damped = Vec3::new(velocity.x() * keep, velocity.y(), velocity.z() * keep);
    let along = damped.dot(&normal);
    if along.abs() < epsilon {
        (damped - normal * along, true)
    } else {
        (damped, false)
    }
}
