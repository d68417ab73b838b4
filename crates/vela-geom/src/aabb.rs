// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use vela_math::Vec3;

/// One of the three world axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// World X.
    X,
    /// World Y.
    Y,
    /// World Z.
    Z,
}

impl Axis {
    /// All axes in tie-breaking order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Component index (`0..3`).
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Unit vector along the positive direction of this axis.
    pub const fn unit(self) -> Vec3 {
        match self {
            Self::X => Vec3::UNIT_X,
            Self::Y => Vec3::UNIT_Y,
            Self::Z => Vec3::UNIT_Z,
        }
    }
}

/// Axis-aligned bounding box in world coordinates.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Values are `f32` and represent metres in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.min.add(&self.max).scale(0.5)
    }

    /// Half-extents along each axis.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        self.max.sub(&self.min).scale(0.5)
    }

    /// Builds an AABB centred at `center` with the given half-extents.
    ///
    /// Negative half-extents are folded to their magnitude so the min/max
    /// invariant always holds.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let he = half_extents.abs();
        Self {
            min: center.sub(&he),
            max: center.add(&he),
        }
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        Axis::ALL.iter().all(|axis| {
            let i = axis.index();
            self.max.component(i) >= other.min.component(i)
                && self.min.component(i) <= other.max.component(i)
        })
    }

    /// Per-axis overlap `min(max_a, max_b) - max(min_a, min_b)`.
    ///
    /// Components are non-negative exactly when the boxes overlap on that
    /// axis; a zero component means the faces touch.
    #[must_use]
    pub fn penetration(&self, other: &Self) -> Vec3 {
        self.max.min(&other.max).sub(&self.min.max(&other.min))
    }

    /// Axis of minimum absolute penetration against `other`.
    ///
    /// Ties resolve in `X`, `Y`, `Z` order.
    #[must_use]
    pub fn shallowest_axis(&self, other: &Self) -> Axis {
        let depth = self.penetration(other).abs();
        let mut best = Axis::X;
        for axis in [Axis::Y, Axis::Z] {
            if depth.component(axis.index()) < depth.component(best.index()) {
                best = axis;
            }
        }
        best
    }
}
