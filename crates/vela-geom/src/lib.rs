// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Geometry primitives for Vela.

This crate provides:
- Axis-aligned bounding boxes (`Aabb`) with closed-interval overlap and
  per-axis penetration depth.
- A minimal broad-phase trait and an all-pairs reference implementation.

Design notes:
- Touching faces count as overlap everywhere in this crate.
- Float32 throughout; operations favor clarity and reproducibility.
"]

/// Broad-phase pairing.
pub mod broad;
/// Axis-aligned bounding boxes (world space).
pub mod aabb;

pub use aabb::{Aabb, Axis};
pub use broad::{AllPairs, BroadPhase};
