// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node handles.

use core::fmt;

/// Non-owning handle to a node in a [`crate::Scene`].
///
/// Handles are generational: once a node is despawned its slot may be reused,
/// but the old handle keeps the previous generation and stops resolving. A
/// parent reference that no longer resolves behaves exactly like "no parent".
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the owning scene.
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation counter of the slot when this handle was issued.
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}
