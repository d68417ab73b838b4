// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Broad-phase interfaces and a minimal reference implementation.
//!
//! Contract (applies to all implementations used here):
//! - Pair identity is canonicalized as `(min_id, max_id)`.
//! - The emitted pair list is strictly sorted lexicographically by that tuple.
//! - Overlap is inclusive on faces (touching AABBs are considered overlapping).
//!
//! `AllPairs` is the `O(n^2)` baseline. Spatial hashing or a BVH can slot in
//! behind the same trait without changing the ordering or overlap semantics.

use std::collections::BTreeMap;

use crate::aabb::Aabb;

/// Broad-phase interface for inserting proxies and querying overlapping pairs.
pub trait BroadPhase<K> {
    /// Inserts or updates the proxy with the given `id` and `aabb`.
    fn upsert(&mut self, id: K, aabb: Aabb);
    /// Removes a proxy if present.
    fn remove(&mut self, id: K);
    /// Returns a canonical, deterministically-ordered list of overlapping pairs.
    fn pairs(&self) -> Vec<(K, K)>;
}

/// All-pairs sweep over every registered proxy.
#[derive(Debug, Clone)]
pub struct AllPairs<K> {
    items: BTreeMap<K, Aabb>,
}

impl<K> Default for AllPairs<K> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> AllPairs<K> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered proxies.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when no proxies are registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K: Ord + Copy> BroadPhase<K> for AllPairs<K> {
    fn upsert(&mut self, id: K, aabb: Aabb) {
        self.items.insert(id, aabb);
    }

    fn remove(&mut self, id: K) {
        self.items.remove(&id);
    }

    fn pairs(&self) -> Vec<(K, K)> {
        // BTreeMap iteration is sorted by key, so (a, b) with a < b comes out
        // already in canonical order.
        let items: Vec<(K, Aabb)> = self.items.iter().map(|(id, aabb)| (*id, *aabb)).collect();
        let mut out = Vec::new();
        for (i, (a_id, a_bb)) in items.iter().enumerate() {
            for (b_id, b_bb) in items.iter().skip(i + 1) {
                if a_bb.overlaps(b_bb) {
                    out.push((*a_id, *b_id));
                }
            }
        }
        out
    }
}
