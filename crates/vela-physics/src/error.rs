// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy for the spatial core.
//!
//! Every variant is a contract violation surfaced at construction or first
//! use; nothing here is retried or rolled back.

use thiserror::Error;

use crate::ident::NodeId;

/// Errors emitted by the scene registry, components, and frame driver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// The handle does not refer to a live node (never existed or despawned).
    #[error("unknown or stale node handle {0}")]
    UnknownNode(NodeId),
    /// A node with the same name is already registered.
    #[error("node name already in use: {0}")]
    DuplicateName(String),
    /// Re-parenting would make a node its own ancestor.
    #[error("parenting {child} under {parent} would create a cycle")]
    HierarchyCycle {
        /// Node being re-parented.
        child: NodeId,
        /// Requested parent.
        parent: NodeId,
    },
    /// The node already carries a component of this kind.
    #[error("node {node} already has a {kind}")]
    ComponentOccupied {
        /// Target node.
        node: NodeId,
        /// Component kind label.
        kind: &'static str,
    },
    /// The node has no component of the requested kind.
    #[error("node {node} has no {kind}")]
    MissingComponent {
        /// Target node.
        node: NodeId,
        /// Component kind label.
        kind: &'static str,
    },
    /// Mass must be finite and strictly positive.
    #[error("mass must be finite and > 0, got {0}")]
    InvalidMass(f32),
    /// A material coefficient fell outside `[0, 1]`.
    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidCoefficient {
        /// Coefficient name.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// Linear damping must be finite and non-negative.
    #[error("linear damping must be finite and >= 0, got {0}")]
    InvalidDamping(f32),
    /// Collider half-extents must be finite and non-negative.
    #[error("collider half-extents must be finite and >= 0, got {0:?}")]
    InvalidExtents([f32; 3]),
    /// A vector argument carried NaN or infinity.
    #[error("{what} must be finite, got {value:?}")]
    NonFinite {
        /// Argument label.
        what: &'static str,
        /// Rejected value.
        value: [f32; 3],
    },
    /// Frame delta time must be finite and non-negative.
    #[error("delta time must be finite and >= 0, got {0}")]
    InvalidDeltaTime(f32),
    /// The global model matrix cannot be inverted (e.g. zero scale).
    #[error("global transform of {0} is singular")]
    SingularTransform(NodeId),
    /// Every slot index representable by a handle is in use.
    #[error("node capacity exhausted")]
    CapacityExhausted,
    /// Settings failed validation or could not be (de)serialised.
    #[error("invalid settings: {0}")]
    Settings(String),
}

/// Result alias for the spatial core.
pub type SceneResult<T> = Result<T, SceneError>;
