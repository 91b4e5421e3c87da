//! Error types for the heart core.

use thiserror::Error;

use crate::lifecycle::{LifecycleEvent, LifecycleState};

/// Everything that can go wrong while building a scene.
///
/// Per-frame updates never fail; every variant here is raised at
/// construction time or on a lifecycle call.
#[derive(Debug, Error)]
pub enum HeartError {
    #[error("Asset load error: {0}")]
    AssetLoad(String),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Mesh has no triangles")]
    EmptyMesh,

    #[error("Malformed mesh: {0}")]
    MalformedMesh(String),

    #[error("Degenerate mesh: total surface area is {area}")]
    DegenerateMesh { area: f64 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Illegal lifecycle transition: {event:?} while {from:?}")]
    IllegalTransition {
        from: LifecycleState,
        event: LifecycleEvent,
    },
}

/// Result type alias for heart core operations
pub type Result<T> = std::result::Result<T, HeartError>;
