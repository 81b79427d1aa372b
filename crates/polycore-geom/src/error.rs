//! Error types for shape construction.

use thiserror::Error;

use crate::face::Index;

/// Errors raised when building shapes from raw vertex/face data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeomError {
    /// A face has fewer than three indices.
    #[error("face {face} has {count} indices (at least 3 required)")]
    DegenerateFace {
        /// Position of the face in the face list.
        face: usize,
        /// Number of indices the face holds.
        count: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the shape has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Position of the face in the face list.
        face: usize,
        /// The offending vertex index.
        index: Index,
        /// Size of the vertex pool.
        vertex_count: usize,
    },

    /// A contour has too few points to bound an area.
    #[error("contour has {count} points (at least 3 required)")]
    DegenerateContour {
        /// Number of points in the contour.
        count: usize,
    },
}

/// Result alias for geometry operations.
pub type Result<T> = std::result::Result<T, GeomError>;
