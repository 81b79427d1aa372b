#![warn(missing_docs)]

//! Polygonal geometry for the polycore kernel.
//!
//! Provides [`Face`] index loops, [`BoundingVolume`]s for broad-phase
//! pruning, and [`Shape`], a vertex pool plus faces with lazily cached
//! normals, areas, world-space vertices, bounds and half-edge adjacency.

pub mod bounds;
pub mod error;
pub mod face;
pub mod halfedge;
pub mod shape;

pub use bounds::{BoundingKind, BoundingVolume};
pub use error::{GeomError, Result};
pub use face::{Face, Index, INLINE_CAPACITY};
pub use halfedge::HalfEdge;
pub use shape::{FaceView, Shape};
