#![warn(missing_docs)]

//! Math types for the polycore geometry kernel.
//!
//! Thin layer over nalgebra providing the scalar, vertex and transformation
//! types shared by every other polycore crate, plus epsilon-aware scalar
//! comparisons.

pub mod numerics;
pub mod transform;
pub mod vertex;

pub use transform::Transformation;
pub use vertex::VertexExt;

use nalgebra::Vector3;
use thiserror::Error;

/// Scalar type used throughout the kernel.
pub type Scalar = f64;

/// A position (or displacement) in 3D space.
pub type Vertex = Vector3<Scalar>;

/// A direction in 3D space, expected to have unit length.
pub type Normal = Vector3<Scalar>;

/// A point in 2D space (contour points, projected coordinates).
pub type Point2 = nalgebra::Point2<Scalar>;

/// Errors raised by math helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    /// A component index outside `0..len` was requested.
    #[error("component index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of components.
        len: usize,
    },
}

/// Result alias for math operations.
pub type Result<T> = std::result::Result<T, MathError>;

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: Scalar,
    /// Angular tolerance in radians.
    pub angular: Scalar,
}

impl Tolerance {
    /// Default kernel tolerances (1e-6 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Check if two vertices are coincident within tolerance.
    pub fn points_equal(&self, a: &Vertex, b: &Vertex) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: Scalar) -> bool {
        d.abs() < self.linear
    }

    /// Check if two angles are effectively equal (in radians).
    pub fn angles_equal(&self, a: Scalar, b: Scalar) -> bool {
        (a - b).abs() < self.angular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
