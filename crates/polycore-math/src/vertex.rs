//! Vertex helpers on top of nalgebra's `Vector3`.

use crate::numerics;
use crate::{MathError, Result, Scalar, Vertex};

/// Geometry-oriented helpers for [`Vertex`].
///
/// Arithmetic comes straight from nalgebra; this trait adds checked component
/// access and the kernel's notion of approximate equality.
pub trait VertexExt {
    /// Component `i` (0 = x, 1 = y, 2 = z).
    fn component(&self, i: usize) -> Result<Scalar>;

    /// Overwrite component `i`.
    fn set_component(&mut self, i: usize, value: Scalar) -> Result<()>;

    /// Squared euclidean distance to `other`.
    fn dist2(&self, other: &Self) -> Scalar;

    /// Euclidean distance to `other`.
    fn dist(&self, other: &Self) -> Scalar;

    /// Component-wise equality within the default `f64` epsilon.
    fn approx_eq(&self, other: &Self) -> bool;

    /// Component-wise equality within `eps`.
    fn approx_eq_eps(&self, other: &Self, eps: Scalar) -> bool;

    /// Unit vector in the same direction, or the zero vector when the
    /// length is zero.
    fn normalized_or_zero(&self) -> Self;
}

impl VertexExt for Vertex {
    fn component(&self, i: usize) -> Result<Scalar> {
        self.get(i)
            .copied()
            .ok_or(MathError::IndexOutOfRange { index: i, len: 3 })
    }

    fn set_component(&mut self, i: usize, value: Scalar) -> Result<()> {
        let slot = self
            .get_mut(i)
            .ok_or(MathError::IndexOutOfRange { index: i, len: 3 })?;
        *slot = value;
        Ok(())
    }

    fn dist2(&self, other: &Self) -> Scalar {
        (self - other).norm_squared()
    }

    fn dist(&self, other: &Self) -> Scalar {
        (self - other).norm()
    }

    fn approx_eq(&self, other: &Self) -> bool {
        self.approx_eq_eps(other, <Scalar as numerics::Epsilon>::EPSILON)
    }

    fn approx_eq_eps(&self, other: &Self, eps: Scalar) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| numerics::equal_eps(*a, *b, eps))
    }

    fn normalized_or_zero(&self) -> Self {
        let len = self.norm();
        if len > 0.0 {
            self / len
        } else {
            Vertex::zeros()
        }
    }
}
