//! Affine transformations.
//!
//! A [`Transformation`] is a 4x4 matrix whose last row is `[0, 0, 0, 1]`.
//! Composition follows the matrix product: `(a * b).apply(p)` applies `b`
//! first and `a` second.

use std::ops::{Mul, MulAssign};

use nalgebra::{Matrix3, Matrix4, Vector4};

use crate::{Normal, Scalar, Vertex, VertexExt};

/// A 3D affine transformation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformation {
    matrix: Matrix4<Scalar>,
}

impl Transformation {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Wrap a raw matrix. The caller is responsible for the last row being
    /// `[0, 0, 0, 1]`.
    pub fn from_matrix(matrix: Matrix4<Scalar>) -> Self {
        Self { matrix }
    }

    /// Translation by `offset`.
    pub fn translation(offset: Vertex) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = offset.x;
        m[(1, 3)] = offset.y;
        m[(2, 3)] = offset.z;
        Self { matrix: m }
    }

    /// Rotation by `angle` radians about `axis` through the origin.
    ///
    /// The axis is normalized here (Rodrigues' rotation formula). A zero
    /// axis degenerates to `cos(angle) * I` rather than producing NaN.
    pub fn rotation(axis: Vertex, angle: Scalar) -> Self {
        let axis = axis.normalized_or_zero();
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let mut m = Matrix4::identity();
        m[(0, 0)] = t * x * x + c;
        m[(0, 1)] = t * x * y - s * z;
        m[(0, 2)] = t * x * z + s * y;
        m[(1, 0)] = t * x * y + s * z;
        m[(1, 1)] = t * y * y + c;
        m[(1, 2)] = t * y * z - s * x;
        m[(2, 0)] = t * x * z - s * y;
        m[(2, 1)] = t * y * z + s * x;
        m[(2, 2)] = t * z * z + c;
        Self { matrix: m }
    }

    /// Change of basis looking along `axis`.
    ///
    /// Rows of the linear part are `right = up × axis`, the recomputed
    /// `up = axis × right`, and `forward = axis`, all normalized. Points
    /// are mapped into that frame, so the look direction becomes +z.
    pub fn basis(axis: Vertex, up: Vertex) -> Self {
        let forward = axis.normalized_or_zero();
        let right = up.cross(&forward).normalized_or_zero();
        let up = forward.cross(&right).normalized_or_zero();
        let mut m = Matrix4::identity();
        for (row, v) in [right, up, forward].iter().enumerate() {
            m[(row, 0)] = v.x;
            m[(row, 1)] = v.y;
            m[(row, 2)] = v.z;
        }
        Self { matrix: m }
    }

    /// The underlying 4x4 matrix.
    pub fn matrix(&self) -> &Matrix4<Scalar> {
        &self.matrix
    }

    /// Upper-left 3x3 (rotation/scale) block.
    pub fn linear(&self) -> Matrix3<Scalar> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// Translation column.
    pub fn translation_part(&self) -> Vertex {
        Vertex::new(
            self.matrix[(0, 3)],
            self.matrix[(1, 3)],
            self.matrix[(2, 3)],
        )
    }

    /// Transform a point.
    pub fn apply(&self, v: &Vertex) -> Vertex {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 1.0);
        Vertex::new(r.x, r.y, r.z)
    }

    /// Transform every point of `vertices`, preserving order.
    pub fn apply_all(&self, vertices: &[Vertex]) -> Vec<Vertex> {
        vertices.iter().map(|v| self.apply(v)).collect()
    }

    /// Transform a normal. Only the linear part is applied, which is
    /// correct for rigid transforms.
    pub fn apply_normal(&self, n: &Normal) -> Normal {
        self.linear() * n
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Transformation {
    type Output = Transformation;

    fn mul(self, rhs: Transformation) -> Transformation {
        Transformation {
            matrix: self.matrix * rhs.matrix,
        }
    }
}

impl Mul<&Transformation> for &Transformation {
    type Output = Transformation;

    fn mul(self, rhs: &Transformation) -> Transformation {
        Transformation {
            matrix: self.matrix * rhs.matrix,
        }
    }
}

impl MulAssign for Transformation {
    fn mul_assign(&mut self, rhs: Transformation) {
        self.matrix *= rhs.matrix;
    }
}
