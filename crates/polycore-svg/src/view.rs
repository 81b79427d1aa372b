//! Camera used to project shapes onto the canvas.

use polycore_math::{Transformation, Vertex};

/// A camera looking from `eye` towards `center`.
///
/// Projection rotates world points into a frame whose +z axis is the look
/// direction and whose +y axis follows `up`, then offsets the result by
/// `center`, so the world origin lands at `center` on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// Canvas position of the world origin; also the look-at point.
    pub center: Vertex,
    /// Camera position.
    pub eye: Vertex,
    /// Approximate up direction; re-orthogonalized against the look
    /// direction.
    pub up: Vertex,
}

impl View {
    /// Camera at `eye` looking at `center`.
    pub fn new(center: Vertex, eye: Vertex, up: Vertex) -> Self {
        Self { center, eye, up }
    }

    /// Camera looking along `direction` at `center`.
    pub fn looking_along(center: Vertex, direction: Vertex, up: Vertex) -> Self {
        Self::new(center, center - direction, up)
    }

    /// Look direction, from the eye towards the center.
    pub fn direction(&self) -> Vertex {
        self.center - self.eye
    }

    /// World-to-canvas transformation. The third coordinate of a projected
    /// point is its depth: larger is farther from the eye.
    pub fn transformation(&self) -> Transformation {
        Transformation::translation(self.center) * Transformation::basis(self.direction(), self.up)
    }
}

impl Default for View {
    /// Looking down +z at the origin with +y up: the identity projection.
    fn default() -> Self {
        Self::looking_along(Vertex::zeros(), Vertex::z(), Vertex::y())
    }
}
