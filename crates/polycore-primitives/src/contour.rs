//! Planar and spatial polylines.

use std::ops::Index;

use polycore_math::{Point2, Scalar, Transformation, Vertex};

/// Segment count used for circles when no finer resolution is needed.
pub const DEFAULT_CIRCLE_PIECES: usize = 10;

/// A closed planar outline, counter-clockwise for extrusion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour2D {
    points: Vec<Point2>,
}

impl Contour2D {
    /// Empty contour.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contour through `points` in order.
    pub fn from_points(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Builder-style append.
    pub fn add(mut self, point: Point2) -> Self {
        self.points.push(point);
        self
    }

    /// Append a point.
    pub fn add_point(&mut self, point: Point2) {
        self.points.push(point);
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the contour has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point `i`, if any.
    pub fn get(&self, i: usize) -> Option<&Point2> {
        self.points.get(i)
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point2> {
        self.points.iter()
    }

    /// Points as a slice.
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Axis-aligned rectangle, counter-clockwise from `min`.
    pub fn square(min: Point2, max: Point2) -> Self {
        Self::from_points(vec![
            min,
            Point2::new(max.x, min.y),
            max,
            Point2::new(min.x, max.y),
        ])
    }

    /// Regular `pieces`-gon inscribed in the circle of `radius` around
    /// `center`, counter-clockwise starting on the +x side.
    pub fn circle(center: Point2, radius: Scalar, pieces: usize) -> Self {
        let step = std::f64::consts::TAU / pieces as Scalar;
        (0..pieces)
            .map(|i| {
                let (s, c) = (step * i as Scalar).sin_cos();
                Point2::new(center.x + radius * c, center.y + radius * s)
            })
            .collect()
    }

    /// Shoelace area: positive for counter-clockwise outlines.
    pub fn signed_area(&self) -> Scalar {
        let n = self.points.len();
        let twice: Scalar = (0..n)
            .map(|i| {
                let a = &self.points[i];
                let b = &self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice * 0.5
    }

    /// Whether the outline winds counter-clockwise.
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Same outline with the opposite winding.
    pub fn reversed(&self) -> Self {
        self.points.iter().rev().copied().collect()
    }
}

impl Index<usize> for Contour2D {
    type Output = Point2;

    fn index(&self, i: usize) -> &Point2 {
        &self.points[i]
    }
}

impl FromIterator<Point2> for Contour2D {
    fn from_iter<I: IntoIterator<Item = Point2>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Contour2D {
    type Item = &'a Point2;
    type IntoIter = std::slice::Iter<'a, Point2>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// A polyline in 3D space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour3D {
    vertices: Vec<Vertex>,
}

impl Contour3D {
    /// Empty contour.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contour through `vertices` in order.
    pub fn from_vertices(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// Lift a planar contour onto the plane `z = z`.
    pub fn from_contour_2d(contour: &Contour2D, z: Scalar) -> Self {
        contour.iter().map(|p| Vertex::new(p.x, p.y, z)).collect()
    }

    /// Builder-style append.
    pub fn add(mut self, vertex: Vertex) -> Self {
        self.vertices.push(vertex);
        self
    }

    /// Append a vertex.
    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the contour has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex `i`, if any.
    pub fn get(&self, i: usize) -> Option<&Vertex> {
        self.vertices.get(i)
    }

    /// Iterate over the vertices in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Vertex> {
        self.vertices.iter()
    }

    /// Vertices as a slice.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Copy with every vertex mapped through `transformation`.
    pub fn transformed(&self, transformation: &Transformation) -> Self {
        Self::from_vertices(transformation.apply_all(&self.vertices))
    }
}

impl Index<usize> for Contour3D {
    type Output = Vertex;

    fn index(&self, i: usize) -> &Vertex {
        &self.vertices[i]
    }
}

impl FromIterator<Vertex> for Contour3D {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        Self {
            vertices: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Contour3D {
    type Item = &'a Vertex;
    type IntoIter = std::slice::Iter<'a, Vertex>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}
