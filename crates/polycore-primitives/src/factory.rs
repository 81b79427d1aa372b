//! Primitive solid constructors.
//!
//! Every shape produced here is closed, with faces wound counter-clockwise
//! when viewed from outside.

use polycore_geom::{Face, GeomError, Index, Result, Shape};
use polycore_math::{Scalar, Vertex};
use tracing::warn;

use crate::contour::Contour2D;

/// Build an axis-aligned box spanning `min` to `max`.
///
/// Corners are sorted per axis, so swapped bounds still give an outward
/// box. Vertex layout:
/// ```text
///     v7----v6
///    /|    /|
///   v4----v5|    z
///   | v3--|-v2   | y
///   |/    |/     |/
///   v0----v1     +---x
/// ```
pub fn cuboid(min: Vertex, max: Vertex) -> Shape {
    let (lo, hi) = (min.inf(&max), min.sup(&max));
    let vertices = vec![
        Vertex::new(lo.x, lo.y, lo.z),
        Vertex::new(hi.x, lo.y, lo.z),
        Vertex::new(hi.x, hi.y, lo.z),
        Vertex::new(lo.x, hi.y, lo.z),
        Vertex::new(lo.x, lo.y, hi.z),
        Vertex::new(hi.x, lo.y, hi.z),
        Vertex::new(hi.x, hi.y, hi.z),
        Vertex::new(lo.x, hi.y, hi.z),
    ];
    let faces = vec![
        // Bottom (-Z)
        Face::from([0, 3, 2, 1]),
        // Top (+Z)
        Face::from([4, 5, 6, 7]),
        // Front (-Y)
        Face::from([0, 1, 5, 4]),
        // Back (+Y)
        Face::from([2, 3, 7, 6]),
        // Right (+X)
        Face::from([1, 2, 6, 5]),
        // Left (-X)
        Face::from([0, 4, 7, 3]),
    ];
    Shape::new_unchecked(vertices, faces)
}

/// The box from the origin to `(1, 1, 1)`.
pub fn unit_cube() -> Shape {
    cuboid(Vertex::zeros(), Vertex::new(1.0, 1.0, 1.0))
}

/// Regular octahedron with its six corners `radius` away from `center`
/// along the coordinate axes.
pub fn octahedron(center: Vertex, radius: Scalar) -> Shape {
    let vertices = [
        -Vertex::z(),
        -Vertex::y(),
        -Vertex::x(),
        Vertex::y(),
        Vertex::x(),
        Vertex::z(),
    ]
    .iter()
    .map(|d| center + d * radius)
    .collect();

    // Four faces around the south pole (0), four around the north pole (5).
    let faces = [
        [0, 4, 1],
        [0, 1, 2],
        [0, 2, 3],
        [0, 3, 4],
        [1, 4, 5],
        [1, 5, 2],
        [2, 5, 3],
        [3, 5, 4],
    ]
    .into_iter()
    .map(Face::from)
    .collect();

    Shape::new_unchecked(vertices, faces)
}

/// Regular dodecahedron inscribed in the sphere of `radius` around
/// `center`.
///
/// Corners are the cube `(±1, ±1, ±1)` plus the cyclic permutations of
/// `(0, ±ϕ, ±1/ϕ)`, all at distance √3 from the origin before scaling.
pub fn dodecahedron(center: Vertex, radius: Scalar) -> Shape {
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    let inv = 1.0 / phi;

    let mut corners = Vec::with_capacity(20);
    for x in [-1.0, 1.0] {
        for z in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                corners.push(Vertex::new(x, y, z));
            }
        }
    }
    for (a, b) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        corners.push(Vertex::new(0.0, a * phi, b * inv));
    }
    for (a, b) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        corners.push(Vertex::new(a * inv, 0.0, b * phi));
    }
    for (a, b) in [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
        corners.push(Vertex::new(a * phi, b * inv, 0.0));
    }

    let vertices = corners
        .iter()
        .map(|c| center + c * (radius / c.norm()))
        .collect();

    let faces = [
        [0, 12, 13, 4, 8],
        [0, 16, 17, 1, 12],
        [0, 8, 10, 2, 16],
        [1, 17, 3, 11, 9],
        [1, 9, 5, 13, 12],
        [2, 10, 6, 15, 14],
        [2, 14, 3, 17, 16],
        [3, 14, 15, 7, 11],
        [4, 18, 6, 10, 8],
        [4, 13, 5, 19, 18],
        [5, 9, 11, 7, 19],
        [6, 18, 19, 7, 15],
    ]
    .into_iter()
    .map(Face::from)
    .collect();

    Shape::new_unchecked(vertices, faces)
}

/// Extrude `contour` from `z = 0` up to `z = height`.
///
/// The contour should be simple and counter-clockwise; neither is checked.
/// Returns [`GeomError::DegenerateContour`] for fewer than three points.
pub fn extrusion(contour: &Contour2D, height: Scalar) -> Result<Shape> {
    extrusion_along(contour, Vertex::new(0.0, 0.0, height))
}

/// Extrude `contour` (lying in the `z = 0` plane) along `direction`.
///
/// The bottom cap is the reversed contour, the top cap the contour shifted
/// by `direction`, with one quad per contour edge in between. When
/// `direction` points below the plane every face is flipped so the solid
/// stays outward-facing. A direction parallel to the plane gives a flat,
/// zero-volume shape.
pub fn extrusion_along(contour: &Contour2D, direction: Vertex) -> Result<Shape> {
    let count = contour.len();
    if count < 3 {
        return Err(GeomError::DegenerateContour { count });
    }
    if !contour.is_counter_clockwise() {
        warn!(
            signed_area = contour.signed_area(),
            "Extruding a contour that is not counter-clockwise; faces will point inward"
        );
    }

    let vertices: Vec<Vertex> = contour
        .iter()
        .map(|p| Vertex::new(p.x, p.y, 0.0))
        .chain(contour.iter().map(|p| Vertex::new(p.x, p.y, 0.0) + direction))
        .collect();

    let s = count as Index;
    let mut faces = Vec::with_capacity(count + 2);
    for i in 0..s {
        let j = (i + s - 1) % s;
        faces.push(Face::from([j, i, s + i, s + j]));
    }
    faces.push(Face::new((0..s).rev()));
    faces.push(Face::new(s..2 * s));

    if direction.z < 0.0 {
        for face in &mut faces {
            face.reverse();
        }
    }

    Ok(Shape::new_unchecked(vertices, faces))
}
