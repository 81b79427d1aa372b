#![warn(missing_docs)]

//! Primitive solid construction for the polycore kernel.
//!
//! Builds closed [`Shape`]s with outward counter-clockwise faces: boxes,
//! the octahedron and dodecahedron, and prisms extruded from planar
//! [`Contour2D`] outlines.

pub mod contour;
pub mod factory;

pub use contour::{Contour2D, Contour3D, DEFAULT_CIRCLE_PIECES};
pub use factory::{cuboid, dodecahedron, extrusion, extrusion_along, octahedron, unit_cube};

pub use polycore_geom::Shape;
