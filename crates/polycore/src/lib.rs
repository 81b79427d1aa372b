#![warn(missing_docs)]

//! Polygonal geometry kernel facade.
//!
//! Re-exports the polycore crates and gathers their most used types at the
//! crate root.
//!
//! # Example
//!
//! ```
//! use polycore::{unit_cube, SvgConfig, Vertex};
//!
//! let mut cube = unit_cube();
//! cube.scale(3.0);
//! assert!((cube.volume() - 27.0).abs() < 1e-9);
//!
//! cube.rotate(Vertex::z(), 0.5);
//! let svg = SvgConfig::default().render(&cube, None).to_svg_string();
//! assert!(svg.starts_with("<svg"));
//! ```

pub use polycore_geom;
pub use polycore_math;
pub use polycore_primitives;
pub use polycore_svg;

// =========================================================================
// Math
// =========================================================================

pub use polycore_math::{
    numerics, Normal, Point2, Scalar, Tolerance, Transformation, Vertex, VertexExt,
};

// =========================================================================
// Geometry
// =========================================================================

pub use polycore_geom::{
    BoundingKind, BoundingVolume, Face, FaceView, GeomError, HalfEdge, Index, Shape,
};

// =========================================================================
// Primitives
// =========================================================================

pub use polycore_primitives::{
    cuboid, dodecahedron, extrusion, extrusion_along, octahedron, unit_cube, Contour2D, Contour3D,
};

// =========================================================================
// SVG
// =========================================================================

pub use polycore_svg::{Color, Style, SvgConfig, SvgDocument, SvgError, View, ViewBox};
