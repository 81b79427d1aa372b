//! Property-style checks on hand-built shapes.

use approx::assert_relative_eq;
use polycore_geom::{BoundingKind, BoundingVolume, Face, Shape};
use polycore_math::{Vertex, VertexExt};

/// Right-angled tetrahedron with legs of length `a` along the axes.
fn tetrahedron(a: f64) -> Shape {
    let vertices = vec![
        Vertex::zeros(),
        Vertex::new(a, 0.0, 0.0),
        Vertex::new(0.0, a, 0.0),
        Vertex::new(0.0, 0.0, a),
    ];
    let faces = vec![
        Face::from([0, 2, 1]),
        Face::from([0, 1, 3]),
        Face::from([0, 3, 2]),
        Face::from([1, 2, 3]),
    ];
    Shape::new(vertices, faces).unwrap()
}

#[test]
fn test_tetrahedron_volume_and_area() {
    let shape = tetrahedron(1.0);
    assert_relative_eq!(shape.volume(), 1.0 / 6.0, epsilon = 1e-12);
    let expected_area = 1.5 + 3f64.sqrt() / 2.0;
    assert_relative_eq!(shape.surface_area(), expected_area, epsilon = 1e-12);
    assert!(shape.is_closed());
}

#[test]
fn test_normals_point_outward() {
    let shape = tetrahedron(2.0);
    let interior = Vertex::new(0.25, 0.25, 0.25);
    for face in shape.faces() {
        let outward = face.centroid() - interior;
        assert!(
            face.normal().dot(&outward) > 0.0,
            "face {:?} normal {:?} points inward",
            face.indices(),
            face.normal()
        );
        assert_relative_eq!(face.normal().norm(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_scale_round_trip() {
    let mut shape = tetrahedron(1.0);
    let original = shape.vertices().to_vec();
    for factor in [3.0, 0.125, 7.5, 1e3] {
        shape.scale(factor);
        shape.scale(1.0 / factor);
        for (a, b) in shape.vertices().iter().zip(&original) {
            assert!(a.approx_eq_eps(b, 1e-12), "{a:?} != {b:?} after factor {factor}");
        }
    }
}

#[test]
fn test_scale_cubes_volume() {
    let mut shape = tetrahedron(1.0);
    shape.scale(3.0);
    assert_relative_eq!(shape.volume(), 27.0 / 6.0, epsilon = 1e-12);
}

#[test]
fn test_rigid_motion_preserves_measurements() {
    let mut shape = tetrahedron(1.0);
    let area = shape.surface_area();
    let volume = shape.volume();
    shape.rotate(Vertex::new(1.0, 2.0, 3.0), 1.1);
    shape.translate(Vertex::new(-4.0, 2.0, 8.0));
    assert_relative_eq!(shape.surface_area(), area, epsilon = 1e-12);
    assert_relative_eq!(shape.volume(), volume, epsilon = 1e-12);
    for n in shape.transformed_normals() {
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_transform_round_trip() {
    let mut shape = tetrahedron(1.0);
    shape.rotate(Vertex::new(0.3, -1.0, 0.2), 0.9);
    shape.translate(Vertex::new(1.0, 2.0, 3.0));
    let inverse = shape.transformation().inverse().unwrap();
    for (world, local) in shape.transformed_vertices().iter().zip(shape.vertices()) {
        assert!(inverse.apply(world).approx_eq_eps(local, 1e-12));
    }
}

#[test]
fn test_bounding_volume_contains_world_vertices() {
    let mut shape = tetrahedron(2.0);
    shape.rotate(Vertex::new(1.0, 1.0, 0.0), 0.4);
    shape.translate(Vertex::new(10.0, -3.0, 0.5));
    let bv = shape.bounding_volume();
    assert!(bv.is_valid());
    for v in shape.transformed_vertices() {
        assert!(bv.contains(v), "{v:?} outside {bv:?}");
    }
    for kind in [BoundingKind::Box, BoundingKind::Sphere] {
        let explicit = BoundingVolume::from_vertices(shape.transformed_vertices(), kind);
        assert!(shape.transformed_vertices().iter().all(|v| explicit.contains(v)));
        assert!(bv.volume().unwrap() <= explicit.volume().unwrap() + 1e-12);
    }
}

#[test]
fn test_overlap_is_symmetric_for_all_variant_pairs() {
    let volumes = [
        BoundingVolume::Empty,
        BoundingVolume::Box {
            min: Vertex::zeros(),
            max: Vertex::new(1.0, 1.0, 1.0),
        },
        BoundingVolume::Box {
            min: Vertex::new(0.9, 0.9, 0.9),
            max: Vertex::new(2.0, 2.0, 2.0),
        },
        BoundingVolume::Box {
            min: Vertex::new(5.0, 5.0, 5.0),
            max: Vertex::new(6.0, 6.0, 6.0),
        },
        BoundingVolume::Sphere {
            center: Vertex::new(1.5, 0.5, 0.5),
            radius: 0.6,
        },
        BoundingVolume::Sphere {
            center: Vertex::new(-3.0, 0.0, 0.0),
            radius: 1.0,
        },
        BoundingVolume::Sphere {
            center: Vertex::new(-1.5, 0.0, 0.0),
            radius: 0.6,
        },
    ];
    for a in &volumes {
        for b in &volumes {
            assert_eq!(a.overlaps(b), b.overlaps(a), "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn test_optimize_is_idempotent() {
    let mut vertices = tetrahedron(1.0).vertices().to_vec();
    vertices.insert(0, Vertex::new(100.0, 100.0, 100.0));
    vertices.push(Vertex::new(-100.0, 0.0, 0.0));
    let faces = vec![
        Face::from([1, 3, 2]),
        Face::from([1, 2, 4]),
        Face::from([1, 4, 3]),
        Face::from([2, 3, 4]),
    ];
    let mut shape = Shape::new(vertices, faces).unwrap();
    let volume = shape.volume();

    assert!(shape.optimize());
    let vertices = shape.vertices().to_vec();
    let faces = shape.raw_faces().to_vec();
    assert_eq!(vertices.len(), 4);

    assert!(!shape.optimize());
    assert_eq!(shape.vertices(), vertices.as_slice());
    assert_eq!(shape.raw_faces(), faces.as_slice());
    assert_relative_eq!(shape.volume(), volume, epsilon = 1e-12);
}

#[test]
fn test_large_faces_measure_like_small_ones() {
    // A regular 12-gon prism spills every cap past the inline capacity.
    let n = 12u32;
    let mut vertices = Vec::new();
    for z in [0.0, 1.0] {
        for i in 0..n {
            let a = std::f64::consts::TAU * i as f64 / n as f64;
            vertices.push(Vertex::new(a.cos(), a.sin(), z));
        }
    }
    let mut faces = vec![
        Face::new((0..n).rev()),
        Face::new(n..2 * n),
    ];
    for i in 0..n {
        let j = (i + 1) % n;
        faces.push(Face::from([i, j, n + j, n + i]));
    }
    let shape = Shape::new(vertices, faces).unwrap();

    let cap_area = 0.5 * n as f64 * (std::f64::consts::TAU / n as f64).sin();
    assert_relative_eq!(shape.surface_areas()[0], cap_area, epsilon = 1e-12);
    assert_relative_eq!(shape.surface_areas()[1], cap_area, epsilon = 1e-12);
    assert_relative_eq!(shape.volume(), cap_area, epsilon = 1e-12);
    assert!(shape.is_closed());
}
