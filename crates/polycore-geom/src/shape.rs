//! Polygonal solids with lazily computed derived data.
//!
//! A [`Shape`] owns a vertex pool, a list of faces indexing into it, and one
//! accumulated [`Transformation`]. Normals, areas, transformed vertices,
//! the bounding volume and the half-edge table are computed on first use
//! and cached until a mutation makes them stale:
//!
//! | Operation             | Invalidates                                              |
//! |-----------------------|----------------------------------------------------------|
//! | [`Shape::scale`]      | bounding volume, transformed vertices, surface areas     |
//! | [`Shape::translate`], [`Shape::rotate`] | bounding volume, transformed normals, transformed vertices |
//! | [`Shape::optimize`]   | bounding volume, transformed vertices, half-edges        |
//!
//! The caches use [`OnceCell`], so a `Shape` can be queried through `&self`
//! but is not `Sync`.

use std::cell::OnceCell;

use polycore_math::{Normal, Scalar, Transformation, Vertex, VertexExt};
use tracing::debug;

use crate::bounds::{BoundingKind, BoundingVolume};
use crate::error::{GeomError, Result};
use crate::face::{Face, Index};
use crate::halfedge::{build_half_edges, HalfEdge};

/// A polygonal solid.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    transformation: Transformation,

    normals: OnceCell<Vec<Normal>>,
    transformed_normals: OnceCell<Vec<Normal>>,
    surface_areas: OnceCell<Vec<Scalar>>,
    transformed_vertices: OnceCell<Vec<Vertex>>,
    bounding_volume: OnceCell<BoundingVolume>,
    edges: OnceCell<Vec<HalfEdge>>,
}

impl Shape {
    /// Build a shape, checking that every face has at least three indices
    /// and only references existing vertices.
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> Result<Self> {
        validate(vertices.len(), &faces)?;
        Ok(Self::new_unchecked(vertices, faces))
    }

    /// Build a shape from data the caller already knows to be well formed.
    ///
    /// Validation still runs in debug builds.
    pub fn new_unchecked(vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        debug_assert_eq!(validate(vertices.len(), &faces), Ok(()));
        Self {
            vertices,
            faces,
            ..Self::default()
        }
    }

    // =========================================================================
    // Raw data
    // =========================================================================

    /// Vertex pool in the local frame.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All faces as index loops.
    pub fn raw_faces(&self) -> &[Face] {
        &self.faces
    }

    /// Face `i` as an index loop.
    pub fn raw_face(&self, i: usize) -> Option<&Face> {
        self.faces.get(i)
    }

    /// Accumulated transformation from the local frame to world space.
    pub fn transformation(&self) -> &Transformation {
        &self.transformation
    }

    /// Number of vertices in the pool.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Faces paired with local-frame vertices and normals.
    pub fn faces(&self) -> impl Iterator<Item = FaceView<'_>> + '_ {
        let vertices = self.vertices.as_slice();
        self.faces
            .iter()
            .zip(self.normals())
            .map(move |(face, normal)| FaceView {
                face,
                vertices,
                normal: *normal,
            })
    }

    /// Faces paired with world-space vertices and normals.
    pub fn transformed_faces(&self) -> impl Iterator<Item = FaceView<'_>> + '_ {
        let vertices = self.transformed_vertices();
        self.faces
            .iter()
            .zip(self.transformed_normals())
            .map(move |(face, normal)| FaceView {
                face,
                vertices,
                normal: *normal,
            })
    }

    /// Face `i` in the local frame.
    pub fn face(&self, i: usize) -> Option<FaceView<'_>> {
        let face = self.faces.get(i)?;
        Some(FaceView {
            face,
            vertices: &self.vertices,
            normal: self.normals()[i],
        })
    }

    /// Face `i` in world space.
    pub fn transformed_face(&self, i: usize) -> Option<FaceView<'_>> {
        let face = self.faces.get(i)?;
        Some(FaceView {
            face,
            vertices: self.transformed_vertices(),
            normal: self.transformed_normals()[i],
        })
    }

    // =========================================================================
    // Cached derived data
    // =========================================================================

    /// Unit normal of every face (Newell's method), local frame.
    pub fn normals(&self) -> &[Normal] {
        self.normals.get_or_init(|| {
            self.faces
                .iter()
                .map(|face| newell_normal(&self.vertices, face))
                .collect()
        })
    }

    /// Face normals rotated into world space.
    pub fn transformed_normals(&self) -> &[Normal] {
        self.transformed_normals.get_or_init(|| {
            self.normals()
                .iter()
                .map(|n| self.transformation.apply_normal(n))
                .collect()
        })
    }

    /// Area of every face.
    pub fn surface_areas(&self) -> &[Scalar] {
        self.surface_areas.get_or_init(|| {
            self.faces
                .iter()
                .map(|face| fan_area(&self.vertices, face))
                .collect()
        })
    }

    /// Vertex pool mapped through the accumulated transformation.
    pub fn transformed_vertices(&self) -> &[Vertex] {
        self.transformed_vertices
            .get_or_init(|| self.transformation.apply_all(&self.vertices))
    }

    /// World-space bounding volume, whichever of box and sphere is tighter.
    pub fn bounding_volume(&self) -> &BoundingVolume {
        self.bounding_volume.get_or_init(|| {
            let bv =
                BoundingVolume::from_vertices(self.transformed_vertices(), BoundingKind::Auto);
            debug!(
                vertices = self.vertices.len(),
                kind = ?bv.kind(),
                volume = ?bv.volume(),
                "Computed bounding volume"
            );
            bv
        })
    }

    /// Half-edge table, one entry per face edge.
    pub fn edges(&self) -> &[HalfEdge] {
        self.edges.get_or_init(|| {
            let edges = build_half_edges(&self.faces);
            debug!(
                half_edges = edges.len(),
                unmatched = edges.iter().filter(|e| e.mirror.is_none()).count(),
                "Built half-edge table"
            );
            edges
        })
    }

    // =========================================================================
    // Measurements
    // =========================================================================

    /// Total surface area.
    pub fn surface_area(&self) -> Scalar {
        self.surface_areas().iter().sum()
    }

    /// Enclosed volume by the divergence theorem.
    ///
    /// Positive for closed shapes with outward (counter-clockwise) faces.
    pub fn volume(&self) -> Scalar {
        let sum: Scalar = self
            .faces
            .iter()
            .zip(self.normals())
            .zip(self.surface_areas())
            .map(|((face, normal), area)| area * centroid(&self.vertices, face).dot(normal))
            .sum();
        sum / 3.0
    }

    /// Whether every half-edge has an opposite partner.
    pub fn is_closed(&self) -> bool {
        let edges = self.edges();
        !edges.is_empty() && edges.iter().all(|e| e.mirror.is_some())
    }

    /// Broad-phase collision test: `true` when the world-space bounding
    /// volumes overlap.
    ///
    /// This is conservative. Shapes whose bounds touch but whose surfaces
    /// do not still report a collision.
    pub fn detect_collision(&self, other: &Shape) -> bool {
        self.bounding_volume().overlaps(other.bounding_volume())
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Uniformly scale the vertex pool about the local origin.
    pub fn scale(&mut self, factor: Scalar) {
        for v in &mut self.vertices {
            *v *= factor;
        }
        self.invalidate_bounding_volume();
        self.invalidate_transformed_vertices();
        self.invalidate_surface_areas();
    }

    /// Translate in world space, after everything accumulated so far.
    pub fn translate(&mut self, offset: Vertex) {
        self.apply_world(Transformation::translation(offset));
    }

    /// Rotate about a world-space axis through the origin, after
    /// everything accumulated so far.
    pub fn rotate(&mut self, axis: Vertex, angle: Scalar) {
        self.apply_world(Transformation::rotation(axis, angle));
    }

    fn apply_world(&mut self, op: Transformation) {
        self.transformation = op * self.transformation;
        self.invalidate_bounding_volume();
        self.invalidate_transformed_normals();
        self.invalidate_transformed_vertices();
    }

    /// Drop vertices no face references, keeping the survivors in their
    /// original order. Returns `false` (and touches nothing) when every
    /// vertex is in use.
    pub fn optimize(&mut self) -> bool {
        let mut used = vec![false; self.vertices.len()];
        for face in &self.faces {
            for &i in face {
                used[i as usize] = true;
            }
        }
        if used.iter().all(|&u| u) {
            return false;
        }

        let before = self.vertices.len();
        let mut mapping: Vec<Index> = vec![0; before];
        let mut next = 0usize;
        for (i, &is_used) in used.iter().enumerate() {
            if is_used {
                self.vertices.swap(next, i);
                mapping[i] = next as Index;
                next += 1;
            }
        }
        self.vertices.truncate(next);
        for face in &mut self.faces {
            face.remap(&mapping);
        }

        self.invalidate_bounding_volume();
        self.invalidate_transformed_vertices();
        self.invalidate_edges();
        debug!(removed = before - next, remaining = next, "Optimized vertex pool");
        true
    }

    fn invalidate_bounding_volume(&mut self) {
        self.bounding_volume.take();
    }

    fn invalidate_transformed_normals(&mut self) {
        self.transformed_normals.take();
    }

    fn invalidate_transformed_vertices(&mut self) {
        self.transformed_vertices.take();
    }

    fn invalidate_surface_areas(&mut self) {
        self.surface_areas.take();
    }

    fn invalidate_edges(&mut self) {
        self.edges.take();
    }
}

/// A face together with the vertex pool and normal it should be read with.
#[derive(Debug, Clone, Copy)]
pub struct FaceView<'a> {
    face: &'a Face,
    vertices: &'a [Vertex],
    normal: Normal,
}

impl<'a> FaceView<'a> {
    /// Unit face normal (zero for degenerate faces).
    pub fn normal(&self) -> Normal {
        self.normal
    }

    /// Number of corners.
    pub fn len(&self) -> usize {
        self.face.len()
    }

    /// Whether the face has no corners.
    pub fn is_empty(&self) -> bool {
        self.face.is_empty()
    }

    /// Underlying index loop.
    pub fn indices(&self) -> &'a Face {
        self.face
    }

    /// Position of corner `i`.
    pub fn vertex(&self, i: usize) -> Option<&'a Vertex> {
        let vertices = self.vertices;
        self.face.get(i).map(|idx| &vertices[idx as usize])
    }

    /// Corner positions in loop order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Vertex> + 'a {
        let vertices = self.vertices;
        self.face.iter().map(move |&idx| &vertices[idx as usize])
    }

    /// Mean of the corner positions.
    pub fn centroid(&self) -> Vertex {
        centroid(self.vertices, self.face)
    }
}

fn validate(vertex_count: usize, faces: &[Face]) -> Result<()> {
    for (face_id, face) in faces.iter().enumerate() {
        if face.len() < 3 {
            return Err(GeomError::DegenerateFace {
                face: face_id,
                count: face.len(),
            });
        }
        if let Some(&index) = face.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(GeomError::IndexOutOfRange {
                face: face_id,
                index,
                vertex_count,
            });
        }
    }
    Ok(())
}

fn newell_normal(vertices: &[Vertex], face: &Face) -> Normal {
    let mut n = Normal::zeros();
    for (a, b) in face.edges() {
        let a = &vertices[a as usize];
        let b = &vertices[b as usize];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n.normalized_or_zero()
}

fn fan_area(vertices: &[Vertex], face: &Face) -> Scalar {
    if face.len() < 3 {
        return 0.0;
    }
    let origin = vertices[face[0] as usize];
    let mut twice_area = 0.0;
    for i in 2..face.len() {
        let a = vertices[face[i - 1] as usize] - origin;
        let b = vertices[face[i] as usize] - origin;
        twice_area += a.cross(&b).norm();
    }
    twice_area * 0.5
}

fn centroid(vertices: &[Vertex], face: &Face) -> Vertex {
    if face.is_empty() {
        return Vertex::zeros();
    }
    let sum: Vertex = face.iter().map(|&i| vertices[i as usize]).sum();
    sum / face.len() as Scalar
}
