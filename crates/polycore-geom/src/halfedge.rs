//! Half-edge adjacency for polygonal shapes.

use std::collections::HashMap;

use crate::face::{Face, Index};

/// One directed edge of a face loop.
///
/// Half-edges of face `f` are stored contiguously in loop order; `next` and
/// `prev` are positions in the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    /// Face this half-edge bounds.
    pub face: usize,
    /// Vertex the edge leaves.
    pub start: Index,
    /// Vertex the edge enters.
    pub end: Index,
    /// Following half-edge around the same face.
    pub next: usize,
    /// Preceding half-edge around the same face.
    pub prev: usize,
    /// Oppositely oriented half-edge of the neighbouring face, if any.
    pub mirror: Option<usize>,
}

/// Build the half-edge table for `faces`.
///
/// When more than one half-edge runs `end -> start` (non-manifold input),
/// the mirror is the last one encountered.
pub fn build_half_edges(faces: &[Face]) -> Vec<HalfEdge> {
    let total = faces.iter().map(Face::len).sum();
    let mut edges = Vec::with_capacity(total);
    let mut by_endpoints: HashMap<(Index, Index), usize> = HashMap::with_capacity(total);

    for (face_id, face) in faces.iter().enumerate() {
        let base = edges.len();
        let n = face.len();
        for (i, (start, end)) in face.edges().enumerate() {
            let id = base + i;
            edges.push(HalfEdge {
                face: face_id,
                start,
                end,
                next: base + (i + 1) % n,
                prev: base + (i + n - 1) % n,
                mirror: None,
            });
            by_endpoints.insert((start, end), id);
        }
    }

    for edge in edges.iter_mut() {
        edge.mirror = by_endpoints.get(&(edge.end, edge.start)).copied();
    }
    edges
}
