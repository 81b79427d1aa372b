//! Polygonal faces.
//!
//! A [`Face`] is an ordered loop of vertex indices, counter-clockwise when
//! seen from outside the solid. Most faces are triangles or quads, so the
//! indices live inline up to [`INLINE_CAPACITY`] and spill to the heap
//! beyond that.

use std::ops::{Index as IndexOp, IndexMut};

use smallvec::SmallVec;

/// Index of a vertex in a shape's vertex pool.
pub type Index = u32;

/// Number of indices stored without a heap allocation: as many as fit in
/// the footprint of a boxed slice.
pub const INLINE_CAPACITY: usize =
    std::mem::size_of::<Box<[Index]>>() / std::mem::size_of::<Index>();

/// An ordered loop of vertex indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Face {
    indices: SmallVec<[Index; INLINE_CAPACITY]>,
}

impl Face {
    /// Build a face from any sequence of indices.
    pub fn new<I: IntoIterator<Item = Index>>(indices: I) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    /// Build a face by copying `indices`.
    pub fn from_slice(indices: &[Index]) -> Self {
        Self {
            indices: SmallVec::from_slice(indices),
        }
    }

    /// Number of indices.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the face holds no indices.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Index at position `i`, if any.
    pub fn get(&self, i: usize) -> Option<Index> {
        self.indices.get(i).copied()
    }

    /// Iterate over the indices in loop order.
    pub fn iter(&self) -> std::slice::Iter<'_, Index> {
        self.indices.iter()
    }

    /// Indices as a slice.
    pub fn as_slice(&self) -> &[Index] {
        &self.indices
    }

    /// Consecutive `(from, to)` index pairs around the loop, closing back to
    /// the first index.
    pub fn edges(&self) -> impl Iterator<Item = (Index, Index)> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| (self.indices[i], self.indices[(i + 1) % n]))
    }

    /// Replace every index `i` with `mapping[i]`.
    ///
    /// # Panics
    ///
    /// Panics if an index is not covered by `mapping`.
    pub fn remap(&mut self, mapping: &[Index]) {
        for index in self.indices.iter_mut() {
            *index = mapping[*index as usize];
        }
    }

    /// Flip the winding order in place.
    pub fn reverse(&mut self) {
        self.indices.reverse();
    }
}

impl IndexOp<usize> for Face {
    type Output = Index;

    fn index(&self, i: usize) -> &Index {
        &self.indices[i]
    }
}

impl IndexMut<usize> for Face {
    fn index_mut(&mut self, i: usize) -> &mut Index {
        &mut self.indices[i]
    }
}

impl<'a> IntoIterator for &'a Face {
    type Item = &'a Index;
    type IntoIter = std::slice::Iter<'a, Index>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter()
    }
}

impl FromIterator<Index> for Face {
    fn from_iter<I: IntoIterator<Item = Index>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<&[Index]> for Face {
    fn from(indices: &[Index]) -> Self {
        Self::from_slice(indices)
    }
}

impl<const N: usize> From<[Index; N]> for Face {
    fn from(indices: [Index; N]) -> Self {
        Self::from_slice(&indices)
    }
}
