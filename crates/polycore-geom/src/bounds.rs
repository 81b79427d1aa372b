//! Bounding volumes for broad-phase collision pruning.

use polycore_math::{numerics, Scalar, Tolerance, Vertex, VertexExt};
use tracing::trace;

/// Which bounding volume to build from a vertex set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundingKind {
    /// Axis-aligned box.
    Box,
    /// Approximate minimal enclosing sphere.
    Sphere,
    /// Whichever of box and sphere has the smaller volume (box on ties).
    #[default]
    Auto,
}

/// An axis-aligned box, a sphere, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoundingVolume {
    /// Built from an empty vertex set. Overlaps nothing.
    #[default]
    Empty,
    /// Axis-aligned box with `min <= max` on every axis.
    Box {
        /// Minimum corner.
        min: Vertex,
        /// Maximum corner.
        max: Vertex,
    },
    /// Sphere with a non-negative radius.
    Sphere {
        /// Sphere center.
        center: Vertex,
        /// Sphere radius.
        radius: Scalar,
    },
}

impl BoundingVolume {
    /// Build a bounding volume enclosing every vertex.
    ///
    /// An empty slice yields [`BoundingVolume::Empty`] regardless of `kind`.
    pub fn from_vertices(vertices: &[Vertex], kind: BoundingKind) -> Self {
        if vertices.is_empty() {
            return BoundingVolume::Empty;
        }
        match kind {
            BoundingKind::Box => Self::enclosing_box(vertices),
            BoundingKind::Sphere => Self::enclosing_sphere(vertices),
            BoundingKind::Auto => {
                let bbox = Self::enclosing_box(vertices);
                let sphere = Self::enclosing_sphere(vertices);
                match (bbox.volume(), sphere.volume()) {
                    (Some(b), Some(s)) if s < b => sphere,
                    _ => bbox,
                }
            }
        }
    }

    fn enclosing_box(vertices: &[Vertex]) -> Self {
        let mut min = Vertex::repeat(Scalar::INFINITY);
        let mut max = Vertex::repeat(Scalar::NEG_INFINITY);
        for v in vertices {
            min = min.inf(v);
            max = max.sup(v);
        }
        BoundingVolume::Box { min, max }
    }

    /// Ritter-style sphere: seed with the two mutually far points, then grow
    /// just enough to swallow the farthest outlier until none remain.
    fn enclosing_sphere(vertices: &[Vertex]) -> Self {
        let centroid = vertices.iter().sum::<Vertex>() / vertices.len() as Scalar;
        let p1 = farthest_from(vertices, &centroid);
        let p2 = farthest_from(vertices, &p1);

        let mut center = (p1 + p2) * 0.5;
        let mut radius = p1.dist(&p2) * 0.5;

        let mut outliers: Vec<Vertex> = vertices
            .iter()
            .copied()
            .filter(|v| is_outside(v, &center, radius))
            .collect();

        let mut pass = 0usize;
        while !outliers.is_empty() {
            let far = farthest_from(&outliers, &center);
            let spoke = far - center;
            let d = spoke.norm();
            center += spoke * ((d - radius) / (2.0 * d));
            radius = (d + radius) * 0.5;
            outliers.retain(|v| is_outside(v, &center, radius));
            pass += 1;
            trace!(pass, radius, remaining = outliers.len(), "Grew bounding sphere");
        }

        BoundingVolume::Sphere { center, radius }
    }

    /// Which kind of volume this is, or `None` for [`BoundingVolume::Empty`].
    pub fn kind(&self) -> Option<BoundingKind> {
        match self {
            BoundingVolume::Empty => None,
            BoundingVolume::Box { .. } => Some(BoundingKind::Box),
            BoundingVolume::Sphere { .. } => Some(BoundingKind::Sphere),
        }
    }

    /// Whether this is a well-formed, non-empty volume.
    pub fn is_valid(&self) -> bool {
        match self {
            BoundingVolume::Empty => false,
            BoundingVolume::Box { min, max } => min
                .iter()
                .zip(max.iter())
                .all(|(lo, hi)| lo.is_finite() && hi.is_finite() && lo <= hi),
            BoundingVolume::Sphere { center, radius } => {
                center.iter().all(|c| c.is_finite()) && radius.is_finite() && *radius >= 0.0
            }
        }
    }

    /// Enclosed volume, `None` for [`BoundingVolume::Empty`].
    pub fn volume(&self) -> Option<Scalar> {
        match self {
            BoundingVolume::Empty => None,
            BoundingVolume::Box { min, max } => Some((max - min).product()),
            BoundingVolume::Sphere { radius, .. } => {
                Some(4.0 / 3.0 * std::f64::consts::PI * radius.powi(3))
            }
        }
    }

    /// Whether `point` lies inside or on the volume, within
    /// [`Tolerance::DEFAULT`].
    pub fn contains(&self, point: &Vertex) -> bool {
        let tol = Tolerance::DEFAULT.linear;
        match self {
            BoundingVolume::Empty => false,
            BoundingVolume::Box { min, max } => (0..3)
                .all(|i| point[i] >= min[i] - tol && point[i] <= max[i] + tol),
            BoundingVolume::Sphere { center, radius } => point.dist(center) <= radius + tol,
        }
    }

    /// Whether the two volumes intersect. Touching counts as overlapping.
    ///
    /// Symmetric in its arguments. Anything involving
    /// [`BoundingVolume::Empty`] never overlaps.
    pub fn overlaps(&self, other: &BoundingVolume) -> bool {
        use BoundingVolume::{Box, Empty, Sphere};
        match (self, other) {
            (Empty, _) | (_, Empty) => false,
            (Box { min: a0, max: a1 }, Box { min: b0, max: b1 }) => {
                (0..3).all(|i| a0[i] <= b1[i] && b0[i] <= a1[i])
            }
            (
                Sphere {
                    center: c1,
                    radius: r1,
                },
                Sphere {
                    center: c2,
                    radius: r2,
                },
            ) => c1.dist2(c2) <= numerics::sqr(r1 + r2),
            (Box { min, max }, Sphere { center, radius })
            | (Sphere { center, radius }, Box { min, max }) => {
                box_sphere_overlap(min, max, center, *radius)
            }
        }
    }

    /// Uniformly scale the volume about the origin.
    ///
    /// The radius scales by `|factor|`; box corners are re-sorted so that
    /// `min <= max` still holds for negative factors.
    pub fn scale(&mut self, factor: Scalar) {
        match self {
            BoundingVolume::Empty => {}
            BoundingVolume::Box { min, max } => {
                let a = *min * factor;
                let b = *max * factor;
                *min = a.inf(&b);
                *max = a.sup(&b);
            }
            BoundingVolume::Sphere { center, radius } => {
                *center *= factor;
                *radius *= factor.abs();
            }
        }
    }
}

fn farthest_from(points: &[Vertex], origin: &Vertex) -> Vertex {
    points
        .iter()
        .fold((*origin, -1.0), |(best, best_d2), p| {
            let d2 = p.dist2(origin);
            if d2 > best_d2 {
                (*p, d2)
            } else {
                (best, best_d2)
            }
        })
        .0
}

// Relative slack so the point that just defined the boundary does not keep
// re-qualifying through rounding.
fn is_outside(point: &Vertex, center: &Vertex, radius: Scalar) -> bool {
    point.dist2(center) > radius * radius * (1.0 + 1e-12)
}

fn box_sphere_overlap(min: &Vertex, max: &Vertex, center: &Vertex, radius: Scalar) -> bool {
    let closest = Vertex::from_fn(|i, _| numerics::clamp(center[i], min[i], max[i]));
    closest.dist2(center) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn boxed(min: [f64; 3], max: [f64; 3]) -> BoundingVolume {
        BoundingVolume::Box {
            min: Vertex::from(min),
            max: Vertex::from(max),
        }
    }

    fn sphere(center: [f64; 3], radius: f64) -> BoundingVolume {
        BoundingVolume::Sphere {
            center: Vertex::from(center),
            radius,
        }
    }

    #[test]
    fn test_empty_input() {
        for kind in [BoundingKind::Box, BoundingKind::Sphere, BoundingKind::Auto] {
            let bv = BoundingVolume::from_vertices(&[], kind);
            assert_eq!(bv, BoundingVolume::Empty);
            assert_eq!(bv.volume(), None);
            assert_eq!(bv.kind(), None);
            assert!(!bv.is_valid());
        }
    }

    #[test]
    fn test_auto_prefers_box_for_diagonal_pair() {
        let pts = [Vertex::zeros(), Vertex::new(1.0, 1.0, 1.0)];
        let bv = BoundingVolume::from_vertices(&pts, BoundingKind::Auto);
        assert_eq!(bv, boxed([0.0; 3], [1.0; 3]));
    }

    #[test]
    fn test_auto_prefers_sphere_for_octahedral_cloud() {
        let c = Vertex::new(1.0, 0.0, 0.0);
        let pts = [
            c + Vertex::x(),
            c - Vertex::x(),
            c + Vertex::y(),
            c - Vertex::y(),
            c + Vertex::z(),
            c - Vertex::z(),
        ];
        let bv = BoundingVolume::from_vertices(&pts, BoundingKind::Auto);
        let BoundingVolume::Sphere { center, radius } = bv else {
            panic!("expected sphere, got {bv:?}");
        };
        assert_relative_eq!(center, c, epsilon = 1e-12);
        assert_relative_eq!(radius, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_point_sphere() {
        let p = Vertex::new(3.0, -2.0, 5.0);
        let bv = BoundingVolume::from_vertices(&[p], BoundingKind::Sphere);
        assert_eq!(bv, sphere([3.0, -2.0, 5.0], 0.0));
        assert!(bv.is_valid());
        assert!(bv.contains(&p));
    }

    #[test]
    fn test_sphere_encloses_all_points() {
        // A lopsided cloud that forces several growth passes.
        let pts: Vec<Vertex> = (0..200)
            .map(|i| {
                let t = i as f64 * 0.37;
                Vertex::new(
                    t.sin() * 3.0,
                    (t * 1.7).cos() * 2.0,
                    (t * 0.3).sin() + i as f64 * 0.01,
                )
            })
            .collect();
        let bv = BoundingVolume::from_vertices(&pts, BoundingKind::Sphere);
        assert!(bv.is_valid());
        for p in &pts {
            assert!(bv.contains(p), "point {p:?} escaped {bv:?}");
        }
    }

    #[test]
    fn test_box_encloses_all_points() {
        let pts = [
            Vertex::new(-1.0, 4.0, 2.0),
            Vertex::new(3.0, -2.0, 0.5),
            Vertex::new(0.0, 0.0, -7.0),
        ];
        let bv = BoundingVolume::from_vertices(&pts, BoundingKind::Box);
        assert_eq!(bv, boxed([-1.0, -2.0, -7.0], [3.0, 4.0, 2.0]));
        assert!(pts.iter().all(|p| bv.contains(p)));
        assert!(!bv.contains(&Vertex::new(3.1, 0.0, 0.0)));
        assert_relative_eq!(bv.volume().unwrap(), 4.0 * 6.0 * 9.0);
    }

    #[test]
    fn test_sphere_sphere_overlap() {
        let a = sphere([0.0, 0.0, 0.0], 1.0);
        let cases = [
            (sphere([1.5, 0.0, 0.0], 1.0), true),
            (sphere([2.0, 0.0, 0.0], 1.0), true),
            (sphere([2.1, 0.0, 0.0], 1.0), false),
            (sphere([0.1, 0.1, 0.1], 0.1), true),
            (sphere([0.0, 5.0, 0.0], 3.0), false),
        ];
        for (b, expected) in cases {
            assert_eq!(a.overlaps(&b), expected, "{a:?} vs {b:?}");
            assert_eq!(b.overlaps(&a), expected, "{b:?} vs {a:?}");
        }
    }

    #[test]
    fn test_box_box_overlap() {
        let a = boxed([0.0; 3], [1.0; 3]);
        let cases = [
            (boxed([0.5; 3], [1.5; 3]), true),
            (boxed([1.0, 0.0, 0.0], [2.0, 1.0, 1.0]), true),
            (boxed([1.1, 0.0, 0.0], [2.0, 1.0, 1.0]), false),
            (boxed([0.25; 3], [0.75; 3]), true),
            (boxed([0.0, 2.0, 0.0], [1.0, 3.0, 1.0]), false),
        ];
        for (b, expected) in cases {
            assert_eq!(a.overlaps(&b), expected, "{a:?} vs {b:?}");
            assert_eq!(b.overlaps(&a), expected, "{b:?} vs {a:?}");
        }
    }

    #[test]
    fn test_box_sphere_overlap() {
        let b = boxed([0.0; 3], [1.0; 3]);
        let cases = [
            (sphere([0.5, 0.5, 0.5], 0.1), true),
            (sphere([2.0, 0.5, 0.5], 1.0), true),
            (sphere([2.0, 0.5, 0.5], 0.9), false),
            // Near a corner the closest point is the corner itself.
            (sphere([1.5, 1.5, 1.5], 0.8), false),
            (sphere([1.5, 1.5, 1.5], 0.9), true),
        ];
        for (s, expected) in cases {
            assert_eq!(b.overlaps(&s), expected, "{b:?} vs {s:?}");
            assert_eq!(s.overlaps(&b), expected, "{s:?} vs {b:?}");
        }
    }

    #[test]
    fn test_empty_never_overlaps() {
        let all = [
            BoundingVolume::Empty,
            boxed([0.0; 3], [1.0; 3]),
            sphere([0.0; 3], 10.0),
        ];
        for other in &all {
            assert!(!BoundingVolume::Empty.overlaps(other));
            assert!(!other.overlaps(&BoundingVolume::Empty));
        }
    }

    #[test]
    fn test_scale() {
        let mut s = sphere([1.0, 2.0, 3.0], 2.0);
        s.scale(-3.0);
        assert_eq!(s, sphere([-3.0, -6.0, -9.0], 6.0));

        let mut b = boxed([1.0, -1.0, 0.0], [2.0, 1.0, 4.0]);
        b.scale(-2.0);
        assert_eq!(b, boxed([-4.0, -2.0, -8.0], [-2.0, 2.0, 0.0]));
        assert!(b.is_valid());

        let mut e = BoundingVolume::Empty;
        e.scale(5.0);
        assert_eq!(e, BoundingVolume::Empty);
    }

    #[test]
    fn test_volume() {
        assert_relative_eq!(
            sphere([0.0; 3], 2.0).volume().unwrap(),
            32.0 / 3.0 * std::f64::consts::PI
        );
        assert_relative_eq!(boxed([0.0; 3], [1.0, 2.0, 3.0]).volume().unwrap(), 6.0);
    }
}
