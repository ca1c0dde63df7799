//! The triangulation kernel: topological store, quad-edge operations and the
//! incremental construction algorithms.

pub(crate) mod arena;
pub(crate) mod constraint;
pub(crate) mod enumeration;
pub(crate) mod handles;
pub(crate) mod insertion;
pub(crate) mod operations;
pub(crate) mod region;
pub(crate) mod scaffold;
pub(crate) mod store;

use handles::{FixedDartHandle, FixedVertexHandle};
use store::TriangulationStore;

use crate::point::{CdtNum, Point2};
use crate::predicates::{Classification, Predicates};

/// Store plus predicates: everything the construction algorithms operate on.
///
/// The public triangulation type wraps this and drives it through the
/// construction pipeline; the individual phases live in the sibling modules.
#[derive(Debug, Clone)]
pub(crate) struct CdtCore<S> {
    pub store: TriangulationStore<S>,
    pub predicates: Predicates,
}

impl<S: CdtNum> CdtCore<S> {
    pub fn new() -> Self {
        CdtCore {
            store: TriangulationStore::new(),
            predicates: Predicates::new(),
        }
    }

    #[inline]
    pub fn position(&self, vertex: FixedVertexHandle) -> Point2<S> {
        self.store.position(vertex)
    }

    /// `true` iff `p` lies strictly inside the right face of `e`.
    pub fn right_of(&self, p: Point2<S>, e: FixedDartHandle) -> bool {
        let origin = self.position(self.store.origin(e)).to_f64();
        let dest = self.position(self.store.dest(e)).to_f64();
        !self.predicates.left_on(origin, dest, p.to_f64())
    }

    /// `true` iff `p` lies on the closed edge `e` (either endpoint or the
    /// open segment between them).
    pub fn on_edge(&self, p: Point2<S>, e: FixedDartHandle) -> bool {
        matches!(
            self.classify_against_edge(p, e),
            Classification::Origin | Classification::Destination | Classification::Between
        )
    }

    pub fn classify_against_edge(&self, p: Point2<S>, e: FixedDartHandle) -> Classification {
        let origin = self.position(self.store.origin(e)).to_f64();
        let dest = self.position(self.store.dest(e)).to_f64();
        self.predicates.classify(origin, dest, p.to_f64())
    }

    #[inline]
    pub fn classify(&self, a: Point2<S>, b: Point2<S>, c: Point2<S>) -> Classification {
        self.predicates.classify(a.to_f64(), b.to_f64(), c.to_f64())
    }

    #[inline]
    pub fn left(&self, a: Point2<S>, b: Point2<S>, c: Point2<S>) -> bool {
        self.predicates.left(a.to_f64(), b.to_f64(), c.to_f64())
    }

    #[inline]
    pub fn left_on(&self, a: Point2<S>, b: Point2<S>, c: Point2<S>) -> bool {
        self.predicates.left_on(a.to_f64(), b.to_f64(), c.to_f64())
    }

    /// The rank of a point in the in-circle tie-break: 0 for input points,
    /// 1-3 for corners of the enclosing triangle depending on which of the
    /// coordinates sit at the scaffold extent.
    fn scaffold_rank(&self, p: Point2<S>) -> u32 {
        let extent = self.store.scaffold_extent;
        let mut rank = 0;
        if p.x.abs() == extent {
            rank = 1;
        }
        if p.y.abs() == extent {
            rank += 2;
        }
        rank
    }

    /// The in-circle test used by the Delaunay restoration passes.
    ///
    /// While the enclosing triangle is present, circumcircles through its
    /// corners may enclose genuine input points; flipping on those would
    /// never terminate. The corners are therefore ranked above all input
    /// points and the test degenerates to a convexity check whenever one of
    /// `a`, `b`, `c` is a corner: the edge opposite the highest-ranked point
    /// is the one that must survive.
    pub fn in_circle(&self, a: Point2<S>, b: Point2<S>, c: Point2<S>, d: Point2<S>) -> bool {
        let rank_a = self.scaffold_rank(a);
        let rank_b = self.scaffold_rank(b);
        let rank_c = self.scaffold_rank(c);

        if rank_a == 0 && rank_b == 0 && rank_c == 0 {
            return self
                .predicates
                .incircle(a.to_f64(), b.to_f64(), c.to_f64(), d.to_f64())
                > 0.0;
        }

        if rank_b > rank_c && rank_b > rank_a {
            return false;
        }

        // Flip iff the quadrilateral [a, b, c, d] is strictly convex.
        self.left(b, c, d) && !self.left_on(b, a, d)
    }

    #[cfg(any(test, fuzzing))]
    pub fn sanity_check(&self) {
        self.store.sanity_check();

        // Every bounded face is counterclockwise.
        for (_, face) in self.store.faces.iter() {
            if !face.bounded {
                continue;
            }
            let dart = face.dart;
            let a = self.position(self.store.origin(dart)).to_f64();
            let b = self.position(self.store.origin(self.store.left_next(dart))).to_f64();
            let c = self.position(self.store.origin(self.store.left_prev(dart))).to_f64();
            assert!(self.predicates.orient2d(a, b, c) > 0.0);
        }

        // Local Delaunay property of every unconstrained interior edge.
        for dart in self.store.primal_darts() {
            if self.store.is_constrained(dart) {
                continue;
            }
            let left_face = self.store.face_of(dart);
            let right_face = self.store.face_of(dart.sym());
            if !self.store.faces.get(left_face).bounded
                || !self.store.faces.get(right_face).bounded
            {
                continue;
            }
            let a = self.position(self.store.origin(dart));
            let b = self.position(self.store.dest(dart));
            let apex_left = self.position(self.store.origin(self.store.left_prev(dart)));
            let apex_right = self.position(self.store.origin(self.store.left_prev(dart.sym())));
            // (a, apex_right, b) is the counterclockwise triple of the right
            // triangle; the left apex must not lie strictly inside its
            // circumcircle.
            assert!(!self.in_circle(a, apex_right, b, apex_left));
        }
    }
}
