//! Segment insertion.
//!
//! A constraint is inserted one sub-segment at a time: the crossing sequence
//! between the current origin and the next triangulation vertex on the
//! segment's supporting line is discovered, the crossed edges are swapped
//! away (Dyn, Goren and Rippa, "Transforming triangulations in polygonal
//! domains", CAGD 10(6), 1993), the emerging edge is marked constrained and
//! the swapped edges are made Delaunay again.

use smallvec::SmallVec;

use super::handles::FixedDartHandle;
use super::operations;
use super::CdtCore;
use crate::cdt::CdtError;
use crate::point::{CdtNum, Point2};
use crate::predicates::Classification;

type DartList = SmallVec<[FixedDartHandle; 16]>;

impl<S: CdtNum> CdtCore<S> {
    /// Inserts the segment from `p1` to `p2` as a constrained edge. Both
    /// points must already be vertices of the triangulation.
    pub fn insert_segment(&mut self, p1: Point2<S>, p2: Point2<S>) -> Result<(), CdtError> {
        let mut e1 = self.locate(p1);
        if !p1.same_location(self.position(self.store.origin(e1))) {
            e1 = e1.sym();
            debug_assert!(p1.same_location(self.position(self.store.origin(e1))));
        }

        // The segment may already be an edge.
        if p2.same_location(self.position(self.store.dest(e1))) {
            self.store.set_constrained(e1, true);
            return Ok(());
        }

        let mut e2 = self.locate(p2);
        if !p2.same_location(self.position(self.store.origin(e2))) {
            e2 = e2.sym();
            debug_assert!(p2.same_location(self.position(self.store.origin(e2))));
        }

        loop {
            // Collect the crossed edges whose origins lie right of the
            // oriented line from `e1`'s origin towards `p2`. `e` ends up
            // with its origin at the current sub-segment's far endpoint.
            let mut crossed_right = DartList::new();
            let e = self.find_right_vertices(e1, e2, &mut crossed_right)?;

            if crossed_right.is_empty() {
                // No crossings: the sub-segment already exists as the edge
                // closing the left face of `e`.
                let existing = self.store.left_prev(e);
                debug_assert!(self
                    .position(self.store.origin(existing))
                    .same_location(self.position(self.store.origin(e1))));
                self.store.set_constrained(existing, true);
            } else {
                let mut swapped = DartList::new();
                self.swap_edges_away_from_constraint(e1, e, &mut crossed_right, &mut swapped);

                // The edge created by the final swap is the sub-segment.
                let constraint = swapped.pop().expect("swap sweep created no edge");
                debug_assert!(self.dart_matches_segment(constraint, e1, e));
                self.store.set_constrained(constraint, true);

                self.restore_delaunay_edges(&swapped);
            }

            if self
                .position(self.store.origin(e))
                .same_location(p2)
            {
                return Ok(());
            }
            e1 = e;
        }
    }

    fn dart_matches_segment(
        &self,
        dart: FixedDartHandle,
        e1: FixedDartHandle,
        e2: FixedDartHandle,
    ) -> bool {
        let origin = self.position(self.store.origin(dart));
        let dest = self.position(self.store.dest(dart));
        let a = self.position(self.store.origin(e1));
        let b = self.position(self.store.origin(e2));
        (origin.same_location(a) && dest.same_location(b))
            || (origin.same_location(b) && dest.same_location(a))
    }

    /// Walks the crossing sequence of the oriented line from `e1`'s origin
    /// to `e2`'s origin. Each crossed edge whose origin is on the right of
    /// the line is recorded, with consecutive repeats suppressed. Stops at
    /// the first edge whose destination lies on the line; the returned dart
    /// has that vertex as its origin.
    ///
    /// Crossing a constrained edge means the input contains two intersecting
    /// segments.
    fn find_right_vertices(
        &self,
        e1: FixedDartHandle,
        e2: FixedDartHandle,
        crossed_right: &mut DartList,
    ) -> Result<FixedDartHandle, CdtError> {
        let p = self.position(self.store.origin(e1));
        let q = self.position(self.store.origin(e2));

        // The edge at `p` that hugs the segment from the right.
        let mut e = self.closest_edge_on_right_side(e1, q);

        let mut last = None;
        loop {
            let s = self.position(self.store.dest(e));
            let orient = self.classify(p, q, s);
            debug_assert!(!matches!(
                orient,
                Classification::Behind | Classification::Beyond | Classification::Origin
            ));

            if matches!(orient, Classification::Between | Classification::Destination) {
                // `s` lies on the segment; the sub-segment ends here.
                break;
            }

            // With `s` on the right, the ray leaves the current triangle
            // through the next edge of this face; otherwise through `e`
            // itself.
            if orient == Classification::Right {
                e = self.store.left_next(e);
            }

            if self.store.is_constrained(e) {
                return Err(CdtError::SegmentCrossesSegment);
            }

            let r = self.store.origin(e);
            if last != Some(r) {
                crossed_right.push(e);
                last = Some(r);
            }

            e = self.store.left_next(e.sym());
        }

        Ok(self.store.left_next(e))
    }

    /// Rotates around the origin of `e` until reaching the edge that makes
    /// the largest non-positive angle with the oriented segment towards `q`:
    /// the crossing fan at this vertex starts immediately after it.
    fn closest_edge_on_right_side(&self, e: FixedDartHandle, q: Point2<S>) -> FixedDartHandle {
        let p = self.position(self.store.origin(e));
        let s = self.position(self.store.dest(e));

        let orient = self.classify(p, q, s);
        debug_assert!(!matches!(
            orient,
            Classification::Beyond | Classification::Origin
        ));

        if matches!(orient, Classification::Destination | Classification::Between) {
            return e;
        }

        // Rotate clockwise while the destination is left of (or behind on)
        // the supporting line, counterclockwise otherwise.
        let ccw = !matches!(orient, Classification::Left | Classification::Behind);

        let mut eaux = e;
        loop {
            eaux = if ccw {
                self.store.origin_next(eaux)
            } else {
                self.store.origin_prev(eaux)
            };

            let s = self.position(self.store.dest(eaux));
            let orient = self.classify(p, q, s);
            debug_assert!(!matches!(
                orient,
                Classification::Beyond | Classification::Origin
            ));

            if matches!(orient, Classification::Destination | Classification::Between) {
                return eaux;
            }
            if orient == Classification::Left && ccw {
                // Crossed from the right side over the supporting line.
                return self.store.origin_prev(eaux);
            }
            if orient == Classification::Right && !ccw {
                return eaux;
            }
        }
    }

    /// Finds the pair of darts out of `e`'s origin that enclose the fan of
    /// edges crossed by the segment from `p` to `q`.
    fn find_enclosing_edges(
        &self,
        p: Point2<S>,
        q: Point2<S>,
        e: FixedDartHandle,
    ) -> (FixedDartHandle, FixedDartHandle) {
        let s = self.position(self.store.origin(e));
        debug_assert!(self.cross_segment(p, q, s, self.position(self.store.dest(e))));

        let mut left = self.store.left_prev(e).sym();
        loop {
            debug_assert!(self
                .position(self.store.origin(left))
                .same_location(s));
            let t = self.position(self.store.dest(left));
            if !self.cross_segment(p, q, s, t) {
                break;
            }
            left = self.store.left_prev(left).sym();
            if left == e {
                break;
            }
        }

        let mut right = self.store.left_next(e.sym());
        loop {
            debug_assert_eq!(self.store.origin(right), self.store.origin(e));
            let t = self.position(self.store.dest(right));
            if !self.cross_segment(p, q, s, t) {
                break;
            }
            right = self.store.left_next(right.sym());
            if right == e {
                break;
            }
        }

        (left, right)
    }

    /// Repeatedly picks a recorded right-side vertex whose enclosing fan
    /// spans less than 180° and swaps every swappable crossed edge in the
    /// fan until none crosses the segment anymore. The vertex list is
    /// scanned left to right and rescanned from the front after each
    /// erasure; finitely many sweeps empty it.
    ///
    /// Swapped edges that no longer cross the segment are appended to
    /// `swapped`; the last of them realizes the sub-segment itself.
    fn swap_edges_away_from_constraint(
        &mut self,
        e1: FixedDartHandle,
        e2: FixedDartHandle,
        crossed_right: &mut DartList,
        swapped: &mut DartList,
    ) {
        debug_assert!(!crossed_right.is_empty());
        debug_assert!(swapped.is_empty());

        let p = self.position(self.store.origin(e1));
        let q = self.position(self.store.origin(e2));

        while !crossed_right.is_empty() {
            let mut found = None;
            for (index, &candidate) in crossed_right.iter().enumerate() {
                let (left, right) = self.find_enclosing_edges(p, q, candidate);
                let a = self.position(self.store.dest(left));
                let b = self.position(self.store.origin(right));
                let c = self.position(self.store.dest(right));
                // The fan spans less than 180° iff the enclosing pair turns
                // left; only then does the vertex own a swappable edge.
                if self.left(a, b, c) {
                    found = Some((index, left, right));
                    break;
                }
            }

            let Some((index, left, right)) = found else {
                debug_assert!(false, "no swappable vertex in the crossing sequence");
                return;
            };

            // Sweep the fan until every edge strictly between the enclosing
            // pair has been swapped away. A swap may unlock a neighbor, so
            // the sweep repeats.
            while left != self.store.left_prev(right).sym() {
                let mut e = self.store.left_prev(right).sym();
                loop {
                    let a = self.position(self.store.origin(e));
                    let c = self.position(self.store.dest(e));
                    debug_assert!(self.cross_segment(p, q, a, c));

                    let b = self.position(self.store.origin(self.store.left_prev(e.sym())));
                    let d = self.position(self.store.origin(self.store.left_prev(e)));

                    if self.is_convex(a, b, c, d) {
                        let next_in_fan = self.store.left_next(e.sym());
                        operations::swap(&mut self.store, e);
                        if !self.cross_segment(p, q, b, d) {
                            swapped.push(e);
                        }
                        self.fix_faces_after_swap(e);
                        e = next_in_fan;
                    }

                    e = self.store.left_prev(e).sym();
                    if e == left {
                        break;
                    }
                }
            }

            crossed_right.remove(index);
        }
    }

    /// Re-establishes the Delaunay property over a list of unconstrained
    /// edges left behind by the swap sweep. The constrained edge itself must
    /// not be part of the list.
    fn restore_delaunay_edges(&mut self, edges: &[FixedDartHandle]) {
        for &e in edges {
            debug_assert!(!self.store.is_constrained(e));

            // Both incident faces are interior.
            debug_assert!({
                let t = self.store.origin_prev(e.sym());
                self.right_of(self.position(self.store.dest(t)), e.sym())
            });
            let t = self.store.origin_prev(e);
            debug_assert!(self.right_of(self.position(self.store.dest(t)), e));

            let flip = self.in_circle(
                self.position(self.store.origin(e)),
                self.position(self.store.dest(t)),
                self.position(self.store.dest(e)),
                self.position(self.store.dest(self.store.origin_next(e))),
            );

            if flip {
                operations::swap(&mut self.store, e);
                self.fix_faces_after_swap(e);
            }
        }
    }

    /// `true` iff the open segments `ab` and `cd` intersect in a single
    /// interior point of both.
    fn cross_segment(&self, a: Point2<S>, b: Point2<S>, c: Point2<S>, d: Point2<S>) -> bool {
        if self.left(a, b, c) {
            return self.left(b, a, d);
        }
        if self.left(b, a, c) {
            return self.left(a, b, d);
        }
        false
    }

    /// `true` iff the quadrilateral `[a, b, c, d]` is strictly convex.
    fn is_convex(&self, a: Point2<S>, b: Point2<S>, c: Point2<S>, d: Point2<S>) -> bool {
        self.left(b, c, d) && !self.left_on(b, a, d) && self.left(a, c, d)
    }
}
