//! Incremental point insertion: locate, split, restore Delaunay.

use super::handles::FixedDartHandle;
use super::operations;
use super::store::FaceEntry;
use super::CdtCore;
use crate::cdt::CdtError;
use crate::point::{CdtNum, Point2};

impl<S: CdtNum> CdtCore<S> {
    /// Walks the triangulation from the starting dart towards `p`.
    ///
    /// Returns a dart with `p` at one of its endpoints, or a dart whose
    /// closed left face contains `p`. Termination relies on every input
    /// point lying inside the enclosing triangle.
    pub fn locate(&self, p: Point2<S>) -> FixedDartHandle {
        let mut e = self.store.starting_dart;
        loop {
            let origin = self.position(self.store.origin(e));
            let dest = self.position(self.store.dest(e));
            if p.same_location(origin) || p.same_location(dest) {
                return e;
            }
            if self.right_of(p, e) {
                e = e.sym();
            } else if !self.right_of(p, self.store.origin_next(e)) {
                e = self.store.origin_next(e);
            } else if !self.right_of(p, self.store.dest_prev(e)) {
                e = self.store.dest_prev(e);
            } else {
                return e;
            }
        }
    }

    /// Inserts `p` into the triangulation and restores the local Delaunay
    /// property around it. Inserting a point that is already a vertex is a
    /// no-op.
    pub fn insert_point(&mut self, p: Point2<S>) -> Result<(), CdtError> {
        let e = self.locate(p);

        if p.same_location(self.position(self.store.origin(e)))
            || p.same_location(self.position(self.store.dest(e)))
        {
            return Ok(());
        }

        let e = self.split_edge_or_triangle(p, e)?;

        // `e` is now opposite `p` in one of the new triangles and the
        // starting dart follows `e` in its left face.
        self.restore_after_insert(p, e);
        Ok(())
    }

    /// Stars `p` into the triangle containing it. If `p` lies on an
    /// unconstrained edge, that edge is removed first and the surrounding
    /// quadrilateral is starred instead.
    ///
    /// Returns a dart opposite `p`; the starting dart is redirected to the
    /// first new edge, which the sector loop below uses as its terminator.
    fn split_edge_or_triangle(
        &mut self,
        p: Point2<S>,
        e: FixedDartHandle,
    ) -> Result<FixedDartHandle, CdtError> {
        let mut e = e;
        if self.on_edge(p, e) {
            if self.store.is_constrained(e) {
                return Err(CdtError::PointOnConstrainedEdge);
            }
            e = self.store.origin_prev(e);
            let face = self.store.face_of(e);
            operations::delete_face(&mut self.store, face);
            let crossed = self.store.origin_next(e);
            operations::delete_edge(&mut self.store, crossed);
        }

        // First spoke, from the polygon's first corner to the new vertex.
        let mut spoke = operations::make_edge(&mut self.store);
        let new_vertex = self.store.add_vertex(p);
        let first_corner = self.store.origin(e);
        self.store.set_endpoints(spoke, first_corner, new_vertex);
        self.store.set_vertex_dart(new_vertex, spoke.sym());
        operations::splice(&mut self.store, spoke, e);

        self.store.starting_dart = spoke;

        // Walk the polygon and connect each remaining corner to the new
        // vertex, creating one bounded face per closed sector.
        loop {
            spoke = operations::connect(&mut self.store, e, spoke.sym());
            e = self.store.origin_prev(spoke);

            let face = self.store.faces.insert(FaceEntry {
                dart: spoke,
                bounded: true,
                region: None,
            });
            self.store.set_face(spoke, face);
            let next = self.store.left_next(spoke);
            self.store.set_face(next, face);
            let prev = self.store.left_prev(spoke);
            self.store.set_face(prev, face);

            if self.store.left_next(e) == self.store.starting_dart {
                break;
            }
        }

        // The last sector reuses the face record of the split polygon.
        let face = self.store.face_of(e);
        self.store.faces.get_mut(face).dart = e;
        let next = self.store.left_next(e);
        self.store.set_face(next, face);
        let prev = self.store.left_prev(e);
        self.store.set_face(prev, face);

        Ok(e)
    }

    /// Walks the boundary of the star polygon around the freshly inserted
    /// `p` in clockwise order, swapping every suspicious edge that fails the
    /// in-circle test. Terminates when the walk returns to the starting
    /// dart without a swap.
    fn restore_after_insert(&mut self, p: Point2<S>, mut e: FixedDartHandle) {
        loop {
            let t = self.store.origin_prev(e);
            let t_dest = self.position(self.store.dest(t));

            let flip = !self.store.is_constrained(e)
                && self.right_of(t_dest, e)
                && self.in_circle(
                    self.position(self.store.origin(e)),
                    t_dest,
                    self.position(self.store.dest(e)),
                    p,
                );

            if flip {
                operations::swap(&mut self.store, e);
                self.fix_faces_after_swap(e);
                e = self.store.origin_prev(e);
            } else if self.store.origin_next(e) == self.store.starting_dart {
                return;
            } else {
                // Next suspicious edge, clockwise along the star polygon.
                e = self.store.left_prev(self.store.origin_next(e));
            }
        }
    }

    /// After `swap(e)` the two surviving face records must be re-anchored on
    /// the rotated diagonal and the two darts that changed sides must adopt
    /// them.
    pub(crate) fn fix_faces_after_swap(&mut self, e: FixedDartHandle) {
        let face = self.store.face_of(e);
        self.store.faces.get_mut(face).dart = e;
        let prev = self.store.left_prev(e);
        self.store.set_face(prev, face);

        let sym = e.sym();
        let sym_face = self.store.face_of(sym);
        self.store.faces.get_mut(sym_face).dart = sym;
        let sym_prev = self.store.left_prev(sym);
        self.store.set_face(sym_prev, sym_face);
    }
}
