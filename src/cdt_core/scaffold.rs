//! The enclosing triangle.
//!
//! Construction starts from a triangle whose corners at `(M, 0)`, `(0, M)`
//! and `(-M, -M)` contain every input point, with `M` three times the
//! largest absolute input coordinate. After all points and segments are in,
//! the three corners are peeled off together with every triangle incident to
//! them, leaving the triangulation of the input's convex hull.

use super::handles::FixedDartHandle;
use super::operations;
use super::store::FaceEntry;
use super::CdtCore;
use crate::point::{CdtNum, Point2};

impl<S: CdtNum> CdtCore<S> {
    /// Builds the initial two-face subdivision: the enclosing triangle and
    /// the unbounded face. The corners must be in counterclockwise order.
    pub fn create_enclosing_triangle(&mut self, pa: Point2<S>, pb: Point2<S>, pc: Point2<S>) {
        let va = self.store.add_vertex(pa);
        let vb = self.store.add_vertex(pb);
        let vc = self.store.add_vertex(pc);

        let ea = operations::make_edge(&mut self.store);
        self.store.set_endpoints(ea, va, vb);

        let eb = operations::make_edge(&mut self.store);
        self.store.set_endpoints(eb, vb, vc);
        operations::splice(&mut self.store, ea.sym(), eb);

        let ec = operations::make_edge(&mut self.store);
        self.store.set_endpoints(ec, vc, va);
        operations::splice(&mut self.store, eb.sym(), ec);
        operations::splice(&mut self.store, ec.sym(), ea);

        self.store.starting_dart = ea;

        self.store.set_vertex_dart(va, ea);
        self.store.set_vertex_dart(vb, eb);
        self.store.set_vertex_dart(vc, ec);

        let inner = self.store.faces.insert(FaceEntry {
            dart: ea,
            bounded: true,
            region: None,
        });
        self.store.set_face(ea, inner);
        let next = self.store.left_next(ea);
        self.store.set_face(next, inner);
        let prev = self.store.left_prev(ea);
        self.store.set_face(prev, inner);

        let outer = self.store.faces.insert(FaceEntry {
            dart: ea.sym(),
            bounded: false,
            region: None,
        });
        self.store.set_face(ea.sym(), outer);
        let next = self.store.left_next(ea.sym());
        self.store.set_face(next, outer);
        let prev = self.store.left_prev(ea.sym());
        self.store.set_face(prev, outer);
    }

    /// Finds a dart of the enclosing triangle: locate the corner at
    /// `(M, 0)`, then rotate its star until the destination is the corner at
    /// `(0, M)`.
    fn find_enclosing_triangle_edge(&self) -> FixedDartHandle {
        let extent = self.store.scaffold_extent;
        let corner = Point2::new(extent, S::zero());

        let mut e = self.locate(corner);
        if self.position(self.store.origin(e)).x != extent {
            e = e.sym();
            debug_assert_eq!(self.position(self.store.origin(e)).x, extent);
        }

        while self.position(self.store.dest(e)).y != extent {
            e = self.store.origin_next(e);
        }
        e
    }

    /// Removes the enclosing triangle: each corner is peeled off together
    /// with all triangles incident to it, turning their interiors into
    /// unbounded face.
    pub fn remove_enclosing_triangle(&mut self) {
        let mut e_next = self.find_enclosing_triangle_edge();
        for _ in 0..3 {
            let e_iter = e_next;
            // Pick up the next corner's boundary dart before this corner's
            // triangles disappear.
            e_next = self.store.origin_next(e_iter.sym());
            self.remove_boundary_vertex(e_iter);
        }
    }

    /// Removes every triangle incident to the origin of `e` (a hull vertex),
    /// then the vertex itself. `e` must be a boundary dart: its right face
    /// is the unbounded face.
    fn remove_boundary_vertex(&mut self, e: FixedDartHandle) {
        let mut e_iter = e;
        let e_last = self.store.origin_prev(e);

        loop {
            let e_next = self.store.origin_next(e_iter);

            // The starting dart must survive the removal.
            if e_iter == self.store.starting_dart || e_iter.sym() == self.store.starting_dart {
                self.store.starting_dart = self.store.dest_prev(e_iter);
            }

            if e_next == e_last {
                // Only one triangle left at this vertex; it takes the
                // vertex and both remaining boundary edges with it.
                self.remove_boundary_triangle_and_vertex(e_iter, e_last);
                return;
            }
            self.remove_boundary_triangle(e_iter);
            e_iter = e_next;
        }
    }

    /// Removes the triangle left of `e`, merging its interior into the
    /// unbounded face. `e` itself disappears, the other two edges become
    /// boundary edges.
    fn remove_boundary_triangle(&mut self, e: FixedDartHandle) {
        let bounded = self.store.face_of(e);
        debug_assert!(self.store.faces.get(bounded).bounded);

        let e2 = e.sym();
        let unbounded = self.store.face_of(e2);
        debug_assert!(!self.store.faces.get(unbounded).bounded);

        operations::delete_face(&mut self.store, bounded);

        let prev = self.store.left_prev(e);
        self.store.set_face(prev, unbounded);
        let next = self.store.left_next(e);
        self.store.set_face(next, unbounded);

        if self.store.faces.get(unbounded).dart == e2 {
            self.store.faces.get_mut(unbounded).dart = next;
        }

        operations::delete_edge(&mut self.store, e);
    }

    /// Removes a triangle bounded by two boundary edges `e1` and `e2`, plus
    /// their shared origin vertex.
    fn remove_boundary_triangle_and_vertex(&mut self, e1: FixedDartHandle, e2: FixedDartHandle) {
        if e1 != e2 {
            let unbounded = self.store.face_of(e1.sym());
            debug_assert!(self.store.faces.get(self.store.face_of(e1)).bounded);
            debug_assert!(!self.store.faces.get(unbounded).bounded);
            debug_assert!(!self.store.faces.get(self.store.face_of(e2)).bounded);

            let bounded = self.store.face_of(e1);
            operations::delete_face(&mut self.store, bounded);

            let next = self.store.left_next(e1);
            self.store.set_face(next, unbounded);

            if self.store.faces.get(unbounded).dart == e2 {
                self.store.faces.get_mut(unbounded).dart = next;
            }

            operations::delete_edge(&mut self.store, e1);
            operations::delete_edge(&mut self.store, e2);
        } else {
            // The vertex had a single incident edge.
            operations::delete_edge(&mut self.store, e1);
        }
    }
}
