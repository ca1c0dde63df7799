//! The topology mutation layer.
//!
//! `splice` is the only primitive that rewires rings; every higher-level
//! change (connecting vertices, rotating an edge inside its quadrilateral,
//! removing an edge) is built from it plus allocation and deallocation.

use super::handles::{FixedDartHandle, FixedFaceHandle};
use super::store::{DartEntry, QuadEdgeEntry, TriangulationStore};
use crate::point::CdtNum;

/// Allocates a fresh quad-edge and returns its first primal dart.
///
/// The new edge is isolated: both primal darts loop to themselves, the two
/// dual darts loop to each other.
pub(crate) fn make_edge<S: CdtNum>(store: &mut TriangulationStore<S>) -> FixedDartHandle {
    let handle = store.quad_edges.insert_with(|handle| {
        let dart = |id| FixedDartHandle::from_parts(handle, id);
        let entry = |next| DartEntry {
            next,
            origin: None,
            face: None,
        };
        QuadEdgeEntry {
            darts: [
                entry(dart(0)),
                entry(dart(3)),
                entry(dart(2)),
                entry(dart(1)),
            ],
            constrained: false,
            visited: false,
        }
    });
    FixedDartHandle::from_parts(handle, 0)
}

/// Guibas and Stolfi's splice.
///
/// If `a` and `b` share an origin ring, the ring is split in two; otherwise
/// their rings are merged into one. Self-inverse. Exchanges the
/// `origin_next` links of the two darts and of the duals of their successors.
pub(crate) fn splice<S: CdtNum>(
    store: &mut TriangulationStore<S>,
    a: FixedDartHandle,
    b: FixedDartHandle,
) {
    let alpha = store.origin_next(a).rot();
    let beta = store.origin_next(b).rot();

    let t1 = store.origin_next(b);
    let t2 = store.origin_next(a);
    let t3 = store.origin_next(beta);
    let t4 = store.origin_next(alpha);

    store.set_origin_next(a, t1);
    store.set_origin_next(b, t2);
    store.set_origin_next(alpha, t3);
    store.set_origin_next(beta, t4);
}

/// Adds an edge from `a`'s destination to `b`'s origin, spliced so that all
/// three edges share the same left face afterwards. Returns the new dart.
pub(crate) fn connect<S: CdtNum>(
    store: &mut TriangulationStore<S>,
    a: FixedDartHandle,
    b: FixedDartHandle,
) -> FixedDartHandle {
    let new_dart = make_edge(store);
    let left_next = store.left_next(a);
    splice(store, new_dart, left_next);
    splice(store, new_dart.sym(), b);
    let origin = store.dest(a);
    let dest = store.origin(b);
    store.set_endpoints(new_dart, origin, dest);
    new_dart
}

/// Turns `e` counterclockwise inside the quadrilateral formed by its two
/// incident triangles. The quad-edge record is kept, only its ring links and
/// endpoints change; face pointers must be repaired by the caller.
pub(crate) fn swap<S: CdtNum>(store: &mut TriangulationStore<S>, e: FixedDartHandle) {
    let a = store.origin_prev(e);
    let b = store.origin_prev(e.sym());

    // The endpoints of `e` may have used `e` as their outgoing dart.
    let origin_a = store.origin(a);
    store.set_vertex_dart(origin_a, a);
    let origin_b = store.origin(b);
    store.set_vertex_dart(origin_b, b);

    splice(store, e, a);
    splice(store, e.sym(), b);
    let left_next_a = store.left_next(a);
    splice(store, e, left_next_a);
    let left_next_b = store.left_next(b);
    splice(store, e.sym(), left_next_b);

    let new_origin = store.dest(a);
    let new_dest = store.dest(b);
    store.set_endpoints(e, new_origin, new_dest);
}

/// Detaches `e` from both of its origin rings and frees its quad-edge.
/// A vertex whose last incident dart disappears is freed along with it.
pub(crate) fn delete_edge<S: CdtNum>(store: &mut TriangulationStore<S>, e: FixedDartHandle) {
    debug_assert!(store.quad_edges.contains(e.quad_edge()));
    let origin = store.origin(e);
    let dest = store.dest(e);

    let origin_prev = store.origin_prev(e);
    let origin_survives = e != origin_prev;
    if origin_survives {
        store.set_vertex_dart(origin, origin_prev);
    }

    let dest_survives = e != store.dest_prev(e);
    if dest_survives {
        let sym_prev = store.origin_prev(e.sym());
        store.set_vertex_dart(dest, sym_prev);
    }

    splice(store, e, origin_prev);
    let sym_prev = store.origin_prev(e.sym());
    splice(store, e.sym(), sym_prev);

    store.quad_edges.remove(e.quad_edge());

    if !origin_survives {
        store.vertices.remove(origin);
    }
    if !dest_survives {
        store.vertices.remove(dest);
    }
}

/// Removes a bounded face record and clears the face pointers of its three
/// boundary darts.
pub(crate) fn delete_face<S: CdtNum>(store: &mut TriangulationStore<S>, face: FixedFaceHandle) {
    debug_assert!(store.faces.get(face).bounded);
    let dart = store.faces.get(face).dart;
    let prev = store.left_prev(dart);
    let next = store.left_next(dart);
    store.clear_face(dart);
    store.clear_face(prev);
    store.clear_face(next);
    store.faces.remove(face);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cdt_core::store::TriangulationStore;

    #[test]
    fn test_make_edge_rings() {
        let mut store: TriangulationStore<f64> = TriangulationStore::new();
        let e = make_edge(&mut store);
        // Isolated edge: primal darts are their own origin rings.
        assert_eq!(store.origin_next(e), e);
        assert_eq!(store.origin_next(e.sym()), e.sym());
        // The duals loop to each other.
        assert_eq!(store.origin_next(e.rot()), e.inv_rot());
        assert_eq!(store.origin_next(e.inv_rot()), e.rot());
        // Left and right walks of an isolated edge wrap over its symmetric.
        assert_eq!(store.left_next(e), e.sym());
        assert_eq!(store.origin_prev(e), e);
    }

    #[test]
    fn test_splice_is_self_inverse() {
        let mut store: TriangulationStore<f64> = TriangulationStore::new();
        let a = make_edge(&mut store);
        let b = make_edge(&mut store);

        splice(&mut store, a, b);
        // One merged ring of two darts.
        assert_eq!(store.origin_next(a), b);
        assert_eq!(store.origin_next(b), a);

        splice(&mut store, a, b);
        // Split back into two singleton rings.
        assert_eq!(store.origin_next(a), a);
        assert_eq!(store.origin_next(b), b);
    }

    #[test]
    fn test_connect_closes_triangle() {
        let mut store: TriangulationStore<f64> = TriangulationStore::new();
        let va = store.add_vertex([0.0, 0.0].into());
        let vb = store.add_vertex([1.0, 0.0].into());
        let vc = store.add_vertex([0.0, 1.0].into());

        let ea = make_edge(&mut store);
        store.set_endpoints(ea, va, vb);
        let eb = make_edge(&mut store);
        store.set_endpoints(eb, vb, vc);
        splice(&mut store, ea.sym(), eb);

        let ec = connect(&mut store, eb, ea);
        assert_eq!(store.origin(ec), vc);
        assert_eq!(store.dest(ec), va);
        // All three edges bound a common triangle on one side.
        assert_eq!(store.left_next(ea), eb);
        assert_eq!(store.left_next(eb), ec);
        assert_eq!(store.left_next(ec), ea);
    }
}
