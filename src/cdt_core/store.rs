use super::arena::Arena;
use super::handles::{
    FaceTag, FixedDartHandle, FixedFaceHandle, FixedQuadEdgeHandle, FixedVertexHandle,
    QuadEdgeTag, VertexTag,
};
use super::region::Region;
use crate::point::{CdtNum, Point2};

#[derive(Debug, Clone)]
pub(crate) struct VertexEntry<S> {
    pub position: Point2<S>,
    /// Some dart leaving this vertex.
    pub out_dart: Option<FixedDartHandle>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct DartEntry {
    /// The next dart in a counterclockwise walk around this dart's origin.
    pub next: FixedDartHandle,
    /// Only primal darts carry an origin vertex.
    pub origin: Option<FixedVertexHandle>,
    /// The face to the left of this dart. Only primal darts carry one.
    pub face: Option<FixedFaceHandle>,
}

/// The record bundling the four darts of one undirected edge.
#[derive(Debug, Clone)]
pub(crate) struct QuadEdgeEntry {
    pub darts: [DartEntry; 4],
    /// Shared by all four darts: the edge realizes an input segment.
    pub constrained: bool,
    /// Traversal scratch mark, shared by all four darts.
    pub visited: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct FaceEntry {
    /// Some dart on this face's boundary cycle.
    pub dart: FixedDartHandle,
    /// Exactly one face of the subdivision has `bounded == false`.
    pub bounded: bool,
    /// Region label, written by the region sweep before enumeration.
    pub region: Option<Region>,
}

/// Owns every topological record of one triangulation.
///
/// All intra-store references are fixed handles into the three arenas. The
/// starting dart seeds point location; `scaffold_extent` is the largest
/// absolute corner coordinate of the enclosing triangle and feeds the
/// in-circle tie-break.
#[derive(Debug, Clone)]
pub(crate) struct TriangulationStore<S> {
    pub vertices: Arena<VertexEntry<S>, VertexTag>,
    pub quad_edges: Arena<QuadEdgeEntry, QuadEdgeTag>,
    pub faces: Arena<FaceEntry, FaceTag>,
    pub starting_dart: FixedDartHandle,
    pub scaffold_extent: S,
}

impl<S: CdtNum> TriangulationStore<S> {
    pub fn new() -> Self {
        TriangulationStore {
            vertices: Arena::new(),
            quad_edges: Arena::new(),
            faces: Arena::new(),
            // Replaced as soon as the enclosing triangle is built.
            starting_dart: FixedDartHandle::from_parts(FixedQuadEdgeHandle::new(0), 0),
            scaffold_extent: S::zero(),
        }
    }

    #[inline]
    pub fn dart(&self, dart: FixedDartHandle) -> &DartEntry {
        &self.quad_edges.get(dart.quad_edge()).darts[dart.dart_id()]
    }

    #[inline]
    pub fn dart_mut(&mut self, dart: FixedDartHandle) -> &mut DartEntry {
        &mut self.quad_edges.get_mut(dart.quad_edge()).darts[dart.dart_id()]
    }

    // === vertex accessors ===

    #[inline]
    pub fn position(&self, vertex: FixedVertexHandle) -> Point2<S> {
        self.vertices.get(vertex).position
    }

    pub fn add_vertex(&mut self, position: Point2<S>) -> FixedVertexHandle {
        self.vertices.insert(VertexEntry {
            position,
            out_dart: None,
        })
    }

    pub fn set_vertex_dart(&mut self, vertex: FixedVertexHandle, dart: FixedDartHandle) {
        debug_assert_eq!(self.dart(dart).origin, Some(vertex));
        self.vertices.get_mut(vertex).out_dart = Some(dart);
    }

    // === dart accessors ===

    #[inline]
    pub fn origin(&self, dart: FixedDartHandle) -> FixedVertexHandle {
        self.dart(dart).origin.expect("dart has no origin vertex")
    }

    #[inline]
    pub fn dest(&self, dart: FixedDartHandle) -> FixedVertexHandle {
        self.origin(dart.sym())
    }

    pub fn set_endpoints(
        &mut self,
        dart: FixedDartHandle,
        origin: FixedVertexHandle,
        dest: FixedVertexHandle,
    ) {
        self.dart_mut(dart).origin = Some(origin);
        self.dart_mut(dart.sym()).origin = Some(dest);
    }

    #[inline]
    pub fn face_of(&self, dart: FixedDartHandle) -> FixedFaceHandle {
        self.dart(dart).face.expect("dart has no face")
    }

    pub fn set_face(&mut self, dart: FixedDartHandle, face: FixedFaceHandle) {
        self.dart_mut(dart).face = Some(face);
    }

    pub fn clear_face(&mut self, dart: FixedDartHandle) {
        self.dart_mut(dart).face = None;
    }

    // === quad-edge flags ===

    #[inline]
    pub fn is_constrained(&self, dart: FixedDartHandle) -> bool {
        self.quad_edges.get(dart.quad_edge()).constrained
    }

    pub fn set_constrained(&mut self, dart: FixedDartHandle, value: bool) {
        self.quad_edges.get_mut(dart.quad_edge()).constrained = value;
    }

    #[inline]
    pub fn is_visited(&self, dart: FixedDartHandle) -> bool {
        self.quad_edges.get(dart.quad_edge()).visited
    }

    pub fn set_visited(&mut self, dart: FixedDartHandle, value: bool) {
        self.quad_edges.get_mut(dart.quad_edge()).visited = value;
    }

    // === the Guibas-Stolfi walks ===
    //
    // `origin_next` is the stored link; everything else is a composition of
    // the in-record rotations with it.

    /// Next dart counterclockwise around the origin vertex.
    #[inline]
    pub fn origin_next(&self, dart: FixedDartHandle) -> FixedDartHandle {
        self.dart(dart).next
    }

    #[inline]
    pub fn set_origin_next(&mut self, dart: FixedDartHandle, next: FixedDartHandle) {
        self.dart_mut(dart).next = next;
    }

    /// Next dart clockwise around the origin vertex.
    #[inline]
    pub fn origin_prev(&self, dart: FixedDartHandle) -> FixedDartHandle {
        self.origin_next(dart.rot()).rot()
    }

    /// Next dart counterclockwise around the destination vertex.
    #[allow(dead_code)]
    #[inline]
    pub fn dest_next(&self, dart: FixedDartHandle) -> FixedDartHandle {
        self.origin_next(dart.sym()).sym()
    }

    /// Next dart clockwise around the destination vertex.
    #[inline]
    pub fn dest_prev(&self, dart: FixedDartHandle) -> FixedDartHandle {
        self.origin_next(dart.inv_rot()).inv_rot()
    }

    /// Next dart counterclockwise around the left face.
    #[inline]
    pub fn left_next(&self, dart: FixedDartHandle) -> FixedDartHandle {
        self.origin_next(dart.inv_rot()).rot()
    }

    /// Previous dart around the left face.
    #[inline]
    pub fn left_prev(&self, dart: FixedDartHandle) -> FixedDartHandle {
        self.origin_next(dart).sym()
    }

    /// Next dart counterclockwise around the right face.
    #[allow(dead_code)]
    #[inline]
    pub fn right_next(&self, dart: FixedDartHandle) -> FixedDartHandle {
        self.origin_next(dart.rot()).inv_rot()
    }

    /// Previous dart around the right face.
    #[allow(dead_code)]
    #[inline]
    pub fn right_prev(&self, dart: FixedDartHandle) -> FixedDartHandle {
        self.origin_next(dart.sym())
    }

    /// Iterates the two primal darts of every live quad-edge.
    pub fn primal_darts(&self) -> impl Iterator<Item = FixedDartHandle> + '_ {
        self.quad_edges.iter().flat_map(|(handle, _)| {
            [
                FixedDartHandle::from_parts(handle, 0),
                FixedDartHandle::from_parts(handle, 2),
            ]
        })
    }

    #[cfg(any(test, fuzzing))]
    pub fn sanity_check(&self) {
        // Exactly one unbounded face.
        let unbounded_count = self.faces.iter().filter(|(_, f)| !f.bounded).count();
        assert_eq!(unbounded_count, 1);

        // The starting dart refers to a live quad-edge.
        assert!(self.quad_edges.contains(self.starting_dart.quad_edge()));

        for dart in self.primal_darts() {
            assert_eq!(dart.sym().sym(), dart);
            assert_eq!(dart.rot().rot().rot().rot(), dart);
            assert_eq!(dart.rot().rot(), dart.sym());

            // Each prev walk inverts its next walk.
            assert_eq!(self.origin_next(self.origin_prev(dart)), dart);
            assert_eq!(self.dest_next(self.dest_prev(dart)), dart);
            assert_eq!(self.left_next(self.left_prev(dart)), dart);
            assert_eq!(self.right_next(self.right_prev(dart)), dart);

            assert!(self.dart(dart).origin.is_some());
            assert!(self.dart(dart).face.is_some());

            // The origin ring is a simple cycle of darts sharing the origin.
            let origin = self.origin(dart);
            let mut current = dart;
            let mut steps = 0;
            loop {
                current = self.origin_next(current);
                assert_eq!(self.origin(current), origin);
                steps += 1;
                assert!(steps <= self.quad_edges.len() * 2);
                if current == dart {
                    break;
                }
            }
        }

        for (handle, face) in self.faces.iter() {
            let dart = face.dart;
            assert_eq!(self.face_of(dart), handle);
            if face.bounded {
                // Every bounded face is a triangle.
                let second = self.left_next(dart);
                let third = self.left_next(second);
                assert_eq!(self.left_next(third), dart);
                assert_eq!(self.face_of(second), handle);
                assert_eq!(self.face_of(third), handle);
            }
        }

        for (_, vertex) in self.vertices.iter() {
            let out_dart = vertex.out_dart.expect("vertex without an outgoing dart");
            assert!(self.quad_edges.contains(out_dart.quad_edge()));
        }

        // Euler's formula for a planar connected subdivision.
        let v = self.vertices.len();
        let e = self.quad_edges.len();
        let f = self.faces.len();
        assert_eq!(v + f, e + 2);
    }
}
