//! Dense output arrays.
//!
//! A face-centric traversal over the bounded faces produces the four output
//! arrays. Vertices are numbered in first-encounter order; each undirected
//! edge is reported once, when the traversal first reaches one of its darts,
//! using the per-quad-edge visited mark as scratch state (reset afterwards).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::handles::FixedQuadEdgeHandle;
use super::region::{label_regions, Region};
use super::store::TriangulationStore;
use crate::point::{CdtNum, Point2};

/// The kind of an output edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeTag {
    /// Interior, unconstrained.
    Regular,
    /// Realizes an input segment.
    Constrained,
    /// On the convex hull.
    Boundary,
}

/// Which bounded faces the enumeration reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RegionFilter {
    /// Every bounded face.
    AllBounded,
    /// Only faces enclosed by the constrained polygonal chains.
    NonTrimmedOnly,
}

/// The dense arrays produced by enumerating a triangulation.
///
/// `edges`, `edge_tags` and `triangles` index into `vertices`. Triangles are
/// counterclockwise. Enumerating the same triangulation twice yields
/// identical arrays in identical order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangulationData<S = f64> {
    /// One entry per vertex.
    pub vertices: Vec<Point2<S>>,
    /// One vertex index pair per undirected edge.
    pub edges: Vec<[usize; 2]>,
    /// The tag of the edge with the same position in `edges`.
    pub edge_tags: Vec<EdgeTag>,
    /// One counterclockwise vertex index triple per reported triangle.
    pub triangles: Vec<[usize; 3]>,
}

pub(crate) fn enumerate<S: CdtNum>(
    store: &mut TriangulationStore<S>,
    filter: RegionFilter,
) -> TriangulationData<S> {
    if filter == RegionFilter::NonTrimmedOnly {
        label_regions(store);
    }

    let mut data = TriangulationData {
        vertices: Vec::new(),
        edges: Vec::new(),
        edge_tags: Vec::new(),
        triangles: Vec::new(),
    };

    // Dense vertex numbering in first-encounter order.
    let mut vertex_index: Vec<Option<u32>> = vec![None; store.vertices.slot_count()];
    let mut touched_edges: Vec<FixedQuadEdgeHandle> = Vec::new();

    let selected: Vec<_> = store
        .faces
        .iter()
        .filter(|(_, face)| {
            face.bounded
                && (filter == RegionFilter::AllBounded
                    || face.region == Some(Region::NonTrimmed))
        })
        .map(|(handle, _)| handle)
        .collect();

    for face in selected {
        let first = store.faces.get(face).dart;
        let darts = [first, store.left_next(first), store.left_prev(first)];

        let mut triangle = [0usize; 3];
        for (slot, &dart) in triangle.iter_mut().zip(darts.iter()) {
            let vertex = store.origin(dart);
            let index = match vertex_index[vertex.index()] {
                Some(index) => index as usize,
                None => {
                    let index = data.vertices.len();
                    vertex_index[vertex.index()] = Some(index as u32);
                    data.vertices.push(store.position(vertex));
                    index
                }
            };
            *slot = index;
        }
        data.triangles.push(triangle);

        for &dart in &darts {
            if store.is_visited(dart) {
                continue;
            }
            store.set_visited(dart, true);
            touched_edges.push(dart.quad_edge());

            let origin = vertex_index[store.origin(dart).index()]
                .expect("edge endpoint not yet numbered") as usize;
            let dest = vertex_index[store.dest(dart).index()]
                .expect("edge endpoint not yet numbered") as usize;
            data.edges.push([origin, dest]);

            let tag = if store.is_constrained(dart) {
                EdgeTag::Constrained
            } else if store.faces.get(store.face_of(dart.sym())).bounded {
                EdgeTag::Regular
            } else {
                EdgeTag::Boundary
            };
            data.edge_tags.push(tag);
        }
    }

    for quad_edge in touched_edges {
        store.quad_edges.get_mut(quad_edge).visited = false;
    }

    data
}
