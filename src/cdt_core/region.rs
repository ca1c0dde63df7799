//! Region labelling.
//!
//! A region is a maximal set of bounded faces connected through darts that
//! are neither constrained nor on the convex hull. Regions touching the hull
//! through unconstrained edges are trimmed; regions entered from the hull
//! through constrained edges are not; interior regions alternate with their
//! labelled neighbors across constrained edges until a fixpoint is reached.

use std::collections::VecDeque;

use super::handles::{FixedDartHandle, FixedFaceHandle};
use super::store::TriangulationStore;
use crate::point::CdtNum;

/// The label of a maximal constrained-edge-bounded set of faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Region {
    /// Reachable from the hull without crossing a constraint: the "outside"
    /// of the constrained polygonal chains.
    Trimmed,
    /// Enclosed by the constrained chains.
    NonTrimmed,
}

impl Region {
    fn opposite(self) -> Region {
        match self {
            Region::Trimmed => Region::NonTrimmed,
            Region::NonTrimmed => Region::Trimmed,
        }
    }
}

/// Labels every bounded face of the store. Idempotent: previous labels are
/// discarded first.
pub(crate) fn label_regions<S: CdtNum>(store: &mut TriangulationStore<S>) {
    for (_, face) in store.faces.iter_mut() {
        face.region = None;
    }

    let mut unconstrained_hull = Vec::new();
    let mut constrained_hull = Vec::new();
    let mut constrained_interior: Vec<FixedDartHandle> = Vec::new();

    for dart in store.primal_darts() {
        let face = store.face_of(dart);
        if !store.faces.get(face).bounded {
            continue;
        }
        let mate_face = store.face_of(dart.sym());
        if !store.faces.get(mate_face).bounded {
            if store.is_constrained(dart) {
                constrained_hull.push(face);
            } else {
                unconstrained_hull.push(face);
            }
        } else if store.is_constrained(dart) {
            constrained_interior.push(dart);
        }
    }

    for face in unconstrained_hull {
        if store.faces.get(face).region.is_none() {
            flood_region(store, face, Region::Trimmed);
        }
    }

    for face in constrained_hull {
        if store.faces.get(face).region.is_none() {
            flood_region(store, face, Region::NonTrimmed);
        }
    }

    // Interior regions: whenever a constrained edge separates a labelled
    // face from an unlabelled one, the unlabelled side gets the opposite
    // label. Repeat until nothing changes.
    loop {
        let mut changed = false;
        for &dart in &constrained_interior {
            let face = store.face_of(dart);
            if store.faces.get(face).region.is_some() {
                continue;
            }
            let mate_face = store.face_of(dart.sym());
            if let Some(mate_region) = store.faces.get(mate_face).region {
                flood_region(store, face, mate_region.opposite());
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
}

/// Breadth-first flood over bounded faces, never crossing a constrained
/// edge. `start` must be unlabelled.
fn flood_region<S: CdtNum>(
    store: &mut TriangulationStore<S>,
    start: FixedFaceHandle,
    region: Region,
) {
    debug_assert!(store.faces.get(start).bounded);
    debug_assert!(store.faces.get(start).region.is_none());

    let mut queue = VecDeque::new();
    store.faces.get_mut(start).region = Some(region);
    queue.push_back(start);

    while let Some(face) = queue.pop_front() {
        let first = store.faces.get(face).dart;
        let second = store.left_next(first);
        let third = store.left_next(second);
        debug_assert_eq!(store.left_next(third), first);
        debug_assert_eq!(store.face_of(second), face);
        debug_assert_eq!(store.face_of(third), face);

        for dart in [first, second, third] {
            if store.is_constrained(dart) {
                continue;
            }
            let neighbor = store.face_of(dart.sym());
            if !store.faces.get(neighbor).bounded {
                continue;
            }
            if store.faces.get(neighbor).region.is_none() {
                store.faces.get_mut(neighbor).region = Some(region);
                queue.push_back(neighbor);
            }
        }
    }
}
