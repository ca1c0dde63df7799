use core::marker::PhantomData;

/// Internal fixed handle: a plain index into one of the store's arenas.
///
/// Handles stay valid until the element they refer to is removed; removing
/// other elements never invalidates them.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct FixedHandleImpl<Type> {
    index: u32,
    ty: PhantomData<Type>,
}

// Manual impls - `derive` would put a `Type: Clone` bound on the parameter.
impl<Type> Clone for FixedHandleImpl<Type> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Type> Copy for FixedHandleImpl<Type> {}

impl<Type> core::fmt::Debug for FixedHandleImpl<Type> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FixedHandle")
            .field("index", &self.index)
            .finish()
    }
}

impl<Type> FixedHandleImpl<Type> {
    pub fn new(index: usize) -> Self {
        Self {
            index: index
                .try_into()
                .expect("Index too big - at most 2^32 elements supported"),
            ty: PhantomData,
        }
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub(crate) struct VertexTag;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub(crate) struct QuadEdgeTag;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub(crate) struct FaceTag;

pub(crate) type FixedVertexHandle = FixedHandleImpl<VertexTag>;
pub(crate) type FixedQuadEdgeHandle = FixedHandleImpl<QuadEdgeTag>;
pub(crate) type FixedFaceHandle = FixedHandleImpl<FaceTag>;

/// Handle of a single dart.
///
/// The four darts of a quad-edge live in one record; a dart handle packs the
/// owning quad-edge's index and the dart's position `0..4` within the record
/// (`index = quad_edge * 4 + dart_id`). Darts 0 and 2 are the primal pair,
/// darts 1 and 3 the dual pair. This makes the three rotations pure index
/// arithmetic - no store access required.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct FixedDartHandle {
    index: u32,
}

impl core::fmt::Debug for FixedDartHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FixedDartHandle")
            .field("quad_edge", &self.quad_edge().index())
            .field("dart_id", &self.dart_id())
            .finish()
    }
}

impl FixedDartHandle {
    pub fn from_parts(quad_edge: FixedQuadEdgeHandle, dart_id: usize) -> Self {
        debug_assert!(dart_id < 4);
        Self {
            index: (quad_edge.index() * 4 + dart_id) as u32,
        }
    }

    /// The quad-edge record this dart belongs to.
    #[inline]
    pub fn quad_edge(self) -> FixedQuadEdgeHandle {
        FixedQuadEdgeHandle::new(self.index as usize / 4)
    }

    /// The dart's position within its quad-edge record.
    #[inline]
    pub fn dart_id(self) -> usize {
        self.index as usize % 4
    }

    /// Rotates 90° counterclockwise within the quad-edge: the dual dart
    /// directed from the right face to the left face.
    #[inline]
    pub fn rot(self) -> Self {
        self.with_dart_id((self.dart_id() + 1) % 4)
    }

    /// Rotates 90° clockwise within the quad-edge.
    #[inline]
    pub fn inv_rot(self) -> Self {
        self.with_dart_id((self.dart_id() + 3) % 4)
    }

    /// The same undirected edge, traversed in the opposite direction.
    #[inline]
    pub fn sym(self) -> Self {
        self.with_dart_id((self.dart_id() + 2) % 4)
    }

    #[inline]
    fn with_dart_id(self, dart_id: usize) -> Self {
        Self {
            index: (self.index & !3) | dart_id as u32,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{FixedDartHandle, FixedQuadEdgeHandle};

    #[test]
    fn test_rotation_algebra() {
        for qe in [0, 1, 17] {
            for id in 0..4 {
                let d = FixedDartHandle::from_parts(FixedQuadEdgeHandle::new(qe), id);
                assert_eq!(d.sym().sym(), d);
                assert_eq!(d.rot().rot(), d.sym());
                assert_eq!(d.rot().rot().rot().rot(), d);
                assert_eq!(d.rot().inv_rot(), d);
                assert_eq!(d.inv_rot().rot(), d);
                assert_eq!(d.quad_edge().index(), qe);
            }
        }
    }

    #[test]
    fn test_packing() {
        let d = FixedDartHandle::from_parts(FixedQuadEdgeHandle::new(3), 2);
        assert_eq!(d.quad_edge().index(), 3);
        assert_eq!(d.dart_id(), 2);
        assert_eq!(d.rot().dart_id(), 3);
        assert_eq!(d.sym().dart_id(), 0);
    }
}
