use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A coordinate type that can be used with a triangulation.
///
/// Internally, all geometric decisions are made after converting coordinates
/// into `f64`. The conversion must be lossless for the exact predicates to
/// stay exact, hence the `Into<f64>` bound.
///
/// This type should usually be either `f32` or `f64`.
pub trait CdtNum: Float + Into<f64> + Default + core::fmt::Debug {}

impl<T> CdtNum for T where T: Float + Into<f64> + Default + core::fmt::Debug {}

/// A two dimensional point.
///
/// This is the basic type used for defining input positions and for
/// reporting vertex positions back to the caller.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point2<S = f64> {
    /// The point's x coordinate
    pub x: S,
    /// The point's y coordinate
    pub y: S,
}

impl<S> Point2<S> {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: S, y: S) -> Self {
        Point2 { x, y }
    }
}

impl<S: CdtNum> Point2<S> {
    #[inline]
    pub(crate) fn to_f64(self) -> Point2<f64> {
        Point2::new(self.x.into(), self.y.into())
    }

    /// Exact coordinate-wise equality. Two vertices are considered the same
    /// point if and only if both coordinates compare equal.
    #[inline]
    pub(crate) fn same_location(self, other: Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl<S: CdtNum> From<[S; 2]> for Point2<S> {
    #[inline]
    fn from(source: [S; 2]) -> Self {
        Point2::new(source[0], source[1])
    }
}

impl<S: CdtNum> From<(S, S)> for Point2<S> {
    #[inline]
    fn from(source: (S, S)) -> Self {
        Point2::new(source.0, source.1)
    }
}

#[cfg(test)]
mod test {
    use super::Point2;

    #[test]
    fn test_same_location_is_exact() {
        let p = Point2::new(0.1f64, 0.2);
        assert!(p.same_location(Point2::new(0.1, 0.2)));
        assert!(!p.same_location(Point2::new(0.1, 0.2 + f64::EPSILON)));
    }

    #[test]
    fn test_conversions() {
        let p: Point2<f64> = [1.0, 2.0].into();
        assert_eq!(p, Point2::new(1.0, 2.0));
        let p: Point2<f32> = (3.0f32, 4.0f32).into();
        assert_eq!(p.to_f64(), Point2::new(3.0f64, 4.0));
    }
}
