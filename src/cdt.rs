use core::fmt::Display;
use std::error::Error;

use crate::cdt_core::enumeration::{self, RegionFilter, TriangulationData};
use crate::cdt_core::CdtCore;
use crate::point::{CdtNum, Point2};
use crate::predicates::{validate_coordinate, Classification, Predicates};

/// The error type for constructing a triangulation.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum CdtError {
    /// The input failed the pre-construction consistency check: fewer than
    /// three points, a non-finite or out-of-range coordinate, all points
    /// collinear, a degenerate or duplicated segment, a segment endpoint in
    /// the interior of another segment, or an out-of-bounds vertex index.
    ///
    /// Raised before any construction work happens.
    InputInconsistent,

    /// A point insertion hit the interior of a constrained edge. Constraints
    /// are never subdivided implicitly.
    PointOnConstrainedEdge,

    /// While inserting a segment, the crossing sequence ran into an edge
    /// that is already constrained.
    SegmentCrossesSegment,
}

impl Display for CdtError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CdtError::InputInconsistent => {
                write!(f, "the input points and segments are inconsistent")
            }
            CdtError::PointOnConstrainedEdge => {
                write!(f, "attempt to insert a point on a constrained edge")
            }
            CdtError::SegmentCrossesSegment => {
                write!(f, "a segment intersects the interior of another segment")
            }
        }
    }
}

impl Error for CdtError {}

/// A two-dimensional
/// [constrained Delaunay triangulation](https://en.wikipedia.org/wiki/Constrained_Delaunay_triangulation)
/// of a planar straight-line graph.
///
/// The triangulation covers the convex hull of the input points. Every input
/// segment is present as a *constrained edge*; every unconstrained edge
/// satisfies the local Delaunay empty-circumcircle property. Segments must
/// not cross: they may share endpoints, but no interior intersections and no
/// endpoint of one segment inside another are allowed - such inputs are
/// rejected up front.
///
/// # Example
///
/// ```
/// use quadedge_cdt::{ConstrainedDelaunayTriangulation, Point2, RegionFilter};
///
/// # fn main() -> Result<(), quadedge_cdt::CdtError> {
/// let points = [
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ];
/// // Force the diagonal between corners 0 and 2.
/// let mut cdt = ConstrainedDelaunayTriangulation::new(&points, &[[0, 2]])?;
/// let data = cdt.triangulation_data(RegionFilter::AllBounded);
/// assert_eq!(data.triangles.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConstrainedDelaunayTriangulation<S: CdtNum = f64> {
    pub(crate) core: CdtCore<S>,
}

impl<S: CdtNum> ConstrainedDelaunayTriangulation<S> {
    /// Builds the constrained Delaunay triangulation of the given planar
    /// straight-line graph.
    ///
    /// `segments` contains index pairs into `points`. The input is checked
    /// for consistency before any construction work: at least three points,
    /// finite coordinates, not all points collinear, and no two segments
    /// intersecting anywhere except at shared endpoints.
    pub fn new(points: &[Point2<S>], segments: &[[usize; 2]]) -> Result<Self, CdtError> {
        let mut core = CdtCore::new();

        check_input_consistency(&core.predicates, points, segments)?;

        let mut max = S::zero();
        for point in points {
            max = max.max(point.x.abs()).max(point.y.abs());
        }
        let extent = max + max + max;
        if !extent.is_finite() {
            return Err(CdtError::InputInconsistent);
        }
        core.store.scaffold_extent = extent;

        core.create_enclosing_triangle(
            Point2::new(extent, S::zero()),
            Point2::new(S::zero(), extent),
            Point2::new(-extent, -extent),
        );

        for point in points {
            core.insert_point(*point)?;
        }

        for segment in segments {
            core.insert_segment(points[segment[0]], points[segment[1]])?;
        }

        core.remove_enclosing_triangle();

        Ok(ConstrainedDelaunayTriangulation { core })
    }

    /// Builds the (unconstrained) Delaunay triangulation of a point set.
    pub fn from_points(points: &[Point2<S>]) -> Result<Self, CdtError> {
        Self::new(points, &[])
    }

    /// The number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.core.store.vertices.len()
    }

    /// The number of undirected edges.
    pub fn num_undirected_edges(&self) -> usize {
        self.core.store.quad_edges.len()
    }

    /// The number of faces, including the single unbounded face.
    pub fn num_faces(&self) -> usize {
        self.core.store.faces.len()
    }

    /// Enumerates the triangulation into dense arrays.
    ///
    /// With [RegionFilter::NonTrimmedOnly], only triangles enclosed by the
    /// constrained polygonal chains are reported, along with the vertices
    /// and edges they use. Takes `&mut self` because the traversal uses
    /// per-edge scratch marks; the marks are restored before returning and
    /// repeated calls yield identical arrays.
    pub fn triangulation_data(&mut self, filter: RegionFilter) -> TriangulationData<S> {
        enumeration::enumerate(&mut self.core.store, filter)
    }
}

/// Rejects inputs that cannot form a planar straight-line graph.
fn check_input_consistency<S: CdtNum>(
    predicates: &Predicates,
    points: &[Point2<S>],
    segments: &[[usize; 2]],
) -> Result<(), CdtError> {
    if points.len() < 3 {
        return Err(CdtError::InputInconsistent);
    }

    for point in points {
        if !validate_coordinate(point.x.into()) || !validate_coordinate(point.y.into()) {
            return Err(CdtError::InputInconsistent);
        }
    }

    // Not all points may be collinear.
    let p = points[0].to_f64();
    let q = points[1].to_f64();
    if points[2..]
        .iter()
        .all(|s| predicates.collinear(p, q, s.to_f64()))
    {
        return Err(CdtError::InputInconsistent);
    }

    for (i, segment) in segments.iter().enumerate() {
        let [a, b] = *segment;
        if a == b || a >= points.len() || b >= points.len() {
            return Err(CdtError::InputInconsistent);
        }
        // Segments are undirected; the same vertex pair may appear once.
        for other in &segments[..i] {
            if (other[0] == a && other[1] == b) || (other[0] == b && other[1] == a) {
                return Err(CdtError::InputInconsistent);
            }
        }
    }

    // No segment may meet another anywhere except at shared endpoints.
    for i in 1..segments.len() {
        let ia = points[segments[i][0]].to_f64();
        let ib = points[segments[i][1]].to_f64();
        for j in 0..i {
            let ja = points[segments[j][0]].to_f64();
            let jb = points[segments[j][1]].to_f64();

            let res1 = predicates.classify(ia, ib, ja);
            let res2 = predicates.classify(ia, ib, jb);

            // An endpoint inside the other segment's interior.
            if res1 == Classification::Between || res2 == Classification::Between {
                return Err(CdtError::InputInconsistent);
            }

            let straddles = (res1 == Classification::Left && res2 == Classification::Right)
                || (res1 == Classification::Right && res2 == Classification::Left);
            if straddles {
                // Segment j straddles segment i's supporting line; the
                // segments cross iff segment i reaches over segment j's
                // supporting line as well.
                let res3 = predicates.classify(ja, jb, ia);
                match res3 {
                    Classification::Between => return Err(CdtError::InputInconsistent),
                    Classification::Left => {
                        let res4 = predicates.classify(ja, jb, ib);
                        if res4 == Classification::Right || res4 == Classification::Between {
                            return Err(CdtError::InputInconsistent);
                        }
                    }
                    Classification::Right => {
                        let res4 = predicates.classify(ja, jb, ib);
                        if res4 == Classification::Left || res4 == Classification::Between {
                            return Err(CdtError::InputInconsistent);
                        }
                    }
                    _ => {}
                }
            } else if (res1 == Classification::Origin && res2 == Classification::Destination)
                || (res1 == Classification::Destination && res2 == Classification::Origin)
            {
                // Both endpoints coincide: the segments are identical.
                return Err(CdtError::InputInconsistent);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::{CdtError, ConstrainedDelaunayTriangulation};
    use crate::cdt_core::enumeration::{EdgeTag, RegionFilter, TriangulationData};
    use crate::point::Point2;
    use crate::test_utilities::{random_points_with_seed, SEED, SEED2};

    type Cdt = ConstrainedDelaunayTriangulation<f64>;

    fn vertex_index(data: &TriangulationData, p: Point2<f64>) -> usize {
        data.vertices
            .iter()
            .position(|v| v.same_location(p))
            .expect("vertex missing from output")
    }

    fn has_edge_with_tag(data: &TriangulationData, a: Point2<f64>, b: Point2<f64>, tag: EdgeTag) -> bool {
        let ia = vertex_index(data, a);
        let ib = vertex_index(data, b);
        data.edges.iter().zip(&data.edge_tags).any(|(e, t)| {
            *t == tag && ((e[0] == ia && e[1] == ib) || (e[0] == ib && e[1] == ia))
        })
    }

    fn unit_square() -> [Point2<f64>; 4] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    fn triangle_area_sum(data: &TriangulationData) -> f64 {
        data.triangles
            .iter()
            .map(|t| {
                let a = data.vertices[t[0]];
                let b = data.vertices[t[1]];
                let c = data.vertices[t[2]];
                0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y))
            })
            .sum()
    }

    /// Chains the boundary edges into the hull polygon and returns its
    /// signed area. Boundary edges come out oriented with the hull interior
    /// on their left, so the polygon is counterclockwise.
    fn hull_area(data: &TriangulationData) -> f64 {
        let boundary: Vec<[usize; 2]> = data
            .edges
            .iter()
            .zip(&data.edge_tags)
            .filter(|(_, tag)| **tag == EdgeTag::Boundary)
            .map(|(edge, _)| *edge)
            .collect();
        assert!(!boundary.is_empty());

        let mut successor = vec![usize::MAX; data.vertices.len()];
        for [from, to] in &boundary {
            assert_eq!(successor[*from], usize::MAX);
            successor[*from] = *to;
        }

        let start = boundary[0][0];
        let mut sum = 0.0;
        let mut from = start;
        let mut steps = 0;
        loop {
            let to = successor[from];
            assert_ne!(to, usize::MAX);
            let p = data.vertices[from];
            let q = data.vertices[to];
            sum += p.x * q.y - q.x * p.y;
            from = to;
            steps += 1;
            assert!(steps <= boundary.len());
            if from == start {
                break;
            }
        }
        assert_eq!(steps, boundary.len());
        0.5 * sum
    }

    #[test]
    fn test_unit_square() {
        let mut cdt = Cdt::from_points(&unit_square()).unwrap();
        cdt.core.sanity_check();
        let data = cdt.triangulation_data(RegionFilter::AllBounded);
        assert_eq!(data.vertices.len(), 4);
        assert_eq!(data.edges.len(), 5);
        assert_eq!(data.triangles.len(), 2);

        // The square is cocircular, so either diagonal is valid - but the
        // choice must be deterministic.
        let mut again = Cdt::from_points(&unit_square()).unwrap();
        assert_eq!(again.triangulation_data(RegionFilter::AllBounded), data);
    }

    #[test]
    fn test_square_with_forced_diagonal() {
        let points = unit_square();
        let mut cdt = Cdt::new(&points, &[[0, 2]]).unwrap();
        cdt.core.sanity_check();
        let data = cdt.triangulation_data(RegionFilter::AllBounded);
        assert_eq!(data.triangles.len(), 2);
        assert!(has_edge_with_tag(
            &data,
            points[0],
            points[2],
            EdgeTag::Constrained
        ));
        // The other diagonal must be absent.
        let i1 = vertex_index(&data, points[1]);
        let i3 = vertex_index(&data, points[3]);
        assert!(!data
            .edges
            .iter()
            .any(|e| (e[0] == i1 && e[1] == i3) || (e[0] == i3 && e[1] == i1)));
    }

    #[test]
    fn test_collinear_input_is_rejected() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        assert_eq!(
            Cdt::from_points(&points).unwrap_err(),
            CdtError::InputInconsistent
        );
    }

    #[test]
    fn test_interior_point() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 10.0),
            Point2::new(5.0, 3.0),
        ];
        let mut cdt = Cdt::from_points(&points).unwrap();
        cdt.core.sanity_check();
        assert_eq!(cdt.num_vertices(), 4);
        assert_eq!(cdt.num_undirected_edges(), 6);
        let data = cdt.triangulation_data(RegionFilter::AllBounded);
        assert_eq!(data.triangles.len(), 3);
    }

    #[test]
    fn test_crossing_segments_are_rejected() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert_eq!(
            Cdt::new(&points, &[[0, 2], [1, 3]]).unwrap_err(),
            CdtError::InputInconsistent
        );
    }

    #[test]
    fn test_further_inconsistent_inputs() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(1.0, 0.0),
        ];
        // Degenerate segment.
        assert_eq!(
            Cdt::new(&points, &[[1, 1]]).unwrap_err(),
            CdtError::InputInconsistent
        );
        // Out-of-bounds index.
        assert_eq!(
            Cdt::new(&points, &[[0, 7]]).unwrap_err(),
            CdtError::InputInconsistent
        );
        // Duplicated segment, also as a reversed pair.
        assert_eq!(
            Cdt::new(&points, &[[0, 2], [2, 0]]).unwrap_err(),
            CdtError::InputInconsistent
        );
        // Endpoint of one segment inside another.
        assert_eq!(
            Cdt::new(&points, &[[0, 1], [3, 2]]).unwrap_err(),
            CdtError::InputInconsistent
        );
        // Non-finite coordinate.
        let bad = [
            Point2::new(0.0, 0.0),
            Point2::new(f64::NAN, 0.0),
            Point2::new(1.0, 2.0),
        ];
        assert_eq!(
            Cdt::from_points(&bad).unwrap_err(),
            CdtError::InputInconsistent
        );
        // Sharing one endpoint is fine.
        assert!(Cdt::new(&points, &[[0, 2], [2, 1]]).is_ok());
    }

    #[test]
    fn test_cocircular_points() {
        let points = [
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
            Point2::new(0.0, -1.0),
        ];
        let mut cdt = Cdt::from_points(&points).unwrap();
        cdt.core.sanity_check();
        let data = cdt.triangulation_data(RegionFilter::AllBounded);
        assert_eq!(data.triangles.len(), 2);

        let mut again = Cdt::from_points(&points).unwrap();
        assert_eq!(again.triangulation_data(RegionFilter::AllBounded), data);
    }

    #[test]
    fn test_enumeration_is_idempotent() {
        let points = unit_square();
        let mut cdt = Cdt::new(&points, &[[0, 2]]).unwrap();
        let first = cdt.triangulation_data(RegionFilter::AllBounded);
        let second = cdt.triangulation_data(RegionFilter::AllBounded);
        assert_eq!(first, second);
        let filtered_first = cdt.triangulation_data(RegionFilter::NonTrimmedOnly);
        let filtered_second = cdt.triangulation_data(RegionFilter::NonTrimmedOnly);
        assert_eq!(filtered_first, filtered_second);
    }

    #[test]
    fn test_duplicate_points_collapse() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(2.0, 3.0),
            Point2::new(4.0, 0.0),
        ];
        let cdt = Cdt::from_points(&points).unwrap();
        assert_eq!(cdt.num_vertices(), 3);
        assert_eq!(cdt.num_undirected_edges(), 3);
        assert_eq!(cdt.num_faces(), 2);
    }

    #[test]
    fn test_triangle_input() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(2.0, 3.0),
        ];
        let mut cdt = Cdt::from_points(&points).unwrap();
        cdt.core.sanity_check();
        let data = cdt.triangulation_data(RegionFilter::AllBounded);
        assert_eq!(data.triangles.len(), 1);
        assert_eq!(data.edges.len(), 3);
        assert!(data.edge_tags.iter().all(|t| *t == EdgeTag::Boundary));
    }

    #[test]
    fn test_repeated_segment_insertion_is_idempotent() {
        let points = unit_square();
        let mut cdt = Cdt::new(&points, &[[0, 2]]).unwrap();
        let before = cdt.triangulation_data(RegionFilter::AllBounded);
        cdt.core.insert_segment(points[0], points[2]).unwrap();
        cdt.core.insert_segment(points[2], points[0]).unwrap();
        let after = cdt.triangulation_data(RegionFilter::AllBounded);
        assert_eq!(before, after);
    }

    #[test]
    fn test_point_on_constrained_edge_is_rejected() {
        let points = unit_square();
        let mut cdt = Cdt::new(&points, &[[0, 2]]).unwrap();
        let result = cdt.core.insert_point(Point2::new(0.5, 0.5));
        assert_eq!(result, Err(CdtError::PointOnConstrainedEdge));
    }

    #[test]
    fn test_segment_through_existing_vertex_becomes_chain() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 2.0),
        ];
        // The segment passes exactly through the vertex at (1, 0) and is
        // inserted as two constrained sub-segments.
        let mut cdt = Cdt::new(&points, &[[0, 2]]).unwrap();
        cdt.core.sanity_check();
        let data = cdt.triangulation_data(RegionFilter::AllBounded);
        assert!(has_edge_with_tag(&data, points[0], points[1], EdgeTag::Constrained));
        assert!(has_edge_with_tag(&data, points[1], points[2], EdgeTag::Constrained));
    }

    #[test]
    fn test_region_filtering() {
        // A constrained square with an extra apex to its right: the two
        // triangles inside the square are kept, the one between the square
        // and the apex is trimmed away.
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
            Point2::new(4.0, 1.0),
        ];
        let segments = [[0, 1], [1, 2], [2, 3], [3, 0]];
        let mut cdt = Cdt::new(&points, &segments).unwrap();
        cdt.core.sanity_check();

        let all = cdt.triangulation_data(RegionFilter::AllBounded);
        assert_eq!(all.triangles.len(), 3);

        let kept = cdt.triangulation_data(RegionFilter::NonTrimmedOnly);
        assert_eq!(kept.triangles.len(), 2);
        assert_eq!(kept.vertices.len(), 4);
        assert_eq!(kept.edges.len(), 5);
        // The apex is gone from the filtered output.
        assert!(!kept.vertices.iter().any(|v| v.same_location(points[4])));
    }

    #[test]
    fn test_constrained_hull_sides_are_tagged_constrained() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        let segments = [[0, 1], [1, 2], [2, 3], [3, 0]];
        let mut cdt = Cdt::new(&points, &segments).unwrap();
        let data = cdt.triangulation_data(RegionFilter::NonTrimmedOnly);
        assert_eq!(data.triangles.len(), 2);
        let constrained = data
            .edge_tags
            .iter()
            .filter(|t| **t == EdgeTag::Constrained)
            .count();
        assert_eq!(constrained, 4);
    }

    #[test]
    fn test_random_points() {
        let points = random_points_with_seed(60, SEED);
        let mut cdt = Cdt::from_points(&points).unwrap();
        cdt.core.sanity_check();
        assert_eq!(cdt.num_vertices(), 60);

        // Euler's formula, counting the unbounded face.
        let v = cdt.num_vertices();
        let e = cdt.num_undirected_edges();
        let f = cdt.num_faces();
        assert_eq!(v + f, e + 2);

        // The triangles tile the convex hull without gaps or overlaps.
        let data = cdt.triangulation_data(RegionFilter::AllBounded);
        let triangles = triangle_area_sum(&data);
        let hull = hull_area(&data);
        assert!((triangles - hull).abs() <= 1.0e-9 * hull.abs());
    }

    #[test]
    fn test_random_points_with_segments() {
        let mut points = random_points_with_seed(40, SEED2);
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        points.dedup_by(|a, b| a.same_location(*b));
        // Chain every other pair of x-sorted points; such segments cannot
        // cross each other.
        let segments: Vec<[usize; 2]> = (0..points.len() / 2)
            .map(|i| [2 * i, 2 * i + 1])
            .collect();

        let mut cdt = Cdt::new(&points, &segments).unwrap();
        cdt.core.sanity_check();

        let data = cdt.triangulation_data(RegionFilter::AllBounded);
        for segment in &segments {
            assert!(has_edge_with_tag(
                &data,
                points[segment[0]],
                points[segment[1]],
                EdgeTag::Constrained
            ));
        }

        // Deterministic across identical runs.
        let mut again = Cdt::new(&points, &segments).unwrap();
        assert_eq!(again.triangulation_data(RegionFilter::AllBounded), data);
    }

    #[test]
    fn test_f32_input() {
        let points = [
            Point2::new(0.0f32, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let mut cdt = ConstrainedDelaunayTriangulation::new(&points, &[[0, 2]]).unwrap();
        cdt.core.sanity_check();
        let data = cdt.triangulation_data(RegionFilter::AllBounded);
        assert_eq!(data.vertices.len(), 4);
        assert_eq!(data.triangles.len(), 2);
    }
}
