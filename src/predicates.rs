#![allow(non_snake_case)]

//! Adaptive-precision geometric predicates, following the algorithms and the
//! reference implementation by Jonathan Richard Shewchuk
//! (<https://www.cs.cmu.edu/~quake/robust.html>).
//!
//! The module offers sign-exact orientation queries (on which side of a line
//! does a point lie?) and in-circle queries (is a point contained in the
//! circumcircle of a triangle?). Each query first computes a floating point
//! estimate together with an error bound; only if the estimate is smaller
//! than its bound is the result refined with expansion arithmetic, so the
//! expensive path is taken for near-degenerate inputs only.
//!
//! All expansion intermediates live in fixed-size stack arrays. The largest,
//! `fin1`/`fin2` with 1152 components, is sized for the worst case of the
//! in-circle expansion and must not be shrunk.

use crate::point::Point2;

/// The smallest allowed non-zero absolute coordinate value, equal to
/// 2<sup>-142</sup>.
///
/// Smaller values could make the exact predicates underflow; they are
/// rejected before construction starts.
pub const MIN_ALLOWED_VALUE: f64 = 1.793662034335766e-43; // 1.0 * 2^-142

/// The largest allowed absolute coordinate value, equal to 2<sup>199</sup>.
///
/// The predicate expansions stay free of overflow for exponents up to 201;
/// two exponent steps are reserved because the corner of the enclosing
/// triangle sits at three times the largest input coordinate.
pub const MAX_ALLOWED_VALUE: f64 = 8.034690221294951e59; // 1.0 * 2^199

/// Checks whether a single coordinate value may enter a triangulation.
///
/// Returns `false` for NaN, infinities and for finite values whose absolute
/// value lies outside `[MIN_ALLOWED_VALUE, MAX_ALLOWED_VALUE] ∪ {0}`.
pub fn validate_coordinate(value: f64) -> bool {
    if value.is_nan() || value.is_infinite() {
        return false;
    }
    let abs = value.abs();
    (abs == 0.0 || abs >= MIN_ALLOWED_VALUE) && abs <= MAX_ALLOWED_VALUE
}

/// The position of a query point relative to an oriented line segment.
///
/// The `Left`/`Right` cases are decided by the exact orientation test; the
/// five collinear cases are told apart by coordinate comparisons along the
/// dominant axis of the segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Classification {
    /// The point coincides with the segment's origin.
    Origin,
    /// The point coincides with the segment's destination.
    Destination,
    /// The point lies strictly left of the supporting line.
    Left,
    /// The point lies strictly right of the supporting line.
    Right,
    /// The point lies on the supporting line, past the destination.
    Beyond,
    /// The point lies on the supporting line, before the origin.
    Behind,
    /// The point lies on the open segment.
    Between,
}

/// Exact-sign orientation and in-circle tests.
///
/// The machine epsilon, the splitter and the error bounds of the adaptive
/// stages are derived at construction time by halving until roundoff, the
/// same way `exactinit` does it. On any IEEE-754 double unit the derived
/// values are identical, but deriving them keeps the predicates honest about
/// the arithmetic they actually run on.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Predicates {
    splitter: f64,
    epsilon: f64,
    resulterrbound: f64,
    ccwerrbound_a: f64,
    ccwerrbound_b: f64,
    ccwerrbound_c: f64,
    iccerrbound_a: f64,
    iccerrbound_b: f64,
    iccerrbound_c: f64,
}

impl Predicates {
    pub fn new() -> Self {
        let half = 0.5f64;
        let mut every_other = true;
        let mut epsilon = 1.0f64;
        let mut splitter = 1.0f64;

        // Halve epsilon until adding it to one no longer changes the sum;
        // epsilon ends up as 2^(-p) for precision p. The splitter doubles on
        // every other iteration and becomes 2^ceil(p / 2) + 1.
        loop {
            epsilon *= half;
            if every_other {
                splitter *= 2.0;
            }
            every_other = !every_other;
            if 1.0 + epsilon == 1.0 {
                break;
            }
        }
        splitter += 1.0;

        let mut predicates = Predicates {
            splitter,
            epsilon,
            resulterrbound: 0.0,
            ccwerrbound_a: 0.0,
            ccwerrbound_b: 0.0,
            ccwerrbound_c: 0.0,
            iccerrbound_a: 0.0,
            iccerrbound_b: 0.0,
            iccerrbound_c: 0.0,
        };
        let epsilon = predicates.epsilon;
        predicates.resulterrbound = (3.0 + 8.0 * epsilon) * epsilon;
        predicates.ccwerrbound_a = (3.0 + 16.0 * epsilon) * epsilon;
        predicates.ccwerrbound_b = (2.0 + 12.0 * epsilon) * epsilon;
        predicates.ccwerrbound_c = (9.0 + 64.0 * epsilon) * epsilon * epsilon;
        predicates.iccerrbound_a = (10.0 + 96.0 * epsilon) * epsilon;
        predicates.iccerrbound_b = (4.0 + 48.0 * epsilon) * epsilon;
        predicates.iccerrbound_c = (44.0 + 576.0 * epsilon) * epsilon * epsilon;
        predicates
    }

    #[cfg(test)]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[cfg(test)]
    pub fn splitter(&self) -> f64 {
        self.splitter
    }

    /// Returns a value with the sign of the signed area of the triangle
    /// `pa`, `pb`, `pc`: positive if the three points are in counterclockwise
    /// order, negative if clockwise, and exactly zero if they are collinear.
    pub fn orient2d(&self, pa: Point2<f64>, pb: Point2<f64>, pc: Point2<f64>) -> f64 {
        let detleft = (pa.x - pc.x) * (pb.y - pc.y);
        let detright = (pa.y - pc.y) * (pb.x - pc.x);
        let det = detleft - detright;

        let detsum = if detleft > 0.0 {
            if detright <= 0.0 {
                return det;
            } else {
                detleft + detright
            }
        } else if detleft < 0.0 {
            if detright >= 0.0 {
                return det;
            } else {
                -detleft - detright
            }
        } else {
            return det;
        };
        let errbound = self.ccwerrbound_a * detsum;
        if det >= errbound || -det >= errbound {
            det
        } else {
            self.orient2d_adapt(pa, pb, pc, detsum)
        }
    }

    fn orient2d_adapt(&self, pa: Point2<f64>, pb: Point2<f64>, pc: Point2<f64>, detsum: f64) -> f64 {
        let acx = pa.x - pc.x;
        let bcx = pb.x - pc.x;
        let acy = pa.y - pc.y;
        let bcy = pb.y - pc.y;

        let (detleft, detlefttail) = two_product(self.splitter, acx, bcy);
        let (detright, detrighttail) = two_product(self.splitter, acy, bcx);

        let (B3, B2, B1, B0) = two_two_diff(detleft, detlefttail, detright, detrighttail);
        let B = [B0, B1, B2, B3];

        let mut det = estimate(&B);
        let errbound = self.ccwerrbound_b * detsum;
        if det >= errbound || -det >= errbound {
            return det;
        }

        let acxtail = two_diff_tail(pa.x, pc.x, acx);
        let bcxtail = two_diff_tail(pb.x, pc.x, bcx);
        let acytail = two_diff_tail(pa.y, pc.y, acy);
        let bcytail = two_diff_tail(pb.y, pc.y, bcy);

        if acxtail == 0.0 && acytail == 0.0 && bcxtail == 0.0 && bcytail == 0.0 {
            return det;
        }

        let errbound = self.ccwerrbound_c * detsum + self.resulterrbound * det.abs();
        det += (acx * bcytail + bcy * acxtail) - (acy * bcxtail + bcx * acytail);

        if det >= errbound || -det >= errbound {
            return det;
        }

        let (s1, s0) = two_product(self.splitter, acxtail, bcy);
        let (t1, t0) = two_product(self.splitter, acytail, bcx);
        let (u3, u2, u1, u0) = two_two_diff(s1, s0, t1, t0);
        let U = [u0, u1, u2, u3];

        let mut C1 = [0.0f64; 8];
        let c1length = fast_expansion_sum_zeroelim(&B, &U, &mut C1);

        let (s1, s0) = two_product(self.splitter, acx, bcytail);
        let (t1, t0) = two_product(self.splitter, acy, bcxtail);
        let (u3, u2, u1, u0) = two_two_diff(s1, s0, t1, t0);
        let U = [u0, u1, u2, u3];

        let mut C2 = [0.0f64; 12];
        let c2length = fast_expansion_sum_zeroelim(&C1[..c1length], &U, &mut C2);

        let (s1, s0) = two_product(self.splitter, acxtail, bcytail);
        let (t1, t0) = two_product(self.splitter, acytail, bcxtail);
        let (u3, u2, u1, u0) = two_two_diff(s1, s0, t1, t0);
        let U = [u0, u1, u2, u3];
        let mut D = [0.0f64; 16];
        let dlength = fast_expansion_sum_zeroelim(&C2[..c2length], &U, &mut D);
        D[dlength - 1]
    }

    /// Assuming `pa`, `pb`, `pc` are in counterclockwise order, returns a
    /// value with the sign of the in-circle determinant: positive if `pd`
    /// lies strictly inside the circumcircle through the three points,
    /// negative if strictly outside, and exactly zero if cocircular.
    pub fn incircle(
        &self,
        pa: Point2<f64>,
        pb: Point2<f64>,
        pc: Point2<f64>,
        pd: Point2<f64>,
    ) -> f64 {
        let adx = pa.x - pd.x;
        let bdx = pb.x - pd.x;
        let cdx = pc.x - pd.x;
        let ady = pa.y - pd.y;
        let bdy = pb.y - pd.y;
        let cdy = pc.y - pd.y;

        let bdxcdy = bdx * cdy;
        let cdxbdy = cdx * bdy;
        let alift = adx * adx + ady * ady;

        let cdxady = cdx * ady;
        let adxcdy = adx * cdy;
        let blift = bdx * bdx + bdy * bdy;

        let adxbdy = adx * bdy;
        let bdxady = bdx * ady;
        let clift = cdx * cdx + cdy * cdy;

        let det = alift * (bdxcdy - cdxbdy)
            + blift * (cdxady - adxcdy)
            + clift * (adxbdy - bdxady);

        let permanent = (bdxcdy.abs() + cdxbdy.abs()) * alift
            + (cdxady.abs() + adxcdy.abs()) * blift
            + (adxbdy.abs() + bdxady.abs()) * clift;
        let errbound = self.iccerrbound_a * permanent;
        if det > errbound || -det > errbound {
            return det;
        }
        self.incircle_adapt(pa, pb, pc, pd, permanent)
    }

    fn incircle_adapt(
        &self,
        pa: Point2<f64>,
        pb: Point2<f64>,
        pc: Point2<f64>,
        pd: Point2<f64>,
        permanent: f64,
    ) -> f64 {
        let splitter = self.splitter;

        let mut temp8 = [0f64; 8];
        let mut temp16a = [0f64; 16];
        let mut temp16b = [0f64; 16];
        let mut temp16c = [0f64; 16];
        let mut temp32a = [0f64; 32];
        let mut temp32b = [0f64; 32];
        let mut temp48 = [0f64; 48];
        let mut temp64 = [0f64; 64];

        let adx = pa.x - pd.x;
        let bdx = pb.x - pd.x;
        let cdx = pc.x - pd.x;
        let ady = pa.y - pd.y;
        let bdy = pb.y - pd.y;
        let cdy = pc.y - pd.y;

        let (bdxcdy1, bdxcdy0) = two_product(splitter, bdx, cdy);
        let (cdxbdy1, cdxbdy0) = two_product(splitter, cdx, bdy);
        let (bc3, bc2, bc1, bc0) = two_two_diff(bdxcdy1, bdxcdy0, cdxbdy1, cdxbdy0);
        let bc = [bc0, bc1, bc2, bc3];

        let mut axbc = [0f64; 8];
        let axbclen = scale_expansion_zeroelim(splitter, &bc, adx, &mut axbc);
        let mut axxbc = [0f64; 16];
        let axxbclen = scale_expansion_zeroelim(splitter, &axbc[..axbclen], adx, &mut axxbc);
        let mut aybc = [0f64; 8];
        let aybclen = scale_expansion_zeroelim(splitter, &bc, ady, &mut aybc);
        let mut ayybc = [0f64; 16];
        let ayybclen = scale_expansion_zeroelim(splitter, &aybc[..aybclen], ady, &mut ayybc);
        let mut adet = [0f64; 32];
        let alen = fast_expansion_sum_zeroelim(&axxbc[..axxbclen], &ayybc[..ayybclen], &mut adet);

        let (cdxady1, cdxady0) = two_product(splitter, cdx, ady);
        let (adxcdy1, adxcdy0) = two_product(splitter, adx, cdy);
        let (ca3, ca2, ca1, ca0) = two_two_diff(cdxady1, cdxady0, adxcdy1, adxcdy0);
        let ca = [ca0, ca1, ca2, ca3];

        let mut bxca = [0f64; 8];
        let bxcalen = scale_expansion_zeroelim(splitter, &ca, bdx, &mut bxca);
        let mut bxxca = [0f64; 16];
        let bxxcalen = scale_expansion_zeroelim(splitter, &bxca[..bxcalen], bdx, &mut bxxca);
        let mut byca = [0f64; 8];
        let bycalen = scale_expansion_zeroelim(splitter, &ca, bdy, &mut byca);
        let mut byyca = [0f64; 16];
        let byycalen = scale_expansion_zeroelim(splitter, &byca[..bycalen], bdy, &mut byyca);
        let mut bdet = [0f64; 32];
        let blen = fast_expansion_sum_zeroelim(&bxxca[..bxxcalen], &byyca[..byycalen], &mut bdet);

        let (adxbdy1, adxbdy0) = two_product(splitter, adx, bdy);
        let (bdxady1, bdxady0) = two_product(splitter, bdx, ady);
        let (ab3, ab2, ab1, ab0) = two_two_diff(adxbdy1, adxbdy0, bdxady1, bdxady0);
        let ab = [ab0, ab1, ab2, ab3];

        let mut cxab = [0f64; 8];
        let cxablen = scale_expansion_zeroelim(splitter, &ab, cdx, &mut cxab);
        let mut cxxab = [0f64; 16];
        let cxxablen = scale_expansion_zeroelim(splitter, &cxab[..cxablen], cdx, &mut cxxab);
        let mut cyab = [0f64; 8];
        let cyablen = scale_expansion_zeroelim(splitter, &ab, cdy, &mut cyab);
        let mut cyyab = [0f64; 16];
        let cyyablen = scale_expansion_zeroelim(splitter, &cyab[..cyablen], cdy, &mut cyyab);
        let mut cdet = [0f64; 32];
        let clen = fast_expansion_sum_zeroelim(&cxxab[..cxxablen], &cyyab[..cyyablen], &mut cdet);

        let mut abdet = [0f64; 64];
        let ablen = fast_expansion_sum_zeroelim(&adet[..alen], &bdet[..blen], &mut abdet);
        let mut fin1 = [0f64; 1152];
        let mut finlength = fast_expansion_sum_zeroelim(&abdet[..ablen], &cdet[..clen], &mut fin1);

        let mut det = estimate(&fin1[..finlength]);
        let errbound = self.iccerrbound_b * permanent;
        if det >= errbound || -det >= errbound {
            return det;
        }

        let adxtail = two_diff_tail(pa.x, pd.x, adx);
        let adytail = two_diff_tail(pa.y, pd.y, ady);
        let bdxtail = two_diff_tail(pb.x, pd.x, bdx);
        let bdytail = two_diff_tail(pb.y, pd.y, bdy);
        let cdxtail = two_diff_tail(pc.x, pd.x, cdx);
        let cdytail = two_diff_tail(pc.y, pd.y, cdy);
        if adxtail == 0.0
            && bdxtail == 0.0
            && cdxtail == 0.0
            && adytail == 0.0
            && bdytail == 0.0
            && cdytail == 0.0
        {
            return det;
        }

        let errbound = self.iccerrbound_c * permanent + self.resulterrbound * det.abs();
        det += ((adx * adx + ady * ady)
            * ((bdx * cdytail + cdy * bdxtail) - (bdy * cdxtail + cdx * bdytail))
            + 2.0 * (adx * adxtail + ady * adytail) * (bdx * cdy - bdy * cdx))
            + ((bdx * bdx + bdy * bdy)
                * ((cdx * adytail + ady * cdxtail) - (cdy * adxtail + adx * cdytail))
                + 2.0 * (bdx * bdxtail + bdy * bdytail) * (cdx * ady - cdy * adx))
            + ((cdx * cdx + cdy * cdy)
                * ((adx * bdytail + bdy * adxtail) - (ady * bdxtail + bdx * adytail))
                + 2.0 * (cdx * cdxtail + cdy * cdytail) * (adx * bdy - ady * bdx));

        if det >= errbound || -det >= errbound {
            return det;
        }

        let mut fin2 = [0f64; 1152];

        let mut aa = [0f64; 4];
        if bdxtail != 0.0 || bdytail != 0.0 || cdxtail != 0.0 || cdytail != 0.0 {
            let (adxadx1, adxadx0) = square(splitter, adx);
            let (adyady1, adyady0) = square(splitter, ady);
            let (aa3, aa2, aa1, aa0) = two_two_sum(adxadx1, adxadx0, adyady1, adyady0);
            aa = [aa0, aa1, aa2, aa3];
        }

        let mut bb = [0f64; 4];
        if cdxtail != 0.0 || cdytail != 0.0 || adxtail != 0.0 || adytail != 0.0 {
            let (bdxbdx1, bdxbdx0) = square(splitter, bdx);
            let (bdybdy1, bdybdy0) = square(splitter, bdy);
            let (bb3, bb2, bb1, bb0) = two_two_sum(bdxbdx1, bdxbdx0, bdybdy1, bdybdy0);
            bb = [bb0, bb1, bb2, bb3];
        }

        let mut cc = [0f64; 4];
        if adxtail != 0.0 || adytail != 0.0 || bdxtail != 0.0 || bdytail != 0.0 {
            let (cdxcdx1, cdxcdx0) = square(splitter, cdx);
            let (cdycdy1, cdycdy0) = square(splitter, cdy);
            let (cc3, cc2, cc1, cc0) = two_two_sum(cdxcdx1, cdxcdx0, cdycdy1, cdycdy0);
            cc = [cc0, cc1, cc2, cc3];
        }

        let mut axtbclen = 9;
        let mut axtbc = [0f64; 8];
        if adxtail != 0.0 {
            axtbclen = scale_expansion_zeroelim(splitter, &bc, adxtail, &mut axtbc);
            let temp16alen =
                scale_expansion_zeroelim(splitter, &axtbc[..axtbclen], 2.0 * adx, &mut temp16a);

            let mut axtcc = [0f64; 8];
            let axtcclen = scale_expansion_zeroelim(splitter, &cc, adxtail, &mut axtcc);
            let temp16blen =
                scale_expansion_zeroelim(splitter, &axtcc[..axtcclen], bdy, &mut temp16b);

            let mut axtbb = [0f64; 8];
            let axtbblen = scale_expansion_zeroelim(splitter, &bb, adxtail, &mut axtbb);
            let temp16clen =
                scale_expansion_zeroelim(splitter, &axtbb[..axtbblen], -cdy, &mut temp16c);

            let temp32alen = fast_expansion_sum_zeroelim(
                &temp16a[..temp16alen],
                &temp16b[..temp16blen],
                &mut temp32a,
            );
            let temp48len = fast_expansion_sum_zeroelim(
                &temp16c[..temp16clen],
                &temp32a[..temp32alen],
                &mut temp48,
            );
            finlength =
                fast_expansion_sum_zeroelim(&fin1[..finlength], &temp48[..temp48len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);
        }

        let mut aytbclen = 9;
        let mut aytbc = [0f64; 8];
        if adytail != 0.0 {
            aytbclen = scale_expansion_zeroelim(splitter, &bc, adytail, &mut aytbc);
            let temp16alen =
                scale_expansion_zeroelim(splitter, &aytbc[..aytbclen], 2.0 * ady, &mut temp16a);

            let mut aytcc = [0f64; 8];
            let aytcclen = scale_expansion_zeroelim(splitter, &cc, adytail, &mut aytcc);
            let temp16blen =
                scale_expansion_zeroelim(splitter, &aytcc[..aytcclen], cdx, &mut temp16b);

            let mut aytbb = [0f64; 8];
            let aytbblen = scale_expansion_zeroelim(splitter, &bb, adytail, &mut aytbb);
            let temp16clen =
                scale_expansion_zeroelim(splitter, &aytbb[..aytbblen], -bdx, &mut temp16c);

            let temp32alen = fast_expansion_sum_zeroelim(
                &temp16a[..temp16alen],
                &temp16b[..temp16blen],
                &mut temp32a,
            );
            let temp48len = fast_expansion_sum_zeroelim(
                &temp16c[..temp16clen],
                &temp32a[..temp32alen],
                &mut temp48,
            );
            finlength =
                fast_expansion_sum_zeroelim(&fin1[..finlength], &temp48[..temp48len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);
        }

        let mut bxtcalen = 9;
        let mut bxtca = [0f64; 8];
        if bdxtail != 0.0 {
            bxtcalen = scale_expansion_zeroelim(splitter, &ca, bdxtail, &mut bxtca);
            let temp16alen =
                scale_expansion_zeroelim(splitter, &bxtca[..bxtcalen], 2.0 * bdx, &mut temp16a);

            let mut bxtaa = [0f64; 8];
            let bxtaalen = scale_expansion_zeroelim(splitter, &aa, bdxtail, &mut bxtaa);
            let temp16blen =
                scale_expansion_zeroelim(splitter, &bxtaa[..bxtaalen], cdy, &mut temp16b);

            let mut bxtcc = [0f64; 8];
            let bxtcclen = scale_expansion_zeroelim(splitter, &cc, bdxtail, &mut bxtcc);
            let temp16clen =
                scale_expansion_zeroelim(splitter, &bxtcc[..bxtcclen], -ady, &mut temp16c);

            let temp32alen = fast_expansion_sum_zeroelim(
                &temp16a[..temp16alen],
                &temp16b[..temp16blen],
                &mut temp32a,
            );
            let temp48len = fast_expansion_sum_zeroelim(
                &temp16c[..temp16clen],
                &temp32a[..temp32alen],
                &mut temp48,
            );
            finlength =
                fast_expansion_sum_zeroelim(&fin1[..finlength], &temp48[..temp48len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);
        }

        let mut bytcalen = 9;
        let mut bytca = [0f64; 8];
        if bdytail != 0.0 {
            bytcalen = scale_expansion_zeroelim(splitter, &ca, bdytail, &mut bytca);
            let temp16alen =
                scale_expansion_zeroelim(splitter, &bytca[..bytcalen], 2.0 * bdy, &mut temp16a);

            let mut bytcc = [0f64; 8];
            let bytcclen = scale_expansion_zeroelim(splitter, &cc, bdytail, &mut bytcc);
            let temp16blen =
                scale_expansion_zeroelim(splitter, &bytcc[..bytcclen], adx, &mut temp16b);

            let mut bytaa = [0f64; 8];
            let bytaalen = scale_expansion_zeroelim(splitter, &aa, bdytail, &mut bytaa);
            let temp16clen =
                scale_expansion_zeroelim(splitter, &bytaa[..bytaalen], -cdx, &mut temp16c);

            let temp32alen = fast_expansion_sum_zeroelim(
                &temp16a[..temp16alen],
                &temp16b[..temp16blen],
                &mut temp32a,
            );
            let temp48len = fast_expansion_sum_zeroelim(
                &temp16c[..temp16clen],
                &temp32a[..temp32alen],
                &mut temp48,
            );
            finlength =
                fast_expansion_sum_zeroelim(&fin1[..finlength], &temp48[..temp48len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);
        }

        let mut cxtab = [0f64; 8];
        let mut cxtablen = 9;
        if cdxtail != 0.0 {
            cxtablen = scale_expansion_zeroelim(splitter, &ab, cdxtail, &mut cxtab);
            let temp16alen =
                scale_expansion_zeroelim(splitter, &cxtab[..cxtablen], 2.0 * cdx, &mut temp16a);

            let mut cxtbb = [0f64; 8];
            let cxtbblen = scale_expansion_zeroelim(splitter, &bb, cdxtail, &mut cxtbb);
            let temp16blen =
                scale_expansion_zeroelim(splitter, &cxtbb[..cxtbblen], ady, &mut temp16b);

            let mut cxtaa = [0f64; 8];
            let cxtaalen = scale_expansion_zeroelim(splitter, &aa, cdxtail, &mut cxtaa);
            let temp16clen =
                scale_expansion_zeroelim(splitter, &cxtaa[..cxtaalen], -bdy, &mut temp16c);

            let temp32alen = fast_expansion_sum_zeroelim(
                &temp16a[..temp16alen],
                &temp16b[..temp16blen],
                &mut temp32a,
            );
            let temp48len = fast_expansion_sum_zeroelim(
                &temp16c[..temp16clen],
                &temp32a[..temp32alen],
                &mut temp48,
            );
            finlength =
                fast_expansion_sum_zeroelim(&fin1[..finlength], &temp48[..temp48len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);
        }

        let mut cytab = [0f64; 8];
        let mut cytablen = 9;
        if cdytail != 0.0 {
            cytablen = scale_expansion_zeroelim(splitter, &ab, cdytail, &mut cytab);
            let temp16alen =
                scale_expansion_zeroelim(splitter, &cytab[..cytablen], 2.0 * cdy, &mut temp16a);

            let mut cytaa = [0f64; 8];
            let cytaalen = scale_expansion_zeroelim(splitter, &aa, cdytail, &mut cytaa);
            let temp16blen =
                scale_expansion_zeroelim(splitter, &cytaa[..cytaalen], bdx, &mut temp16b);

            let mut cytbb = [0f64; 8];
            let cytbblen = scale_expansion_zeroelim(splitter, &bb, cdytail, &mut cytbb);
            let temp16clen =
                scale_expansion_zeroelim(splitter, &cytbb[..cytbblen], -adx, &mut temp16c);

            let temp32alen = fast_expansion_sum_zeroelim(
                &temp16a[..temp16alen],
                &temp16b[..temp16blen],
                &mut temp32a,
            );
            let temp48len = fast_expansion_sum_zeroelim(
                &temp16c[..temp16clen],
                &temp32a[..temp32alen],
                &mut temp48,
            );
            finlength =
                fast_expansion_sum_zeroelim(&fin1[..finlength], &temp48[..temp48len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);
        }

        if adxtail != 0.0 || adytail != 0.0 {
            let mut bctt = [0f64; 4];
            let mut bct = [0f64; 8];
            let bcttlen;
            let bctlen;
            if bdxtail != 0.0 || bdytail != 0.0 || cdxtail != 0.0 || cdytail != 0.0 {
                let (ti1, ti0) = two_product(splitter, bdxtail, cdy);
                let (tj1, tj0) = two_product(splitter, bdx, cdytail);
                let (u3, u2, u1, u0) = two_two_sum(ti1, ti0, tj1, tj0);
                let u = [u0, u1, u2, u3];
                let negate = -bdy;
                let (ti1, ti0) = two_product(splitter, cdxtail, negate);
                let negate = -bdytail;
                let (tj1, tj0) = two_product(splitter, cdx, negate);
                let (v3, v2, v1, v0) = two_two_sum(ti1, ti0, tj1, tj0);
                let v = [v0, v1, v2, v3];
                bctlen = fast_expansion_sum_zeroelim(&u, &v, &mut bct);
                let (ti1, ti0) = two_product(splitter, bdxtail, cdytail);
                let (tj1, tj0) = two_product(splitter, cdxtail, bdytail);
                let (bctt3, bctt2, bctt1, bctt0) = two_two_diff(ti1, ti0, tj1, tj0);
                bctt = [bctt0, bctt1, bctt2, bctt3];
                bcttlen = 4;
            } else {
                bct[0] = 0.0;
                bctlen = 1;
                bctt[0] = 0.0;
                bcttlen = 1;
            }

            if adxtail != 0.0 {
                let temp16alen =
                    scale_expansion_zeroelim(splitter, &axtbc[..axtbclen], adxtail, &mut temp16a);
                let mut axtbct = [0f64; 16];
                let axtbctlen =
                    scale_expansion_zeroelim(splitter, &bct[..bctlen], adxtail, &mut axtbct);
                let temp32alen = scale_expansion_zeroelim(
                    splitter,
                    &axtbct[..axtbctlen],
                    2.0 * adx,
                    &mut temp32a,
                );
                let temp48len = fast_expansion_sum_zeroelim(
                    &temp16a[..temp16alen],
                    &temp32a[..temp32alen],
                    &mut temp48,
                );
                finlength = fast_expansion_sum_zeroelim(
                    &fin1[..finlength],
                    &temp48[..temp48len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);

                if bdytail != 0.0 {
                    let temp8len = scale_expansion_zeroelim(splitter, &cc, adxtail, &mut temp8);
                    let temp16alen = scale_expansion_zeroelim(
                        splitter,
                        &temp8[..temp8len],
                        bdytail,
                        &mut temp16a,
                    );
                    finlength = fast_expansion_sum_zeroelim(
                        &fin1[..finlength],
                        &temp16a[..temp16alen],
                        &mut fin2,
                    );
                    core::mem::swap(&mut fin1, &mut fin2);
                }
                if cdytail != 0.0 {
                    let temp8len = scale_expansion_zeroelim(splitter, &bb, -adxtail, &mut temp8);
                    let temp16alen = scale_expansion_zeroelim(
                        splitter,
                        &temp8[..temp8len],
                        cdytail,
                        &mut temp16a,
                    );
                    finlength = fast_expansion_sum_zeroelim(
                        &fin1[..finlength],
                        &temp16a[..temp16alen],
                        &mut fin2,
                    );
                    core::mem::swap(&mut fin1, &mut fin2);
                }

                let temp32alen =
                    scale_expansion_zeroelim(splitter, &axtbct[..axtbctlen], adxtail, &mut temp32a);
                let mut axtbctt = [0f64; 8];
                let axtbcttlen =
                    scale_expansion_zeroelim(splitter, &bctt[..bcttlen], adxtail, &mut axtbctt);
                let temp16alen = scale_expansion_zeroelim(
                    splitter,
                    &axtbctt[..axtbcttlen],
                    2.0 * adx,
                    &mut temp16a,
                );
                let temp16blen = scale_expansion_zeroelim(
                    splitter,
                    &axtbctt[..axtbcttlen],
                    adxtail,
                    &mut temp16b,
                );
                let temp32blen = fast_expansion_sum_zeroelim(
                    &temp16a[..temp16alen],
                    &temp16b[..temp16blen],
                    &mut temp32b,
                );
                let temp64len = fast_expansion_sum_zeroelim(
                    &temp32a[..temp32alen],
                    &temp32b[..temp32blen],
                    &mut temp64,
                );
                finlength = fast_expansion_sum_zeroelim(
                    &fin1[..finlength],
                    &temp64[..temp64len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);
            }

            if adytail != 0.0 {
                let temp16alen =
                    scale_expansion_zeroelim(splitter, &aytbc[..aytbclen], adytail, &mut temp16a);
                let mut aytbct = [0f64; 16];
                let aytbctlen =
                    scale_expansion_zeroelim(splitter, &bct[..bctlen], adytail, &mut aytbct);
                let temp32alen = scale_expansion_zeroelim(
                    splitter,
                    &aytbct[..aytbctlen],
                    2.0 * ady,
                    &mut temp32a,
                );
                let temp48len = fast_expansion_sum_zeroelim(
                    &temp16a[..temp16alen],
                    &temp32a[..temp32alen],
                    &mut temp48,
                );
                finlength = fast_expansion_sum_zeroelim(
                    &fin1[..finlength],
                    &temp48[..temp48len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);

                let temp32alen =
                    scale_expansion_zeroelim(splitter, &aytbct[..aytbctlen], adytail, &mut temp32a);
                let mut aytbctt = [0f64; 8];
                let aytbcttlen =
                    scale_expansion_zeroelim(splitter, &bctt[..bcttlen], adytail, &mut aytbctt);
                let temp16alen = scale_expansion_zeroelim(
                    splitter,
                    &aytbctt[..aytbcttlen],
                    2.0 * ady,
                    &mut temp16a,
                );
                let temp16blen = scale_expansion_zeroelim(
                    splitter,
                    &aytbctt[..aytbcttlen],
                    adytail,
                    &mut temp16b,
                );
                let temp32blen = fast_expansion_sum_zeroelim(
                    &temp16a[..temp16alen],
                    &temp16b[..temp16blen],
                    &mut temp32b,
                );
                let temp64len = fast_expansion_sum_zeroelim(
                    &temp32a[..temp32alen],
                    &temp32b[..temp32blen],
                    &mut temp64,
                );
                finlength = fast_expansion_sum_zeroelim(
                    &fin1[..finlength],
                    &temp64[..temp64len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);
            }
        }

        if bdxtail != 0.0 || bdytail != 0.0 {
            let mut catt = [0f64; 4];
            let mut cat = [0f64; 8];
            let cattlen;
            let catlen;

            if cdxtail != 0.0 || cdytail != 0.0 || adxtail != 0.0 || adytail != 0.0 {
                let (ti1, ti0) = two_product(splitter, cdxtail, ady);
                let (tj1, tj0) = two_product(splitter, cdx, adytail);
                let (u3, u2, u1, u0) = two_two_sum(ti1, ti0, tj1, tj0);
                let u = [u0, u1, u2, u3];
                let negate = -cdy;
                let (ti1, ti0) = two_product(splitter, adxtail, negate);
                let negate = -cdytail;
                let (tj1, tj0) = two_product(splitter, adx, negate);
                let (v3, v2, v1, v0) = two_two_sum(ti1, ti0, tj1, tj0);
                let v = [v0, v1, v2, v3];
                catlen = fast_expansion_sum_zeroelim(&u, &v, &mut cat);

                let (ti1, ti0) = two_product(splitter, cdxtail, adytail);
                let (tj1, tj0) = two_product(splitter, adxtail, cdytail);
                let (catt3, catt2, catt1, catt0) = two_two_diff(ti1, ti0, tj1, tj0);
                catt = [catt0, catt1, catt2, catt3];
                cattlen = 4;
            } else {
                cat[0] = 0.0;
                catlen = 1;
                catt[0] = 0.0;
                cattlen = 1;
            }

            if bdxtail != 0.0 {
                let temp16alen =
                    scale_expansion_zeroelim(splitter, &bxtca[..bxtcalen], bdxtail, &mut temp16a);
                let mut bxtcat = [0f64; 16];
                let bxtcatlen =
                    scale_expansion_zeroelim(splitter, &cat[..catlen], bdxtail, &mut bxtcat);
                let temp32alen = scale_expansion_zeroelim(
                    splitter,
                    &bxtcat[..bxtcatlen],
                    2.0 * bdx,
                    &mut temp32a,
                );
                let temp48len = fast_expansion_sum_zeroelim(
                    &temp16a[..temp16alen],
                    &temp32a[..temp32alen],
                    &mut temp48,
                );
                finlength = fast_expansion_sum_zeroelim(
                    &fin1[..finlength],
                    &temp48[..temp48len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);

                if cdytail != 0.0 {
                    let temp8len = scale_expansion_zeroelim(splitter, &aa, bdxtail, &mut temp8);
                    let temp16alen = scale_expansion_zeroelim(
                        splitter,
                        &temp8[..temp8len],
                        cdytail,
                        &mut temp16a,
                    );
                    finlength = fast_expansion_sum_zeroelim(
                        &fin1[..finlength],
                        &temp16a[..temp16alen],
                        &mut fin2,
                    );
                    core::mem::swap(&mut fin1, &mut fin2);
                }
                if adytail != 0.0 {
                    let temp8len = scale_expansion_zeroelim(splitter, &cc, -bdxtail, &mut temp8);
                    let temp16alen = scale_expansion_zeroelim(
                        splitter,
                        &temp8[..temp8len],
                        adytail,
                        &mut temp16a,
                    );
                    finlength = fast_expansion_sum_zeroelim(
                        &fin1[..finlength],
                        &temp16a[..temp16alen],
                        &mut fin2,
                    );
                    core::mem::swap(&mut fin1, &mut fin2);
                }

                let temp32alen =
                    scale_expansion_zeroelim(splitter, &bxtcat[..bxtcatlen], bdxtail, &mut temp32a);
                let mut bxtcatt = [0f64; 8];
                let bxtcattlen =
                    scale_expansion_zeroelim(splitter, &catt[..cattlen], bdxtail, &mut bxtcatt);
                let temp16alen = scale_expansion_zeroelim(
                    splitter,
                    &bxtcatt[..bxtcattlen],
                    2.0 * bdx,
                    &mut temp16a,
                );
                let temp16blen = scale_expansion_zeroelim(
                    splitter,
                    &bxtcatt[..bxtcattlen],
                    bdxtail,
                    &mut temp16b,
                );
                let temp32blen = fast_expansion_sum_zeroelim(
                    &temp16a[..temp16alen],
                    &temp16b[..temp16blen],
                    &mut temp32b,
                );
                let temp64len = fast_expansion_sum_zeroelim(
                    &temp32a[..temp32alen],
                    &temp32b[..temp32blen],
                    &mut temp64,
                );
                finlength = fast_expansion_sum_zeroelim(
                    &fin1[..finlength],
                    &temp64[..temp64len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);
            }
            if bdytail != 0.0 {
                let temp16alen =
                    scale_expansion_zeroelim(splitter, &bytca[..bytcalen], bdytail, &mut temp16a);
                let mut bytcat = [0f64; 16];
                let bytcatlen =
                    scale_expansion_zeroelim(splitter, &cat[..catlen], bdytail, &mut bytcat);
                let temp32alen = scale_expansion_zeroelim(
                    splitter,
                    &bytcat[..bytcatlen],
                    2.0 * bdy,
                    &mut temp32a,
                );
                let temp48len = fast_expansion_sum_zeroelim(
                    &temp16a[..temp16alen],
                    &temp32a[..temp32alen],
                    &mut temp48,
                );
                finlength = fast_expansion_sum_zeroelim(
                    &fin1[..finlength],
                    &temp48[..temp48len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);

                let temp32alen =
                    scale_expansion_zeroelim(splitter, &bytcat[..bytcatlen], bdytail, &mut temp32a);
                let mut bytcatt = [0f64; 8];
                let bytcattlen =
                    scale_expansion_zeroelim(splitter, &catt[..cattlen], bdytail, &mut bytcatt);
                let temp16alen = scale_expansion_zeroelim(
                    splitter,
                    &bytcatt[..bytcattlen],
                    2.0 * bdy,
                    &mut temp16a,
                );
                let temp16blen = scale_expansion_zeroelim(
                    splitter,
                    &bytcatt[..bytcattlen],
                    bdytail,
                    &mut temp16b,
                );
                let temp32blen = fast_expansion_sum_zeroelim(
                    &temp16a[..temp16alen],
                    &temp16b[..temp16blen],
                    &mut temp32b,
                );
                let temp64len = fast_expansion_sum_zeroelim(
                    &temp32a[..temp32alen],
                    &temp32b[..temp32blen],
                    &mut temp64,
                );
                finlength = fast_expansion_sum_zeroelim(
                    &fin1[..finlength],
                    &temp64[..temp64len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);
            }
        }

        if cdxtail != 0.0 || cdytail != 0.0 {
            let mut abtt = [0f64; 4];
            let mut abt = [0f64; 8];
            let abttlen;
            let abtlen;

            if adxtail != 0.0 || adytail != 0.0 || bdxtail != 0.0 || bdytail != 0.0 {
                let (ti1, ti0) = two_product(splitter, adxtail, bdy);
                let (tj1, tj0) = two_product(splitter, adx, bdytail);
                let (u3, u2, u1, u0) = two_two_sum(ti1, ti0, tj1, tj0);
                let u = [u0, u1, u2, u3];
                let negate = -ady;
                let (ti1, ti0) = two_product(splitter, bdxtail, negate);
                let negate = -adytail;
                let (tj1, tj0) = two_product(splitter, bdx, negate);
                let (v3, v2, v1, v0) = two_two_sum(ti1, ti0, tj1, tj0);
                let v = [v0, v1, v2, v3];
                abtlen = fast_expansion_sum_zeroelim(&u, &v, &mut abt);

                let (ti1, ti0) = two_product(splitter, adxtail, bdytail);
                let (tj1, tj0) = two_product(splitter, bdxtail, adytail);
                let (abtt3, abtt2, abtt1, abtt0) = two_two_diff(ti1, ti0, tj1, tj0);
                abtt = [abtt0, abtt1, abtt2, abtt3];
                abttlen = 4;
            } else {
                abt[0] = 0.0;
                abtlen = 1;
                abtt[0] = 0.0;
                abttlen = 1;
            }

            if cdxtail != 0.0 {
                let temp16alen =
                    scale_expansion_zeroelim(splitter, &cxtab[..cxtablen], cdxtail, &mut temp16a);
                let mut cxtabt = [0f64; 16];
                let cxtabtlen =
                    scale_expansion_zeroelim(splitter, &abt[..abtlen], cdxtail, &mut cxtabt);
                let temp32alen = scale_expansion_zeroelim(
                    splitter,
                    &cxtabt[..cxtabtlen],
                    2.0 * cdx,
                    &mut temp32a,
                );
                let temp48len = fast_expansion_sum_zeroelim(
                    &temp16a[..temp16alen],
                    &temp32a[..temp32alen],
                    &mut temp48,
                );
                finlength = fast_expansion_sum_zeroelim(
                    &fin1[..finlength],
                    &temp48[..temp48len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);

                if adytail != 0.0 {
                    let temp8len = scale_expansion_zeroelim(splitter, &bb, cdxtail, &mut temp8);
                    let temp16alen = scale_expansion_zeroelim(
                        splitter,
                        &temp8[..temp8len],
                        adytail,
                        &mut temp16a,
                    );
                    finlength = fast_expansion_sum_zeroelim(
                        &fin1[..finlength],
                        &temp16a[..temp16alen],
                        &mut fin2,
                    );
                    core::mem::swap(&mut fin1, &mut fin2);
                }
                if bdytail != 0.0 {
                    let temp8len = scale_expansion_zeroelim(splitter, &aa, -cdxtail, &mut temp8);
                    let temp16alen = scale_expansion_zeroelim(
                        splitter,
                        &temp8[..temp8len],
                        bdytail,
                        &mut temp16a,
                    );
                    finlength = fast_expansion_sum_zeroelim(
                        &fin1[..finlength],
                        &temp16a[..temp16alen],
                        &mut fin2,
                    );
                    core::mem::swap(&mut fin1, &mut fin2);
                }

                let temp32alen =
                    scale_expansion_zeroelim(splitter, &cxtabt[..cxtabtlen], cdxtail, &mut temp32a);
                let mut cxtabtt = [0f64; 8];
                let cxtabttlen =
                    scale_expansion_zeroelim(splitter, &abtt[..abttlen], cdxtail, &mut cxtabtt);
                let temp16alen = scale_expansion_zeroelim(
                    splitter,
                    &cxtabtt[..cxtabttlen],
                    2.0 * cdx,
                    &mut temp16a,
                );
                let temp16blen = scale_expansion_zeroelim(
                    splitter,
                    &cxtabtt[..cxtabttlen],
                    cdxtail,
                    &mut temp16b,
                );
                let temp32blen = fast_expansion_sum_zeroelim(
                    &temp16a[..temp16alen],
                    &temp16b[..temp16blen],
                    &mut temp32b,
                );
                let temp64len = fast_expansion_sum_zeroelim(
                    &temp32a[..temp32alen],
                    &temp32b[..temp32blen],
                    &mut temp64,
                );
                finlength = fast_expansion_sum_zeroelim(
                    &fin1[..finlength],
                    &temp64[..temp64len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);
            }
            if cdytail != 0.0 {
                let temp16alen =
                    scale_expansion_zeroelim(splitter, &cytab[..cytablen], cdytail, &mut temp16a);
                let mut cytabt = [0f64; 16];
                let cytabtlen =
                    scale_expansion_zeroelim(splitter, &abt[..abtlen], cdytail, &mut cytabt);
                let temp32alen = scale_expansion_zeroelim(
                    splitter,
                    &cytabt[..cytabtlen],
                    2.0 * cdy,
                    &mut temp32a,
                );
                let temp48len = fast_expansion_sum_zeroelim(
                    &temp16a[..temp16alen],
                    &temp32a[..temp32alen],
                    &mut temp48,
                );
                finlength = fast_expansion_sum_zeroelim(
                    &fin1[..finlength],
                    &temp48[..temp48len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);

                let temp32alen =
                    scale_expansion_zeroelim(splitter, &cytabt[..cytabtlen], cdytail, &mut temp32a);
                let mut cytabtt = [0f64; 8];
                let cytabttlen =
                    scale_expansion_zeroelim(splitter, &abtt[..abttlen], cdytail, &mut cytabtt);
                let temp16alen = scale_expansion_zeroelim(
                    splitter,
                    &cytabtt[..cytabttlen],
                    2.0 * cdy,
                    &mut temp16a,
                );
                let temp16blen = scale_expansion_zeroelim(
                    splitter,
                    &cytabtt[..cytabttlen],
                    cdytail,
                    &mut temp16b,
                );
                let temp32blen = fast_expansion_sum_zeroelim(
                    &temp16a[..temp16alen],
                    &temp16b[..temp16blen],
                    &mut temp32b,
                );
                let temp64len = fast_expansion_sum_zeroelim(
                    &temp32a[..temp32alen],
                    &temp32b[..temp32blen],
                    &mut temp64,
                );
                finlength = fast_expansion_sum_zeroelim(
                    &fin1[..finlength],
                    &temp64[..temp64len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);
            }
        }
        fin1[finlength - 1]
    }

    /// `true` iff `c` lies strictly left of the oriented line from `a` to `b`.
    #[inline]
    pub fn left(&self, a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> bool {
        self.orient2d(a, b, c) > 0.0
    }

    /// `true` iff `c` lies left of or on the oriented line from `a` to `b`.
    #[inline]
    pub fn left_on(&self, a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> bool {
        self.orient2d(a, b, c) >= 0.0
    }

    /// `true` iff `a`, `b` and `c` are exactly collinear.
    #[inline]
    pub fn collinear(&self, a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> bool {
        self.orient2d(a, b, c) == 0.0
    }

    /// Classifies `c` against the oriented segment from `a` to `b`.
    pub fn classify(&self, a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Classification {
        let res = self.orient2d(a, b, c);
        if res > 0.0 {
            return Classification::Left;
        } else if res < 0.0 {
            return Classification::Right;
        }

        if a.x == c.x && a.y == c.y {
            return Classification::Origin;
        }
        if c.x == b.x && c.y == b.y {
            return Classification::Destination;
        }

        // Collinear. Order along the segment by x unless the segment is
        // vertical, then by y.
        if a.x < b.x {
            return if c.x > a.x && c.x < b.x {
                Classification::Between
            } else if c.x < a.x {
                Classification::Behind
            } else {
                Classification::Beyond
            };
        }
        if a.x > b.x {
            return if c.x > b.x && c.x < a.x {
                Classification::Between
            } else if c.x > a.x {
                Classification::Behind
            } else {
                Classification::Beyond
            };
        }
        if a.y < b.y {
            return if c.y > a.y && c.y < b.y {
                Classification::Between
            } else if c.y < a.y {
                Classification::Behind
            } else {
                Classification::Beyond
            };
        }
        if c.y < a.y && c.y > b.y {
            Classification::Between
        } else if c.y > a.y {
            Classification::Behind
        } else {
            Classification::Beyond
        }
    }
}

fn scale_expansion_zeroelim(splitter: f64, e: &[f64], b: f64, h: &mut [f64]) -> usize {
    let (bhi, blo) = split(splitter, b);
    let (mut Q, hh) = two_product_presplit(splitter, e[0], b, bhi, blo);
    let mut hindex = 0;
    if hh != 0.0 {
        h[hindex] = hh;
        hindex += 1;
    }
    for &enow in &e[1..] {
        let (product1, product0) = two_product_presplit(splitter, enow, b, bhi, blo);
        let (sum, hh) = two_sum(Q, product0);
        if hh != 0.0 {
            h[hindex] = hh;
            hindex += 1;
        }
        let (new_q, hh) = fast_two_sum(product1, sum);
        Q = new_q;
        if hh != 0.0 {
            h[hindex] = hh;
            hindex += 1;
        }
    }
    if Q != 0.0 || hindex == 0 {
        h[hindex] = Q;
        hindex += 1;
    }
    hindex
}

fn fast_expansion_sum_zeroelim(e: &[f64], f: &[f64], h: &mut [f64]) -> usize {
    let mut enow = e[0];
    let mut fnow = f[0];
    let mut eindex = 0;
    let mut findex = 0;
    let mut Q;
    if (fnow > enow) == (fnow > -enow) {
        Q = enow;
        eindex += 1;
    } else {
        Q = fnow;
        findex += 1;
    }

    let mut hindex = 0;
    if eindex < e.len() && findex < f.len() {
        enow = e[eindex];
        fnow = f[findex];
        let hh;
        if (fnow > enow) == (fnow > -enow) {
            let r = fast_two_sum(enow, Q);
            Q = r.0;
            hh = r.1;
            eindex += 1;
        } else {
            let r = fast_two_sum(fnow, Q);
            Q = r.0;
            hh = r.1;
            findex += 1;
        }
        if hh != 0.0 {
            h[hindex] = hh;
            hindex += 1;
        }

        while eindex < e.len() && findex < f.len() {
            enow = e[eindex];
            fnow = f[findex];
            let hh;
            if (fnow > enow) == (fnow > -enow) {
                let r = two_sum(Q, enow);
                Q = r.0;
                hh = r.1;
                eindex += 1;
            } else {
                let r = two_sum(Q, fnow);
                Q = r.0;
                hh = r.1;
                findex += 1;
            }
            if hh != 0.0 {
                h[hindex] = hh;
                hindex += 1;
            }
        }
    }

    while eindex < e.len() {
        enow = e[eindex];
        let (new_q, hh) = two_sum(Q, enow);
        Q = new_q;
        eindex += 1;
        if hh != 0.0 {
            h[hindex] = hh;
            hindex += 1;
        }
    }

    while findex < f.len() {
        fnow = f[findex];
        let (new_q, hh) = two_sum(Q, fnow);
        Q = new_q;
        findex += 1;
        if hh != 0.0 {
            h[hindex] = hh;
            hindex += 1;
        }
    }

    if Q != 0.0 || hindex == 0 {
        h[hindex] = Q;
        hindex += 1;
    }
    hindex
}

fn estimate(e: &[f64]) -> f64 {
    let mut q = e[0];
    for cur in &e[1..] {
        q += *cur;
    }
    q
}

#[inline]
fn split(splitter: f64, a: f64) -> (f64, f64) {
    let c = splitter * a;
    let abig = c - a;
    let ahi = c - abig;
    let alo = a - ahi;
    (ahi, alo)
}

#[inline]
fn two_product(splitter: f64, a: f64, b: f64) -> (f64, f64) {
    let x = a * b;
    (x, two_product_tail(splitter, a, b, x))
}

#[inline]
fn two_product_tail(splitter: f64, a: f64, b: f64, x: f64) -> f64 {
    let (ahi, alo) = split(splitter, a);
    let (bhi, blo) = split(splitter, b);
    let err1 = x - (ahi * bhi);
    let err2 = err1 - (alo * bhi);
    let err3 = err2 - (ahi * blo);
    (alo * blo) - err3
}

#[inline]
fn two_product_presplit(splitter: f64, a: f64, b: f64, bhi: f64, blo: f64) -> (f64, f64) {
    let x = a * b;
    let (ahi, alo) = split(splitter, a);
    let err1 = x - ahi * bhi;
    let err2 = err1 - alo * bhi;
    let err3 = err2 - ahi * blo;
    let y = alo * blo - err3;
    (x, y)
}

#[inline]
fn two_diff(a: f64, b: f64) -> (f64, f64) {
    let x = a - b;
    (x, two_diff_tail(a, b, x))
}

#[inline]
fn two_diff_tail(a: f64, b: f64, x: f64) -> f64 {
    let bvirt = a - x;
    let avirt = x + bvirt;
    let bround = bvirt - b;
    let around = a - avirt;
    around + bround
}

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    (x, two_sum_tail(a, b, x))
}

#[inline]
fn two_sum_tail(a: f64, b: f64, x: f64) -> f64 {
    let bvirt = x - a;
    let avirt = x - bvirt;
    let bround = b - bvirt;
    let around = a - avirt;
    around + bround
}

#[inline]
fn fast_two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    (x, fast_two_sum_tail(a, b, x))
}

#[inline]
fn fast_two_sum_tail(a: f64, b: f64, x: f64) -> f64 {
    let bvirt = x - a;
    b - bvirt
}

#[inline]
fn square(splitter: f64, a: f64) -> (f64, f64) {
    let x = a * a;
    (x, square_tail(splitter, a, x))
}

#[inline]
fn square_tail(splitter: f64, a: f64, x: f64) -> f64 {
    let (ahi, alo) = split(splitter, a);
    let err1 = x - ahi * ahi;
    let err3 = err1 - (ahi + ahi) * alo;
    alo * alo - err3
}

#[inline]
fn two_one_diff(a1: f64, a0: f64, b: f64) -> (f64, f64, f64) {
    let (i, x0) = two_diff(a0, b);
    let (x2, x1) = two_sum(a1, i);
    (x2, x1, x0)
}

#[inline]
fn two_two_diff(a1: f64, a0: f64, b1: f64, b0: f64) -> (f64, f64, f64, f64) {
    let (j, _0, x0) = two_one_diff(a1, a0, b0);
    let (x3, x2, x1) = two_one_diff(j, _0, b1);
    (x3, x2, x1, x0)
}

#[inline]
fn two_one_sum(a1: f64, a0: f64, b: f64) -> (f64, f64, f64) {
    let (i, x0) = two_sum(a0, b);
    let (x2, x1) = two_sum(a1, i);
    (x2, x1, x0)
}

#[inline]
fn two_two_sum(a1: f64, a0: f64, b1: f64, b0: f64) -> (f64, f64, f64, f64) {
    let (j, _0, x0) = two_one_sum(a1, a0, b0);
    let (x3, x2, x1) = two_one_sum(j, _0, b1);
    (x3, x2, x1, x0)
}

#[cfg(test)]
mod test {
    use super::{validate_coordinate, Classification, Predicates};
    use crate::point::Point2;

    #[test]
    fn test_derived_constants() {
        let preds = Predicates::new();
        // On IEEE-754 doubles the derivation must land on 2^-53 and 2^27 + 1.
        assert_eq!(preds.epsilon(), f64::EPSILON * 0.5);
        assert_eq!(preds.splitter(), 134217729.0);
    }

    #[test]
    fn test_orient2d_near_collinear() {
        let preds = Predicates::new();
        let from = Point2::new(-1f64, -1.0);
        let to = Point2::new(1f64, 1.0);
        let p1 = Point2::new(f64::MIN_POSITIVE, f64::MIN_POSITIVE);
        let p2 = Point2::new(-f64::MIN_POSITIVE, -f64::MIN_POSITIVE);
        let p3 = Point2::new(-f64::MIN_POSITIVE, f64::MIN_POSITIVE);
        let p4 = Point2::new(f64::MIN_POSITIVE, -f64::MIN_POSITIVE);

        for &(p, sign) in &[(p1, 0.0f64), (p2, 0.0), (p3, 1.0), (p4, -1.0)] {
            let det = preds.orient2d(from, to, p);
            assert!(det == sign || det.signum() == sign.signum());
        }
    }

    #[test]
    fn test_incircle_near_degenerate() {
        let preds = Predicates::new();
        let from = Point2::new(-1f64, -1.0);
        let to = Point2::new(1f64, 1.0);
        let p_left = Point2::new(-f64::MIN_POSITIVE, f64::MIN_POSITIVE);
        let p_right = Point2::new(f64::MIN_POSITIVE, -f64::MIN_POSITIVE);
        let p_query = Point2::new(2.0, 2.0);

        assert!(preds.incircle(from, p_left, to, p_query) > 0.0);
        assert!(preds.incircle(from, to, p_right, p_query) > 0.0);
    }

    #[test]
    fn test_incircle_cocircular_is_exactly_zero() {
        let preds = Predicates::new();
        let a = Point2::new(1.0, 0.0);
        let b = Point2::new(0.0, 1.0);
        let c = Point2::new(-1.0, 0.0);
        let d = Point2::new(0.0, -1.0);
        assert_eq!(preds.incircle(a, b, c, d), 0.0);
    }

    #[test]
    fn test_classify() {
        let preds = Predicates::new();
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(2.0, 0.0);
        assert_eq!(preds.classify(a, b, Point2::new(1.0, 1.0)), Classification::Left);
        assert_eq!(preds.classify(a, b, Point2::new(1.0, -1.0)), Classification::Right);
        assert_eq!(preds.classify(a, b, a), Classification::Origin);
        assert_eq!(preds.classify(a, b, b), Classification::Destination);
        assert_eq!(preds.classify(a, b, Point2::new(1.0, 0.0)), Classification::Between);
        assert_eq!(preds.classify(a, b, Point2::new(-1.0, 0.0)), Classification::Behind);
        assert_eq!(preds.classify(a, b, Point2::new(3.0, 0.0)), Classification::Beyond);
    }

    #[test]
    fn test_classify_vertical_segment() {
        let preds = Predicates::new();
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(0.0, -2.0);
        assert_eq!(preds.classify(a, b, Point2::new(0.0, -1.0)), Classification::Between);
        assert_eq!(preds.classify(a, b, Point2::new(0.0, 1.0)), Classification::Behind);
        assert_eq!(preds.classify(a, b, Point2::new(0.0, -3.0)), Classification::Beyond);
    }

    #[test]
    fn test_validate_coordinate() {
        assert!(validate_coordinate(0.0));
        assert!(validate_coordinate(-12.5));
        assert!(!validate_coordinate(f64::NAN));
        assert!(!validate_coordinate(f64::INFINITY));
        assert!(!validate_coordinate(1.0e-300));
        assert!(!validate_coordinate(1.0e300));
    }
}
