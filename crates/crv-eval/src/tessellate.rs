//! Adaptive polyline approximation of curves.
//!
//! A convenience layer over the [`Curve`] trait; evaluators do not depend on it.

use crv_math::Point3;

use crate::curve::Curve;
use crate::curves::CurvesPrimitiveEvaluator;

/// Maximum subdivision depth below one curve piece.
const MAX_DEPTH: u32 = 12;

/// Convert a curve to a polyline.
///
/// The domain is first split at the curve's piece boundaries, then each
/// interval is halved while its midpoint strays more than `tolerance` from
/// the chord.
pub fn curve_to_polyline(curve: &dyn Curve, tolerance: f64) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    let pieces = curve.pieces().max(1);
    let step = (t_max - t_min) / pieces as f64;

    let mut points = vec![curve.point_at(t_min)];
    // Intervals are popped in parameter order: right halves are pushed first.
    let mut stack = Vec::new();
    for i in (0..pieces).rev() {
        let t0 = t_min + step * i as f64;
        let t1 = if i + 1 == pieces { t_max } else { t0 + step };
        stack.push((t0, t1, 0));
    }

    while let Some((t0, t1, depth)) = stack.pop() {
        let p0 = curve.point_at(t0);
        let p1 = curve.point_at(t1);
        let t_mid = (t0 + t1) * 0.5;
        let deviation = (curve.point_at(t_mid) - (p0 + p1) * 0.5).length();

        if depth < MAX_DEPTH && deviation > tolerance {
            stack.push((t_mid, t1, depth + 1));
            stack.push((t0, t_mid, depth + 1));
        } else {
            points.push(p1);
        }
    }

    points
}

/// Polylines for every curve of a dataset, in curve order.
pub fn curves_to_polylines(
    evaluator: &CurvesPrimitiveEvaluator,
    tolerance: f64,
) -> Vec<Vec<Point3>> {
    (0..evaluator.num_curves())
        .filter_map(|i| evaluator.curve(i).ok())
        .map(|curve| curve_to_polyline(&curve, tolerance))
        .collect()
}

/// Total length of a polyline.
pub fn polyline_length(points: &[Point3]) -> f64 {
    points.windows(2).map(|w| (w[1] - w[0]).length()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crv_math::{dvec3, Vector3};

    struct Arc2;

    impl Curve for Arc2 {
        fn point_at(&self, t: f64) -> Point3 {
            dvec3(t.cos(), t.sin(), 0.0)
        }

        fn tangent_at(&self, t: f64) -> Vector3 {
            dvec3(-t.sin(), t.cos(), 0.0)
        }

        fn domain(&self) -> (f64, f64) {
            (0.0, std::f64::consts::PI)
        }

        fn pieces(&self) -> usize {
            3
        }
    }

    #[test]
    fn test_polyline_endpoints_and_order() {
        let points = curve_to_polyline(&Arc2, 1e-3);
        assert!((points[0] - dvec3(1.0, 0.0, 0.0)).length() < 1e-10);
        assert!((points[points.len() - 1] - dvec3(-1.0, 0.0, 0.0)).length() < 1e-10);
        // Points advance monotonically around the half circle.
        for w in points.windows(2) {
            assert!(w[1].x < w[0].x);
        }
    }

    #[test]
    fn test_polyline_length_converges() {
        let points = curve_to_polyline(&Arc2, 1e-6);
        let len = polyline_length(&points);
        assert!((len - std::f64::consts::PI).abs() < 1e-3);
    }
}
