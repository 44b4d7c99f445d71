//! Generic parametric-curve trait and a per-curve view onto an evaluator.

use crv_core::Tolerance;
use crv_math::{Point3, Vector3};
use crv_primitive::Stencil;

use crate::curves::CurvesPrimitiveEvaluator;
use crate::evaluator::PrimitiveEvaluator;

/// Trait for parametric curves in 3D space.
pub trait Curve: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point3;

    /// Evaluate the tangent vector at parameter `t`.
    fn tangent_at(&self, t: f64) -> Vector3;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// Whether the curve is closed (start == end).
    fn is_closed(&self) -> bool {
        false
    }

    /// Number of pieces the curve is built from, used to seed subdivision.
    fn pieces(&self) -> usize {
        1
    }
}

/// One curve of a dataset, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct CurveView<'a> {
    evaluator: &'a CurvesPrimitiveEvaluator,
    curve_index: usize,
    tolerance: Tolerance,
}

impl<'a> CurveView<'a> {
    pub(crate) fn new(
        evaluator: &'a CurvesPrimitiveEvaluator,
        curve_index: usize,
        tolerance: Tolerance,
    ) -> Self {
        Self {
            evaluator,
            curve_index,
            tolerance,
        }
    }

    /// Tolerance used to decide whether an open curve ends where it starts.
    pub fn with_tolerance(self, tolerance: Tolerance) -> Self {
        Self { tolerance, ..self }
    }

    pub fn curve_index(&self) -> usize {
        self.curve_index
    }
}

impl Curve for CurveView<'_> {
    fn point_at(&self, t: f64) -> Point3 {
        // Positions were type-checked when the evaluator was built.
        self.evaluator
            .sample(self.curve_index, t)
            .point()
            .unwrap_or(Point3::NAN)
    }

    /// Derivative with respect to the global parameter.
    fn tangent_at(&self, t: f64) -> Vector3 {
        let sample = self.evaluator.sample(self.curve_index, t);
        sample
            .v_tangent()
            .map_or(Vector3::NAN, |d| d * sample.segment_count as f64)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    /// A single-vertex curve is a point, never a closed curve.
    fn is_closed(&self) -> bool {
        if self.evaluator.stencil(self.curve_index) == Stencil::Constant {
            return false;
        }
        self.evaluator.primitive().periodic()
            || self
                .tolerance
                .is_zero((self.point_at(1.0) - self.point_at(0.0)).length())
    }

    fn pieces(&self) -> usize {
        self.evaluator.num_segments(self.curve_index).unwrap_or(1)
    }
}
