//! Evaluator for curve datasets.

mod result;

use std::sync::Arc;

use crv_core::error::{CurvesError, Result};
use crv_core::traits::Validate;
use crv_core::{EvaluatorId, Tolerance};
use crv_math::{Point2, Point3, Ray};
use crv_primitive::{
    CurvesPrimitive, DataType, Interpolation, Stencil, VariableData, POSITION,
};

use crate::curve::CurveView;
use crate::evaluator::PrimitiveEvaluator;

pub use result::CurvesEvaluatorResult;
pub(crate) use result::Sample;

/// Answers position, tangent, and attribute queries on a [`CurvesPrimitive`].
///
/// Per-curve storage offsets and stencils are computed once here. The
/// dataset must not change while the evaluator is alive.
#[derive(Debug)]
pub struct CurvesPrimitiveEvaluator {
    id: EvaluatorId,
    curves: Arc<CurvesPrimitive>,
    positions: Arc<VariableData>,
    stencils: Vec<Stencil>,
    vertex_offsets: Vec<usize>,
    varying_offsets: Vec<usize>,
}

impl CurvesPrimitiveEvaluator {
    /// Fails with `InvalidArgument` unless `P` is a vertex-interpolated
    /// vector variable, or with the dataset's own validation error.
    pub fn new(curves: Arc<CurvesPrimitive>) -> Result<Self> {
        curves.validate()?;

        let positions = match curves.variable(POSITION) {
            Some(pv)
                if pv.interpolation == Interpolation::Vertex
                    && pv.data_type() == DataType::Vector =>
            {
                Arc::clone(&pv.data)
            }
            Some(pv) => {
                return Err(CurvesError::InvalidArgument(format!(
                    "\"{}\" must be {} {} data, found {} {}",
                    POSITION,
                    Interpolation::Vertex,
                    DataType::Vector,
                    pv.interpolation,
                    pv.data_type()
                )))
            }
            None => {
                return Err(CurvesError::InvalidArgument(format!(
                    "curves have no \"{}\" variable",
                    POSITION
                )))
            }
        };

        let periodic = curves.periodic();
        let num_curves = curves.num_curves();
        let mut stencils = Vec::with_capacity(num_curves);
        let mut vertex_offsets = Vec::with_capacity(num_curves);
        let mut varying_offsets = Vec::with_capacity(num_curves);
        let mut vertex_offset = 0;
        let mut varying_offset = 0;

        for &n in curves.vertices_per_curve() {
            let stencil = Stencil::for_curve(curves.basis(), n);
            stencils.push(stencil);
            vertex_offsets.push(vertex_offset);
            varying_offsets.push(varying_offset);
            vertex_offset += n;
            varying_offset += stencil.num_varying(n, periodic);
        }

        log::debug!(
            "built curves evaluator: {} curves, basis {:?}, periodic {}, {} vertex / {} varying values",
            num_curves,
            curves.basis().kind(),
            periodic,
            vertex_offset,
            varying_offset
        );

        Ok(Self {
            id: EvaluatorId::new(),
            curves,
            positions,
            stencils,
            vertex_offsets,
            varying_offsets,
        })
    }

    pub fn id(&self) -> EvaluatorId {
        self.id
    }

    pub fn num_curves(&self) -> usize {
        self.stencils.len()
    }

    /// Evaluate curve `curve_index` at global parameter `v` into `result`.
    ///
    /// `v` spans the whole curve over `[0, 1]`. Finite values outside that
    /// range extrapolate the first or last segment, as long as the basis
    /// weights stay finite; a `v` far enough out to overflow them is an
    /// `InvalidArgument`. On failure `result` keeps whatever location it
    /// held before.
    pub fn point_at_v(
        &self,
        curve_index: usize,
        v: f64,
        result: &mut CurvesEvaluatorResult,
    ) -> Result<()> {
        self.check_owner(result)?;
        self.check_curve_index(curve_index)?;
        if !v.is_finite() {
            return Err(CurvesError::InvalidArgument(format!(
                "curve parameter must be finite, got {}",
                v
            )));
        }

        let sample = self.sample(curve_index, v);
        let finite = sample
            .coefficients
            .iter()
            .chain(&sample.derivative_coefficients)
            .all(|c| c.is_finite());
        if !finite {
            return Err(CurvesError::InvalidArgument(format!(
                "curve parameter {} extrapolates beyond representable basis weights",
                v
            )));
        }
        log::trace!(
            "curve {} v={} -> segment {}/{} u={}",
            curve_index,
            v,
            sample.segment,
            sample.segment_count,
            sample.segment_v
        );
        result.set_sample(sample);
        Ok(())
    }

    /// A view of one curve usable wherever a [`Curve`](crate::Curve) is expected.
    pub fn curve(&self, curve_index: usize) -> Result<CurveView<'_>> {
        self.check_curve_index(curve_index)?;
        Ok(CurveView::new(self, curve_index, Tolerance::default()))
    }

    /// Stencil resolved for a curve at construction. `curve_index` must
    /// already be checked.
    pub(crate) fn stencil(&self, curve_index: usize) -> Stencil {
        self.stencils[curve_index]
    }

    pub fn num_segments(&self, curve_index: usize) -> Result<usize> {
        self.check_curve_index(curve_index)?;
        let n = self.curves.vertices_per_curve()[curve_index];
        Ok(self.stencils[curve_index].num_segments(n, self.curves.periodic()))
    }

    /// Locate the segment for `v` and resolve its storage indices and basis
    /// weights. `curve_index` must already be checked.
    pub(crate) fn sample(&self, curve_index: usize, v: f64) -> Sample {
        let n = self.curves.vertices_per_curve()[curve_index];
        let periodic = self.curves.periodic();
        let stencil = self.stencils[curve_index];

        let segment_count = stencil.num_segments(n, periodic);
        let scaled = v * segment_count as f64;
        let segment = (scaled.floor().max(0.0) as usize).min(segment_count - 1);
        let segment_v = scaled - segment as f64;

        let (coefficients, derivative_coefficients) =
            stencil.coefficients(self.curves.basis(), segment_v);

        let vertex_offset = self.vertex_offsets[curve_index];
        let varying_offset = self.varying_offsets[curve_index];

        Sample {
            curve_index,
            v,
            segment,
            segment_count,
            segment_v,
            coefficients,
            derivative_coefficients,
            vertex_indices: stencil
                .vertex_indices(segment, n, periodic)
                .map(|i| vertex_offset + i),
            varying_indices: stencil
                .varying_indices(segment, n, periodic)
                .map(|i| varying_offset + i),
            positions: Arc::clone(&self.positions),
        }
    }

    fn check_owner(&self, result: &CurvesEvaluatorResult) -> Result<()> {
        if result.owner() == self.id {
            Ok(())
        } else {
            Err(CurvesError::ForeignResult)
        }
    }

    fn check_curve_index(&self, curve_index: usize) -> Result<()> {
        if curve_index < self.num_curves() {
            Ok(())
        } else {
            Err(CurvesError::CurveIndexOutOfRange {
                index: curve_index,
                count: self.num_curves(),
            })
        }
    }

    fn unsupported<T>(&self, query: &'static str) -> Result<T> {
        log::debug!("{} is not supported on curves", query);
        Err(CurvesError::NotImplemented(query))
    }
}

impl PrimitiveEvaluator for CurvesPrimitiveEvaluator {
    type Primitive = CurvesPrimitive;
    type EvalResult = CurvesEvaluatorResult;

    fn primitive(&self) -> &Arc<CurvesPrimitive> {
        &self.curves
    }

    fn create_result(&self) -> CurvesEvaluatorResult {
        CurvesEvaluatorResult::new(self.id)
    }

    fn validate_result(&self, result: &CurvesEvaluatorResult) -> Result<()> {
        self.check_owner(result)?;
        if result.is_populated() {
            Ok(())
        } else {
            Err(CurvesError::UnpopulatedResult)
        }
    }

    fn surface_area(&self) -> Result<f64> {
        self.unsupported("surface area")
    }

    fn volume(&self) -> Result<f64> {
        self.unsupported("volume")
    }

    fn center_of_gravity(&self) -> Result<Point3> {
        self.unsupported("center of gravity")
    }

    fn closest_point(&self, _p: Point3, _result: &mut CurvesEvaluatorResult) -> Result<()> {
        self.unsupported("closest point")
    }

    /// Same as `point_at_v(0, uv.y, result)`.
    fn point_at_uv(&self, uv: Point2, result: &mut CurvesEvaluatorResult) -> Result<()> {
        self.point_at_v(0, uv.y, result)
    }

    fn intersection_point(
        &self,
        _ray: &Ray,
        _max_distance: f64,
        _result: &mut CurvesEvaluatorResult,
    ) -> Result<()> {
        self.unsupported("ray intersection")
    }

    fn intersection_points(
        &self,
        _ray: &Ray,
        _max_distance: f64,
    ) -> Result<Vec<CurvesEvaluatorResult>> {
        self.unsupported("ray intersections")
    }
}
