//! Per-query result of a curves evaluator.

use std::sync::Arc;

use crv_core::error::{CurvesError, Result};
use crv_core::EvaluatorId;
use crv_math::{dvec2, Color3, Point2, Point3, Vector3};
use crv_primitive::{f16, DataType, Interpolation, PrimitiveVariable, VariableData, POSITION};

use crate::evaluator::PrimitiveResult;
use crate::primvar::PrimVarValue;

/// Everything needed to reconstruct values at one location on one curve.
#[derive(Debug, Clone)]
pub(crate) struct Sample {
    pub curve_index: usize,
    pub v: f64,
    pub segment: usize,
    pub segment_count: usize,
    pub segment_v: f64,
    pub coefficients: [f64; 4],
    pub derivative_coefficients: [f64; 4],
    pub vertex_indices: [usize; 4],
    pub varying_indices: [usize; 2],
    pub positions: Arc<VariableData>,
}

/// Storage indices and weights for reading one attribute.
enum Lookup {
    Single(usize),
    Blend { indices: [usize; 4], weights: [f64; 4] },
}

impl Lookup {
    /// Index of the heaviest sample; the earliest slot wins ties.
    fn dominant(&self) -> usize {
        match *self {
            Self::Single(i) => i,
            Self::Blend { indices, weights } => {
                let mut best = 0;
                for k in 1..4 {
                    if weights[k] > weights[best] {
                        best = k;
                    }
                }
                indices[best]
            }
        }
    }
}

fn typed_values<'a, T>(
    name: &str,
    data: &'a VariableData,
    expected: DataType,
    get: fn(&VariableData) -> Option<&[T]>,
) -> Result<&'a [T]> {
    get(data).ok_or_else(|| CurvesError::TypeMismatch {
        name: name.to_owned(),
        expected: expected.name(),
        found: data.data_type().name(),
    })
}

fn string_values(data: &VariableData) -> Option<&[String]> {
    match data {
        VariableData::String(v) => Some(v.as_slice()),
        _ => None,
    }
}

fn fetch<'a, T>(values: &'a [T], index: usize, name: &str) -> Result<&'a T> {
    values.get(index).ok_or_else(|| CurvesError::InvalidVariable {
        name: name.to_owned(),
        reason: format!("index {} out of range for {} values", index, values.len()),
    })
}

fn blend<T: PrimVarValue>(
    values: &[T],
    indices: [usize; 4],
    weights: [f64; 4],
    name: &str,
) -> Result<T> {
    let samples = [
        fetch(values, indices[0], name)?,
        fetch(values, indices[1], name)?,
        fetch(values, indices[2], name)?,
        fetch(values, indices[3], name)?,
    ];
    Ok(T::blend(samples, weights))
}

impl Sample {
    fn lookup(&self, pv: &PrimitiveVariable) -> Result<Lookup> {
        match pv.interpolation {
            Interpolation::Constant => Ok(Lookup::Single(0)),
            Interpolation::Uniform => Ok(Lookup::Single(self.curve_index)),
            Interpolation::Varying => {
                // Linear in the segment parameter whatever the position basis.
                let [a, b] = self.varying_indices;
                let u = self.segment_v;
                Ok(Lookup::Blend {
                    indices: [a, b, a, a],
                    weights: [1.0 - u, u, 0.0, 0.0],
                })
            }
            Interpolation::Vertex => Ok(Lookup::Blend {
                indices: self.vertex_indices,
                weights: self.coefficients,
            }),
            other => Err(CurvesError::UnsupportedInterpolation {
                name: pv.name.clone(),
                interpolation: other.name(),
            }),
        }
    }

    pub(crate) fn prim_var<T: PrimVarValue>(&self, pv: &PrimitiveVariable) -> Result<T> {
        let values = typed_values(&pv.name, &pv.data, T::DATA_TYPE, T::values)?;
        match self.lookup(pv)? {
            Lookup::Single(i) => fetch(values, i, &pv.name).cloned(),
            Lookup::Blend { indices, weights } => blend(values, indices, weights, &pv.name),
        }
    }

    fn positions(&self) -> Result<&[Point3]> {
        typed_values(
            POSITION,
            &self.positions,
            DataType::Vector,
            <Vector3 as PrimVarValue>::values,
        )
    }

    pub(crate) fn point(&self) -> Result<Point3> {
        blend(self.positions()?, self.vertex_indices, self.coefficients, POSITION)
    }

    /// Derivative of position with respect to the segment parameter.
    pub(crate) fn v_tangent(&self) -> Result<Vector3> {
        blend(
            self.positions()?,
            self.vertex_indices,
            self.derivative_coefficients,
            POSITION,
        )
    }

    fn string_prim_var<'a>(&self, pv: &'a PrimitiveVariable) -> Result<&'a str> {
        let values = typed_values(&pv.name, &pv.data, DataType::String, string_values)?;
        let i = self.lookup(pv)?.dominant();
        fetch(values, i, &pv.name).map(String::as_str)
    }
}

/// The location last evaluated by a [`CurvesPrimitiveEvaluator`], or nothing
/// if no query has succeeded yet.
///
/// A failed query leaves the previous location untouched.
///
/// [`CurvesPrimitiveEvaluator`]: super::CurvesPrimitiveEvaluator
#[derive(Debug, Clone)]
pub struct CurvesEvaluatorResult {
    owner: EvaluatorId,
    sample: Option<Sample>,
}

impl CurvesEvaluatorResult {
    pub(crate) fn new(owner: EvaluatorId) -> Self {
        Self {
            owner,
            sample: None,
        }
    }

    pub(crate) fn owner(&self) -> EvaluatorId {
        self.owner
    }

    pub(crate) fn set_sample(&mut self, sample: Sample) {
        self.sample = Some(sample);
    }

    fn sample(&self) -> Result<&Sample> {
        self.sample.as_ref().ok_or(CurvesError::UnpopulatedResult)
    }

    pub fn is_populated(&self) -> bool {
        self.sample.is_some()
    }

    pub fn curve_index(&self) -> Option<usize> {
        self.sample.as_ref().map(|s| s.curve_index)
    }

    /// The global parameter passed to the query.
    pub fn v(&self) -> Option<f64> {
        self.sample.as_ref().map(|s| s.v)
    }

    pub fn segment(&self) -> Option<usize> {
        self.sample.as_ref().map(|s| s.segment)
    }

    /// Local parameter within the segment; outside `[0, 1]` when extrapolating.
    pub fn segment_v(&self) -> Option<f64> {
        self.sample.as_ref().map(|s| s.segment_v)
    }

    /// Segments on the evaluated curve. Multiply [`v_tangent`] by this to get
    /// the derivative with respect to the global parameter.
    ///
    /// [`v_tangent`]: PrimitiveResult::v_tangent
    pub fn segment_count(&self) -> Option<usize> {
        self.sample.as_ref().map(|s| s.segment_count)
    }

    /// Read any blendable attribute type.
    pub fn prim_var<T: PrimVarValue>(&self, pv: &PrimitiveVariable) -> Result<T> {
        self.sample()?.prim_var(pv)
    }
}

impl PrimitiveResult for CurvesEvaluatorResult {
    fn point(&self) -> Result<Point3> {
        self.sample()?.point()
    }

    fn normal(&self) -> Result<Vector3> {
        Err(CurvesError::NotImplemented("curve normal"))
    }

    /// Curves have no width, so `u` is always 0.
    fn uv(&self) -> Result<Point2> {
        Ok(dvec2(0.0, self.sample()?.v))
    }

    fn u_tangent(&self) -> Result<Vector3> {
        Err(CurvesError::NotImplemented("curve u tangent"))
    }

    fn v_tangent(&self) -> Result<Vector3> {
        self.sample()?.v_tangent()
    }

    fn vector_prim_var(&self, pv: &PrimitiveVariable) -> Result<Vector3> {
        self.prim_var(pv)
    }

    fn float_prim_var(&self, pv: &PrimitiveVariable) -> Result<f64> {
        self.prim_var(pv)
    }

    fn int_prim_var(&self, pv: &PrimitiveVariable) -> Result<i32> {
        self.prim_var(pv)
    }

    fn string_prim_var<'a>(&self, pv: &'a PrimitiveVariable) -> Result<&'a str> {
        self.sample()?.string_prim_var(pv)
    }

    fn color_prim_var(&self, pv: &PrimitiveVariable) -> Result<Color3> {
        self.prim_var(pv)
    }

    fn half_prim_var(&self, pv: &PrimitiveVariable) -> Result<f16> {
        self.prim_var(pv)
    }
}
