//! The query contract shared by every primitive evaluator.

use std::sync::Arc;

use crv_core::error::Result;
use crv_math::{Color3, Point2, Point3, Ray, Vector3};
use crv_primitive::{f16, PrimitiveVariable};

/// Geometry and attribute values at one evaluated location.
///
/// Every query fails with `UnpopulatedResult` until the owning evaluator
/// has filled the result.
pub trait PrimitiveResult {
    fn point(&self) -> Result<Point3>;
    fn normal(&self) -> Result<Vector3>;
    fn uv(&self) -> Result<Point2>;
    fn u_tangent(&self) -> Result<Vector3>;
    fn v_tangent(&self) -> Result<Vector3>;

    fn vector_prim_var(&self, pv: &PrimitiveVariable) -> Result<Vector3>;
    fn float_prim_var(&self, pv: &PrimitiveVariable) -> Result<f64>;
    fn int_prim_var(&self, pv: &PrimitiveVariable) -> Result<i32>;
    fn string_prim_var<'a>(&self, pv: &'a PrimitiveVariable) -> Result<&'a str>;
    fn color_prim_var(&self, pv: &PrimitiveVariable) -> Result<Color3>;
    fn half_prim_var(&self, pv: &PrimitiveVariable) -> Result<f16>;
}

/// Evaluates queries against one primitive kind.
///
/// Queries that make no sense for a primitive kind return `NotImplemented`
/// rather than an approximation.
pub trait PrimitiveEvaluator: Send + Sync {
    type Primitive;
    type EvalResult: PrimitiveResult;

    fn primitive(&self) -> &Arc<Self::Primitive>;

    /// A new, unpopulated result bound to this evaluator.
    fn create_result(&self) -> Self::EvalResult;

    /// Check that `result` came from this evaluator and holds a location.
    fn validate_result(&self, result: &Self::EvalResult) -> Result<()>;

    fn surface_area(&self) -> Result<f64>;
    fn volume(&self) -> Result<f64>;
    fn center_of_gravity(&self) -> Result<Point3>;

    fn closest_point(&self, p: Point3, result: &mut Self::EvalResult) -> Result<()>;
    fn point_at_uv(&self, uv: Point2, result: &mut Self::EvalResult) -> Result<()>;

    fn intersection_point(
        &self,
        ray: &Ray,
        max_distance: f64,
        result: &mut Self::EvalResult,
    ) -> Result<()>;

    fn intersection_points(&self, ray: &Ray, max_distance: f64) -> Result<Vec<Self::EvalResult>>;
}
