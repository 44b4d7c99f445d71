//! Query evaluation over curve datasets.
//!
//! An evaluator is built once per dataset and answers many queries. Each
//! query fills a caller-owned result, which then reconstructs positions,
//! tangents, and attribute values without redoing the segment search.

pub mod curve;
pub mod curves;
pub mod evaluator;
pub mod primvar;
pub mod tessellate;

pub use curve::{Curve, CurveView};
pub use curves::{CurvesEvaluatorResult, CurvesPrimitiveEvaluator};
pub use evaluator::{PrimitiveEvaluator, PrimitiveResult};
pub use primvar::PrimVarValue;
