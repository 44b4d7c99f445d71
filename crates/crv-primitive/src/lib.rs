//! The curve dataset consumed by evaluators: per-curve vertex counts, the
//! shared cubic basis, and flattened primitive variables.

pub mod basis;
pub mod curves;
pub mod variable;

pub use basis::{BasisKind, CubicBasis, Stencil};
pub use curves::{CurvesPrimitive, POSITION};
pub use variable::{DataType, Interpolation, PrimitiveVariable, VariableData};

pub use half::f16;
