use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurvesError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Curve index {index} out of range for {count} curves")]
    CurveIndexOutOfRange { index: usize, count: usize },

    #[error("Result was not created by this evaluator")]
    ForeignResult,

    #[error("Result has not been populated by a query")]
    UnpopulatedResult,

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Primitive variable \"{name}\" holds {found} data, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Primitive variable \"{name}\" has unsupported interpolation {interpolation}")]
    UnsupportedInterpolation {
        name: String,
        interpolation: &'static str,
    },

    #[error("Invalid primitive variable \"{name}\": {reason}")]
    InvalidVariable { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CurvesError>;
