pub mod error;
pub mod id;
pub mod tolerance;
pub mod traits;

pub use error::{CurvesError, Result};
pub use id::EvaluatorId;
pub use tolerance::Tolerance;
