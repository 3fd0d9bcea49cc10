pub mod budgeting;
pub mod engine;
pub mod error;
pub mod interest;
pub mod investing;
pub mod loans;
pub mod time_value;
pub mod types;
pub mod validation;

#[cfg(feature = "advice")]
pub mod advice;

pub use engine::{
    compute, compute_with_metadata, CalculationKind, CalculationRequest, CalculationResult,
};
pub use error::CalcError;
pub use types::*;

/// Standard result type for all finlit operations
pub type FinlitResult<T> = Result<T, CalcError>;
