pub mod amortization;
pub mod comparison;
pub mod effective_rate;
pub mod error;
pub mod types;

pub use error::LoanScenarioError;
pub use types::*;

/// Standard result type for all loan-scenario operations
pub type LoanScenarioResult<T> = Result<T, LoanScenarioError>;
