pub mod error;
pub mod fees;
pub mod types;

pub use error::FundEconError;
pub use types::*;

/// Standard result type for all fund-econ operations
pub type FundEconResult<T> = Result<T, FundEconError>;
