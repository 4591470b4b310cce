use thiserror::Error;

#[derive(Debug, Error)]
pub enum FundEconError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FundEconError {
    fn from(e: serde_json::Error) -> Self {
        FundEconError::SerializationError(e.to_string())
    }
}
