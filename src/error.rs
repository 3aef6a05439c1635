use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoanError {
    #[error("invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("date error: {0}")]
    DateError(String),
}

impl LoanError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        LoanError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type LoanResult<T> = Result<T, LoanError>;
