use bookstore_http::AppError;
use thiserror::Error;

/// A request field failed its presence or range check
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    message: &'static str,
}

impl ValidationError {
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::bad_request(err.message)
    }
}

/// Field checks run on a decoded request before any conversion or storage
/// call. Reports the first failing field.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Fail with `message` unless `condition` holds
pub(crate) fn ensure(condition: bool, message: &'static str) -> Result<(), ValidationError> {
    if condition {
        Ok(())
    } else {
        Err(ValidationError::new(message))
    }
}
