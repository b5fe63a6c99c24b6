use thiserror::Error;

/// Errors raised by the scoring core.
///
/// `Configuration` means the standards table has no entry for what was asked;
/// it is never caused by a candidate's numbers. `InvalidInput` covers values
/// that cannot be scored at all (NaN, infinities, out-of-range academic scores).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl EvalError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, EvalError::Configuration(_))
    }
}

pub type EvalResult<T> = std::result::Result<T, EvalError>;

/// Reject NaN and infinities before they reach any arithmetic.
pub(crate) fn ensure_finite(what: &str, value: f64) -> EvalResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            what, value
        )))
    }
}
