use bracket_data::DataError;
use thiserror::Error;

pub type BracketResult<T> = Result<T, BracketError>;

/// Usage errors raised by the bracket engine. None of them are transient:
/// the caller has to fix its inputs or call order.
#[derive(Debug, Error)]
pub enum BracketError {
    /// Malformed construction input or an illegal pick.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A round or stage was requested before the one it depends on.
    #[error("failed precondition: {0}")]
    FailedPrecondition(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("dataset error: {0}")]
    Dataset(#[from] DataError),
}

impl BracketError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        Self::FailedPrecondition(msg.into())
    }
}
