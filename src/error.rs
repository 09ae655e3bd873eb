//! Error taxonomy for the order engine.
//!
//! Nothing here is fatal: every failure is reported to the operator for a
//! retry. `StorageError` is the sole commit point — a submit that fails
//! before the store returns leaves no trace anywhere.

use thiserror::Error;

/// A rejected operator action. The register is never mutated when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("order number must be between 0 and 1000, got {0}")]
    OrderNumberOutOfRange(u32),
    #[error("grouping needs at least two entries")]
    GroupTooSmall,
    #[error("selected row is not a group")]
    NotAGroup,
    #[error("nothing to submit")]
    EmptyTicket,
}

/// A persistence write failure. Submit is aborted before any print attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("storage failure: {0}")]
pub struct StorageError(pub String);

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError(err.to_string())
    }
}

/// A print failure after a successful save. The persisted order keeps its
/// identity with status `PrintFailed`; the ticket stays intact for a retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("print failure: {0}")]
pub struct PrintError(pub String);

/// Everything a submit can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Print(#[from] PrintError),
}
