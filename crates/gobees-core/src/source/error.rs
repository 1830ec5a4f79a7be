use thiserror::Error;

/// Failures surfaced by the backing store and the repository.
///
/// There is no fatal category: every failure is a negative outcome of an
/// asynchronous operation and is recovered at the presenter boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The read failed or the requested entity does not exist.
    #[error("requested data is not available")]
    NotAvailable,

    /// A write or delete against the backing store failed.
    #[error("operation failed: {0}")]
    OperationFailed(String),
}
