use easel_proto::DocumentId;
use thiserror::Error;

/// Errors surfaced by a [`crate::storage::DocumentStore`] implementation.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Optimistic commit lost a race with another transaction. Retriable.
    #[error("transaction conflict")]
    Conflict,
    #[error("storage error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl StorageError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self { StorageError::Backend(Box::new(err)) }
}

/// Error type for staging reads. Any of these aborts the whole load; the
/// pipeline never applies a partially loaded change request.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("change request {0} not found")]
    NotFound(DocumentId),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("corrupt staging record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Error type for the transactional apply. Authorization rejection and a
/// missing target project are deliberately NOT errors - see
/// [`crate::applier::ApplyOutcome`].
#[derive(Error, Debug)]
pub enum MutationError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    /// Conflict retries exceeded the attempt budget. The invocation fails and
    /// the change request is left staged for retry.
    #[error("commit conflict budget exhausted after {0} attempts")]
    ConflictBudgetExhausted(u32),
    #[error("corrupt target document {0}: {1}")]
    CorruptTarget(DocumentId, serde_json::Error),
}

/// Error type for one pipeline invocation. Cleanup failures are logged rather
/// than surfaced here, since the mutation is already committed by then.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("load failed: {0}")]
    Load(#[from] RetrievalError),
    #[error("apply failed: {0}")]
    Apply(#[from] MutationError),
}
