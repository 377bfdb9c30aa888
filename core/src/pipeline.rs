use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    applier::{self, ApplyOutcome},
    cleanup,
    error::PipelineError,
    loader,
    policy::PolicyAgent,
    storage::DocumentStore,
};
use easel_proto::DocumentId;

/// Entry point for the change request synchronization pipeline. Invoked once
/// per staged change request by the store's creation trigger; delivery is
/// at-least-once, so the whole flow is idempotent under replay. Invocations
/// for distinct requests may run concurrently with no coordination beyond the
/// store's transactions.
pub struct SyncPipeline<S, P> {
    store: Arc<S>,
    policy: P,
}

impl<S: DocumentStore, P: PolicyAgent> SyncPipeline<S, P> {
    pub fn new(store: Arc<S>, policy: P) -> Self { Self { store, policy } }

    pub fn store(&self) -> &Arc<S> { &self.store }

    /// Load the staged aggregate, apply it in one transaction, then reclaim
    /// the staging tree. Load and transaction failures propagate with cleanup
    /// skipped, so the request stays staged for inspection/retry. A silent
    /// drop (unauthorized or missing target) still cleans up.
    pub async fn handle_change_request(&self, id: &DocumentId) -> Result<ApplyOutcome, PipelineError> {
        let request = match loader::load_change_request(self.store.as_ref(), id).await {
            Ok(request) => request,
            Err(err) => {
                error!("failed to load change request {id}: {err}");
                return Err(err.into());
            }
        };

        let outcome = applier::apply(self.store.as_ref(), &self.policy, &request).await?;
        match outcome {
            ApplyOutcome::Applied => info!("applied change request {id} ({} payload items)", request.payload.len()),
            ApplyOutcome::Skipped(reason) => info!("dropped change request {id}: {reason:?}"),
        }

        // not part of the applier's transaction; failure leaves residual
        // staging records but never rolls back the committed mutation
        if let Err(err) = cleanup::cleanup_change_request(self.store.as_ref(), id).await {
            warn!("cleanup of change request {id} left residual staging records: {err}");
        }

        Ok(outcome)
    }
}
