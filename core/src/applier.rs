//! Applies every set/update/delete of a loaded change request as one atomic
//! transaction against the target collections. Re-runnable by construction:
//! the target project is re-read fresh on every attempt, all writes are
//! absolute-valued, and nothing outside the transaction is touched.

use tracing::debug;

use crate::{
    error::{MutationError, StorageError},
    flatten::flatten_update,
    policy::PolicyAgent,
    storage::{DocumentStore, StoreTransaction},
};
use easel_proto::{ChangeRequest, EntityKind, Project};

/// Conflicting commits are retried with a fresh read of the target project.
/// Past this budget the invocation fails and the request stays staged.
const MAX_COMMIT_ATTEMPTS: u32 = 5;

/// Why a change request was dropped without writing anything. Both cases exit
/// the transaction successfully and still clean up the staging tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ProjectNotFound,
    AccessDenied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// All payload items landed in one commit.
    Applied,
    /// Deliberate silent drop - observably identical to success except that no
    /// target document changed.
    Skipped(SkipReason),
}

pub async fn apply<S: DocumentStore + ?Sized, P: PolicyAgent>(
    store: &S,
    policy: &P,
    request: &ChangeRequest,
) -> Result<ApplyOutcome, MutationError> {
    let mut attempts = 0;
    loop {
        attempts += 1;
        let mut trx = store.begin().await?;
        let outcome = apply_in(trx.as_mut(), policy, request).await?;
        match trx.commit().await {
            Ok(()) => return Ok(outcome),
            Err(StorageError::Conflict) if attempts < MAX_COMMIT_ATTEMPTS => {
                debug!("commit conflict for change request {}, attempt {attempts}, retrying", request.id);
                continue;
            }
            Err(StorageError::Conflict) => return Err(MutationError::ConflictBudgetExhausted(attempts)),
            Err(err) => return Err(err.into()),
        }
    }
}

/// One attempt of the transaction body. Reads first, then buffered writes, per
/// the transaction contract.
async fn apply_in<P: PolicyAgent>(
    trx: &mut (dyn StoreTransaction + '_),
    policy: &P,
    request: &ChangeRequest,
) -> Result<ApplyOutcome, MutationError> {
    let projects = EntityKind::Project.collection();
    let Some(project_doc) = trx.get(&projects, &request.project_id).await? else {
        return Ok(ApplyOutcome::Skipped(SkipReason::ProjectNotFound));
    };
    let project: Project = project_doc.parse().map_err(|e| MutationError::CorruptTarget(request.project_id.clone(), e))?;

    if policy.check_write(&request.submitter, &project).is_err() {
        return Ok(ApplyOutcome::Skipped(SkipReason::AccessDenied));
    }

    // note: request.change_marker is carried but not compared against the
    // target - stale-update rejection is not implemented
    for item in &request.payload {
        let path = item.entity_kind.collection();
        debug!(
            "change request {}: {} sets, {} updates, {} deletes under {}",
            request.id,
            item.sets.len(),
            item.updates.len(),
            item.deletes.len(),
            path
        );

        for set in &item.sets {
            trx.set(&path, set.clone());
        }
        for update in &item.updates {
            trx.update(&path, &update.id, flatten_update(&update.update));
        }
        for id in &item.deletes {
            trx.delete(&path, id);
        }
    }

    Ok(ApplyOutcome::Applied)
}
