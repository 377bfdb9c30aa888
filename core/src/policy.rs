use thiserror::Error;

use easel_proto::{Identity, Project};

/// The result of a denied policy check. Denial is not a pipeline error - the
/// applier turns it into a silent no-op.
#[derive(Debug, Error)]
pub enum AccessDenied {
    #[error("access denied by policy: {0}")]
    ByPolicy(&'static str),
}

/// Decides whether a submitting identity may mutate a project. The applier
/// calls this against the project document re-read inside the transaction,
/// never against an earlier snapshot.
pub trait PolicyAgent: Send + Sync + 'static {
    fn check_write(&self, submitter: &Identity, project: &Project) -> Result<(), AccessDenied>;
}

/// Owner-or-editor rule: authorized iff the submitter is the project owner, or
/// has an email listed in the project's editors.
#[derive(Clone, Default)]
pub struct ProjectAclAgent;

impl ProjectAclAgent {
    pub fn new() -> Self { Self }
}

impl PolicyAgent for ProjectAclAgent {
    fn check_write(&self, submitter: &Identity, project: &Project) -> Result<(), AccessDenied> {
        if submitter.id == project.owner.id {
            return Ok(());
        }
        if let Some(email) = &submitter.email {
            if project.editors.iter().any(|e| e == email) {
                return Ok(());
            }
        }
        Err(AccessDenied::ByPolicy("submitter is neither owner nor editor"))
    }
}

/// A policy agent that allows all writes. Test use only.
#[derive(Clone, Default)]
pub struct PermissiveAgent;

impl PermissiveAgent {
    pub fn new() -> Self { Self }
}

impl PolicyAgent for PermissiveAgent {
    fn check_write(&self, _submitter: &Identity, _project: &Project) -> Result<(), AccessDenied> { Ok(()) }
}
