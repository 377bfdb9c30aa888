pub mod applier;
pub mod cleanup;
pub mod error;
pub mod flatten;
pub mod loader;
pub mod pipeline;
pub mod policy;
pub mod staging;
pub mod storage;

pub use applier::{ApplyOutcome, SkipReason};
pub use pipeline::SyncPipeline;
pub use policy::{PermissiveAgent, PolicyAgent, ProjectAclAgent};

pub use easel_proto as proto;
