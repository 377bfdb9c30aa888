//! Layout of the staging tree a client writes before the pipeline runs:
//!
//! ```text
//! ChangeRequests/{id}                          header
//! ChangeRequests/{id}/Payload/{item}           payload item (entityKind, deletes)
//! ChangeRequests/{id}/Payload/{item}/Sets/{d}  full document to set
//! ChangeRequests/{id}/Payload/{item}/Updates/{d}  { update: <nested partial> }
//! ```

use easel_proto::{CollectionPath, DocumentId};

pub const CHANGE_REQUESTS: &str = "ChangeRequests";
pub const PAYLOAD: &str = "Payload";
pub const SETS: &str = "Sets";
pub const UPDATES: &str = "Updates";

pub fn change_requests() -> CollectionPath { CollectionPath::fixed_name(CHANGE_REQUESTS) }

pub fn payload(request: &DocumentId) -> CollectionPath { change_requests().child(request, PAYLOAD) }

pub fn sets(request: &DocumentId, item: &DocumentId) -> CollectionPath { payload(request).child(item, SETS) }

pub fn updates(request: &DocumentId, item: &DocumentId) -> CollectionPath { payload(request).child(item, UPDATES) }
