use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// The acting user behind a change request, as recorded by the client at
/// staging time. `email` is optional because some auth providers don't supply one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<UserId>, email: Option<&str>) -> Self {
        Identity { id: id.into(), email: email.map(|e| e.to_string()) }
    }
}
