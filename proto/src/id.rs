use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Store-assigned (or client-chosen) document identifier. Document stores key by
/// opaque strings, so this wraps one rather than a binary id.
#[derive(PartialEq, Eq, Hash, Clone, Ord, PartialOrd, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new() -> Self { DocumentId(Ulid::new().to_string()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl Default for DocumentId {
    fn default() -> Self { Self::new() }
}

impl From<&str> for DocumentId {
    fn from(val: &str) -> Self { DocumentId(val.to_string()) }
}

impl From<String> for DocumentId {
    fn from(val: String) -> Self { DocumentId(val) }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str { &self.0 }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Identifier of an acting user, assigned by the auth provider. Kept distinct
/// from [`DocumentId`] so a user id can never be used as a document key by accident.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Ord, PartialOrd, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str { &self.0 }
}

impl From<&str> for UserId {
    fn from(val: &str) -> Self { UserId(val.to_string()) }
}

impl From<String> for UserId {
    fn from(val: String) -> Self { UserId(val) }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}
