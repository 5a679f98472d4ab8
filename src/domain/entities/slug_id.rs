//! Opaque slug identifier.
//!
//! Identifiers are BSON ObjectIds so records written by earlier deployments
//! keep parsing. The textual form is 24 lowercase hex characters.

use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;

/// Error returned when a string is not a valid [`SlugId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid slug id '{input}': expected 24 hex characters")]
pub struct ParseSlugIdError {
    pub input: String,
}

/// Unique, immutable identifier of a slug record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlugId(ObjectId);

impl SlugId {
    /// Generates a fresh identifier without consulting the store.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }

    /// Returns the 24-character lowercase hex form.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<ObjectId> for SlugId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for SlugId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for SlugId {
    type Err = ParseSlugIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| ParseSlugIdError {
                input: s.to_string(),
            })
    }
}
