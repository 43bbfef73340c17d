//! Store-generated identifiers for todo records.
//!
//! # Design
//! A `TodoId` is a MongoDB `ObjectId`: 12 bytes, rendered on the wire as 24
//! hex characters. Identifiers arriving in request paths are trimmed before
//! parsing; nothing else about them is normalised.

use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// Opaque, immutable identifier of a persisted todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(ObjectId);

impl TodoId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parse an identifier taken from a request path.
    ///
    /// Surrounding whitespace is ignored. The remainder must be exactly 24
    /// hex digits, otherwise `TodoError::InvalidId` is returned.
    pub fn parse(raw: &str) -> Result<Self, TodoError> {
        let trimmed = raw.trim();
        ObjectId::parse_str(trimmed)
            .map(Self)
            .map_err(|_| TodoError::InvalidId(trimmed.to_string()))
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for TodoId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for TodoId {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}
