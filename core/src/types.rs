//! Domain DTOs for the todo backend.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! The backend owns identifiers. `TodoId` treats them as opaque text and
//! accepts either a JSON string or a JSON integer, since SQL backends commonly
//! hand out serial integers while the mock server hands out UUIDs.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque, backend-assigned todo identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TodoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => TodoId(s),
            Raw::Signed(n) => TodoId(n.to_string()),
            Raw::Unsigned(n) => TodoId(n.to_string()),
        })
    }
}

/// A single todo item returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(rename = "todoid")]
    pub id: TodoId,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for both create and update. The backend replaces both
/// fields on update, so neither is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoPayload {
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}
