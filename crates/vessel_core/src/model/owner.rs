//! Owner domain model.
//!
//! # Invariants
//! - `name` is trimmed, non-empty and at most 100 characters.

use crate::model::validation::{required_text, ValidationError, NAME_MAX_CHARS};
use serde::{Deserialize, Serialize};

/// Store-generated owner identity.
pub type OwnerId = i64;

/// A persisted owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
}

/// Owner input before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerDraft {
    pub name: String,
}

impl OwnerDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns a copy with normalized fields, or the first rejected field.
    pub fn validated(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", &self.name, NAME_MAX_CHARS)?,
        })
    }
}
