//! Ship and ship-link domain model.
//!
//! # Responsibility
//! - Define the persisted ship record and its owner-resolved detail view.
//! - Define the join row linking owners and ships.
//!
//! # Invariants
//! - `imo_number` is exactly seven ASCII digits and unique across all ships.
//! - `tonnage` is finite and strictly positive.
//! - Scalar updates never touch a ship's owner links.

use crate::model::owner::{Owner, OwnerId};
use crate::model::validation::{
    imo_number, required_text, tonnage, ValidationError, NAME_MAX_CHARS, SHIP_TYPE_MAX_CHARS,
};
use serde::{Deserialize, Serialize};

/// Store-generated ship identity.
pub type ShipId = i64;

/// A persisted ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub name: String,
    pub imo_number: String,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub ship_type: String,
    pub tonnage: f64,
}

/// Full scalar field set of a ship, used for both create and update.
///
/// Update writes the whole set at once; there is no partial patch.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipDraft {
    pub name: String,
    pub imo_number: String,
    pub ship_type: String,
    pub tonnage: f64,
}

impl ShipDraft {
    pub fn new(
        name: impl Into<String>,
        imo_number: impl Into<String>,
        ship_type: impl Into<String>,
        tonnage: f64,
    ) -> Self {
        Self {
            name: name.into(),
            imo_number: imo_number.into(),
            ship_type: ship_type.into(),
            tonnage,
        }
    }

    /// Returns a copy with normalized fields, or the first rejected field.
    ///
    /// Fields are checked in wire order: name, imoNumber, type, tonnage.
    pub fn validated(&self) -> Result<Self, ValidationError> {
        let name = required_text("name", &self.name, NAME_MAX_CHARS)?;
        imo_number(&self.imo_number)?;
        let ship_type = required_text("type", &self.ship_type, SHIP_TYPE_MAX_CHARS)?;
        tonnage(self.tonnage)?;
        Ok(Self {
            name,
            imo_number: self.imo_number.clone(),
            ship_type,
            tonnage: self.tonnage,
        })
    }
}

/// A ship with its owners resolved through `ship_owners`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipDetails {
    pub ship: Ship,
    /// Owners sorted by id ascending.
    pub owners: Vec<Owner>,
}

impl ShipDetails {
    pub fn owner_ids(&self) -> Vec<OwnerId> {
        self.owners.iter().map(|owner| owner.id).collect()
    }
}

/// Join row recording that an owner holds a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipLink {
    pub owner_id: OwnerId,
    pub ship_id: ShipId,
}
