use crate::dto::OwnerDto;
use crate::model::owner::OwnerId;
use crate::model::ship::{Ship, ShipDetails, ShipDraft, ShipId};
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipDto {
    pub id: ShipId,
    pub name: String,
    pub imo_number: String,
    #[serde(rename = "type")]
    pub ship_type: String,
    pub tonnage: f64,
}

impl From<Ship> for ShipDto {
    fn from(value: Ship) -> Self {
        Self {
            id: value.id,
            name: value.name,
            imo_number: value.imo_number,
            ship_type: value.ship_type,
            tonnage: value.tonnage,
        }
    }
}

/// Ship with its owners, returned by `GET /ships/{id}` and `POST /ships`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipDetailsDto {
    pub id: ShipId,
    pub name: String,
    pub imo_number: String,
    #[serde(rename = "type")]
    pub ship_type: String,
    pub tonnage: f64,
    pub owners: Vec<OwnerDto>,
}

impl From<ShipDetails> for ShipDetailsDto {
    fn from(value: ShipDetails) -> Self {
        let ShipDetails { ship, owners } = value;
        Self {
            id: ship.id,
            name: ship.name,
            imo_number: ship.imo_number,
            ship_type: ship.ship_type,
            tonnage: ship.tonnage,
            owners: owners.into_iter().map(OwnerDto::from).collect(),
        }
    }
}

/// Body of `POST /ships`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateShipRequest {
    pub name: String,
    pub imo_number: String,
    #[serde(rename = "type")]
    pub ship_type: String,
    pub tonnage: f64,
    pub owner_ids: Vec<OwnerId>,
}

impl CreateShipRequest {
    /// Validates the scalar fields and splits the body into draft and owner ids.
    ///
    /// An empty `ownerIds` list passes here; `ShipService::create_ship`
    /// rejects it after the IMO check.
    pub fn into_parts(self) -> Result<(ShipDraft, Vec<OwnerId>), ValidationError> {
        let draft =
            ShipDraft::new(self.name, self.imo_number, self.ship_type, self.tonnage).validated()?;
        Ok((draft, self.owner_ids))
    }
}

/// Body of `PUT /ships/{id}`. Owner links are not part of an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateShipRequest {
    pub name: String,
    pub imo_number: String,
    #[serde(rename = "type")]
    pub ship_type: String,
    pub tonnage: f64,
}

impl UpdateShipRequest {
    pub fn into_draft(self) -> Result<ShipDraft, ValidationError> {
        ShipDraft::new(self.name, self.imo_number, self.ship_type, self.tonnage).validated()
    }
}
