use crate::model::owner::{Owner, OwnerDraft, OwnerId};
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDto {
    pub id: OwnerId,
    pub name: String,
}

impl From<Owner> for OwnerDto {
    fn from(value: Owner) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

/// Body of `POST /owners`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOwnerRequest {
    pub name: String,
}

impl CreateOwnerRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn into_draft(self) -> Result<OwnerDraft, ValidationError> {
        OwnerDraft::new(self.name).validated()
    }
}
