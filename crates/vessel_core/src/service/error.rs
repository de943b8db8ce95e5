use crate::model::entity::EntityKind;
use crate::model::owner::OwnerId;
use crate::model::ship::ShipId;
use crate::model::validation::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Named failure of a registry use-case.
///
/// `Display` output is the client-facing message and is passed through the
/// HTTP boundary verbatim.
#[derive(Debug)]
pub enum ServiceError {
    /// Target entity does not exist.
    NotFound { kind: EntityKind, id: i64 },
    /// Owner/ship link does not exist.
    LinkNotFound { owner_id: OwnerId, ship_id: ShipId },
    /// IMO number already held by a ship. `by_other_ship` selects the
    /// update wording.
    DuplicateImo { imo: String, by_other_ship: bool },
    /// Ship creation requested without any owner.
    NoOwnersProvided,
    /// Requested owner ids that do not resolve, in caller order.
    UnknownOwners(Vec<OwnerId>),
    /// Ship row vanished between read and write.
    ConcurrencyConflict(ShipId),
    /// Input field rejected.
    Validation(ValidationError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
    /// Storage-layer failure.
    Storage(RepoError),
}

impl ServiceError {
    pub fn not_found(kind: EntityKind, id: i64) -> Self {
        Self::NotFound { kind, id }
    }

    /// Whether this failure means "the addressed resource does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::LinkNotFound { .. })
    }

    /// Whether this failure is the caller's fault (bad input or constraint).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::InconsistentState(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} with ID {id} not found."),
            Self::LinkNotFound { owner_id, ship_id } => write!(
                f,
                "Owner with ID {owner_id} is not linked to ship with ID {ship_id}."
            ),
            Self::DuplicateImo {
                imo,
                by_other_ship: false,
            } => write!(f, "Ship with IMO Number {imo} already exists."),
            Self::DuplicateImo {
                imo,
                by_other_ship: true,
            } => write!(f, "Another ship with IMO Number {imo} already exists."),
            Self::NoOwnersProvided => write!(f, "At least one owner ID must be provided."),
            Self::UnknownOwners(ids) => {
                let listed = ids
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "The following owner IDs do not exist: {listed}")
            }
            Self::ConcurrencyConflict(_) => {
                write!(f, "Could not update the ship due to a concurrency conflict.")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent registry state: {details}"),
            Self::Storage(err) => write!(f, "storage unavailable: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            RepoError::DuplicateImo(imo) => Self::DuplicateImo {
                imo,
                by_other_ship: false,
            },
            other => Self::Storage(other),
        }
    }
}
