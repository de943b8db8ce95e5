//! Ship use-case service.
//!
//! # Responsibility
//! - Enforce IMO uniqueness and owner existence before any ship write.
//! - Create ships together with their owner links in one storage transaction.
//! - Apply scalar updates, deletes and explicit link management.
//!
//! # Invariants
//! - A ship is only created when at least one owner id is given and every
//!   requested owner exists at validation time.
//! - Missing owner ids are reported deduplicated, in caller order.
//! - Scalar updates never touch owner links.
//! - Owners removed between validation and insert are skipped, not fatal;
//!   the ship is still created and the skip is logged.

use crate::model::entity::EntityKind;
use crate::model::owner::OwnerId;
use crate::model::ship::{Ship, ShipDetails, ShipDraft, ShipId, ShipLink};
use crate::repo::owner_repo::OwnerRepository;
use crate::repo::ship_repo::ShipRepository;
use crate::repo::RepoError;
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};
use std::collections::HashSet;

/// Ship service facade over ship and owner repositories.
pub struct ShipService<S: ShipRepository, O: OwnerRepository> {
    ships: S,
    owners: O,
}

impl<S: ShipRepository, O: OwnerRepository> ShipService<S, O> {
    /// Creates a service using the provided repository implementations.
    pub fn new(ships: S, owners: O) -> Self {
        Self { ships, owners }
    }

    pub fn list_ships(&self) -> ServiceResult<Vec<Ship>> {
        Ok(self.ships.get_all()?)
    }

    /// Loads one ship with its owners resolved.
    pub fn get_ship_details(&self, id: ShipId) -> ServiceResult<ShipDetails> {
        self.ships
            .get_with_links(id)?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Ship, id))
    }

    /// Creates one ship linked to every requested owner.
    ///
    /// Check order: IMO uniqueness, non-empty owner list, owner existence.
    /// Nothing is written unless all three pass.
    pub fn create_ship(&self, draft: ShipDraft, owner_ids: &[OwnerId]) -> ServiceResult<ShipDetails> {
        let draft = draft.validated()?;

        if self.ships.imo_exists(&draft.imo_number, None)? {
            return Err(ServiceError::DuplicateImo {
                imo: draft.imo_number,
                by_other_ship: false,
            });
        }

        if owner_ids.is_empty() {
            return Err(ServiceError::NoOwnersProvided);
        }

        let requested = dedup_preserving_order(owner_ids);
        let found: HashSet<OwnerId> = self
            .owners
            .get_by_ids(&requested)?
            .into_iter()
            .map(|owner| owner.id)
            .collect();
        let missing: Vec<OwnerId> = requested
            .iter()
            .copied()
            .filter(|id| !found.contains(id))
            .collect();
        if !missing.is_empty() {
            info!(
                "event=ship_create module=service status=rejected reason=unknown_owners missing_count={}",
                missing.len()
            );
            return Err(ServiceError::UnknownOwners(missing));
        }

        let inserted = self.ships.add_with_owner_links(&draft, &requested)?;
        if !inserted.skipped_owner_ids.is_empty() {
            warn!(
                "event=ship_create module=service status=degraded ship_id={} skipped_owner_ids={:?}",
                inserted.ship.id, inserted.skipped_owner_ids
            );
        }
        info!(
            "event=ship_create module=service status=ok ship_id={} linked={}",
            inserted.ship.id,
            inserted.linked.len()
        );

        self.ships
            .get_with_links(inserted.ship.id)?
            .ok_or(ServiceError::InconsistentState(
                "created ship not found in read-back",
            ))
    }

    /// Overwrites the scalar fields of one ship.
    pub fn update_ship(&self, id: ShipId, draft: ShipDraft) -> ServiceResult<Ship> {
        let draft = draft.validated()?;
        let current = self
            .ships
            .get_by_id(id)?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Ship, id))?;

        if draft.imo_number != current.imo_number
            && self.ships.imo_exists(&draft.imo_number, Some(id))?
        {
            return Err(ServiceError::DuplicateImo {
                imo: draft.imo_number,
                by_other_ship: true,
            });
        }

        let updated = self.ships.update(id, &draft).map_err(|err| match err {
            RepoError::NotFound { .. } => {
                warn!("event=ship_update module=service status=conflict ship_id={id}");
                ServiceError::ConcurrencyConflict(id)
            }
            RepoError::DuplicateImo(imo) => ServiceError::DuplicateImo {
                imo,
                by_other_ship: true,
            },
            other => other.into(),
        })?;
        info!("event=ship_update module=service status=ok ship_id={id}");
        Ok(updated)
    }

    /// Deletes one ship together with its owner links.
    pub fn delete_ship(&self, id: ShipId) -> ServiceResult<()> {
        if !self.ships.exists(id)? {
            return Err(ServiceError::not_found(EntityKind::Ship, id));
        }
        if !self.ships.delete(id)? {
            return Err(ServiceError::not_found(EntityKind::Ship, id));
        }
        info!("event=ship_delete module=service status=ok ship_id={id}");
        Ok(())
    }

    /// Links one existing owner to one existing ship. Re-linking is a no-op.
    pub fn link_owner(&self, ship_id: ShipId, owner_id: OwnerId) -> ServiceResult<()> {
        self.ensure_link_ends(ship_id, owner_id)?;
        let created = self.ships.link_owner(ShipLink { owner_id, ship_id })?;
        info!(
            "event=ship_link module=service status={} ship_id={ship_id} owner_id={owner_id}",
            if created { "ok" } else { "noop" }
        );
        Ok(())
    }

    /// Removes one owner link from a ship.
    pub fn unlink_owner(&self, ship_id: ShipId, owner_id: OwnerId) -> ServiceResult<()> {
        self.ensure_link_ends(ship_id, owner_id)?;
        if !self.ships.unlink_owner(ShipLink { owner_id, ship_id })? {
            return Err(ServiceError::LinkNotFound { owner_id, ship_id });
        }
        info!("event=ship_unlink module=service status=ok ship_id={ship_id} owner_id={owner_id}");
        Ok(())
    }

    fn ensure_link_ends(&self, ship_id: ShipId, owner_id: OwnerId) -> ServiceResult<()> {
        if !self.ships.exists(ship_id)? {
            return Err(ServiceError::not_found(EntityKind::Ship, ship_id));
        }
        if !self.owners.exists(owner_id)? {
            return Err(ServiceError::not_found(EntityKind::Owner, owner_id));
        }
        Ok(())
    }
}

fn dedup_preserving_order(ids: &[OwnerId]) -> Vec<OwnerId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
