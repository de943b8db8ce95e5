//! Owner use-case service.
//!
//! # Responsibility
//! - Provide owner list/get/create/delete APIs.
//!
//! # Invariants
//! - Deleting an owner removes its ship links and leaves every ship intact.

use crate::model::entity::EntityKind;
use crate::model::owner::{Owner, OwnerDraft, OwnerId};
use crate::repo::owner_repo::OwnerRepository;
use crate::service::{ServiceError, ServiceResult};
use log::info;

/// Owner service facade over repository implementations.
pub struct OwnerService<R: OwnerRepository> {
    repo: R,
}

impl<R: OwnerRepository> OwnerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_owners(&self) -> ServiceResult<Vec<Owner>> {
        Ok(self.repo.get_all()?)
    }

    /// Gets one owner, failing with `NotFound` when absent.
    pub fn get_owner(&self, id: OwnerId) -> ServiceResult<Owner> {
        self.repo
            .get_by_id(id)?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Owner, id))
    }

    pub fn create_owner(&self, draft: OwnerDraft) -> ServiceResult<Owner> {
        let draft = draft.validated()?;
        let owner = self.repo.add(&draft)?;
        info!(
            "event=owner_create module=service status=ok owner_id={}",
            owner.id
        );
        Ok(owner)
    }

    /// Deletes one owner together with its ship links.
    pub fn delete_owner(&self, id: OwnerId) -> ServiceResult<()> {
        if !self.repo.exists(id)? {
            return Err(ServiceError::not_found(EntityKind::Owner, id));
        }
        if !self.repo.delete(id)? {
            // Removed by a concurrent request after the existence check.
            return Err(ServiceError::not_found(EntityKind::Owner, id));
        }
        info!("event=owner_delete module=service status=ok owner_id={id}");
        Ok(())
    }
}
