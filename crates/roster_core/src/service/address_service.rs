//! Address use-case service.
//!
//! # Invariants
//! - `update` is a full replace: every field comes from the replacement,
//!   only the stored `id` survives.

use crate::model::address::{Address, AddressId, NewAddress};
use crate::model::ResourceKind;
use crate::repo::address_repo::AddressRepository;
use crate::service::{ServiceError, ServiceResult};
use log::{debug, info, warn};

/// Business logic for address records.
pub struct AddressService<R: AddressRepository> {
    repo: R,
}

impl<R: AddressRepository> AddressService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_all(&self) -> ServiceResult<Vec<Address>> {
        let addresses = self.repo.find_all()?;
        debug!(
            "event=address_list module=service status=ok count={}",
            addresses.len()
        );
        Ok(addresses)
    }

    /// Validates then stores a candidate; returns it with its assigned id.
    pub fn create(&self, candidate: &NewAddress) -> ServiceResult<Address> {
        candidate.validate().map_err(ServiceError::Validation)?;
        let created = self.repo.insert(candidate)?;
        info!(
            "event=address_create module=service status=ok id={}",
            created.id
        );
        Ok(created)
    }

    pub fn get_by_id(&self, id: AddressId) -> ServiceResult<Address> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| not_found(id))
    }

    /// Overwrites every field of the stored address with `replacement`.
    pub fn update(&self, id: AddressId, replacement: &NewAddress) -> ServiceResult<Address> {
        if !self.repo.exists_by_id(id)? {
            return Err(not_found(id));
        }
        replacement.validate().map_err(ServiceError::Validation)?;

        let address = replacement.clone().into_address(id);
        self.repo.update(&address)?;

        info!("event=address_update module=service status=ok id={id}");
        Ok(address)
    }

    pub fn delete_by_id(&self, id: AddressId) -> ServiceResult<()> {
        if !self.repo.exists_by_id(id)? {
            return Err(not_found(id));
        }
        self.repo.delete_by_id(id)?;
        info!("event=address_delete module=service status=ok id={id}");
        Ok(())
    }
}

fn not_found(id: AddressId) -> ServiceError {
    warn!("event=address_lookup module=service status=not_found id={id}");
    ServiceError::not_found(ResourceKind::Address, id)
}
