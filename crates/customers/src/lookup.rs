//! Ownership-enforcing lookup of stored customer addresses.

use std::sync::Arc;

use thiserror::Error;

use checkout_core::{CustomerAddressId, CustomerId, StorageError};

use crate::CustomerAddress;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressLookupError {
    /// Missing and foreign addresses are reported identically so callers
    /// cannot probe other customers' address ids.
    #[error("could not find an address with ID \"{0}\"")]
    NotFound(CustomerAddressId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Read access to the address book store (external collaborator).
pub trait CustomerAddressRepository: Send + Sync {
    fn find_by_id(&self, id: CustomerAddressId) -> Result<Option<CustomerAddress>, StorageError>;
}

impl<R> CustomerAddressRepository for Arc<R>
where
    R: CustomerAddressRepository + ?Sized,
{
    fn find_by_id(&self, id: CustomerAddressId) -> Result<Option<CustomerAddress>, StorageError> {
        (**self).find_by_id(id)
    }
}

/// Fetches a stored address on behalf of a customer.
pub trait CustomerAddressLookup: Send + Sync {
    fn fetch(
        &self,
        address_id: CustomerAddressId,
        customer_id: CustomerId,
    ) -> Result<CustomerAddress, AddressLookupError>;
}

/// [`CustomerAddressLookup`] over a [`CustomerAddressRepository`].
#[derive(Debug, Clone)]
pub struct RepositoryAddressLookup<R> {
    repository: R,
}

impl<R: CustomerAddressRepository> RepositoryAddressLookup<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: CustomerAddressRepository> CustomerAddressLookup for RepositoryAddressLookup<R> {
    fn fetch(
        &self,
        address_id: CustomerAddressId,
        customer_id: CustomerId,
    ) -> Result<CustomerAddress, AddressLookupError> {
        match self.repository.find_by_id(address_id)? {
            Some(address) if address.is_owned_by(customer_id) => Ok(address),
            Some(address) => {
                tracing::warn!(
                    %address_id,
                    requested_by = %customer_id,
                    owner = %address.customer_id,
                    "customer address requested by non-owner"
                );
                Err(AddressLookupError::NotFound(address_id))
            }
            None => Err(AddressLookupError::NotFound(address_id)),
        }
    }
}
