use std::collections::HashMap;
use std::sync::RwLock;

use checkout_auth::{AccountStatus, AccountStatusSource};
use checkout_core::{CustomerAddressId, CustomerId, StorageError};
use checkout_customers::{CustomerAccount, CustomerAddress, CustomerAddressRepository};

/// In-memory customer accounts and address books for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    accounts: RwLock<HashMap<CustomerId, CustomerAccount>>,
    addresses: RwLock<HashMap<CustomerAddressId, CustomerAddress>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_account(&self, account: CustomerAccount) -> Result<(), StorageError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StorageError::unavailable("customer account store lock poisoned"))?;
        accounts.insert(account.id, account);
        Ok(())
    }

    pub fn upsert_address(&self, address: CustomerAddress) -> Result<(), StorageError> {
        let mut addresses = self
            .addresses
            .write()
            .map_err(|_| StorageError::unavailable("customer address store lock poisoned"))?;
        addresses.insert(address.id, address);
        Ok(())
    }
}

impl AccountStatusSource for InMemoryCustomerStore {
    fn account_status(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<AccountStatus>, StorageError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StorageError::unavailable("customer account store lock poisoned"))?;
        Ok(accounts.get(&customer_id).map(CustomerAccount::status))
    }
}

impl CustomerAddressRepository for InMemoryCustomerStore {
    fn find_by_id(&self, id: CustomerAddressId) -> Result<Option<CustomerAddress>, StorageError> {
        let addresses = self
            .addresses
            .read()
            .map_err(|_| StorageError::unavailable("customer address store lock poisoned"))?;
        Ok(addresses.get(&id).cloned())
    }
}
