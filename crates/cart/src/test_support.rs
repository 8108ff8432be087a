//! Shared fixtures for the cart crate's unit tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;

use checkout_auth::{AccountStatus, AccountStatusSource, CustomerAccountGuard};
use checkout_core::{Aggregate, CartId, CustomerAddressId, CustomerId, PostalAddress, StorageError};
use checkout_customers::{
    AddressLookupError, CustomerAddress, CustomerAddressLookup, CustomerAddressRepository,
    RepositoryAddressLookup,
};

use crate::{
    AddShippingAddress, AddressInput, AggregateAddressAssigner, BillingAddressResolver, Cart,
    CartAddress, CartAddressFactory, CartCommand, CreateCart, SetBillingAddressOnCart,
};

pub const OWNER: CustomerId = CustomerId::new(100);
pub const OTHER_CUSTOMER: CustomerId = CustomerId::new(200);
pub const OWNED_ADDRESS: CustomerAddressId = CustomerAddressId::new(1);
pub const FOREIGN_ADDRESS: CustomerAddressId = CustomerAddressId::new(2);

pub fn postal(city: &str) -> PostalAddress {
    PostalAddress {
        firstname: "Wangari".to_string(),
        lastname: "Maathai".to_string(),
        company: None,
        street: vec!["1 Green Belt Rd".to_string()],
        city: city.to_string(),
        region: None,
        postcode: Some("00100".to_string()),
        country_code: "KE".to_string(),
        telephone: Some("+254 20 000000".to_string()),
    }
}

pub fn cart_address(city: &str) -> CartAddress {
    CartAddress::new(postal(city))
}

pub fn complete_fields(city: &str) -> AddressInput {
    AddressInput {
        firstname: Some("Chinua".to_string()),
        lastname: Some("Achebe".to_string()),
        company: None,
        street: Some(vec!["4 Things Fall Apart Ave".to_string()]),
        city: Some(city.to_string()),
        region: None,
        postcode: Some("100001".to_string()),
        country_code: Some("NG".to_string()),
        telephone: Some("+234 1 000 0000".to_string()),
    }
}

pub fn stored_address(id: CustomerAddressId, owner: CustomerId, city: &str) -> CustomerAddress {
    CustomerAddress::new(id, owner, postal(city))
}

/// Created, active cart holding `shipping` distinct shipping addresses.
pub fn active_cart(shipping: usize) -> Cart {
    let cart_id = CartId::new();
    let mut cart = Cart::empty(cart_id);
    cart.execute(&CartCommand::CreateCart(CreateCart {
        cart_id,
        customer_id: Some(OWNER),
        occurred_at: Utc::now(),
    }))
    .unwrap();

    for n in 0..shipping {
        cart.execute(&CartCommand::AddShippingAddress(AddShippingAddress {
            cart_id,
            address: cart_address(&format!("Shipping {n}")),
            occurred_at: Utc::now(),
        }))
        .unwrap();
    }
    cart
}

/// Every customer id is an active account.
pub struct EveryoneActive;

impl AccountStatusSource for EveryoneActive {
    fn account_status(&self, _: CustomerId) -> Result<Option<AccountStatus>, StorageError> {
        Ok(Some(AccountStatus::Active))
    }
}

pub struct AddressBook(HashMap<CustomerAddressId, CustomerAddress>);

impl AddressBook {
    pub fn seeded() -> Self {
        let mut rows = HashMap::new();
        rows.insert(OWNED_ADDRESS, stored_address(OWNED_ADDRESS, OWNER, "Nairobi"));
        rows.insert(FOREIGN_ADDRESS, stored_address(FOREIGN_ADDRESS, OTHER_CUSTOMER, "Mombasa"));
        Self(rows)
    }
}

impl CustomerAddressRepository for AddressBook {
    fn find_by_id(&self, id: CustomerAddressId) -> Result<Option<CustomerAddress>, StorageError> {
        Ok(self.0.get(&id).cloned())
    }
}

/// Lookup that records how often it was consulted.
#[derive(Clone)]
pub struct CountingLookup {
    inner: Arc<RepositoryAddressLookup<AddressBook>>,
    calls: Arc<AtomicUsize>,
}

impl Default for CountingLookup {
    fn default() -> Self {
        Self {
            inner: Arc::new(RepositoryAddressLookup::new(AddressBook::seeded())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl CountingLookup {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CustomerAddressLookup for CountingLookup {
    fn fetch(
        &self,
        address_id: CustomerAddressId,
        customer_id: CustomerId,
    ) -> Result<CustomerAddress, AddressLookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(address_id, customer_id)
    }
}

pub type TestResolver = BillingAddressResolver<
    CustomerAccountGuard<EveryoneActive>,
    CountingLookup,
    CartAddressFactory,
>;

pub fn resolver() -> (TestResolver, CountingLookup) {
    let lookup = CountingLookup::default();
    let resolver = BillingAddressResolver::new(
        CustomerAccountGuard::new(EveryoneActive),
        lookup.clone(),
        CartAddressFactory::default(),
    );
    (resolver, lookup)
}

pub type TestUseCase = SetBillingAddressOnCart<
    CustomerAccountGuard<EveryoneActive>,
    CountingLookup,
    CartAddressFactory,
    AggregateAddressAssigner,
>;

/// Use case wired with the seeded book, plus the stored address owned by [`OWNER`].
pub fn use_case() -> (TestUseCase, CustomerAddress) {
    let (resolver, _) = resolver();
    let stored = stored_address(OWNED_ADDRESS, OWNER, "Nairobi");
    (SetBillingAddressOnCart::new(resolver, AggregateAddressAssigner), stored)
}
