//! Checkout application service.
//!
//! Orchestrates load → decide/apply → save for cart operations. The cart
//! aggregate stays pure; persistence and concurrency checks live here.
//!
//! ```text
//! load cart (version v)
//!   ↓
//! run use case / command on the loaded copy
//!   ↓
//! save with ExpectedVersion::Exact(v)   (stale → Concurrency)
//! ```
//!
//! A failed step never reaches `save`, so the stored cart is only replaced by
//! a fully updated one.

use std::sync::Arc;

use thiserror::Error;

use checkout_auth::{AccountGuard, CustomerAccountGuard, IdentityContext};
use checkout_cart::{
    AddressMaterializer, AggregateAddressAssigner, BillingAddressError, BillingAddressInput,
    BillingAddressResolver, Cart, CartAddressAssigner, CartAddressFactory, CartCommand,
    SetBillingAddressOnCart,
};
use checkout_core::{Aggregate, AggregateRoot, CartId, DomainError, ExpectedVersion, StorageError};
use checkout_customers::{CustomerAddressLookup, RepositoryAddressLookup};

use crate::config::CheckoutConfig;
use crate::store::{CartStore, InMemoryCartStore, InMemoryCustomerStore};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("could not find a cart with ID \"{0}\"")]
    CartNotFound(CartId),

    /// The cart changed between load and save; reload and retry.
    #[error("concurrent cart update: {0}")]
    Concurrency(String),

    /// The cart refused the command; retrying will not help.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    BillingAddress(#[from] BillingAddressError),

    #[error(transparent)]
    Store(StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Conflict(msg) => ServiceError::Concurrency(msg),
            other => ServiceError::Store(other),
        }
    }
}


/// Cart-facing entry point for transports (GraphQL resolvers, HTTP handlers).
#[derive(Debug)]
pub struct CheckoutService<G, L, M, A, S> {
    set_billing: SetBillingAddressOnCart<G, L, M, A>,
    carts: S,
}

impl<G, L, M, A, S> CheckoutService<G, L, M, A, S>
where
    G: AccountGuard,
    L: CustomerAddressLookup,
    M: AddressMaterializer,
    A: CartAddressAssigner,
    S: CartStore,
{
    pub fn new(set_billing: SetBillingAddressOnCart<G, L, M, A>, carts: S) -> Self {
        Self { set_billing, carts }
    }

    pub fn cart(&self, cart_id: CartId) -> Result<Cart, ServiceError> {
        self.carts
            .load(cart_id)?
            .ok_or(ServiceError::CartNotFound(cart_id))
    }

    /// Run a plain cart command (creation, shipping address edits, closing).
    ///
    /// Unknown carts start from [`Cart::empty`], so `CreateCart` goes through
    /// the same path as every other command.
    pub fn dispatch(&self, cart_id: CartId, command: CartCommand) -> Result<Cart, ServiceError> {
        let mut cart = self
            .carts
            .load(cart_id)?
            .unwrap_or_else(|| Cart::empty(cart_id));
        let expected = ExpectedVersion::Exact(cart.version());

        let events = cart.execute(&command)?;
        if events.is_empty() {
            return Ok(cart);
        }

        self.carts.save(&cart, expected)?;
        tracing::debug!(
            %cart_id,
            events = events.len(),
            version = cart.version(),
            status = ?cart.status(),
            "cart command committed"
        );
        Ok(cart)
    }

    /// Set the billing address of a stored cart and persist the result.
    pub fn set_billing_address(
        &self,
        identity: &IdentityContext,
        cart_id: CartId,
        input: &BillingAddressInput,
    ) -> Result<Cart, ServiceError> {
        let mut cart = self.cart(cart_id)?;
        let expected = ExpectedVersion::Exact(cart.version());

        self.set_billing.execute(identity, &mut cart, input)?;

        if let Err(err) = self.carts.save(&cart, expected) {
            tracing::warn!(%cart_id, error = %err, "billing address not persisted");
            return Err(err.into());
        }
        Ok(cart)
    }
}

pub type InMemoryCheckoutService = CheckoutService<
    CustomerAccountGuard<Arc<InMemoryCustomerStore>>,
    RepositoryAddressLookup<Arc<InMemoryCustomerStore>>,
    CartAddressFactory,
    AggregateAddressAssigner,
    Arc<InMemoryCartStore>,
>;

impl InMemoryCheckoutService {
    /// Wire the service over in-memory stores (tests/dev).
    pub fn in_memory(
        config: &CheckoutConfig,
        customers: Arc<InMemoryCustomerStore>,
        carts: Arc<InMemoryCartStore>,
    ) -> Self {
        let resolver = BillingAddressResolver::new(
            CustomerAccountGuard::new(customers.clone()),
            RepositoryAddressLookup::new(customers),
            CartAddressFactory::new(config.address_rules),
        );
        CheckoutService::new(
            SetBillingAddressOnCart::new(resolver, AggregateAddressAssigner),
            carts,
        )
    }
}
