use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use checkout_cart::Cart;
use checkout_core::{AggregateRoot, CartId, ExpectedVersion, StorageError};

/// Cart persistence (external collaborator).
///
/// `save` must reject writes whose expected version does not match the stored
/// one; this is what serializes concurrent updates of the same cart.
pub trait CartStore: Send + Sync {
    fn load(&self, cart_id: CartId) -> Result<Option<Cart>, StorageError>;
    fn save(&self, cart: &Cart, expected: ExpectedVersion) -> Result<(), StorageError>;
}

impl<S> CartStore for Arc<S>
where
    S: CartStore + ?Sized,
{
    fn load(&self, cart_id: CartId) -> Result<Option<Cart>, StorageError> {
        (**self).load(cart_id)
    }

    fn save(&self, cart: &Cart, expected: ExpectedVersion) -> Result<(), StorageError> {
        (**self).save(cart, expected)
    }
}

/// In-memory cart store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    carts: RwLock<HashMap<CartId, Cart>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for InMemoryCartStore {
    fn load(&self, cart_id: CartId) -> Result<Option<Cart>, StorageError> {
        let carts = self
            .carts
            .read()
            .map_err(|_| StorageError::unavailable("cart store lock poisoned"))?;
        Ok(carts.get(&cart_id).cloned())
    }

    fn save(&self, cart: &Cart, expected: ExpectedVersion) -> Result<(), StorageError> {
        let mut carts = self
            .carts
            .write()
            .map_err(|_| StorageError::unavailable("cart store lock poisoned"))?;

        let current = carts.get(cart.id()).map(|c| c.version()).unwrap_or(0);
        expected
            .check(current)
            .map_err(|e| StorageError::conflict(e.to_string()))?;

        carts.insert(*cart.id(), cart.clone());
        Ok(())
    }
}
