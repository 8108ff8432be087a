use chrono::Utc;

use checkout_core::{Aggregate, DomainError};

use crate::{AssignBillingAddress, Cart, CartAddress, CartCommand};

/// Commits a resolved billing address onto a cart.
pub trait CartAddressAssigner: Send + Sync {
    fn assign(
        &self,
        cart: &mut Cart,
        address: CartAddress,
        use_for_shipping: bool,
    ) -> Result<(), DomainError>;
}

/// Assigns through the cart's own command/event cycle.
///
/// The cart stays untouched when the command is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateAddressAssigner;

impl CartAddressAssigner for AggregateAddressAssigner {
    fn assign(
        &self,
        cart: &mut Cart,
        address: CartAddress,
        use_for_shipping: bool,
    ) -> Result<(), DomainError> {
        let command = CartCommand::AssignBillingAddress(AssignBillingAddress {
            cart_id: cart.id_typed(),
            address,
            use_for_shipping,
            occurred_at: Utc::now(),
        });

        cart.execute(&command)?;
        Ok(())
    }
}
