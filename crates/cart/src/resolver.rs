//! Billing address resolution: input shape, cart preconditions, source lookup.

use checkout_auth::{AccountGuard, IdentityContext};
use checkout_customers::CustomerAddressLookup;

use crate::{
    AddressMaterializer, AddressSource, BillingAddressError, BillingAddressInput, Cart, CartAddress,
};

/// Outcome of a successful resolution, ready for assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBillingAddress {
    pub address: CartAddress,
    pub use_for_shipping: bool,
}

/// Decides which address becomes the cart's billing address.
///
/// Checks run in a fixed order and the first failure wins:
///
/// ```text
/// missing source → conflicting source → multishipping conflict
///   → (stored address only) account guard → ownership lookup
///   → materialization
/// ```
///
/// Resolution never mutates the cart.
#[derive(Debug, Clone)]
pub struct BillingAddressResolver<G, L, M> {
    guard: G,
    lookup: L,
    materializer: M,
}

impl<G, L, M> BillingAddressResolver<G, L, M>
where
    G: AccountGuard,
    L: CustomerAddressLookup,
    M: AddressMaterializer,
{
    pub fn new(guard: G, lookup: L, materializer: M) -> Self {
        Self {
            guard,
            lookup,
            materializer,
        }
    }

    pub fn resolve(
        &self,
        identity: &IdentityContext,
        cart: &Cart,
        input: &BillingAddressInput,
    ) -> Result<ResolvedBillingAddress, BillingAddressError> {
        let source = input.source()?;
        let use_for_shipping = input.wants_shipping_reuse();

        if use_for_shipping && cart.is_multishipping() {
            return Err(BillingAddressError::MultiShippingConflict);
        }

        let address = match source {
            AddressSource::ByFields(fields) => self.materializer.from_fields(&fields)?,
            AddressSource::ByCustomerId(address_id) => {
                self.guard.verify(identity.user_id(), identity.user_type())?;

                // A guard that admits non-customer identities still gives us no address book.
                let customer_id = identity.customer_id().ok_or_else(|| {
                    BillingAddressError::AuthenticationRequired(
                        "the current customer isn't authorized".to_string(),
                    )
                })?;

                let stored = self.lookup.fetch(address_id, customer_id)?;
                tracing::debug!(%address_id, %customer_id, "using stored customer address");
                self.materializer.from_customer_address(&stored)
            }
        };

        Ok(ResolvedBillingAddress {
            address,
            use_for_shipping,
        })
    }
}
