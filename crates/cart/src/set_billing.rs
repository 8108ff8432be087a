//! Set-billing-address use case: resolve, then assign.

use checkout_auth::{AccountGuard, IdentityContext};
use checkout_core::AggregateRoot;
use checkout_customers::CustomerAddressLookup;

use crate::{
    AddressMaterializer, BillingAddressError, BillingAddressInput, BillingAddressResolver, Cart,
    CartAddressAssigner,
};

/// Sets the billing address of a cart from a [`BillingAddressInput`].
///
/// The caller must hold exclusive access to `cart` for the duration of the call.
#[derive(Debug, Clone)]
pub struct SetBillingAddressOnCart<G, L, M, A> {
    resolver: BillingAddressResolver<G, L, M>,
    assigner: A,
}

impl<G, L, M, A> SetBillingAddressOnCart<G, L, M, A>
where
    G: AccountGuard,
    L: CustomerAddressLookup,
    M: AddressMaterializer,
    A: CartAddressAssigner,
{
    pub fn new(resolver: BillingAddressResolver<G, L, M>, assigner: A) -> Self {
        Self { resolver, assigner }
    }

    pub fn execute(
        &self,
        identity: &IdentityContext,
        cart: &mut Cart,
        input: &BillingAddressInput,
    ) -> Result<(), BillingAddressError> {
        let span = tracing::info_span!(
            "set_billing_address",
            cart_id = %cart.id(),
            cart_owner = ?cart.customer_id(),
            user_type = %identity.user_type(),
        );
        let _entered = span.enter();

        let resolved = match self.resolver.resolve(identity, cart, input) {
            Ok(resolved) => resolved,
            Err(err) => {
                tracing::warn!(code = err.code(), error = %err, "billing address rejected");
                return Err(err);
            }
        };

        self.assigner
            .assign(cart, resolved.address, resolved.use_for_shipping)
            .map_err(|err| {
                tracing::warn!(error = %err, "cart refused billing address");
                BillingAddressError::CartRejected(err)
            })?;

        tracing::info!(
            use_for_shipping = resolved.use_for_shipping,
            version = cart.version(),
            "billing address assigned"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        FOREIGN_ADDRESS, OWNED_ADDRESS, OWNER, active_cart, complete_fields, use_case,
    };
    use crate::{AddressInput, CartCommand, CloseCart};
    use checkout_core::{Aggregate, CartId, DomainError};
    use chrono::Utc;

    #[test]
    fn missing_source_leaves_cart_unchanged() {
        let (set_billing, _) = use_case();
        let mut cart = active_cart(1);
        let before = cart.clone();

        let err = set_billing
            .execute(&IdentityContext::guest(), &mut cart, &BillingAddressInput::default())
            .unwrap_err();

        assert_eq!(err, BillingAddressError::MissingAddressSource);
        assert_eq!(cart, before);
    }

    #[test]
    fn conflicting_source_leaves_cart_unchanged() {
        let (set_billing, _) = use_case();
        let mut cart = active_cart(1);
        let before = cart.clone();
        let input = BillingAddressInput {
            customer_address_id: Some(OWNED_ADDRESS),
            address: Some(AddressInput::default()),
            use_for_shipping: None,
        };

        let err = set_billing
            .execute(&IdentityContext::customer(OWNER), &mut cart, &input)
            .unwrap_err();

        assert_eq!(err, BillingAddressError::ConflictingAddressSource);
        assert_eq!(cart, before);
    }

    #[test]
    fn multishipping_conflict_leaves_cart_unchanged() {
        let (set_billing, _) = use_case();
        let mut cart = active_cart(2);
        let before = cart.clone();
        let input = BillingAddressInput::with_fields(complete_fields("Cork"))
            .use_for_shipping(true);

        let err = set_billing
            .execute(&IdentityContext::guest(), &mut cart, &input)
            .unwrap_err();

        assert_eq!(err, BillingAddressError::MultiShippingConflict);
        assert_eq!(cart, before);
    }

    #[test]
    fn fields_without_shipping_reuse_set_billing_only() {
        let (set_billing, _) = use_case();
        let mut cart = active_cart(1);
        let shipping_before = cart.shipping_addresses().to_vec();

        set_billing
            .execute(
                &IdentityContext::guest(),
                &mut cart,
                &BillingAddressInput::with_fields(complete_fields("Galway")),
            )
            .unwrap();

        assert_eq!(cart.billing_address().map(|a| a.postal().city.as_str()), Some("Galway"));
        assert_eq!(cart.shipping_addresses(), shipping_before.as_slice());
    }

    #[test]
    fn owned_stored_address_becomes_billing_and_sole_shipping() {
        let (set_billing, stored) = use_case();
        let mut cart = active_cart(1);
        let input = BillingAddressInput::with_customer_address(OWNED_ADDRESS)
            .use_for_shipping(true);

        set_billing
            .execute(&IdentityContext::customer(OWNER), &mut cart, &input)
            .unwrap();

        let billing = cart.billing_address().unwrap();
        assert_eq!(billing.postal(), &stored.address);
        assert_eq!(cart.shipping_addresses(), std::slice::from_ref(billing));
        assert!(cart.shipping_same_as_billing());
    }

    #[test]
    fn foreign_stored_address_is_not_found_and_cart_untouched() {
        let (set_billing, _) = use_case();
        let mut cart = active_cart(0);
        let before = cart.clone();

        let err = set_billing
            .execute(
                &IdentityContext::customer(OWNER),
                &mut cart,
                &BillingAddressInput::with_customer_address(FOREIGN_ADDRESS),
            )
            .unwrap_err();

        assert_eq!(err, BillingAddressError::AddressNotFound(FOREIGN_ADDRESS));
        assert_eq!(cart, before);
    }

    #[test]
    fn closed_cart_is_rejected_after_resolution() {
        let (set_billing, _) = use_case();
        let mut cart = active_cart(0);
        let close = CloseCart {
            cart_id: cart.id_typed(),
            occurred_at: Utc::now(),
        };
        cart.execute(&CartCommand::CloseCart(close)).unwrap();

        let err = set_billing
            .execute(
                &IdentityContext::guest(),
                &mut cart,
                &BillingAddressInput::with_fields(complete_fields("Sligo")),
            )
            .unwrap_err();

        assert_eq!(
            err,
            BillingAddressError::CartRejected(DomainError::invariant("cart is closed"))
        );
        assert_eq!(cart.billing_address(), None);
    }

    #[test]
    fn uncreated_cart_is_rejected_as_missing() {
        let (set_billing, _) = use_case();
        let mut cart = Cart::empty(CartId::new());

        let err = set_billing
            .execute(
                &IdentityContext::customer(OWNER),
                &mut cart,
                &BillingAddressInput::with_customer_address(OWNED_ADDRESS),
            )
            .unwrap_err();

        assert_eq!(err, BillingAddressError::CartRejected(DomainError::NotFound));
    }
}
