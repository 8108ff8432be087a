use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use checkout_core::{Aggregate, AggregateRoot, CartId, CustomerId, DomainError, Event};

use crate::CartAddress;

/// Cart status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartStatus {
    Active,
    /// Converted to an order or abandoned; addresses are frozen.
    Closed,
}

/// Aggregate root: Cart.
///
/// # Invariants
/// - At most one billing address; assignment always overwrites.
/// - Billing and shipping slots hold independent copies.
/// - Closed carts reject every address change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: CartId,
    customer_id: Option<CustomerId>,
    status: CartStatus,
    billing_address: Option<CartAddress>,
    shipping_addresses: Vec<CartAddress>,
    shipping_same_as_billing: bool,
    version: u64,
    created: bool,
}

impl Cart {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: CartId) -> Self {
        Self {
            id,
            customer_id: None,
            status: CartStatus::Active,
            billing_address: None,
            shipping_addresses: Vec::new(),
            shipping_same_as_billing: false,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> CartId {
        self.id
    }

    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id
    }

    pub fn status(&self) -> CartStatus {
        self.status
    }

    pub fn billing_address(&self) -> Option<&CartAddress> {
        self.billing_address.as_ref()
    }

    pub fn shipping_addresses(&self) -> &[CartAddress] {
        &self.shipping_addresses
    }

    /// More than one shipping address means the order ships to several destinations.
    pub fn is_multishipping(&self) -> bool {
        self.shipping_addresses.len() > 1
    }

    pub fn shipping_same_as_billing(&self) -> bool {
        self.shipping_same_as_billing
    }

    pub fn is_modifiable(&self) -> bool {
        self.created && matches!(self.status, CartStatus::Active)
    }
}

impl AggregateRoot for Cart {
    type Id = CartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateCart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCart {
    pub cart_id: CartId,
    /// `None` for guest carts.
    pub customer_id: Option<CustomerId>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddShippingAddress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddShippingAddress {
    pub cart_id: CartId,
    pub address: CartAddress,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReplaceShippingAddress (edit one existing shipping slot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceShippingAddress {
    pub cart_id: CartId,
    pub index: usize,
    pub address: CartAddress,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AssignBillingAddress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignBillingAddress {
    pub cart_id: CartId,
    pub address: CartAddress,
    /// Also make `address` the only shipping address.
    pub use_for_shipping: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CloseCart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseCart {
    pub cart_id: CartId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    CreateCart(CreateCart),
    AddShippingAddress(AddShippingAddress),
    ReplaceShippingAddress(ReplaceShippingAddress),
    AssignBillingAddress(AssignBillingAddress),
    CloseCart(CloseCart),
}

/// Event: CartCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCreated {
    pub cart_id: CartId,
    pub customer_id: Option<CustomerId>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ShippingAddressAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddressAdded {
    pub cart_id: CartId,
    pub address: CartAddress,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ShippingAddressReplaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddressReplaced {
    pub cart_id: CartId,
    pub index: usize,
    pub address: CartAddress,
    pub occurred_at: DateTime<Utc>,
}

/// Event: BillingAddressAssigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddressAssigned {
    pub cart_id: CartId,
    pub address: CartAddress,
    pub use_for_shipping: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CartClosed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartClosed {
    pub cart_id: CartId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    CartCreated(CartCreated),
    ShippingAddressAdded(ShippingAddressAdded),
    ShippingAddressReplaced(ShippingAddressReplaced),
    BillingAddressAssigned(BillingAddressAssigned),
    CartClosed(CartClosed),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::CartCreated(_) => "checkout.cart.created",
            CartEvent::ShippingAddressAdded(_) => "checkout.cart.shipping_address_added",
            CartEvent::ShippingAddressReplaced(_) => "checkout.cart.shipping_address_replaced",
            CartEvent::BillingAddressAssigned(_) => "checkout.cart.billing_address_assigned",
            CartEvent::CartClosed(_) => "checkout.cart.closed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::CartCreated(e) => e.occurred_at,
            CartEvent::ShippingAddressAdded(e) => e.occurred_at,
            CartEvent::ShippingAddressReplaced(e) => e.occurred_at,
            CartEvent::BillingAddressAssigned(e) => e.occurred_at,
            CartEvent::CartClosed(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::CartCreated(e) => {
                self.id = e.cart_id;
                self.customer_id = e.customer_id;
                self.status = CartStatus::Active;
                self.billing_address = None;
                self.shipping_addresses.clear();
                self.shipping_same_as_billing = false;
                self.created = true;
            }
            CartEvent::ShippingAddressAdded(e) => {
                self.shipping_addresses.push(e.address.clone());
                self.shipping_same_as_billing = false;
            }
            CartEvent::ShippingAddressReplaced(e) => {
                if let Some(slot) = self.shipping_addresses.get_mut(e.index) {
                    *slot = e.address.clone();
                }
                self.shipping_same_as_billing = false;
            }
            CartEvent::BillingAddressAssigned(e) => {
                self.billing_address = Some(e.address.clone());
                if e.use_for_shipping {
                    self.shipping_addresses = vec![e.address.clone()];
                }
                self.shipping_same_as_billing = e.use_for_shipping;
            }
            CartEvent::CartClosed(_) => {
                self.status = CartStatus::Closed;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::CreateCart(cmd) => self.handle_create(cmd),
            CartCommand::AddShippingAddress(cmd) => self.handle_add_shipping(cmd),
            CartCommand::ReplaceShippingAddress(cmd) => self.handle_replace_shipping(cmd),
            CartCommand::AssignBillingAddress(cmd) => self.handle_assign_billing(cmd),
            CartCommand::CloseCart(cmd) => self.handle_close(cmd),
        }
    }
}

impl Cart {
    fn ensure_cart_id(&self, cart_id: CartId) -> Result<(), DomainError> {
        if self.id != cart_id {
            return Err(DomainError::invariant("cart_id mismatch"));
        }
        Ok(())
    }

    fn ensure_modifiable(&self, cart_id: CartId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_cart_id(cart_id)?;
        if !self.is_modifiable() {
            return Err(DomainError::invariant("cart is closed"));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateCart) -> Result<Vec<CartEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("cart already exists"));
        }
        self.ensure_cart_id(cmd.cart_id)?;

        Ok(vec![CartEvent::CartCreated(CartCreated {
            cart_id: cmd.cart_id,
            customer_id: cmd.customer_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add_shipping(&self, cmd: &AddShippingAddress) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_modifiable(cmd.cart_id)?;

        Ok(vec![CartEvent::ShippingAddressAdded(ShippingAddressAdded {
            cart_id: cmd.cart_id,
            address: cmd.address.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_replace_shipping(
        &self,
        cmd: &ReplaceShippingAddress,
    ) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_modifiable(cmd.cart_id)?;

        if cmd.index >= self.shipping_addresses.len() {
            return Err(DomainError::validation(format!(
                "no shipping address at index {}",
                cmd.index
            )));
        }

        Ok(vec![CartEvent::ShippingAddressReplaced(ShippingAddressReplaced {
            cart_id: cmd.cart_id,
            index: cmd.index,
            address: cmd.address.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_assign_billing(
        &self,
        cmd: &AssignBillingAddress,
    ) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_modifiable(cmd.cart_id)?;

        if cmd.use_for_shipping && self.is_multishipping() {
            return Err(DomainError::invariant(
                "billing address cannot be used for shipping on a multishipping cart",
            ));
        }

        Ok(vec![CartEvent::BillingAddressAssigned(BillingAddressAssigned {
            cart_id: cmd.cart_id,
            address: cmd.address.clone(),
            use_for_shipping: cmd.use_for_shipping,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_close(&self, cmd: &CloseCart) -> Result<Vec<CartEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_cart_id(cmd.cart_id)?;

        if self.status == CartStatus::Closed {
            return Err(DomainError::conflict("cart is already closed"));
        }

        Ok(vec![CartEvent::CartClosed(CartClosed {
            cart_id: cmd.cart_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{active_cart, cart_address};

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn create_cart_emits_cart_created_event() {
        let cart_id = CartId::new();
        let cart = Cart::empty(cart_id);
        let cmd = CreateCart {
            cart_id,
            customer_id: Some(CustomerId::new(8)),
            occurred_at: test_time(),
        };

        let events = cart.handle(&CartCommand::CreateCart(cmd)).unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            CartEvent::CartCreated(e) => {
                assert_eq!(e.cart_id, cart_id);
                assert_eq!(e.customer_id, Some(CustomerId::new(8)));
            }
            _ => panic!("Expected CartCreated event"),
        }
    }

    #[test]
    fn create_cart_rejects_duplicate_creation() {
        let cart = active_cart(0);
        let cmd = CreateCart {
            cart_id: cart.id_typed(),
            customer_id: None,
            occurred_at: test_time(),
        };

        let err = cart.handle(&CartCommand::CreateCart(cmd)).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn create_cart_rejects_foreign_cart_id() {
        let cart = Cart::empty(CartId::new());
        let cmd = CreateCart {
            cart_id: CartId::new(),
            customer_id: None,
            occurred_at: test_time(),
        };

        let err = cart.handle(&CartCommand::CreateCart(cmd)).unwrap_err();
        assert_eq!(err, DomainError::invariant("cart_id mismatch"));
    }

    #[test]
    fn assign_billing_overwrites_previous_billing_address() {
        let mut cart = active_cart(1);
        let shipping_before = cart.shipping_addresses().to_vec();

        for city in ["Oslo", "Bergen"] {
            let cmd = AssignBillingAddress {
                cart_id: cart.id_typed(),
                address: cart_address(city),
                use_for_shipping: false,
                occurred_at: test_time(),
            };
            cart.execute(&CartCommand::AssignBillingAddress(cmd)).unwrap();
        }

        assert_eq!(cart.billing_address(), Some(&cart_address("Bergen")));
        assert_eq!(cart.shipping_addresses(), shipping_before.as_slice());
        assert!(!cart.shipping_same_as_billing());
    }

    #[test]
    fn assign_billing_for_shipping_replaces_single_shipping_address() {
        let mut cart = active_cart(1);
        let cmd = AssignBillingAddress {
            cart_id: cart.id_typed(),
            address: cart_address("Turku"),
            use_for_shipping: true,
            occurred_at: test_time(),
        };

        cart.execute(&CartCommand::AssignBillingAddress(cmd)).unwrap();

        assert_eq!(cart.shipping_addresses(), &[cart_address("Turku")]);
        assert_eq!(cart.billing_address(), Some(&cart_address("Turku")));
        assert!(cart.shipping_same_as_billing());
    }

    #[test]
    fn assign_billing_for_shipping_rejected_on_multishipping_cart() {
        let cart = active_cart(2);
        let cmd = AssignBillingAddress {
            cart_id: cart.id_typed(),
            address: cart_address("Turku"),
            use_for_shipping: true,
            occurred_at: test_time(),
        };

        let err = cart.handle(&CartCommand::AssignBillingAddress(cmd)).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn closed_cart_rejects_billing_assignment() {
        let mut cart = active_cart(0);
        let close = CloseCart {
            cart_id: cart.id_typed(),
            occurred_at: test_time(),
        };
        cart.execute(&CartCommand::CloseCart(close)).unwrap();

        let cmd = AssignBillingAddress {
            cart_id: cart.id_typed(),
            address: cart_address("Riga"),
            use_for_shipping: false,
            occurred_at: test_time(),
        };
        let err = cart.handle(&CartCommand::AssignBillingAddress(cmd)).unwrap_err();
        assert_eq!(err, DomainError::invariant("cart is closed"));
    }

    #[test]
    fn uncreated_cart_reports_not_found() {
        let cart = Cart::empty(CartId::new());
        let cmd = AssignBillingAddress {
            cart_id: cart.id_typed(),
            address: cart_address("Riga"),
            use_for_shipping: false,
            occurred_at: test_time(),
        };
        let err = cart.handle(&CartCommand::AssignBillingAddress(cmd)).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn replace_shipping_checks_index() {
        let cart = active_cart(1);
        let cmd = ReplaceShippingAddress {
            cart_id: cart.id_typed(),
            index: 1,
            address: cart_address("Tallinn"),
            occurred_at: test_time(),
        };
        let err = cart.handle(&CartCommand::ReplaceShippingAddress(cmd)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn wrong_cart_id_is_an_invariant_violation() {
        let cart = active_cart(0);
        let cmd = AssignBillingAddress {
            cart_id: CartId::new(),
            address: cart_address("Riga"),
            use_for_shipping: false,
            occurred_at: test_time(),
        };
        let err = cart.handle(&CartCommand::AssignBillingAddress(cmd)).unwrap_err();
        assert_eq!(err, DomainError::invariant("cart_id mismatch"));
    }

    #[test]
    fn version_increments_on_apply() {
        let cart = active_cart(2);
        // create + two shipping additions
        assert_eq!(cart.version(), 3);
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let cart = active_cart(1);
        let before = cart.clone();
        let cmd = AssignBillingAddress {
            cart_id: cart.id_typed(),
            address: cart_address("Vilnius"),
            use_for_shipping: true,
            occurred_at: test_time(),
        };

        let events1 = cart.handle(&CartCommand::AssignBillingAddress(cmd.clone())).unwrap();
        let events2 = cart.handle(&CartCommand::AssignBillingAddress(cmd)).unwrap();

        assert_eq!(cart, before);
        assert_eq!(events1, events2);
    }

    #[test]
    fn event_types_are_namespaced() {
        let cart = active_cart(0);
        let cmd = CloseCart {
            cart_id: cart.id_typed(),
            occurred_at: test_time(),
        };
        let events = cart.handle(&CartCommand::CloseCart(cmd)).unwrap();
        assert_eq!(events[0].event_type(), "checkout.cart.closed");
        assert_eq!(events[0].version(), 1);
    }
}
