//! Cart domain module: billing address resolution and assignment.
//!
//! The cart itself is a deterministic aggregate (no IO). Resolution talks to
//! its collaborators (account guard, address lookup) only through traits.

pub mod address;
pub mod assigner;
pub mod cart;
pub mod error;
pub mod input;
pub mod materializer;
pub mod resolver;
pub mod rules;
pub mod set_billing;

#[cfg(test)]
mod test_support;

pub use address::CartAddress;
pub use assigner::{AggregateAddressAssigner, CartAddressAssigner};
pub use cart::{
    AddShippingAddress, AssignBillingAddress, BillingAddressAssigned, Cart, CartClosed, CartCommand,
    CartCreated, CartEvent, CartStatus, CloseCart, CreateCart, ReplaceShippingAddress,
    ShippingAddressAdded, ShippingAddressReplaced,
};
pub use error::{BillingAddressError, ErrorCategory};
pub use input::{AddressInput, AddressSource, BillingAddressInput};
pub use materializer::{
    AddressMaterializer, CartAddressFactory, FieldViolation, InvalidAddressFields,
};
pub use resolver::{BillingAddressResolver, ResolvedBillingAddress};
pub use rules::AddressRules;
pub use set_billing::SetBillingAddressOnCart;
