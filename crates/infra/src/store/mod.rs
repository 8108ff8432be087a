//! Storage adapters for carts and customer records.
//!
//! Only in-memory implementations live here (tests/dev); production backends
//! implement the same traits.

pub mod carts;
pub mod customers;

pub use carts::{CartStore, InMemoryCartStore};
pub use customers::InMemoryCustomerStore;
