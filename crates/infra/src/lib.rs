//! Infrastructure layer: configuration, stores, and the checkout service.

pub mod config;
pub mod service;
pub mod store;


pub use config::CheckoutConfig;
pub use service::{CheckoutService, InMemoryCheckoutService, ServiceError};
pub use store::{CartStore, InMemoryCartStore, InMemoryCustomerStore};
