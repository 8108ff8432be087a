//! `checkout-core`: domain foundation building blocks for the checkout workspace.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod address;
pub mod aggregate;
pub mod entity;
pub mod error;
pub mod event;
pub mod id;
pub mod value_object;

pub use address::{PostalAddress, Region};
pub use aggregate::{Aggregate, AggregateRoot, ExpectedVersion};
pub use entity::Entity;
pub use error::{DomainError, DomainResult, StorageError};
pub use event::Event;
pub use id::{CartId, CustomerAddressId, CustomerId, UserId};
pub use value_object::ValueObject;
