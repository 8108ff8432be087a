//! `checkout-auth`: pure authentication/authorization boundary for checkout.
//!
//! This crate is decoupled from HTTP and sessions: callers hand in an
//! [`IdentityContext`] and a source of account status.

pub mod authorize;
pub mod guard;
pub mod identity;
pub mod permissions;

pub use authorize::{AuthzError, authorize};
pub use guard::{
    AccountError, AccountGuard, AccountStatus, AccountStatusSource, CustomerAccountGuard,
};
pub use identity::{IdentityContext, UserType};
pub use permissions::Permission;
