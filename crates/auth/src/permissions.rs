use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::UserType;

/// Permission identifier.
///
/// Permissions are opaque strings (e.g. "customer.addresses.read").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    /// Read addresses from the caller's own address book.
    pub const CUSTOMER_ADDRESSES_READ: Permission =
        Permission(Cow::Borrowed("customer.addresses.read"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Permissions granted to a user type on the storefront checkout surface.
    ///
    /// Admin and integration accounts act on carts through back-office APIs and
    /// have no customer address book of their own.
    pub fn granted_to(user_type: UserType) -> &'static [Permission] {
        const CUSTOMER: &[Permission] = &[Permission::CUSTOMER_ADDRESSES_READ];

        match user_type {
            UserType::Customer => CUSTOMER,
            UserType::Guest | UserType::Admin | UserType::Integration => &[],
        }
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
