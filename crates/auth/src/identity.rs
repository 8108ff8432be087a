use serde::{Deserialize, Serialize};

use checkout_core::{CustomerId, UserId};

/// Kind of account behind a request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Guest,
    Customer,
    Admin,
    Integration,
}

impl UserType {
    pub fn as_str(self) -> &'static str {
        match self {
            UserType::Guest => "guest",
            UserType::Customer => "customer",
            UserType::Admin => "admin",
            UserType::Integration => "integration",
        }
    }
}

impl core::fmt::Display for UserType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the caller for a single request.
///
/// Supplied by the session layer and never mutated here.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityContext {
    user_id: Option<UserId>,
    user_type: UserType,
}

impl IdentityContext {
    pub fn new(user_id: Option<UserId>, user_type: UserType) -> Self {
        Self { user_id, user_type }
    }

    pub fn guest() -> Self {
        Self::new(None, UserType::Guest)
    }

    pub fn customer(customer_id: CustomerId) -> Self {
        Self::new(Some(customer_id.into()), UserType::Customer)
    }

    pub fn admin(user_id: UserId) -> Self {
        Self::new(Some(user_id), UserType::Admin)
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    /// A non-guest type with a positive user id.
    pub fn is_authenticated(&self) -> bool {
        self.user_type != UserType::Guest && self.user_id.is_some_and(UserId::is_account)
    }

    /// Customer id for customer sessions; `None` for every other identity.
    pub fn customer_id(&self) -> Option<CustomerId> {
        match (self.user_type, self.user_id) {
            (UserType::Customer, Some(id)) if id.is_account() => Some(id.into()),
            _ => None,
        }
    }
}
