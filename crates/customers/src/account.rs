use serde::{Deserialize, Serialize};

use checkout_auth::AccountStatus;
use checkout_core::{CustomerId, Entity};

/// Customer account record (read-only view for checkout).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAccount {
    pub id: CustomerId,
    pub email: String,
    pub locked: bool,
    pub confirmed: bool,
}

impl CustomerAccount {
    pub fn active(id: CustomerId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            locked: false,
            confirmed: true,
        }
    }

    /// Locking takes precedence over a pending confirmation.
    pub fn status(&self) -> AccountStatus {
        if self.locked {
            AccountStatus::Locked
        } else if !self.confirmed {
            AccountStatus::Unconfirmed
        } else {
            AccountStatus::Active
        }
    }
}

impl Entity for CustomerAccount {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
