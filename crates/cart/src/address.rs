use serde::{Deserialize, Serialize};

use checkout_core::{PostalAddress, ValueObject};

/// Address held by a cart (billing slot or a shipping slot).
///
/// Always a private copy: nothing links it back to the customer record or to
/// another slot on the same cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartAddress(PostalAddress);

impl CartAddress {
    pub fn new(postal: PostalAddress) -> Self {
        Self(postal)
    }

    pub fn postal(&self) -> &PostalAddress {
        &self.0
    }

    pub fn into_postal(self) -> PostalAddress {
        self.0
    }
}

impl From<PostalAddress> for CartAddress {
    fn from(value: PostalAddress) -> Self {
        Self(value)
    }
}

impl ValueObject for CartAddress {}
