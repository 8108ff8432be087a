//! Billing address request payload.

use serde::{Deserialize, Serialize};

use checkout_core::{CustomerAddressId, Region};

use crate::BillingAddressError;

/// Raw address fields as submitted by the client.
///
/// Everything is optional here; [`crate::AddressMaterializer`] decides what is
/// required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressInput {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub company: Option<String>,
    pub street: Option<Vec<String>>,
    pub city: Option<String>,
    pub region: Option<Region>,
    pub postcode: Option<String>,
    pub country_code: Option<String>,
    pub telephone: Option<String>,
}

/// Billing address request: a stored address reference or raw fields, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingAddressInput {
    pub customer_address_id: Option<CustomerAddressId>,
    pub address: Option<AddressInput>,
    pub use_for_shipping: Option<bool>,
}

/// Where the billing address comes from, decided once at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressSource {
    ByCustomerId(CustomerAddressId),
    ByFields(AddressInput),
}

impl BillingAddressInput {
    pub fn with_customer_address(id: CustomerAddressId) -> Self {
        Self {
            customer_address_id: Some(id),
            ..Self::default()
        }
    }

    pub fn with_fields(address: AddressInput) -> Self {
        Self {
            address: Some(address),
            ..Self::default()
        }
    }

    pub fn use_for_shipping(mut self, value: bool) -> Self {
        self.use_for_shipping = Some(value);
        self
    }

    /// Absent means `false`.
    pub fn wants_shipping_reuse(&self) -> bool {
        self.use_for_shipping.unwrap_or(false)
    }

    /// Collapse the two optional fields into one [`AddressSource`].
    pub fn source(&self) -> Result<AddressSource, BillingAddressError> {
        match (self.customer_address_id, &self.address) {
            (None, None) => Err(BillingAddressError::MissingAddressSource),
            (Some(_), Some(_)) => Err(BillingAddressError::ConflictingAddressSource),
            (Some(id), None) => Ok(AddressSource::ByCustomerId(id)),
            (None, Some(fields)) => Ok(AddressSource::ByFields(fields.clone())),
        }
    }
}
