//! Postal address value shared by customer address books and carts.

use serde::{Deserialize, Serialize};

use crate::ValueObject;

/// Region (state/province) of an address.
///
/// Any combination of the parts may be known; directory lookups happen upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub code: Option<String>,
    pub label: Option<String>,
    pub id: Option<i64>,
}

impl Region {
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.label.is_none() && self.id.is_none()
    }
}

/// Normalized postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub firstname: String,
    pub lastname: String,
    pub company: Option<String>,
    pub street: Vec<String>,
    pub city: String,
    pub region: Option<Region>,
    pub postcode: Option<String>,
    /// ISO 3166-1 alpha-2, upper-case.
    pub country_code: String,
    pub telephone: Option<String>,
}

impl ValueObject for PostalAddress {}
