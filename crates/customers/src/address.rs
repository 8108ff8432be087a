use serde::{Deserialize, Serialize};

use checkout_core::{CustomerAddressId, CustomerId, Entity, PostalAddress};

/// Address stored in a customer's address book.
///
/// Checkout only reads these; creation and edits belong to the account area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddress {
    pub id: CustomerAddressId,
    pub customer_id: CustomerId,
    pub address: PostalAddress,
    #[serde(default)]
    pub default_billing: bool,
    #[serde(default)]
    pub default_shipping: bool,
}

impl CustomerAddress {
    pub fn new(id: CustomerAddressId, customer_id: CustomerId, address: PostalAddress) -> Self {
        Self {
            id,
            customer_id,
            address,
            default_billing: false,
            default_shipping: false,
        }
    }

    pub fn is_owned_by(&self, customer_id: CustomerId) -> bool {
        self.customer_id == customer_id
    }
}

impl Entity for CustomerAddress {
    type Id = CustomerAddressId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
