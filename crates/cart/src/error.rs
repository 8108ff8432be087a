use thiserror::Error;

use checkout_auth::AccountError;
use checkout_core::{CustomerAddressId, DomainError, StorageError};
use checkout_customers::AddressLookupError;

use crate::InvalidAddressFields;

/// Coarse class of a billing address failure, for transport-level mapping.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Authentication,
    Authorization,
    NoSuchEntity,
    Internal,
}

/// Failure of a set-billing-address request.
///
/// Every variant is raised before the cart is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BillingAddressError {
    #[error("the billing address must contain either \"customer_address_id\" or \"address\"")]
    MissingAddressSource,

    #[error("the billing address cannot contain \"customer_address_id\" and \"address\" at the same time")]
    ConflictingAddressSource,

    #[error("using the \"use_for_shipping\" option with multishipping is not possible")]
    MultiShippingConflict,

    #[error("{0}")]
    AuthenticationRequired(String),

    #[error("{0}")]
    AuthorizationDenied(String),

    #[error("could not find an address with ID \"{0}\"")]
    AddressNotFound(CustomerAddressId),

    #[error(transparent)]
    InvalidAddressFields(#[from] InvalidAddressFields),

    /// The cart refused the assignment (missing or closed cart).
    #[error("cart rejected the billing address: {0}")]
    CartRejected(DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl BillingAddressError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            BillingAddressError::MissingAddressSource => "missing_address_source",
            BillingAddressError::ConflictingAddressSource => "conflicting_address_source",
            BillingAddressError::MultiShippingConflict => "multishipping_conflict",
            BillingAddressError::AuthenticationRequired(_) => "authentication_required",
            BillingAddressError::AuthorizationDenied(_) => "authorization_denied",
            BillingAddressError::AddressNotFound(_) => "address_not_found",
            BillingAddressError::InvalidAddressFields(_) => "invalid_address_fields",
            BillingAddressError::CartRejected(_) => "cart_rejected",
            BillingAddressError::Storage(_) => "storage_unavailable",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            BillingAddressError::MissingAddressSource
            | BillingAddressError::ConflictingAddressSource
            | BillingAddressError::MultiShippingConflict
            | BillingAddressError::InvalidAddressFields(_) => ErrorCategory::Input,
            BillingAddressError::AuthenticationRequired(_) => ErrorCategory::Authentication,
            BillingAddressError::AuthorizationDenied(_) => ErrorCategory::Authorization,
            BillingAddressError::AddressNotFound(_) => ErrorCategory::NoSuchEntity,
            BillingAddressError::CartRejected(DomainError::NotFound) => ErrorCategory::NoSuchEntity,
            BillingAddressError::CartRejected(_) => ErrorCategory::Input,
            BillingAddressError::Storage(_) => ErrorCategory::Internal,
        }
    }
}

impl From<AccountError> for BillingAddressError {
    fn from(value: AccountError) -> Self {
        match value {
            AccountError::AuthenticationRequired(msg) => {
                BillingAddressError::AuthenticationRequired(msg)
            }
            AccountError::AuthorizationDenied(msg) => BillingAddressError::AuthorizationDenied(msg),
            AccountError::Storage(e) => BillingAddressError::Storage(e),
        }
    }
}

impl From<AddressLookupError> for BillingAddressError {
    fn from(value: AddressLookupError) -> Self {
        match value {
            AddressLookupError::NotFound(id) => BillingAddressError::AddressNotFound(id),
            AddressLookupError::Storage(e) => BillingAddressError::Storage(e),
        }
    }
}
