//! Account guard: who may read stored customer addresses.

use std::sync::Arc;

use thiserror::Error;

use checkout_core::{CustomerId, StorageError, UserId};

use crate::{AuthzError, IdentityContext, Permission, UserType, authorize};

/// Lifecycle state of a customer account as reported by the account registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Locked,
    /// Registered but the confirmation step is still pending.
    Unconfirmed,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<AuthzError> for AccountError {
    fn from(value: AuthzError) -> Self {
        match value {
            AuthzError::Unauthenticated => AccountError::AuthenticationRequired(
                "the current customer isn't authorized".to_string(),
            ),
            forbidden @ AuthzError::Forbidden { .. } => {
                AccountError::AuthorizationDenied(forbidden.to_string())
            }
        }
    }
}

/// Registry of customer account status (external collaborator).
pub trait AccountStatusSource: Send + Sync {
    /// `Ok(None)` when no account exists for the id.
    fn account_status(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<AccountStatus>, StorageError>;
}

impl<S> AccountStatusSource for Arc<S>
where
    S: AccountStatusSource + ?Sized,
{
    fn account_status(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<AccountStatus>, StorageError> {
        (**self).account_status(customer_id)
    }
}

/// Verifies the caller may access stored customer addresses.
pub trait AccountGuard: Send + Sync {
    fn verify(&self, user_id: Option<UserId>, user_type: UserType) -> Result<(), AccountError>;
}

/// Default guard: permission check, then account status lookup.
#[derive(Debug, Clone)]
pub struct CustomerAccountGuard<S> {
    accounts: S,
}

impl<S: AccountStatusSource> CustomerAccountGuard<S> {
    pub fn new(accounts: S) -> Self {
        Self { accounts }
    }
}

impl<S: AccountStatusSource> AccountGuard for CustomerAccountGuard<S> {
    fn verify(&self, user_id: Option<UserId>, user_type: UserType) -> Result<(), AccountError> {
        let identity = IdentityContext::new(user_id, user_type);

        if let Err(err) = authorize(&identity, &Permission::CUSTOMER_ADDRESSES_READ) {
            tracing::debug!(%user_type, error = %err, "stored address access rejected");
            return Err(err.into());
        }

        let Some(customer_id) = identity.customer_id() else {
            return Err(AccountError::AuthenticationRequired(
                "the current customer isn't authorized".to_string(),
            ));
        };

        match self.accounts.account_status(customer_id)? {
            None => Err(AccountError::AuthenticationRequired(format!(
                "customer account {customer_id} no longer exists"
            ))),
            Some(AccountStatus::Locked) => Err(AccountError::AuthorizationDenied(
                "the account is locked".to_string(),
            )),
            Some(AccountStatus::Unconfirmed) => Err(AccountError::AuthorizationDenied(
                "the account is not confirmed".to_string(),
            )),
            Some(AccountStatus::Active) => Ok(()),
        }
    }
}
