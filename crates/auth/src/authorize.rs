use thiserror::Error;

use crate::{IdentityContext, Permission};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("caller is not authenticated")]
    Unauthenticated,

    #[error("forbidden: {user_type} accounts lack permission '{permission}'")]
    Forbidden { user_type: String, permission: String },
}

/// Authorize an identity for a single permission.
///
/// - No IO
/// - No panics
/// - Authentication is checked before permissions
pub fn authorize(identity: &IdentityContext, required: &Permission) -> Result<(), AuthzError> {
    if !identity.is_authenticated() {
        return Err(AuthzError::Unauthenticated);
    }

    if Permission::granted_to(identity.user_type()).contains(required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            user_type: identity.user_type().to_string(),
            permission: required.as_str().to_string(),
        })
    }
}
