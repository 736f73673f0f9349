//! Current-user identity.

use async_trait::async_trait;
use campusgig_core::types::UserId;

use crate::error::IdentityError;

/// The authenticated user as known to the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: Option<String>,
}

/// Resolves who "the current user" is for one dispatch.
///
/// `Ok(None)` means nobody is signed in.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user(&self) -> Result<Option<Identity>, IdentityError>;
}

/// A fixed identity, e.g. one already extracted from a verified token.
#[async_trait]
impl IdentityProvider for Identity {
    async fn current_user(&self) -> Result<Option<Identity>, IdentityError> {
        Ok(Some(self.clone()))
    }
}

/// No signed-in user.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

#[async_trait]
impl IdentityProvider for Anonymous {
    async fn current_user(&self) -> Result<Option<Identity>, IdentityError> {
        Ok(None)
    }
}
