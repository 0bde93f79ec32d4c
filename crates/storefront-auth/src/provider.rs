//! Identity provider boundary.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::{AuthError, User};

/// Receiver side of an auth-state subscription. Holds the current user.
pub type AuthStateReceiver = watch::Receiver<Option<User>>;

/// External identity service.
///
/// The storefront only needs to know whether a user is present and what
/// their id is; credential handling stays behind this trait.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The currently signed-in user, if any.
    fn current_user(&self) -> Option<User>;

    /// Register a new account and sign it in.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<User, AuthError>;

    /// Sign in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Sign in through the federated (OAuth) provider.
    async fn sign_in_with_provider(&self) -> Result<User, AuthError>;

    /// Sign the current user out.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Subscribe to auth-state changes.
    fn subscribe(&self) -> AuthStateReceiver;
}
