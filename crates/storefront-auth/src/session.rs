//! Explicit auth session.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::provider::{AuthStateReceiver, IdentityProvider};
use crate::{AuthError, User, UserId};

/// The storefront's view of who is signed in.
///
/// Constructed once at startup around an `IdentityProvider` and passed by
/// reference to the components that need it. Failed operations record a
/// user-facing message retrievable with `error()` until `clear_error()` or
/// the next operation.
pub struct AuthSession {
    provider: Arc<dyn IdentityProvider>,
    error: Mutex<Option<String>>,
    loading: AtomicBool,
}

impl AuthSession {
    /// Create a session over a provider.
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            error: Mutex::new(None),
            loading: AtomicBool::new(false),
        }
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<User> {
        self.provider.current_user()
    }

    /// Id of the signed-in user, if any.
    pub fn user_id(&self) -> Option<UserId> {
        self.user().map(|u| u.uid)
    }

    /// Whether a user is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.user().is_some()
    }

    /// The signed-in user, or `AuthError::SignInRequired`.
    pub fn require_user(&self) -> Result<User, AuthError> {
        self.user().ok_or(AuthError::SignInRequired)
    }

    /// Whether a credential operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Last user-facing error message.
    pub fn error(&self) -> Option<String> {
        self.error.lock().ok().and_then(|e| e.clone())
    }

    /// Forget the last error.
    pub fn clear_error(&self) {
        self.set_error(None);
    }

    /// Subscribe to auth-state changes.
    pub fn subscribe(&self) -> AuthStateReceiver {
        self.provider.subscribe()
    }

    /// Register and sign in.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<User, AuthError> {
        self.begin();
        let result = self.provider.sign_up(email, password, display_name).await;
        self.finish(result)
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.begin();
        let result = self.provider.sign_in(email, password).await;
        self.finish(result)
    }

    /// Sign in through the federated provider.
    pub async fn sign_in_with_provider(&self) -> Result<User, AuthError> {
        self.begin();
        let result = self.provider.sign_in_with_provider().await;
        self.finish(result)
    }

    /// Sign out.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.set_error(None);
        let result = self.provider.sign_out().await;
        if let Err(e) = &result {
            self.record(e);
        }
        result
    }

    fn begin(&self) {
        self.set_error(None);
        self.loading.store(true, Ordering::SeqCst);
    }

    fn finish<T>(&self, result: Result<T, AuthError>) -> Result<T, AuthError> {
        self.loading.store(false, Ordering::SeqCst);
        if let Err(e) = &result {
            self.record(e);
        }
        result
    }

    fn record(&self, e: &AuthError) {
        warn!(code = e.code(), error = %e, "authentication failed");
        self.set_error(Some(e.user_message()));
    }

    fn set_error(&self, message: Option<String>) {
        if let Ok(mut error) = self.error.lock() {
            *error = message;
        }
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("user", &self.user())
            .field("error", &self.error())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalIdentityProvider;

    fn session() -> AuthSession {
        AuthSession::new(Arc::new(LocalIdentityProvider::new()))
    }

    #[tokio::test]
    async fn test_anonymous_session() {
        let session = session();
        assert!(!session.is_signed_in());
        assert_eq!(session.user_id(), None);
        assert_eq!(session.require_user(), Err(AuthError::SignInRequired));
    }

    #[tokio::test]
    async fn test_failed_sign_in_records_message() {
        let session = session();
        let err = session.sign_in("jane@example.com", "secret1").await;

        assert!(err.is_err());
        assert_eq!(session.error().as_deref(), Some("Invalid email or password"));
        assert!(!session.is_loading());

        session.clear_error();
        assert_eq!(session.error(), None);
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let session = session();
        let _ = session.sign_up("jane@example.com", "123", None).await;
        assert_eq!(
            session.error().as_deref(),
            Some("Password should be at least 6 characters")
        );

        let user = session
            .sign_up("jane@example.com", "secret1", None)
            .await
            .unwrap();
        assert_eq!(session.error(), None);
        assert_eq!(session.user_id(), Some(user.uid));

        session.sign_out().await.unwrap();
        assert!(!session.is_signed_in());
    }

    #[tokio::test]
    async fn test_cancelled_federated_sign_in() {
        let session = session();
        let _ = session.sign_in_with_provider().await;
        assert_eq!(session.error().as_deref(), Some("Sign-in was cancelled"));
    }
}
