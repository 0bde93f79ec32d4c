//! In-process identity provider for development and tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::password::PasswordHasher;
use crate::provider::{AuthStateReceiver, IdentityProvider};
use crate::{AuthError, User, UserId};

/// Consecutive failed sign-ins before an account is throttled.
const MAX_FAILED_ATTEMPTS: u32 = 5;

struct Account {
    user: User,
    password_hash: String,
    failed_attempts: u32,
}

/// Identity provider that keeps accounts in memory.
///
/// Passwords are hashed with Argon2. The federated flow signs in a
/// preconfigured user, or reports a cancelled popup when none is set.
pub struct LocalIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
    state: watch::Sender<Option<User>>,
    federated: Option<User>,
    hasher: PasswordHasher,
}

impl LocalIdentityProvider {
    /// Create a provider with no accounts.
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            accounts: Mutex::new(HashMap::new()),
            state,
            federated: None,
            hasher: PasswordHasher::new(),
        }
    }

    /// Configure the user returned by `sign_in_with_provider`.
    pub fn with_federated_user(mut self, user: User) -> Self {
        self.federated = Some(user);
        self
    }

    fn accounts(&self) -> Result<MutexGuard<'_, HashMap<String, Account>>, AuthError> {
        self.accounts
            .lock()
            .map_err(|_| AuthError::Internal("account store lock poisoned".to_string()))
    }

    fn set_current(&self, user: Option<User>) {
        self.state.send_replace(user);
    }
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    fn current_user(&self) -> Option<User> {
        self.state.borrow().clone()
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<User, AuthError> {
        PasswordHasher::validate_email(email)?;
        PasswordHasher::validate_password(password)?;

        let key = email.to_lowercase();
        let password_hash = self.hasher.hash(password)?;

        let user = {
            let mut accounts = self.accounts()?;
            if accounts.contains_key(&key) {
                return Err(AuthError::EmailInUse(email.to_string()));
            }

            let mut user = User::new(UserId::new(generate_uid()), email);
            if let Some(name) = display_name.filter(|n| !n.is_empty()) {
                user = user.with_display_name(name);
            }

            accounts.insert(
                key,
                Account {
                    user: user.clone(),
                    password_hash,
                    failed_attempts: 0,
                },
            );
            user
        };

        info!(uid = %user.uid, "account created");
        self.set_current(Some(user.clone()));
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = {
            let mut accounts = self.accounts()?;
            let account = accounts
                .get_mut(&email.to_lowercase())
                .ok_or(AuthError::InvalidCredentials)?;

            if account.failed_attempts >= MAX_FAILED_ATTEMPTS {
                return Err(AuthError::TooManyRequests);
            }

            if !self.hasher.verify(password, &account.password_hash)? {
                account.failed_attempts += 1;
                debug!(attempts = account.failed_attempts, "sign-in rejected");
                return Err(AuthError::InvalidCredentials);
            }

            account.failed_attempts = 0;
            account.user.clone()
        };

        self.set_current(Some(user.clone()));
        Ok(user)
    }

    async fn sign_in_with_provider(&self) -> Result<User, AuthError> {
        let user = self.federated.clone().ok_or(AuthError::PopupClosed)?;
        self.set_current(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.set_current(None);
        Ok(())
    }

    fn subscribe(&self) -> AuthStateReceiver {
        self.state.subscribe()
    }
}

/// Generate a provider-style user id.
fn generate_uid() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("uid_{:x}{:04x}", ts, counter & 0xffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_up_signs_in() {
        let provider = LocalIdentityProvider::new();
        let user = provider
            .sign_up("jane@example.com", "secret1", Some("Jane"))
            .await
            .unwrap();

        assert_eq!(user.display_name.as_deref(), Some("Jane"));
        assert_eq!(provider.current_user(), Some(user));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let provider = LocalIdentityProvider::new();
        provider
            .sign_up("jane@example.com", "secret1", None)
            .await
            .unwrap();

        let err = provider
            .sign_up("JANE@example.com", "secret2", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailInUse(_)));
    }

    #[tokio::test]
    async fn test_weak_password_and_bad_email() {
        let provider = LocalIdentityProvider::new();
        assert!(matches!(
            provider.sign_up("jane@example.com", "123", None).await,
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            provider.sign_up("jane", "secret1", None).await,
            Err(AuthError::InvalidEmail(_))
        ));
        assert_eq!(provider.current_user(), None);
    }

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let provider = LocalIdentityProvider::new();
        let created = provider
            .sign_up("jane@example.com", "secret1", None)
            .await
            .unwrap();
        provider.sign_out().await.unwrap();
        assert_eq!(provider.current_user(), None);

        assert_eq!(
            provider.sign_in("jane@example.com", "wrong!").await,
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            provider.sign_in("nobody@example.com", "secret1").await,
            Err(AuthError::InvalidCredentials)
        );

        let user = provider.sign_in("jane@example.com", "secret1").await.unwrap();
        assert_eq!(user.uid, created.uid);
    }

    #[tokio::test]
    async fn test_throttles_after_repeated_failures() {
        let provider = LocalIdentityProvider::new();
        provider
            .sign_up("jane@example.com", "secret1", None)
            .await
            .unwrap();

        for _ in 0..MAX_FAILED_ATTEMPTS {
            let _ = provider.sign_in("jane@example.com", "nope-nope").await;
        }

        assert_eq!(
            provider.sign_in("jane@example.com", "secret1").await,
            Err(AuthError::TooManyRequests)
        );
    }

    #[tokio::test]
    async fn test_federated_sign_in() {
        let provider = LocalIdentityProvider::new();
        assert_eq!(
            provider.sign_in_with_provider().await,
            Err(AuthError::PopupClosed)
        );

        let provider = provider.with_federated_user(User::new("g-1", "g@example.com"));
        let user = provider.sign_in_with_provider().await.unwrap();
        assert_eq!(user.uid.as_str(), "g-1");
    }

    #[tokio::test]
    async fn test_subscription_sees_changes() {
        let provider = LocalIdentityProvider::new();
        let mut rx = provider.subscribe();
        assert!(rx.borrow().is_none());

        provider
            .sign_up("jane@example.com", "secret1", None)
            .await
            .unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_some());

        provider.sign_out().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
