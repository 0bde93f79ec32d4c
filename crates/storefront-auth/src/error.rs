//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    /// Unknown user or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email is already registered.
    #[error("email already in use: {0}")]
    EmailInUse(String),

    /// Password rejected by the provider's policy.
    #[error("password too weak: {0}")]
    WeakPassword(String),

    /// Email is not well formed.
    #[error("invalid email: {0}")]
    InvalidEmail(String),

    /// Too many failed attempts.
    #[error("too many requests")]
    TooManyRequests,

    /// Provider could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The user dismissed the federated sign-in flow.
    #[error("sign-in popup closed by user")]
    PopupClosed,

    /// Operation needs a signed-in user.
    #[error("sign-in required")]
    SignInRequired,

    /// Any other provider-reported failure.
    #[error("provider error {code}: {message}")]
    Provider { code: String, message: String },

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Provider-style error code.
    pub fn code(&self) -> &str {
        match self {
            AuthError::InvalidCredentials => "auth/invalid-credentials",
            AuthError::EmailInUse(_) => "auth/email-already-in-use",
            AuthError::WeakPassword(_) => "auth/weak-password",
            AuthError::InvalidEmail(_) => "auth/invalid-email",
            AuthError::TooManyRequests => "auth/too-many-requests",
            AuthError::Network(_) => "auth/network-request-failed",
            AuthError::PopupClosed => "auth/popup-closed-by-user",
            AuthError::SignInRequired => "auth/sign-in-required",
            AuthError::Provider { code, .. } => code,
            AuthError::Internal(_) => "auth/internal-error",
        }
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Invalid email or password".to_string(),
            AuthError::EmailInUse(_) => "Email is already registered".to_string(),
            AuthError::WeakPassword(_) => "Password should be at least 6 characters".to_string(),
            AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
            AuthError::TooManyRequests => {
                "Too many failed attempts. Please try again later".to_string()
            }
            AuthError::Network(_) => "Network error. Please check your connection".to_string(),
            AuthError::PopupClosed => "Sign-in was cancelled".to_string(),
            AuthError::SignInRequired => {
                "Please sign in to add items to your wishlist".to_string()
            }
            AuthError::Provider { message, .. } if !message.is_empty() => message.clone(),
            AuthError::Provider { .. } | AuthError::Internal(_) => {
                "An error occurred during authentication".to_string()
            }
        }
    }

    /// Check if this is a credential failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::TooManyRequests
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.user_message(),
            "Invalid email or password"
        );
        assert_eq!(
            AuthError::EmailInUse("a@b.co".to_string()).user_message(),
            "Email is already registered"
        );
        assert_eq!(AuthError::PopupClosed.user_message(), "Sign-in was cancelled");
    }

    #[test]
    fn test_provider_message_passthrough() {
        let err = AuthError::Provider {
            code: "auth/quota-exceeded".to_string(),
            message: "Quota exceeded".to_string(),
        };
        assert_eq!(err.code(), "auth/quota-exceeded");
        assert_eq!(err.user_message(), "Quota exceeded");

        let err = AuthError::Provider {
            code: "auth/unknown".to_string(),
            message: String::new(),
        };
        assert_eq!(err.user_message(), "An error occurred during authentication");
    }

    #[test]
    fn test_is_auth_failure() {
        assert!(AuthError::InvalidCredentials.is_auth_failure());
        assert!(!AuthError::PopupClosed.is_auth_failure());
    }
}
