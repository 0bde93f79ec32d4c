//! Password hashing and credential validation.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier};

use crate::AuthError;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Argon2 password hasher.
#[derive(Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with default Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a password into a PHC string.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Verify a password against a PHC string.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AuthError::Internal(format!("invalid hash format: {}", e)))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Validate password strength.
    pub fn validate_password(password: &str) -> Result<(), AuthError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }

    /// Validate the shape of an email address.
    pub fn validate_email(email: &str) -> Result<(), AuthError> {
        let invalid = || AuthError::InvalidEmail(email.to_string());

        if email.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.contains('@') {
            return Err(invalid());
        }
        match domain.rsplit_once('.') {
            Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("hunter22").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("hunter22", &hash).unwrap());
        assert!(!hasher.verify("hunter23", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify("pw", "not-a-hash").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(PasswordHasher::validate_password("12345").is_err());
        assert!(PasswordHasher::validate_password("123456").is_ok());
    }

    #[test]
    fn test_email_validation() {
        assert!(PasswordHasher::validate_email("jane@example.com").is_ok());
        assert!(PasswordHasher::validate_email("jane@example").is_err());
        assert!(PasswordHasher::validate_email("@example.com").is_err());
        assert!(PasswordHasher::validate_email("jane example@x.com").is_err());
        assert!(PasswordHasher::validate_email("jane").is_err());
    }
}
