//! User types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity-provider user id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Provider-assigned id.
    pub uid: UserId,
    /// Email address.
    pub email: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Whether the provider has verified the email.
    pub email_verified: bool,
}

impl User {
    /// Create a new user with an unverified email.
    pub fn new(uid: impl Into<UserId>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            display_name: None,
            email_verified: false,
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Name to greet the user with: display name, else the email's local part.
    pub fn greeting_name(&self) -> &str {
        match &self.display_name {
            Some(name) if !name.is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_name() {
        let user = User::new("u1", "jane@example.com");
        assert_eq!(user.greeting_name(), "jane");

        let user = user.with_display_name("Jane Doe");
        assert_eq!(user.greeting_name(), "Jane Doe");
    }

    #[test]
    fn test_user_id_display() {
        let id = UserId::new("uid-789");
        assert_eq!(format!("{}", id), "uid-789");
        assert_eq!(id, UserId::from("uid-789"));
    }
}
