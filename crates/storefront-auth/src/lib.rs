//! Authentication for the storefront.
//!
//! The storefront never handles credentials itself; it talks to an
//! `IdentityProvider`. This crate defines that boundary, the `AuthSession`
//! that is constructed once and passed to whatever needs to know who is
//! signed in, and a `LocalIdentityProvider` for development and tests.

mod error;
mod local;
mod password;
mod provider;
mod session;
mod user;

pub use error::AuthError;
pub use local::LocalIdentityProvider;
pub use password::PasswordHasher;
pub use provider::{AuthStateReceiver, IdentityProvider};
pub use session::AuthSession;
pub use user::{User, UserId};
