//! Portal account credentials.

use std::fmt;

/// Login credentials for the GrDF customer portal.
///
/// Immutable for the lifetime of a client instance. The secret is
/// redacted from `Debug` output so credentials can travel through
/// tracing spans without leaking.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    secret: String,
}

impl Credentials {
    /// Creates credentials from a portal username (email) and password.
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// Returns the account identifier (email).
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the account secret (password).
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}
