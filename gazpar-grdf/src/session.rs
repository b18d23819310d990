//! Authenticated-session state.
//!
//! The flag and the cached delivery-point id live here; the cookie jar
//! that actually carries the session lives with the HTTP client. The two
//! are owned by the same [`GrdfClient`](crate::GrdfClient) instance and
//! are never shared.

/// Session state owned by a client instance.
#[derive(Debug, Clone, Default)]
pub(crate) struct Session {
    authenticated: bool,
    pce: Option<String>,
}

impl Session {
    /// Returns true when a handshake has completed and the session has
    /// not been invalidated since.
    pub(crate) fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Returns the cached delivery-point id, if any handshake populated
    /// it.
    pub(crate) fn pce(&self) -> Option<&str> {
        self.pce.as_deref()
    }

    /// Marks the session established with the given delivery point.
    pub(crate) fn establish(&mut self, pce: String) {
        self.authenticated = true;
        self.pce = Some(pce);
    }

    /// Drops the authenticated flag.
    ///
    /// The cached id is retained: only the cookie jar decides whether a
    /// request succeeds, so the next `ensure_authenticated` re-runs the
    /// full handshake either way.
    pub(crate) fn invalidate(&mut self) {
        self.authenticated = false;
    }
}
