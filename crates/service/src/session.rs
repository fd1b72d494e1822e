//! The signed-in principal, shared by every request issued through one transport.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::info;

/// Token and display identity, always held together.
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    token: String,
    identity: String,
}

impl Principal {
    pub fn new(token: impl Into<String>, identity: impl Into<String>) -> Self {
        Self { token: token.into(), identity: identity.into() }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("token", &"<redacted>")
            .field("identity", &self.identity)
            .finish()
    }
}

/// Current session. Readers see either the whole principal or none of it;
/// replacement and clearing are single atomic pointer swaps.
pub struct Session {
    current: ArcSwapOption<Principal>,
}

impl Default for Session {
    fn default() -> Self {
        Self { current: ArcSwapOption::empty() }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("principal", &self.current.load_full()).finish()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(token: impl Into<String>, identity: impl Into<String>) -> Self {
        let session = Self::new();
        session.sign_in(token, identity);
        session
    }

    pub fn sign_in(&self, token: impl Into<String>, identity: impl Into<String>) {
        let principal = Principal::new(token, identity);
        info!(identity = %principal.identity(), "session started");
        self.current.store(Some(Arc::new(principal)));
    }

    /// Explicit logout. Returns whether a principal was present.
    pub fn sign_out(&self) -> bool {
        let previous = self.current.swap(None);
        if let Some(principal) = &previous {
            info!(identity = %principal.identity(), "session ended by sign-out");
        }
        previous.is_some()
    }

    pub fn snapshot(&self) -> Option<Arc<Principal>> {
        self.current.load_full()
    }

    pub fn token(&self) -> Option<String> {
        self.current.load_full().map(|p| p.token().to_string())
    }

    pub fn identity(&self) -> Option<String> {
        self.current.load_full().map(|p| p.identity().to_string())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.load().is_some()
    }

    /// Clear the session if it still holds `observed`, the principal whose
    /// token was sent with the rejected request. A newer sign-in is kept.
    pub(crate) fn expire(&self, observed: &Option<Arc<Principal>>) -> bool {
        let previous = self.current.compare_and_swap(observed, None::<Arc<Principal>>);
        match (&*previous, observed) {
            (Some(prev), Some(seen)) => Arc::ptr_eq(prev, seen),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_and_token_travel_together() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert_eq!(session.identity(), None);

        session.sign_in("tok-1", "admin@loan.com");
        assert_eq!(session.token().as_deref(), Some("tok-1"));
        assert_eq!(session.identity().as_deref(), Some("admin@loan.com"));

        assert!(session.sign_out());
        assert_eq!(session.token(), None);
        assert_eq!(session.identity(), None);
        assert!(!session.sign_out());
    }

    #[test]
    fn expire_clears_the_observed_principal() {
        let session = Session::signed_in("tok-1", "admin@loan.com");
        let observed = session.snapshot();
        assert!(session.expire(&observed));
        assert!(!session.is_authenticated());
        // a second expiry of the same principal is a no-op
        assert!(!session.expire(&observed));
    }

    #[test]
    fn stale_expiry_keeps_a_newer_sign_in() {
        let session = Session::signed_in("old", "admin@loan.com");
        let observed = session.snapshot();
        session.sign_in("new", "admin@loan.com");
        assert!(!session.expire(&observed));
        assert_eq!(session.token().as_deref(), Some("new"));
    }

    #[test]
    fn expiry_of_an_anonymous_request_never_clears() {
        let session = Session::new();
        let observed = session.snapshot();
        session.sign_in("tok", "ops@loan.com");
        assert!(!session.expire(&observed));
        assert!(session.is_authenticated());
    }

    #[test]
    fn debug_output_redacts_the_token() {
        let session = Session::signed_in("secret-token", "admin@loan.com");
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("admin@loan.com"));
    }

    #[test]
    fn concurrent_expiry_clears_exactly_once() {
        let session = Arc::new(Session::signed_in("tok", "admin@loan.com"));
        let observed = session.snapshot();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = Arc::clone(&session);
                let observed = observed.clone();
                std::thread::spawn(move || session.expire(&observed))
            })
            .collect();
        let cleared = handles.into_iter().filter_map(|h| h.join().ok()).filter(|c| *c).count();
        assert_eq!(cleared, 1);
        assert!(!session.is_authenticated());
    }
}
