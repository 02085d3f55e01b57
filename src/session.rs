//! Explicit session context shared between the API client and auth flows.

use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Token and identifier issued by the server for a logged-in session.
///
/// Created only on successful authentication and replaced wholesale on the
/// next login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredential {
    pub token: String,
    pub id: String,
}

impl SessionCredential {
    pub fn new(token: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            id: id.into(),
        }
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredential")
            .field("token", &"..")
            .field("id", &self.id)
            .finish()
    }
}

/// Current session, cloned cheaply into every collaborator that needs it.
#[derive(Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<SessionCredential>>>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current session.
    pub fn login_as(&self, credential: SessionCredential) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(credential);
    }

    pub fn current(&self) -> Option<SessionCredential> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|c| c.token)
    }

    pub fn session_id(&self) -> Option<String> {
        self.current().map(|c| c.id)
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    pub fn clear(&self) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let session = SessionContext::new();
        let shared = session.clone();
        session.login_as(SessionCredential::new("tok", "sid"));
        assert_eq!(shared.token().as_deref(), Some("tok"));
        assert_eq!(shared.session_id().as_deref(), Some("sid"));
        shared.clear();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", SessionCredential::new("secret-token", "sid"));
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("sid"));
    }

    #[test]
    fn poisoned_lock_still_reports_the_session() {
        let session = SessionContext::new();
        session.login_as(SessionCredential::new("tok", "sid"));

        let poisoner = session.clone();
        let result = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the session lock");
        })
        .join();
        assert!(result.is_err());
        assert!(session.inner.is_poisoned());

        assert!(session.is_logged_in());
        assert_eq!(session.token().as_deref(), Some("tok"));
        session.clear();
        assert!(!session.is_logged_in());
    }
}
