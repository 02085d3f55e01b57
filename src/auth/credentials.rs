use std::sync::Arc;

use crate::api::LoginResponse;
use crate::session::{SessionContext, SessionCredential};
use crate::storage::{KvStorage, StorageError};

use super::error::AuthError;

pub const SESSION_TOKEN_KEY: &str = "sessionToken";
pub const SESSION_ID_KEY: &str = "sessionId";

/// Persists the session credential in a [`KvStorage`].
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use peptide::auth::CredentialStore;
/// use peptide::session::SessionCredential;
/// use peptide::storage::{FileKvStorage, KvStorageConfig};
///
/// let storage = FileKvStorage::new(KvStorageConfig::new("/tmp/peptide".into()));
/// let store = CredentialStore::new(Arc::new(storage));
/// store.save(&SessionCredential::new("token", "session-id"))?;
/// # Ok::<(), peptide::storage::StorageError>(())
/// ```
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn KvStorage>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn KvStorage>) -> Self {
        Self { storage }
    }

    pub fn save(&self, credential: &SessionCredential) -> Result<(), StorageError> {
        self.storage.set(SESSION_TOKEN_KEY, &credential.token)?;
        self.storage.set(SESSION_ID_KEY, &credential.id)
    }

    /// Returns a credential only when both halves are stored.
    pub fn load(&self) -> Result<Option<SessionCredential>, StorageError> {
        let token = self.storage.get(SESSION_TOKEN_KEY)?;
        let id = self.storage.get(SESSION_ID_KEY)?;
        Ok(match (token, id) {
            (Some(token), Some(id)) if !token.is_empty() && !id.is_empty() => {
                Some(SessionCredential { token, id })
            }
            _ => None,
        })
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(SESSION_TOKEN_KEY)?;
        self.storage.remove(SESSION_ID_KEY)
    }
}

/// Turn a login response into an active, persisted session.
///
/// The credential is forwarded to the session context and then written to
/// the store. Nothing is written until both token and id are known; a
/// failed write leaves the in-memory session in place.
pub(crate) fn establish_session(
    session: &SessionContext,
    store: &CredentialStore,
    response: LoginResponse,
) -> Result<SessionCredential, AuthError> {
    let info = match response {
        LoginResponse::Success(info) => info,
        LoginResponse::Mfa { .. } => {
            return Err(AuthError::InvalidResponse(
                "server requested another verification step".to_string(),
            ))
        }
        LoginResponse::Disabled { .. } => {
            return Err(AuthError::InvalidResponse("account is disabled".to_string()))
        }
    };
    if info.token.is_empty() {
        return Err(AuthError::InvalidResponse(
            "session token missing from response".to_string(),
        ));
    }
    if info.id.is_empty() {
        return Err(AuthError::InvalidResponse(
            "session id missing from response".to_string(),
        ));
    }

    let credential = SessionCredential::new(info.token, info.id);
    session.login_as(credential.clone());
    store.save(&credential)?;
    Ok(credential)
}
