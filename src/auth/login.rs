use crate::api::{LoginRequest, LoginResponse, RevoltClient};
use crate::session::SessionCredential;

use super::credentials::{establish_session, CredentialStore};
use super::error::AuthError;
use super::method::{parse_allowed_methods, MfaMethod};

/// Result of a primary (email/password) login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    /// Logged in; the session is active and persisted.
    Authenticated(SessionCredential),
    /// A second factor is required; hand the ticket to an
    /// [`MfaFlow`](super::MfaFlow).
    MfaRequired {
        ticket: String,
        allowed_methods: Vec<MfaMethod>,
    },
    /// The account exists but is disabled.
    Disabled { user_id: String },
}

/// Primary login, session restore and logout.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use peptide::api::RevoltClient;
/// use peptide::auth::{CredentialStore, LoginService, LoginStep};
/// use peptide::session::SessionContext;
/// use peptide::storage::{FileKvStorage, KvStorageConfig};
///
/// # async fn run() -> Result<(), peptide::auth::AuthError> {
/// let client = RevoltClient::new("https://api.revolt.chat", SessionContext::new());
/// let storage = FileKvStorage::new(KvStorageConfig::new("/tmp/peptide".into()));
/// let service = LoginService::new(client, CredentialStore::new(Arc::new(storage)));
/// if let LoginStep::MfaRequired { ticket, .. } = service.login("me@example.com", "hunter2").await? {
///     println!("continue with ticket {ticket}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct LoginService {
    client: RevoltClient,
    credentials: CredentialStore,
    friendly_name: Option<String>,
}

impl LoginService {
    pub fn new(client: RevoltClient, credentials: CredentialStore) -> Self {
        Self {
            client,
            credentials,
            friendly_name: None,
        }
    }

    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginStep, AuthError> {
        let response = self
            .client
            .login(&LoginRequest::Email {
                email: email.to_string(),
                password: password.to_string(),
                friendly_name: self.friendly_name.clone(),
            })
            .await?;

        match response {
            LoginResponse::Mfa {
                ticket,
                allowed_methods,
            } => {
                tracing::debug!("Login requires a second factor");
                Ok(LoginStep::MfaRequired {
                    ticket,
                    allowed_methods: parse_allowed_methods(
                        allowed_methods.iter().map(String::as_str),
                    ),
                })
            }
            LoginResponse::Disabled { user_id } => Ok(LoginStep::Disabled { user_id }),
            success @ LoginResponse::Success(_) => {
                let credential =
                    establish_session(self.client.session(), &self.credentials, success)?;
                tracing::info!(session_id = %credential.id, "Logged in");
                Ok(LoginStep::Authenticated(credential))
            }
        }
    }

    /// Load a persisted credential into the session context.
    pub fn restore(&self) -> Result<Option<SessionCredential>, AuthError> {
        let credential = self.credentials.load()?;
        if let Some(credential) = &credential {
            self.client.session().login_as(credential.clone());
            tracing::debug!(session_id = %credential.id, "Restored session");
        }
        Ok(credential)
    }

    /// Log out on the server (best effort), then forget the session locally.
    pub async fn logout(&self) -> Result<(), AuthError> {
        if self.client.session().is_logged_in() {
            if let Err(err) = self.client.logout().await {
                tracing::warn!(error = %err, "Server logout failed; clearing local session anyway");
            }
        }
        self.client.session().clear();
        self.credentials.clear()?;
        Ok(())
    }
}
