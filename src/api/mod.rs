//! HTTP client for the Revolt REST API.

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::account::{LoginRequest, LoginResponse, MfaResponse, SessionInfo};
pub use routes::invites::InviteJoinResponse;

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::PeptideConfig;
use crate::error::PeptideError;
use crate::session::SessionContext;

const SESSION_HEADER: &str = "x-session-token";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Revolt REST API.
///
/// Authenticated routes read the token from the shared [`SessionContext`]
/// at call time, so a login performed through one clone is visible to all.
///
/// # Example
/// ```no_run
/// use peptide::api::RevoltClient;
/// use peptide::session::SessionContext;
///
/// let client = RevoltClient::new("https://api.revolt.chat", SessionContext::new());
/// ```
#[derive(Debug, Clone)]
pub struct RevoltClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl RevoltClient {
    pub fn new(base_url: impl Into<String>, session: SessionContext) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Build a client with a request timeout and user agent from config.
    pub fn from_config(config: &PeptideConfig, session: SessionContext) -> Result<Self, PeptideError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("peptide/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| PeptideError::Configuration(format!("HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            session,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header("Accept", "application/json")
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.session.token().ok_or(ApiError::MissingSession)?;
        Ok(self.request(method, path).header(SESSION_HEADER, token))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let resp = check_status(request.send().await?).await?;
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        check_status(request.send().await?).await?;
        Ok(())
    }
}

async fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), "Revolt API request failed");
    Err(ApiError::from_response_body(status.as_u16(), &body))
}
