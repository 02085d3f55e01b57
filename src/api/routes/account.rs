use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, RevoltClient};

/// Body of `POST /auth/session/login`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LoginRequest {
    Email {
        email: String,
        password: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        friendly_name: Option<String>,
    },
    Mfa {
        mfa_ticket: String,
        mfa_response: MfaResponse,
        #[serde(skip_serializing_if = "Option::is_none")]
        friendly_name: Option<String>,
    },
}

/// Second-factor credential sent alongside an MFA ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MfaResponse {
    Totp { totp_code: String },
    Recovery { recovery_code: String },
}

/// Response of `POST /auth/session/login`, tagged by `result`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "result")]
pub enum LoginResponse {
    Success(SessionInfo),
    #[serde(rename = "MFA")]
    Mfa {
        ticket: String,
        #[serde(default)]
        allowed_methods: Vec<String>,
    },
    Disabled {
        user_id: String,
    },
}

/// Session issued on a successful login.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionInfo {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub name: String,
}

impl RevoltClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let kind = match request {
            LoginRequest::Email { .. } => "email",
            LoginRequest::Mfa { .. } => "mfa",
        };
        tracing::debug!(kind, "Sending login request");
        let req = self
            .request(Method::POST, "/auth/session/login")
            .json(request);
        self.send_json(req).await
    }

    /// Complete an MFA challenge with a time-based one-time code.
    pub async fn authenticate_with_mfa_totp_code(
        &self,
        mfa_ticket: &str,
        totp_code: &str,
        friendly_name: Option<&str>,
    ) -> Result<LoginResponse, ApiError> {
        self.login(&LoginRequest::Mfa {
            mfa_ticket: mfa_ticket.to_string(),
            mfa_response: MfaResponse::Totp {
                totp_code: totp_code.to_string(),
            },
            friendly_name: friendly_name.map(str::to_string),
        })
        .await
    }

    /// Complete an MFA challenge with a recovery code.
    pub async fn authenticate_with_mfa_recovery_code(
        &self,
        mfa_ticket: &str,
        recovery_code: &str,
        friendly_name: Option<&str>,
    ) -> Result<LoginResponse, ApiError> {
        self.login(&LoginRequest::Mfa {
            mfa_ticket: mfa_ticket.to_string(),
            mfa_response: MfaResponse::Recovery {
                recovery_code: recovery_code.to_string(),
            },
            friendly_name: friendly_name.map(str::to_string),
        })
        .await
    }

    /// Invalidate the current session on the server.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let req = self.authed(Method::POST, "/auth/session/logout")?;
        self.send_empty(req).await
    }
}
