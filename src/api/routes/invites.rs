use reqwest::Method;
use serde::Deserialize;

use crate::api::{ApiError, RevoltClient};
use crate::types::InviteCode;

/// What joining an invite gave access to.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum InviteJoinResponse {
    Server { server: JoinedServer },
    Group { channel: JoinedChannel },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinedServer {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinedChannel {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl RevoltClient {
    pub async fn join_invite(&self, code: &InviteCode) -> Result<InviteJoinResponse, ApiError> {
        let req = self.authed(Method::POST, &format!("/invites/{}", code.as_str()))?;
        self.send_json(req).await
    }
}
