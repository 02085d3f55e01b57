use reqwest::Method;
use serde::Serialize;

use crate::api::{ApiError, RevoltClient};
use crate::types::Presence;

#[derive(Debug, Serialize)]
struct EditUser {
    status: UserStatus,
}

#[derive(Debug, Serialize)]
struct UserStatus {
    presence: Presence,
}

impl RevoltClient {
    /// Change the logged-in user's presence.
    pub async fn set_presence(&self, presence: Presence) -> Result<(), ApiError> {
        let req = self.authed(Method::PATCH, "/users/@me")?.json(&EditUser {
            status: UserStatus { presence },
        });
        self.send_empty(req).await
    }
}
