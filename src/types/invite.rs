use std::fmt;

use crate::error::PeptideError;

/// Invite code extracted from user input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InviteCode(String);

impl InviteCode {
    /// Accepts either a bare code or an `https://` invite link, in which
    /// case the last non-empty path segment is the code.
    pub fn parse(input: &str) -> Result<Self, PeptideError> {
        let trimmed = input.trim();
        let code = if let Some(rest) = trimmed.strip_prefix("https://") {
            let path = rest.split(['?', '#']).next().unwrap_or_default();
            path.split('/')
                .skip(1)
                .filter(|segment| !segment.is_empty())
                .last()
                .unwrap_or_default()
        } else {
            trimmed
        };

        if code.is_empty() {
            return Err(PeptideError::InvalidArgument(format!(
                "no invite code in {input:?}"
            )));
        }
        if code.contains(char::is_whitespace) || code.contains('/') {
            return Err(PeptideError::InvalidArgument(format!(
                "invalid invite code {code:?}"
            )));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shareable link for this invite on the given web app host.
    pub fn url(&self, app_host: &str) -> String {
        format!("https://{app_host}/invite/{}", self.0)
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
