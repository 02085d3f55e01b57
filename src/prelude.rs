//! Convenience re-exports.

pub use crate::api::{ApiError, RevoltClient};
pub use crate::auth::{
    AuthError, CredentialStore, LoginService, LoginStep, MfaEvent, MfaFlow, MfaMethod,
    VerificationOutcome,
};
pub use crate::config::{ConfigOverrides, PeptideConfig};
pub use crate::error::{PeptideError, Result};
pub use crate::session::{SessionContext, SessionCredential};
pub use crate::settings::{LoadedSettings, SettingsService};
pub use crate::storage::{FileKvStorage, KvStorage, KvStorageConfig};
pub use crate::types::{InviteCode, Presence, TypingMessage};
