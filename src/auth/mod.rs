//! Login, multi-factor verification and credential persistence.

pub mod credentials;
pub mod error;
pub mod login;
pub mod method;
pub mod mfa;

pub use credentials::{CredentialStore, SESSION_ID_KEY, SESSION_TOKEN_KEY};
pub use error::AuthError;
pub use login::{LoginService, LoginStep};
pub use method::{parse_allowed_methods, parse_allowed_methods_csv, MfaMethod};
pub use mfa::{
    sanitize_digits, MfaEvent, MfaFlow, ProceedSignal, VerificationOutcome, HOME_ROUTE,
    UNKNOWN_ERROR,
};
