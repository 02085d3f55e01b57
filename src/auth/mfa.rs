//! Multi-factor verification flow.
//!
//! [`MfaFlow`] holds the code the user is typing, submits it together with
//! the ticket from the primary login, and reports the result. A successful
//! verification activates and persists the session, then fires the
//! [`ProceedSignal`] exactly once.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiError, LoginResponse, RevoltClient};
use crate::session::SessionCredential;

use super::credentials::{establish_session, CredentialStore};
use super::error::AuthError;
use super::method::MfaMethod;

/// Shown when a failure carries no message of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Destination after a successful verification.
pub const HOME_ROUTE: &str = "chat";

/// Result of a single verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Success(SessionCredential),
    /// The server rejected the attempt; `message` is its error type tag.
    TypedError { message: String },
    /// Transport failure or a success response that could not be used.
    UnexpectedFailure { message: String },
}

impl VerificationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// User-visible error text, if the attempt failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::TypedError { message } | Self::UnexpectedFailure { message } => Some(message),
        }
    }
}

/// Event emitted once a verification succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MfaEvent {
    Proceed(SessionCredential),
}

/// Receiving half of the one-shot proceed event.
#[derive(Debug)]
pub struct ProceedSignal {
    rx: oneshot::Receiver<MfaEvent>,
}

impl ProceedSignal {
    /// Wait for the event. `None` means the flow was dropped without ever
    /// succeeding.
    pub async fn wait(self) -> Option<MfaEvent> {
        self.rx.await.ok()
    }

    /// Take the event if it has already fired.
    pub fn try_take(&mut self) -> Option<MfaEvent> {
        self.rx.try_recv().ok()
    }
}

#[derive(Debug, Default)]
struct MfaState {
    code: String,
    recovery_code: String,
    error: Option<String>,
}

/// Controller for one MFA screen instance.
///
/// All methods take `&self`; share it behind an `Arc` when input handling
/// and submission run on different tasks. Only one attempt may be in flight
/// at a time.
pub struct MfaFlow {
    client: RevoltClient,
    credentials: CredentialStore,
    friendly_name: Option<String>,
    allowed_methods: Vec<MfaMethod>,
    state: Mutex<MfaState>,
    in_flight: AtomicBool,
    proceed: Mutex<Option<oneshot::Sender<MfaEvent>>>,
    cancel: CancellationToken,
}

impl MfaFlow {
    pub fn new(client: RevoltClient, credentials: CredentialStore) -> (Self, ProceedSignal) {
        let (tx, rx) = oneshot::channel();
        let flow = Self {
            client,
            credentials,
            friendly_name: None,
            allowed_methods: Vec::new(),
            state: Mutex::new(MfaState::default()),
            in_flight: AtomicBool::new(false),
            proceed: Mutex::new(Some(tx)),
            cancel: CancellationToken::new(),
        };
        (flow, ProceedSignal { rx })
    }

    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    /// Restrict submissions to the methods the server offered for the
    /// ticket. An empty list allows every method.
    pub fn with_allowed_methods(mut self, methods: Vec<MfaMethod>) -> Self {
        self.allowed_methods = methods;
        self
    }

    pub fn allows(&self, method: MfaMethod) -> bool {
        self.allowed_methods.is_empty() || self.allowed_methods.contains(&method)
    }

    /// Store one-time-code input with every non-digit removed. Length is
    /// not checked.
    pub fn set_code(&self, raw: &str) {
        self.lock_state().code = sanitize_digits(raw);
    }

    pub fn set_recovery_code(&self, raw: &str) {
        self.lock_state().recovery_code = raw.to_string();
    }

    pub fn code(&self) -> String {
        self.lock_state().code.clone()
    }

    pub fn recovery_code(&self) -> String {
        self.lock_state().recovery_code.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.lock_state().error.clone()
    }

    /// Abort any in-flight attempt; later submissions fail immediately.
    /// Call this when the owning screen goes away.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub async fn submit_one_time_code(
        &self,
        ticket: &str,
    ) -> Result<VerificationOutcome, AuthError> {
        let code = self.code();
        let attempt = self.client.authenticate_with_mfa_totp_code(
            ticket,
            &code,
            self.friendly_name.as_deref(),
        );
        self.submit(MfaMethod::Totp, attempt).await
    }

    pub async fn submit_recovery_code(
        &self,
        ticket: &str,
    ) -> Result<VerificationOutcome, AuthError> {
        let code = self.recovery_code();
        let attempt = self.client.authenticate_with_mfa_recovery_code(
            ticket,
            &code,
            self.friendly_name.as_deref(),
        );
        self.submit(MfaMethod::Recovery, attempt).await
    }

    /// Run one attempt. `attempt` is not polled, so no request goes out,
    /// unless the method is allowed and no other attempt is in flight.
    async fn submit(
        &self,
        method: MfaMethod,
        attempt: impl Future<Output = Result<LoginResponse, ApiError>>,
    ) -> Result<VerificationOutcome, AuthError> {
        if !self.allows(method) {
            return Err(AuthError::MethodNotAllowed(method));
        }
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(AuthError::AttemptInFlight)?;
        self.lock_state().error = None;

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(AuthError::Cancelled),
            result = attempt => result,
        };

        let outcome = match result {
            Err(ApiError::Typed { error_type, .. }) => VerificationOutcome::TypedError {
                message: error_type,
            },
            Err(err) => VerificationOutcome::UnexpectedFailure {
                message: failure_message(&err),
            },
            Ok(response) => {
                match establish_session(self.client.session(), &self.credentials, response) {
                    Ok(credential) => {
                        tracing::info!(%method, "Verified second factor");
                        self.fire_proceed(&credential);
                        VerificationOutcome::Success(credential)
                    }
                    Err(err) => VerificationOutcome::UnexpectedFailure {
                        message: failure_message(&err),
                    },
                }
            }
        };

        if let Some(message) = outcome.error_message() {
            tracing::debug!(%method, error = message, "Verification failed");
            self.lock_state().error = Some(message.to_string());
        }
        Ok(outcome)
    }

    fn fire_proceed(&self, credential: &SessionCredential) {
        let sender = self
            .proceed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        match sender {
            Some(tx) => {
                let _ = tx.send(MfaEvent::Proceed(credential.clone()));
            }
            None => tracing::debug!("Proceed event already delivered"),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, MfaState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Keep only ASCII digits: `"12 34-56"` becomes `"123456"`.
pub fn sanitize_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn failure_message(err: &dyn std::error::Error) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
