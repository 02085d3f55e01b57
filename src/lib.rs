//! Peptide — account and session core for Revolt chat clients.
//!
//! Covers the non-visual half of a client's login experience: email and
//! password login, multi-factor verification, session persistence, plus
//! presence, invites and synced settings.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use peptide::prelude::*;
//!
//! # async fn example() -> peptide::error::Result<()> {
//! let config = PeptideConfig::load(ConfigOverrides::default())?;
//! let client = RevoltClient::from_config(&config, SessionContext::new())?;
//! let storage = FileKvStorage::new(KvStorageConfig::new(config.data_dir.clone()));
//! let credentials = CredentialStore::new(Arc::new(storage));
//!
//! let login = LoginService::new(client.clone(), credentials.clone());
//! if let LoginStep::MfaRequired { ticket, allowed_methods } =
//!     login.login("me@example.com", "hunter2").await?
//! {
//!     let (flow, proceed) = MfaFlow::new(client, credentials);
//!     let flow = flow.with_allowed_methods(allowed_methods);
//!     flow.set_code("123 456");
//!     flow.submit_one_time_code(&ticket).await?;
//!     if let Some(MfaEvent::Proceed(credential)) = proceed.wait().await {
//!         println!("logged in as session {}", credential.id);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod prelude;
pub mod session;
pub mod settings;
pub mod storage;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
