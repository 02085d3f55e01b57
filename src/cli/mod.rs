//! CLI entry point for Peptide.

pub mod account;
pub mod auth;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::api::RevoltClient;
use crate::auth::{CredentialStore, LoginService};
use crate::config::{ConfigOverrides, PeptideConfig};
use crate::error::PeptideError;
use crate::session::SessionContext;
use crate::storage::{FileKvStorage, KvStorageConfig};

/// Peptide CLI
#[derive(Parser, Debug)]
#[command(name = "peptide", version, about = "Peptide — Revolt account CLI")]
pub struct Cli {
    /// REST API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory for config.toml and stored credentials
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Session management
    Auth(AuthArgs),
    /// Set your presence
    Status(StatusArgs),
    /// Join or build invite links
    Invite(InviteArgs),
    /// Synced chat settings
    Settings(SettingsArgs),
}

/// Arguments for the `auth` subcommand group.
#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommands,
}

/// Auth subcommands.
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Log in with email and password (password is read from stdin)
    Login(LoginArgs),
    /// Finish a login that needs a second factor
    Mfa(MfaArgs),
    /// Show whether a session is stored
    Status,
    /// Log out and forget the stored session
    Logout,
}

/// Arguments for `peptide auth login`.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    pub email: String,
}

/// Arguments for `peptide auth mfa`.
#[derive(Parser, Debug)]
pub struct MfaArgs {
    /// Ticket printed by `peptide auth login`
    #[arg(long)]
    pub ticket: String,

    /// Methods offered for the ticket, comma separated
    #[arg(long)]
    pub methods: Option<String>,

    /// One-time code from an authenticator app
    #[arg(long, conflicts_with = "recovery", required_unless_present = "recovery")]
    pub totp: Option<String>,

    /// Recovery code
    #[arg(long)]
    pub recovery: Option<String>,
}

/// Arguments for `peptide status`.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// online, idle, focus, busy (dnd) or invisible (offline)
    pub presence: String,
}

/// Arguments for the `invite` subcommand group.
#[derive(Parser, Debug)]
pub struct InviteArgs {
    #[command(subcommand)]
    pub command: InviteCommands,
}

#[derive(Subcommand, Debug)]
pub enum InviteCommands {
    /// Join a server or group by code or link
    Join { invite: String },
    /// Print the shareable link for a code
    Link { invite: String },
}

/// Arguments for the `settings` subcommand group.
#[derive(Parser, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print the resolved settings
    Show,
    /// Set the reply gesture (None, SwipeFromEnd, DoubleTap)
    ReplyStyle { style: String },
    /// Toggle rich embeds
    Embeds {
        #[arg(long)]
        youtube: Option<bool>,
        #[arg(long)]
        apple_music: Option<bool>,
    },
}

/// Shared wiring for command handlers.
pub struct Context {
    pub config: PeptideConfig,
    pub client: RevoltClient,
    pub credentials: CredentialStore,
}

impl Context {
    /// Resolve config and restore any stored session.
    pub fn load(cli: &Cli) -> Result<Self, PeptideError> {
        let overrides = ConfigOverrides {
            api_url: cli.api_url.clone(),
            data_dir: cli.data_dir.clone(),
            ..ConfigOverrides::default()
        };
        let config = PeptideConfig::load(overrides)?;
        let client = RevoltClient::from_config(&config, SessionContext::new())?;
        let storage = FileKvStorage::new(KvStorageConfig::new(config.data_dir.clone()));
        let credentials = CredentialStore::new(Arc::new(storage));
        let context = Self {
            config,
            client,
            credentials,
        };
        context.login_service().restore()?;
        Ok(context)
    }

    pub fn login_service(&self) -> LoginService {
        LoginService::new(self.client.clone(), self.credentials.clone())
            .with_friendly_name(self.config.friendly_name.clone())
    }

    pub fn require_session(&self) -> Result<(), PeptideError> {
        if self.client.session().is_logged_in() {
            Ok(())
        } else {
            Err(PeptideError::NotLoggedIn)
        }
    }
}

/// Map an error to a message with a next step where one exists.
pub fn format_error_help(err: &PeptideError) -> String {
    match err {
        PeptideError::NotLoggedIn => "Not logged in. Run: peptide auth login <email>".to_string(),
        PeptideError::Configuration(msg) => {
            format!("Configuration error: {msg}. Check your .env or config.toml")
        }
        other => other.to_string(),
    }
}
