//! Configuration system (layered: code > env > config file > defaults).

use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::PeptideError;

pub const DEFAULT_API_URL: &str = "https://api.revolt.chat";
pub const DEFAULT_APP_HOST: &str = "app.revolt.chat";
pub const DEFAULT_FRIENDLY_NAME: &str = "peptide";
const CONFIG_FILE_NAME: &str = "config.toml";

const ENV_API_URL: &str = "PEPTIDE_API_URL";
const ENV_APP_HOST: &str = "PEPTIDE_APP_HOST";
const ENV_DATA_DIR: &str = "PEPTIDE_DATA_DIR";
const ENV_FRIENDLY_NAME: &str = "PEPTIDE_FRIENDLY_NAME";

/// Values supplied in code; each one wins over every other layer.
///
/// # Example
/// ```no_run
/// use peptide::config::{ConfigOverrides, PeptideConfig};
///
/// let overrides = ConfigOverrides::builder()
///     .api_url("https://api.example.com".to_string())
///     .build();
/// let config = PeptideConfig::load(overrides)?;
/// # Ok::<(), peptide::error::PeptideError>(())
/// ```
#[derive(Debug, Clone, Default, Builder, Serialize, Deserialize)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub app_host: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub friendly_name: Option<String>,
}

/// Optional `config.toml` inside the data directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    api_url: Option<String>,
    app_host: Option<String>,
    friendly_name: Option<String>,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeptideConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
    /// Host of the web app, used to build invite links.
    pub app_host: String,
    /// Directory holding `config.toml` and the key/value store.
    pub data_dir: PathBuf,
    /// Session name reported to the server on login.
    pub friendly_name: String,
}

impl Default for PeptideConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            app_host: DEFAULT_APP_HOST.to_string(),
            data_dir: default_data_dir(),
            friendly_name: DEFAULT_FRIENDLY_NAME.to_string(),
        }
    }
}

impl PeptideConfig {
    /// Resolve configuration from overrides, the process environment
    /// (after loading `.env` if present) and the config file.
    pub fn load(overrides: ConfigOverrides) -> Result<Self, PeptideError> {
        let _ = dotenvy::dotenv();
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Same as [`PeptideConfig::load`] with an explicit environment lookup.
    pub fn resolve(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, PeptideError> {
        let data_dir = overrides
            .data_dir
            .or_else(|| env(ENV_DATA_DIR).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);
        let file = read_file_config(&data_dir)?;

        let api_url = overrides
            .api_url
            .or_else(|| env(ENV_API_URL))
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let app_host = overrides
            .app_host
            .or_else(|| env(ENV_APP_HOST))
            .or(file.app_host)
            .unwrap_or_else(|| DEFAULT_APP_HOST.to_string());
        let friendly_name = overrides
            .friendly_name
            .or_else(|| env(ENV_FRIENDLY_NAME))
            .or(file.friendly_name)
            .unwrap_or_else(|| DEFAULT_FRIENDLY_NAME.to_string());

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(PeptideError::Configuration(format!(
                "api_url must be an http(s) URL, got {api_url}"
            )));
        }

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            app_host,
            data_dir,
            friendly_name,
        })
    }
}

fn read_file_config(data_dir: &Path) -> Result<FileConfig, PeptideError> {
    let path = data_dir.join(CONFIG_FILE_NAME);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(FileConfig::default())
        }
        Err(err) => {
            return Err(PeptideError::Configuration(format!(
                "failed to read {}: {err}",
                path.display()
            )))
        }
    };
    toml::from_str(&raw).map_err(|err| {
        PeptideError::Configuration(format!("invalid {}: {err}", path.display()))
    })
}

fn default_data_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".peptide"))
        .unwrap_or_else(|| PathBuf::from(".peptide"))
}
