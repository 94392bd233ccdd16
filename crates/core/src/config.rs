//! Configuration management
//!
//! Credentials are resolved from command-line flags and environment variables
//! first, then from an optional TOML file at ~/.config/r2ls/config.toml:
//!
//! ```toml
//! schema_version = 1
//!
//! [r2]
//! account_id = "..."
//! access_key_id = "..."
//! secret_access_key = "..."
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::endpoint::{Connection, Credentials};
use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Default output format
const DEFAULT_OUTPUT: &str = "human";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,

    /// R2 account settings
    #[serde(default)]
    pub r2: R2Section,
}

/// Default settings for CLI behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Output format: "human" or "json"
    #[serde(default = "default_output")]
    pub output: String,

    /// Show a spinner while the request is in flight
    #[serde(default = "default_true")]
    pub progress: bool,
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            progress: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            r2: R2Section::default(),
        }
    }
}

/// The `[r2]` table. Every field may be overridden from the environment.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct R2Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,

    /// Replaces the account-derived endpoint URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

impl std::fmt::Debug for R2Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("R2Section")
            .field("account_id", &self.account_id)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

impl R2Section {
    /// Layer `self` over `fallback`, keeping the first non-empty value per field
    pub fn or(self, fallback: R2Section) -> R2Section {
        R2Section {
            account_id: non_empty(self.account_id).or(non_empty(fallback.account_id)),
            access_key_id: non_empty(self.access_key_id).or(non_empty(fallback.access_key_id)),
            secret_access_key: non_empty(self.secret_access_key)
                .or(non_empty(fallback.secret_access_key)),
            endpoint_url: non_empty(self.endpoint_url).or(non_empty(fallback.endpoint_url)),
        }
    }

    /// Turn the merged settings into a connection, failing on missing values
    pub fn into_connection(self) -> Result<Connection> {
        let access_key_id = require(self.access_key_id, "access key id", "R2_ACCESS_KEY_ID")?;
        let secret_access_key = require(
            self.secret_access_key,
            "secret access key",
            "R2_SECRET_ACCESS_KEY",
        )?;

        match non_empty(self.endpoint_url) {
            Some(url) => {
                let account_id = self.account_id.unwrap_or_default();
                let credentials = Credentials::new(access_key_id, secret_access_key, account_id);
                Connection::with_endpoint_url(credentials, url)
            }
            None => {
                let account_id = require(self.account_id, "account id", "R2_ACCOUNT_ID")?;
                Connection::new(Credentials::new(access_key_id, secret_access_key, account_id))
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require(value: Option<String>, what: &str, env: &str) -> Result<String> {
    non_empty(value).ok_or_else(|| {
        Error::Config(format!(
            "{what} is not set (pass it as a flag, set {env}, or add it to the config file)"
        ))
    })
}

/// Configuration manager handles locating and loading the config file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
    required: bool,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        let config_path = config_dir.join("r2ls").join("config.toml");
        Ok(Self {
            config_path,
            required: false,
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            required: false,
        }
    }

    /// A path the user asked for explicitly; loading fails if it is missing
    pub fn explicit(path: PathBuf) -> Self {
        Self {
            config_path: path,
            required: true,
        }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// A missing default file yields the default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            if self.required {
                return Err(Error::Config(format!(
                    "config file not found: {}",
                    self.config_path.display()
                )));
            }
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade r2ls.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        if config.r2.secret_access_key.is_some() {
            self.warn_if_readable_by_others();
        }

        tracing::debug!(path = %self.config_path.display(), "loaded config file");
        Ok(config)
    }

    #[cfg(unix)]
    fn warn_if_readable_by_others(&self) {
        use std::os::unix::fs::PermissionsExt;

        if let Ok(meta) = std::fs::metadata(&self.config_path)
            && meta.permissions().mode() & 0o077 != 0
        {
            tracing::warn!(
                path = %self.config_path.display(),
                "config file holds a secret key but is accessible by other users; consider chmod 600"
            );
        }
    }

    #[cfg(not(unix))]
    fn warn_if_readable_by_others(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let manager = ConfigManager::with_path(config_path);
        (manager, temp_dir)
    }

    fn section(account: &str, key: &str, secret: &str) -> R2Section {
        R2Section {
            account_id: Some(account.into()),
            access_key_id: Some(key.into()),
            secret_access_key: Some(secret.into()),
            endpoint_url: None,
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert_eq!(config.defaults.output, "human");
        assert!(config.defaults.progress);
        assert_eq!(config.r2, R2Section::default());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let (manager, _temp_dir) = temp_config_manager();
        let config = manager.load().unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::explicit(temp_dir.path().join("missing.toml"));
        let err = manager.load().unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn test_load_r2_section() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            r#"
            schema_version = 1

            [defaults]
            output = "json"

            [r2]
            account_id = "acct"
            access_key_id = "key"
            secret_access_key = "secret"
            "#,
        )
        .unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.defaults.output, "json");
        assert_eq!(config.r2, section("acct", "key", "secret"));
    }

    #[test]
    fn test_schema_version_too_new() {
        let (manager, _temp_dir) = temp_config_manager();

        let content = format!(
            r#"
            schema_version = {}
            "#,
            SCHEMA_VERSION + 1
        );
        std::fs::write(manager.config_path(), content).unwrap();

        let result = manager.load();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("newer than supported"));
    }

    #[test]
    fn test_malformed_file() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(manager.config_path(), "schema_version = [").unwrap();
        assert!(matches!(manager.load(), Err(Error::TomlParse(_))));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let flags = R2Section {
            account_id: Some("from-flag".into()),
            ..Default::default()
        };
        let merged = flags.or(section("from-file", "key", "secret"));

        assert_eq!(merged.account_id.as_deref(), Some("from-flag"));
        assert_eq!(merged.access_key_id.as_deref(), Some("key"));
    }

    #[test]
    fn test_blank_override_falls_through() {
        let flags = R2Section {
            account_id: Some("   ".into()),
            ..Default::default()
        };
        let merged = flags.or(section("from-file", "key", "secret"));
        assert_eq!(merged.account_id.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_into_connection() {
        let conn = section("acct", "key", "secret").into_connection().unwrap();
        assert_eq!(conn.endpoint.url, "https://acct.r2.cloudflarestorage.com");
        assert_eq!(conn.credentials.access_key_id, "key");
        assert_eq!(conn.credentials.secret_access_key, "secret");
    }

    #[test]
    fn test_into_connection_missing_secret() {
        let mut incomplete = section("acct", "key", "secret");
        incomplete.secret_access_key = None;

        let err = incomplete.into_connection().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("R2_SECRET_ACCESS_KEY"));
    }

    #[test]
    fn test_endpoint_url_makes_account_optional() {
        let settings = R2Section {
            account_id: None,
            access_key_id: Some("key".into()),
            secret_access_key: Some("secret".into()),
            endpoint_url: Some("http://localhost:9000".into()),
        };
        let conn = settings.into_connection().unwrap();
        assert_eq!(conn.endpoint.url, "http://localhost:9000");
    }

    #[test]
    fn test_section_debug_redacts_secret() {
        let rendered = format!("{:?}", section("acct", "key", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
