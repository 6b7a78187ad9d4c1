//! Configuration file management.
//!
//! Handles reading, writing, and validating `.sapper.toml`. The two secrets
//! live in separate sections because they belong to separate trust domains:
//!
//! ```toml
//! [token]
//! key = "<64 hex chars>"
//! freshness_secs = 5
//! skew_secs = 1
//!
//! [service]
//! key = "<64 hex chars>"
//! trailing = "ignore"
//! ```
//!
//! `SAPPER_TOKEN_KEY` and `SAPPER_SERVICE_KEY` override the file.

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::codec::{Aes, Domain};
use crate::core::constants;
use crate::core::key::SharedKey;
use crate::core::service_key::{ServiceKeys, Trailing};
use crate::core::token::{TokenIssuer, TokenPolicy};
use crate::error::{ConfigError, Result};

/// Parsed `.sapper.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub token: TokenConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

/// `[token]` section.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Token signing key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Maximum token age in seconds
    #[serde(default = "default_freshness")]
    pub freshness_secs: i64,
    /// Tolerated clock skew for future-dated tokens, in seconds
    #[serde(default = "default_skew")]
    pub skew_secs: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            key: None,
            freshness_secs: default_freshness(),
            skew_secs: default_skew(),
        }
    }
}

/// `[service]` section.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service-key signing key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Handling of bytes after the separator
    #[serde(default)]
    pub trailing: Trailing,
}

fn default_freshness() -> i64 {
    constants::DEFAULT_FRESHNESS_SECS
}

fn default_skew() -> i64 {
    constants::DEFAULT_SKEW_SECS
}

impl Config {
    /// Fresh configuration with newly generated keys.
    pub fn generate() -> Self {
        let mut config = Self::default();
        config.token.key = Some(SharedKey::generate().to_hex().to_string());
        config.service.key = Some(SharedKey::generate().to_hex().to_string());
        config
    }

    /// Load configuration from `path`, then apply environment overrides.
    ///
    /// A missing file is only an error when no key is supplied through the
    /// environment either.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound`, `ConfigError::ReadFile`,
    /// `ConfigError::Parse`, or any validation error.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let token_env = std::env::var(constants::TOKEN_KEY_ENV).ok();
        let service_env = std::env::var(constants::SERVICE_KEY_ENV).ok();

        let config = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
            Self::parse(&contents)?
        } else if token_env.is_some() || service_env.is_some() {
            debug!("config file absent, using environment only");
            Self::default()
        } else {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        };

        let config = config.with_overrides(token_env, service_env);
        config.validate()?;

        debug!(
            token_key = config.token.key.is_some(),
            service_key = config.service.key.is_some(),
            freshness_secs = config.token.freshness_secs,
            "config loaded"
        );
        Ok(config)
    }

    /// Parse TOML without validating.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents).map_err(ConfigError::Parse)?)
    }

    /// Replace keys with explicitly supplied values.
    pub fn with_overrides(mut self, token_key: Option<String>, service_key: Option<String>) -> Self {
        if token_key.is_some() {
            self.token.key = token_key;
        }
        if service_key.is_some() {
            self.service.key = service_key;
        }
        self
    }

    /// Write configuration to `path`.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Checks:
    /// - Keys that are present parse as 32-byte keys
    /// - Freshness window is positive and skew is not negative
    /// - Both fit in a `chrono::Duration`
    /// - Token and service keys are not the same secret
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` or `ConfigError::KeyReuse`.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if self.token.freshness_secs <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "token.freshness_secs",
                reason: format!("must be positive, got {}", self.token.freshness_secs),
            }
            .into());
        }

        if self.token.skew_secs < 0 {
            return Err(ConfigError::InvalidValue {
                field: "token.skew_secs",
                reason: format!("must not be negative, got {}", self.token.skew_secs),
            }
            .into());
        }

        self.token_policy()?;

        let token_key = self.token.key.as_deref().map(|k| parse_key("token.key", k)).transpose()?;
        let service_key = self
            .service
            .key
            .as_deref()
            .map(|k| parse_key("service.key", k))
            .transpose()?;

        if let (Some(token_key), Some(service_key)) = (token_key, service_key) {
            if token_key == service_key {
                return Err(ConfigError::KeyReuse.into());
            }
        }

        Ok(())
    }

    /// Freshness policy for account tokens.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if either window is too large to
    /// represent as a duration.
    pub fn token_policy(&self) -> Result<TokenPolicy> {
        Ok(TokenPolicy::new(
            seconds("token.freshness_secs", self.token.freshness_secs)?,
            seconds("token.skew_secs", self.token.skew_secs)?,
        ))
    }

    /// Token signing key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if no token key is configured.
    pub fn token_key(&self) -> Result<SharedKey> {
        let raw = self
            .token
            .key
            .as_deref()
            .ok_or(ConfigError::MissingField { field: "token.key" })?;
        parse_key("token.key", raw)
    }

    /// Service-key signing key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if no service key is configured.
    pub fn service_key(&self) -> Result<SharedKey> {
        let raw = self
            .service
            .key
            .as_deref()
            .ok_or(ConfigError::MissingField {
                field: "service.key",
            })?;
        parse_key("service.key", raw)
    }

    /// Token issuer keyed with the token key.
    pub fn token_issuer(&self) -> Result<TokenIssuer<Aes>> {
        let codec = Aes::new(&self.token_key()?, Domain::Token);
        Ok(TokenIssuer::new(codec, self.token_policy()?))
    }

    /// Service-key codec keyed with the service key.
    pub fn service_keys(&self) -> Result<ServiceKeys<Aes>> {
        let codec = Aes::new(&self.service_key()?, Domain::ServiceKey);
        Ok(ServiceKeys::new(codec, self.service.trailing))
    }
}

fn seconds(field: &'static str, secs: i64) -> Result<Duration> {
    Duration::try_seconds(secs).ok_or_else(|| {
        ConfigError::InvalidValue {
            field,
            reason: format!("{} seconds is out of range", secs),
        }
        .into()
    })
}

fn parse_key(field: &'static str, raw: &str) -> Result<SharedKey> {
    SharedKey::parse(raw).map_err(|e| {
        ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const TOKEN_KEY: &str = "1111111111111111111111111111111111111111111111111111111111111111";
    const SERVICE_KEY: &str = "2222222222222222222222222222222222222222222222222222222222222222";

    #[test]
    fn test_parse_full() {
        let config = Config::parse(&format!(
            "[token]\nkey = \"{}\"\nfreshness_secs = 30\nskew_secs = 2\n\n[service]\nkey = \"{}\"\ntrailing = \"reject\"\n",
            TOKEN_KEY, SERVICE_KEY
        ))
        .unwrap();

        config.validate().unwrap();
        assert_eq!(config.token.freshness_secs, 30);
        assert_eq!(config.service.trailing, Trailing::Reject);
        let policy = config.token_policy().unwrap();
        assert_eq!(policy.freshness, Duration::seconds(30));
        assert_eq!(policy.skew, Duration::seconds(2));
    }

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        config.validate().unwrap();
        assert_eq!(config.token_policy().unwrap(), TokenPolicy::default());
        assert_eq!(config.service.trailing, Trailing::Ignore);
        assert!(matches!(
            config.token_key().unwrap_err(),
            Error::Config(ConfigError::MissingField { field: "token.key" })
        ));
    }

    #[test]
    fn test_overrides_replace_file_keys() {
        let config = Config::parse(&format!("[token]\nkey = \"{}\"\n", TOKEN_KEY))
            .unwrap()
            .with_overrides(None, Some(SERVICE_KEY.to_string()));

        assert_eq!(config.token.key.as_deref(), Some(TOKEN_KEY));
        assert_eq!(config.service.key.as_deref(), Some(SERVICE_KEY));
        assert!(config.service_keys().is_ok());
    }

    #[test]
    fn test_rejects_shared_secret_across_domains() {
        let config = Config::default()
            .with_overrides(Some(TOKEN_KEY.to_string()), Some(TOKEN_KEY.to_string()));
        assert!(matches!(
            config.validate().unwrap_err(),
            Error::Config(ConfigError::KeyReuse)
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = Config::parse("[token]\nfreshness_secs = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = Config::parse("[token]\nskew_secs = -1\n").unwrap();
        assert!(config.validate().is_err());

        let config = Config::parse("[token]\nkey = \"short\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("token.key"));
        assert!(!err.to_string().contains("short\""));
    }

    #[test]
    fn test_rejects_windows_too_large_for_a_duration() {
        let config = Config::parse("[token]\nfreshness_secs = 9223372036854775807\n").unwrap();
        assert!(matches!(
            config.validate().unwrap_err(),
            Error::Config(ConfigError::InvalidValue {
                field: "token.freshness_secs",
                ..
            })
        ));
        assert!(config.token_policy().is_err());

        let config = Config::parse("[token]\nskew_secs = 9223372036854775807\n").unwrap();
        assert!(matches!(
            config.validate().unwrap_err(),
            Error::Config(ConfigError::InvalidValue {
                field: "token.skew_secs",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_unknown_trailing_mode() {
        assert!(Config::parse("[service]\ntrailing = \"sometimes\"\n").is_err());
    }

    #[test]
    fn test_generate_save_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(constants::CONFIG_FILE);

        let config = Config::generate();
        config.validate().unwrap();
        config.save(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded = Config::parse(&contents).unwrap();
        assert_eq!(loaded.token.key, config.token.key);
        assert_eq!(loaded.service.key, config.service.key);
        assert_ne!(loaded.token.key, loaded.service.key);
    }
}
