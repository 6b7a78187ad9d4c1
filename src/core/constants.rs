//! Constants used throughout sapper.
//!
//! Centralizes magic strings and policy defaults.

/// Configuration file name (.sapper.toml).
pub const CONFIG_FILE: &str = ".sapper.toml";

/// Environment variable overriding the token signing key.
pub const TOKEN_KEY_ENV: &str = "SAPPER_TOKEN_KEY";

/// Environment variable overriding the service-key signing key.
pub const SERVICE_KEY_ENV: &str = "SAPPER_SERVICE_KEY";

/// Default freshness window for account tokens, in seconds.
///
/// Tight enough that a token must be used almost immediately after issue.
pub const DEFAULT_FRESHNESS_SECS: i64 = 5;

/// Default tolerance for tokens stamped slightly in the future, in seconds.
pub const DEFAULT_SKEW_SECS: i64 = 1;

/// Separator between plaintext fields.
pub const SEPARATOR: char = '.';

/// Shared key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;
