//! Test fixtures and constants.

/// Token signing key used by fixture configs.
pub const TOKEN_KEY: &str = "8f3c2a1b9d0e4f5a6b7c8d9e0f1a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c";

/// Service-key signing key used by fixture configs.
pub const SERVICE_KEY: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

/// Another valid key that matches neither of the above.
pub const OTHER_KEY: &str = "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

/// Render a config file using the fixture keys.
pub fn fixture_config(freshness_secs: i64) -> String {
    format!(
        "[token]\nkey = \"{}\"\nfreshness_secs = {}\n\n[service]\nkey = \"{}\"\n",
        TOKEN_KEY, freshness_secs, SERVICE_KEY
    )
}
