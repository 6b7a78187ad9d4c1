//! Durable project service keys.
//!
//! A service key seals `"<hex-identity>."` with the service-key codec. It
//! carries no timestamp and never expires, so it can be decoded offline by
//! anyone holding the service secret. Unlike account tokens the ciphertext
//! is handed out as-is, without transport escaping.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::codec::{Codec, Domain};
use crate::core::constants::SEPARATOR;
use crate::core::types::Identity;
use crate::error::{Error, Result, ServiceKeyError};

/// What to do with bytes after the `.` separator when decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trailing {
    /// Ignore them. Keys issued by older tooling rely on this.
    #[default]
    Ignore,
    /// Require the plaintext to end at the separator.
    Reject,
}

/// An opaque service key string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceKey(String);

impl ServiceKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encodes and decodes service keys under one service secret.
pub struct ServiceKeys<C> {
    codec: C,
    trailing: Trailing,
}

impl<C: Codec> ServiceKeys<C> {
    /// `codec` must be bound to [`Domain::ServiceKey`]. This is only asserted
    /// in debug builds; a token codec still cannot decode real service keys
    /// because the domain label is authenticated.
    pub fn new(codec: C, trailing: Trailing) -> Self {
        debug_assert_eq!(codec.domain(), Domain::ServiceKey);
        Self { codec, trailing }
    }

    /// Encode `identity` into a service key.
    ///
    /// # Errors
    ///
    /// Fails only if the codec itself fails.
    pub fn encode(&self, identity: Identity) -> Result<ServiceKey> {
        let plaintext = format_plaintext(identity);
        let key = self.codec.encode(plaintext.as_bytes())?;

        debug!(identity = %identity, "service key encoded");
        Ok(ServiceKey(key))
    }

    /// Decode a service key back into its identity.
    ///
    /// # Errors
    ///
    /// Returns `ServiceKeyError::Invalid` if the key does not decode under
    /// this secret or its plaintext is not `<hex>.`.
    pub fn decode(&self, key: &str) -> Result<Identity> {
        let plaintext = self.codec.decode(key).map_err(|e| {
            warn!(error = %e, "service key rejected");
            invalid("decode failed")
        })?;

        let plaintext =
            String::from_utf8(plaintext).map_err(|_| invalid("plaintext is not utf-8"))?;

        let identity = parse_plaintext(&plaintext, self.trailing).map_err(|reason| {
            warn!(reason, "service key rejected");
            invalid(reason)
        })?;

        debug!(identity = %identity, "service key decoded");
        Ok(identity)
    }
}

fn invalid(reason: &str) -> Error {
    ServiceKeyError::Invalid {
        reason: reason.to_string(),
    }
    .into()
}

/// Render the service-key plaintext: lowercase hex followed by `.`.
///
/// Negative identities are written as `-` plus the hex magnitude.
pub fn format_plaintext(identity: Identity) -> String {
    let id = identity.get();
    if id < 0 {
        format!("-{:x}{}", id.unsigned_abs(), SEPARATOR)
    } else {
        format!("{:x}{}", id, SEPARATOR)
    }
}

/// Parse `"<hex>."`, scanning up to the first separator.
pub fn parse_plaintext(
    plaintext: &str,
    trailing: Trailing,
) -> std::result::Result<Identity, &'static str> {
    let (hex, rest) = plaintext
        .split_once(SEPARATOR)
        .ok_or("missing separator")?;

    if trailing == Trailing::Reject && !rest.is_empty() {
        return Err("unexpected data after separator");
    }

    let digits = hex
        .strip_prefix('-')
        .or_else(|| hex.strip_prefix('+'))
        .unwrap_or(hex);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err("identity is not hex");
    }

    i64::from_str_radix(hex, 16)
        .map(Identity)
        .map_err(|_| "identity out of range")
}
