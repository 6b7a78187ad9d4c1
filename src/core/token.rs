//! Short-lived account tokens.
//!
//! A token seals `"<identity>.<unix-seconds>"` with the token codec and
//! percent-escapes the result so it can ride in a URL query or header.
//! Validation reverses the steps, parses the two fields strictly and rejects
//! tokens that fall outside the freshness window.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::core::clock::{Clock, SystemClock};
use crate::core::codec::{Codec, Domain};
use crate::core::constants::{DEFAULT_FRESHNESS_SECS, DEFAULT_SKEW_SECS, SEPARATOR};
use crate::core::types::Identity;
use crate::error::{Error, Result, TokenError};

/// Age limits applied at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    /// Maximum age before a token is rejected as expired.
    pub freshness: Duration,
    /// How far in the future an issue time may lie before it is rejected.
    pub skew: Duration,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            freshness: Duration::seconds(DEFAULT_FRESHNESS_SECS),
            skew: Duration::seconds(DEFAULT_SKEW_SECS),
        }
    }
}

impl TokenPolicy {
    pub fn new(freshness: Duration, skew: Duration) -> Self {
        Self { freshness, skew }
    }

    /// Check `issued_at` against `now`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` when the token is older than the
    /// freshness window or stamped further in the future than the skew
    /// tolerance.
    pub fn check(&self, issued_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<()> {
        let age = now - issued_at;
        if age > self.freshness || -age > self.skew {
            return Err(TokenError::Expired { issued_at, now }.into());
        }
        Ok(())
    }
}

/// A transport-safe (percent-escaped) token string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Wrap an already escaped token, e.g. one read back from a query string.
    pub fn from_escaped(escaped: impl Into<String>) -> Self {
        Self(escaped.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The raw codec ciphertext with transport escaping removed.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` if the escapes do not decode to UTF-8.
    pub fn ciphertext(&self) -> Result<String> {
        urlencoding::decode(&self.0)
            .map(|c| c.into_owned())
            .map_err(|_| invalid("bad percent-encoding", None))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a valid token vouches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claims {
    pub identity: Identity,
    pub issued_at: DateTime<Utc>,
}

/// Issues and validates account tokens under one token key.
pub struct TokenIssuer<C, K = SystemClock> {
    codec: C,
    clock: K,
    policy: TokenPolicy,
}

impl<C: Codec> TokenIssuer<C, SystemClock> {
    /// Issuer reading the system clock.
    pub fn new(codec: C, policy: TokenPolicy) -> Self {
        Self::with_clock(codec, SystemClock, policy)
    }
}

impl<C: Codec, K: Clock> TokenIssuer<C, K> {
    /// Issuer reading an explicit clock.
    ///
    /// `codec` must be bound to [`Domain::Token`]. This is only asserted in
    /// debug builds; a codec from another domain still cannot decode real
    /// tokens because the domain label is authenticated.
    pub fn with_clock(codec: C, clock: K, policy: TokenPolicy) -> Self {
        debug_assert_eq!(codec.domain(), Domain::Token);
        Self {
            codec,
            clock,
            policy,
        }
    }

    pub fn policy(&self) -> &TokenPolicy {
        &self.policy
    }

    /// Issue a token for `identity` stamped with the current time.
    ///
    /// # Errors
    ///
    /// Fails only if the codec itself fails, which indicates bad key material.
    pub fn issue(&self, identity: Identity) -> Result<Token> {
        let issued = self.clock.now().timestamp();
        let plaintext = format_plaintext(identity, issued);
        let ciphertext = self.codec.encode(plaintext.as_bytes())?;

        debug!(identity = %identity, issued, "token issued");
        Ok(Token(urlencoding::encode(&ciphertext).into_owned()))
    }

    /// Validate a raw (already unescaped) token ciphertext.
    ///
    /// # Errors
    ///
    /// - `TokenError::Invalid` if the ciphertext does not decode under this
    ///   key, or the plaintext is not exactly `<int64>.<int64>`
    /// - `TokenError::Expired` if the issue time is outside the policy window
    pub fn validate(&self, ciphertext: &str) -> Result<Claims> {
        let plaintext = self.codec.decode(ciphertext).map_err(|e| {
            warn!(token = ciphertext, error = %e, "token rejected");
            invalid("decode failed", None)
        })?;

        let plaintext = String::from_utf8(plaintext).map_err(|e| {
            let lossy = String::from_utf8_lossy(e.as_bytes()).into_owned();
            invalid("plaintext is not utf-8", Some(lossy))
        })?;

        let (identity, issued) = parse_plaintext(&plaintext).map_err(|reason| {
            warn!(token = ciphertext, reason, "token rejected");
            invalid(reason, Some(plaintext.clone()))
        })?;

        let issued_at = DateTime::from_timestamp(issued, 0)
            .ok_or_else(|| invalid("timestamp out of range", Some(plaintext.clone())))?;

        let now = self.clock.now();
        self.policy.check(issued_at, now).map_err(|e| {
            warn!(token = ciphertext, %issued_at, %now, "token expired");
            e
        })?;

        debug!(identity = %identity, %issued_at, "token accepted");
        Ok(Claims {
            identity,
            issued_at,
        })
    }

    /// Validate a token still carrying its transport escaping.
    pub fn validate_escaped(&self, escaped: &str) -> Result<Claims> {
        let ciphertext = Token::from_escaped(escaped).ciphertext()?;
        self.validate(&ciphertext)
    }
}

fn invalid(reason: &str, plaintext: Option<String>) -> Error {
    TokenError::Invalid {
        reason: reason.to_string(),
        plaintext,
    }
    .into()
}

/// Render the token plaintext: `"<identity>.<unix-seconds>"`.
pub fn format_plaintext(identity: Identity, unix_secs: i64) -> String {
    format!("{}{}{}", identity, SEPARATOR, unix_secs)
}

/// Parse `"<int64>.<int64>"` into `(identity, unix-seconds)`.
///
/// Exactly one separator, and each side must be a plain decimal integer
/// with an optional leading `-`.
pub fn parse_plaintext(plaintext: &str) -> std::result::Result<(Identity, i64), &'static str> {
    let (identity, secs) = plaintext
        .split_once(SEPARATOR)
        .ok_or("missing separator")?;

    let identity = parse_decimal(identity).ok_or("identity is not an int64")?;
    let secs = parse_decimal(secs).ok_or("timestamp is not an int64")?;

    Ok((Identity(identity), secs))
}

fn parse_decimal(field: &str) -> Option<i64> {
    let digits = field.strip_prefix('-').unwrap_or(field);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
