//! Error types.
//!
//! Every fallible operation returns [`Result`]. Errors are grouped by the
//! component that raises them and folded into the top-level [`Error`].

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ServiceKey(#[from] ServiceKeyError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the symmetric codec.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Key material has the wrong length or encoding.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("encode failed: {0}")]
    Encode(String),

    /// Malformed, truncated, tampered or wrong-key ciphertext.
    #[error("decode failed")]
    Decode,
}

/// Rejected account tokens.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Undecodable ciphertext or malformed plaintext. `plaintext` is only
    /// set when decryption succeeded but parsing did not.
    #[error("invalid token: {reason}{}", plaintext_suffix(.plaintext))]
    Invalid {
        reason: String,
        plaintext: Option<String>,
    },

    #[error("token expired: issued {issued_at}, now {now}")]
    Expired {
        issued_at: DateTime<Utc>,
        now: DateTime<Utc>,
    },
}

fn plaintext_suffix(plaintext: &Option<String>) -> String {
    match plaintext {
        Some(p) => format!(" (plaintext: {:?})", p),
        None => String::new(),
    }
}

/// Rejected service keys.
#[derive(Error, Debug)]
pub enum ServiceKeyError {
    #[error("invalid service key: {reason}")]
    Invalid { reason: String },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("config file already exists: {0} (use --force to overwrite)")]
    AlreadyExists(String),

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("token key and service key must differ")]
    KeyReuse,
}

/// Failures of the account store sitting behind token validation.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("account not found: {0}")]
    NotFound(i64),

    #[error("account store unavailable: {0}")]
    Unavailable(String),
}

/// Coarse classification used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EncodeError,
    InvalidToken,
    TokenExpired,
    InvalidServiceKey,
    Lookup,
    Config,
    Io,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Codec(CodecError::Decode) => ErrorKind::InvalidToken,
            Error::Codec(_) => ErrorKind::EncodeError,
            Error::Token(TokenError::Invalid { .. }) => ErrorKind::InvalidToken,
            Error::Token(TokenError::Expired { .. }) => ErrorKind::TokenExpired,
            Error::ServiceKey(_) => ErrorKind::InvalidServiceKey,
            Error::Config(_) => ErrorKind::Config,
            Error::Lookup(_) => ErrorKind::Lookup,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// HTTP status for this error: rejected credentials are the caller's
    /// fault (400), everything else is ours (500).
    pub fn status(&self) -> u16 {
        match self.kind() {
            ErrorKind::InvalidToken | ErrorKind::TokenExpired | ErrorKind::InvalidServiceKey => 400,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
