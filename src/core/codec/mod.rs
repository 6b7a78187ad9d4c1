//! Symmetric codec.
//!
//! A codec turns plaintext bytes into a printable ciphertext string and back
//! using a single shared key. Tokens and service keys each own a separate
//! codec instance, bound to their own [`Domain`], so keys and ciphertexts can
//! never cross between the two.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Codec` trait
//! 2. Add the implementation in a new file next to `aes.rs`
//! 3. Re-export from this module

mod aes;

pub use aes::Aes;

use crate::error::Result;

/// Trust domain a codec instance is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Short-lived account tokens.
    Token,
    /// Durable project service keys.
    ServiceKey,
}

impl Domain {
    /// Label mixed into every ciphertext of this domain.
    pub fn label(&self) -> &'static [u8] {
        match self {
            Domain::Token => b"sapper/token",
            Domain::ServiceKey => b"sapper/service-key",
        }
    }
}

/// Reversible keyed transformation.
///
/// Implementations are pure: the same instance may be shared across threads
/// and called concurrently.
pub trait Codec {
    /// Encode plaintext into a ciphertext string.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Encode` only if the underlying cipher rejects its
    /// key; plaintext content never causes a failure.
    fn encode(&self, plaintext: &[u8]) -> Result<String>;

    /// Decode a ciphertext string back into plaintext.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Decode` if the input is malformed, truncated, was
    /// tampered with, or was produced under another key or domain. No partial
    /// plaintext is ever returned.
    fn decode(&self, ciphertext: &str) -> Result<Vec<u8>>;

    /// Domain this instance is bound to.
    fn domain(&self) -> Domain;

    /// Backend name for display/logging.
    fn name(&self) -> &'static str;
}
