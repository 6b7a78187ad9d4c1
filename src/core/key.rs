//! Shared key material.
//!
//! A [`SharedKey`] is the symmetric secret both sides of a credential hold.
//! It is loaded once from configuration and handed to a codec; the bytes are
//! wiped when the key is dropped and never appear in `Debug` output.

use std::fmt;

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use base64::{engine::general_purpose, Engine as _};
use zeroize::Zeroizing;

use crate::core::constants::KEY_LEN;
use crate::error::{CodecError, Result};

/// A 256-bit symmetric secret.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedKey {
    bytes: Zeroizing<[u8; KEY_LEN]>,
}

impl SharedKey {
    /// Build a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidKey` unless exactly 32 bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            CodecError::InvalidKey(format!(
                "expected {} bytes, got {}",
                KEY_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self {
            bytes: Zeroizing::new(array),
        })
    }

    /// Parse key material from configuration.
    ///
    /// Accepts 64 hex characters, or standard / URL-safe base64 of 32 bytes.
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidKey` for anything else. The error message
    /// never echoes the input.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();

        if trimmed.len() == KEY_LEN * 2 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            let bytes = Zeroizing::new(
                hex::decode(trimmed).map_err(|_| CodecError::InvalidKey("bad hex".into()))?,
            );
            return Self::from_bytes(&bytes);
        }

        for engine in [
            &general_purpose::STANDARD,
            &general_purpose::URL_SAFE,
            &general_purpose::STANDARD_NO_PAD,
            &general_purpose::URL_SAFE_NO_PAD,
        ] {
            if let Ok(bytes) = engine.decode(trimmed) {
                let bytes = Zeroizing::new(bytes);
                if bytes.len() == KEY_LEN {
                    return Self::from_bytes(&bytes);
                }
            }
        }

        Err(CodecError::InvalidKey(format!(
            "expected {} hex characters or base64 of {} bytes",
            KEY_LEN * 2,
            KEY_LEN
        ))
        .into())
    }

    /// Draw a fresh key from the operating system RNG.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        OsRng.fill_bytes(&mut bytes[..]);
        Self { bytes }
    }

    /// Hex form, suitable for pasting into `.sapper.toml`.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&self.bytes[..]))
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedKey(**redacted**)")
    }
}
