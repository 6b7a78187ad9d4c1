//! AES-256-GCM codec.
//!
//! Wire format: standard base64 of `nonce (12) || ciphertext || tag (16)`.
//! A fresh random nonce is drawn per call, so encoding the same plaintext
//! twice yields different strings. The domain label is authenticated as
//! associated data.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng, Payload},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose, Engine as _};
use tracing::trace;

use super::{Codec, Domain};
use crate::core::constants::{NONCE_LEN, TAG_LEN};
use crate::core::key::SharedKey;
use crate::error::{CodecError, Result};

/// AES-GCM codec keyed by a [`SharedKey`] and bound to one [`Domain`].
#[derive(Clone)]
pub struct Aes {
    cipher: Aes256Gcm,
    domain: Domain,
}

impl Aes {
    /// Create a codec for `domain` under `key`.
    pub fn new(key: &SharedKey, domain: Domain) -> Self {
        let key = Key::<Aes256Gcm>::from_slice(key.as_bytes());
        Self {
            cipher: Aes256Gcm::new(key),
            domain,
        }
    }
}

impl std::fmt::Debug for Aes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aes").field("domain", &self.domain).finish()
    }
}

impl Codec for Aes {
    fn name(&self) -> &'static str {
        "aes-256-gcm"
    }

    fn domain(&self) -> Domain {
        self.domain
    }

    fn encode(&self, plaintext: &[u8]) -> Result<String> {
        trace!(plaintext_len = plaintext.len(), domain = ?self.domain, "encoding");

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = self
            .cipher
            .encrypt(
                &nonce,
                Payload {
                    msg: plaintext,
                    aad: self.domain.label(),
                },
            )
            .map_err(|e| CodecError::Encode(e.to_string()))?;

        let mut combined = Vec::with_capacity(NONCE_LEN + sealed.len());
        combined.extend_from_slice(&nonce);
        combined.extend_from_slice(&sealed);
        let encoded = general_purpose::STANDARD.encode(&combined);

        trace!(ciphertext_len = encoded.len(), "encoded");
        Ok(encoded)
    }

    fn decode(&self, ciphertext: &str) -> Result<Vec<u8>> {
        trace!(ciphertext_len = ciphertext.len(), domain = ?self.domain, "decoding");

        let combined = general_purpose::STANDARD
            .decode(ciphertext)
            .map_err(|_| CodecError::Decode)?;

        if combined.len() < NONCE_LEN + TAG_LEN {
            return Err(CodecError::Decode.into());
        }

        let (nonce, sealed) = combined.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: sealed,
                    aad: self.domain.label(),
                },
            )
            .map_err(|_| CodecError::Decode)?;

        trace!(plaintext_len = plaintext.len(), "decoded");
        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(domain: Domain) -> Aes {
        Aes::new(&SharedKey::from_bytes(&[7u8; 32]).unwrap(), domain)
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let codec = codec(Domain::Token);
        let encoded = codec.encode(b"42.1700000000").unwrap();

        assert_ne!(encoded.as_bytes(), b"42.1700000000");
        assert_eq!(codec.decode(&encoded).unwrap(), b"42.1700000000");
    }

    #[test]
    fn test_empty_plaintext() {
        let codec = codec(Domain::Token);
        let encoded = codec.encode(b"").unwrap();
        assert!(codec.decode(&encoded).unwrap().is_empty());
    }

    #[test]
    fn test_nonce_is_fresh_per_call() {
        let codec = codec(Domain::Token);
        let a = codec.encode(b"same").unwrap();
        let b = codec.encode(b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_fails() {
        let a = codec(Domain::Token);
        let b = Aes::new(&SharedKey::from_bytes(&[8u8; 32]).unwrap(), Domain::Token);

        let encoded = a.encode(b"secret").unwrap();
        let err = b.decode(&encoded).unwrap_err();
        assert!(matches!(err, crate::error::Error::Codec(CodecError::Decode)));
    }

    #[test]
    fn test_domains_do_not_cross() {
        let token = codec(Domain::Token);
        let service = codec(Domain::ServiceKey);

        let encoded = token.encode(b"2a.").unwrap();
        assert!(service.decode(&encoded).is_err());
    }

    #[test]
    fn test_malformed_input_fails() {
        let codec = codec(Domain::Token);
        assert!(codec.decode("").is_err());
        assert!(codec.decode("not base64 at all!").is_err());
        // Valid base64 but shorter than nonce + tag
        assert!(codec
            .decode(&general_purpose::STANDARD.encode([0u8; 20]))
            .is_err());
    }

    #[test]
    fn test_truncated_ciphertext_fails() {
        let codec = codec(Domain::Token);
        let encoded = codec.encode(b"7.1700000000").unwrap();
        let mut raw = general_purpose::STANDARD.decode(&encoded).unwrap();
        raw.pop();
        assert!(codec
            .decode(&general_purpose::STANDARD.encode(&raw))
            .is_err());
    }
}
