//! Sapper - short-lived account tokens and durable service keys.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Write .sapper.toml with fresh keys
//! │   ├── keygen        # Print a random key
//! │   ├── token         # Issue / verify account tokens
//! │   └── service_key   # Encode / decode service keys
//! └── core/             # Core library components
//!     ├── key           # Shared key material
//!     ├── codec/        # Symmetric codec
//!     │   ├── mod       # Codec trait and trust domains
//!     │   └── aes       # AES-256-GCM implementation
//!     ├── clock         # Wall-clock sources
//!     ├── token         # "<id>.<unix-secs>" tokens with a freshness window
//!     ├── service_key   # "<hex-id>." keys, no expiry
//!     ├── account       # Token -> account resolution for HTTP handlers
//!     └── config        # .sapper.toml management
//! ```
//!
//! # Example
//!
//! ```
//! use sapper::core::codec::{Aes, Domain};
//! use sapper::core::key::SharedKey;
//! use sapper::core::token::{TokenIssuer, TokenPolicy};
//! use sapper::core::types::Identity;
//!
//! let key = SharedKey::generate();
//! let issuer = TokenIssuer::new(Aes::new(&key, Domain::Token), TokenPolicy::default());
//!
//! let token = issuer.issue(Identity(42)).unwrap();
//! let claims = issuer.validate_escaped(token.as_str()).unwrap();
//! assert_eq!(claims.identity, Identity(42));
//! ```

pub mod cli;
pub mod core;
pub mod error;
