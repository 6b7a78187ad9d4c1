//! Core library components.
//!
//! Holds the keyed codec and the two credential formats built on top of it:
//! short-lived account tokens and durable service keys.

pub mod account;
pub mod clock;
pub mod codec;
pub mod config;
pub mod constants;
pub mod key;
pub mod service_key;
pub mod token;
pub mod types;
