//! Service-key commands.
//!
//! Decoding needs only the service secret from configuration, so it works
//! offline.

use std::path::Path;

use crate::core::config::Config;
use crate::core::types::Identity;
use crate::error::Result;

/// Print a service key for project `identity`.
pub fn encode(config: &Path, identity: i64) -> Result<()> {
    let keys = Config::load(config)?.service_keys()?;
    println!("{}", keys.encode(Identity(identity))?);
    Ok(())
}

/// Print `project:<id>` for a service key.
pub fn decode(config: &Path, key: &str) -> Result<()> {
    let keys = Config::load(config)?.service_keys()?;
    let identity = keys.decode(key)?;
    println!("project:{}", identity);
    Ok(())
}
