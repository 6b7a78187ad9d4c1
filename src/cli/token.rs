//! Token commands - issue and verify account tokens.

use std::path::Path;

use crate::core::config::Config;
use crate::core::types::Identity;
use crate::error::Result;

/// Print a fresh token for `identity`.
pub fn issue(config: &Path, identity: i64) -> Result<()> {
    let issuer = Config::load(config)?.token_issuer()?;
    let token = issuer.issue(Identity(identity))?;
    println!("{}", token);
    Ok(())
}

/// Verify an escaped token and print what it carries.
pub fn verify(config: &Path, token: &str) -> Result<()> {
    let issuer = Config::load(config)?.token_issuer()?;
    let claims = issuer.validate_escaped(token)?;
    println!("account:{}", claims.identity);
    println!("issued:{}", claims.issued_at.timestamp());
    Ok(())
}
