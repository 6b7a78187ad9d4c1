//! Keygen command - print a random key.

use crate::core::key::SharedKey;
use crate::error::Result;

pub fn execute() -> Result<()> {
    let key = SharedKey::generate();
    println!("{}", key.to_hex().as_str());
    Ok(())
}
