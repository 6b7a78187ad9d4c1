//! Init command - write a configuration file with fresh keys.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::error::{ConfigError, Result};

/// Generate both keys and write them to `path`.
pub fn execute(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.display().to_string()).into());
    }

    info!(path = %path.display(), "initializing");

    let config = Config::generate();
    config.save(path)?;

    output::success(&format!("initialized {}", output::path(&path.display().to_string())));
    output::hint("keep this file out of version control");
    Ok(())
}
