//! Sapper - account tokens and service keys sealed with a shared secret.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sapper::cli::output;
use sapper::cli::{execute, Cli};
use sapper::error::{ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("SAPPER_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("sapper=debug")
        } else {
            EnvFilter::new("sapper=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Config(ConfigError::NotFound(_)) => Some("run: sapper init"),
            Error::Config(ConfigError::MissingField { .. }) => {
                Some("set it in .sapper.toml or via SAPPER_TOKEN_KEY / SAPPER_SERVICE_KEY")
            }
            Error::Config(ConfigError::KeyReuse) => Some("run: sapper keygen"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
