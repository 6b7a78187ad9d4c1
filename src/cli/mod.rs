//! Command-line interface.

pub mod init;
pub mod keygen;
pub mod output;
pub mod service_key;
pub mod token;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use crate::core::constants;

/// Sapper - account tokens and service keys sealed with a shared secret.
#[derive(Parser)]
#[command(
    name = "sapper",
    about = "Issue and check account tokens and project service keys",
    version
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, env = "SAPPER_CONFIG", default_value = constants::CONFIG_FILE)]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Decode the key given with --service-key and print its project
    #[arg(long, alias = "decode_service_key", requires = "service_key")]
    pub decode_service_key: bool,

    /// Service key to decode
    #[arg(long, alias = "service_key")]
    pub service_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Write a configuration file with freshly generated keys
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print a new random key
    Keygen,

    /// Issue and verify account tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Encode and decode project service keys
    ServiceKey {
        #[command(subcommand)]
        action: ServiceKeyAction,
    },
}

/// Token subcommands.
#[derive(Subcommand)]
pub enum TokenAction {
    /// Issue a token for an account id
    Issue {
        /// Account id
        #[arg(allow_negative_numbers = true)]
        identity: i64,
    },

    /// Verify a token and print the account id it carries
    Verify {
        /// Token, as printed by `token issue`
        token: String,
    },
}

/// Service-key subcommands.
#[derive(Subcommand)]
pub enum ServiceKeyAction {
    /// Encode a project id into a service key
    Encode {
        /// Project id
        #[arg(allow_negative_numbers = true)]
        identity: i64,
    },

    /// Decode a service key and print its project id
    Decode {
        /// Service key
        key: String,
    },
}

/// Execute the parsed command line.
pub fn execute(cli: Cli) -> crate::error::Result<()> {
    let config = cli.config;

    if cli.decode_service_key {
        let key = cli.service_key.unwrap_or_default();
        return service_key::decode(&config, &key);
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Init { force } => init::execute(&config, force),
        Command::Keygen => keygen::execute(),
        Command::Token { action } => match action {
            TokenAction::Issue { identity } => token::issue(&config, identity),
            TokenAction::Verify { token } => token::verify(&config, &token),
        },
        Command::ServiceKey { action } => match action {
            ServiceKeyAction::Encode { identity } => service_key::encode(&config, identity),
            ServiceKeyAction::Decode { key } => service_key::decode(&config, &key),
        },
    }
}
