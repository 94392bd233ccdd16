//! CLI command definitions and execution
//!
//! Running `r2ls` without a subcommand lists buckets.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use r2ls_core::{Config, ConfigManager, R2Section, Result};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

pub mod buckets;
pub mod completions;
pub mod config;

/// r2ls - list the buckets of a Cloudflare R2 account
///
/// Credentials come from flags, R2_* environment variables, or the
/// `[r2]` table of the config file, in that order.
#[derive(Parser, Debug)]
#[command(name = "r2ls")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable the progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Exit non-zero when listing fails (2 config, 3 network, 4 auth, 1 other)
    #[arg(long, global = true, default_value = "false")]
    pub strict_exit: bool,

    /// Config file (default: ~/.config/r2ls/config.toml)
    #[arg(short, long, global = true, env = "R2LS_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub credentials: CredentialArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Account and credential overrides
#[derive(Args, Debug, Default)]
pub struct CredentialArgs {
    /// Cloudflare account id
    #[arg(long, global = true, env = "R2_ACCOUNT_ID")]
    pub account_id: Option<String>,

    /// R2 access key id
    #[arg(long, global = true, env = "R2_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// R2 secret access key
    #[arg(long, global = true, env = "R2_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// Endpoint URL replacing https://<account_id>.r2.cloudflarestorage.com
    #[arg(long, global = true, env = "R2_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,
}

impl CredentialArgs {
    fn to_section(&self) -> R2Section {
        R2Section {
            account_id: self.account_id.clone(),
            access_key_id: self.access_key_id.clone(),
            secret_access_key: self.secret_access_key.clone(),
            endpoint_url: self.endpoint_url.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List buckets (default)
    Buckets(buckets::BucketsArgs),

    /// Inspect the resolved configuration
    #[command(subcommand)]
    Config(config::ConfigCommands),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Configuration as seen by a command: file contents merged with overrides
#[derive(Debug)]
pub struct Settings {
    /// Path of the config file that was consulted
    pub config_path: PathBuf,

    /// Whether that file exists
    pub config_found: bool,

    /// Merged `[r2]` settings, flags and environment first
    pub r2: R2Section,
}

impl Settings {
    fn load(cli: &Cli) -> Result<(Self, Config)> {
        let manager = match &cli.config {
            Some(path) => ConfigManager::explicit(path.clone()),
            None => ConfigManager::new()?,
        };
        let config = manager.load()?;
        let config_path = manager.config_path().to_path_buf();

        let settings = Self {
            config_found: config_path.exists(),
            config_path,
            r2: cli.credentials.to_section().or(config.r2.clone()),
        };
        Ok((settings, config))
    }
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    if let Some(Commands::Completions(args)) = &cli.command {
        return completions::execute(args);
    }

    let mut output_config = OutputConfig {
        json: cli.json,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };

    let settings = match Settings::load(&cli) {
        Ok((settings, config)) => {
            output_config.json |= config.defaults.output == "json";
            output_config.no_progress |= !config.defaults.progress;
            settings
        }
        Err(e) => {
            Formatter::new(output_config).error(&e);
            return failure_code(&e, cli.strict_exit);
        }
    };

    let formatter = Formatter::new(output_config);

    match cli.command {
        None => {
            let args = buckets::BucketsArgs::default();
            buckets::execute(args, settings, &formatter, cli.strict_exit).await
        }
        Some(Commands::Buckets(args)) => {
            buckets::execute(args, settings, &formatter, cli.strict_exit).await
        }
        Some(Commands::Config(cmd)) => {
            config::execute(cmd, &settings, &formatter, cli.strict_exit)
        }
        Some(Commands::Completions(_)) => ExitCode::Success,
    }
}

/// Exit code for a reported failure
pub(crate) fn failure_code(error: &r2ls_core::Error, strict: bool) -> ExitCode {
    if strict {
        ExitCode::from_error(error)
    } else {
        ExitCode::Success
    }
}
