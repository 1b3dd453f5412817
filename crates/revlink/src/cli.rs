//! CLI definition.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use revlink_config::{Config, ConfigSource, load_config_or_default};

use crate::commands;

/// Resolve commit references to project tracker, code browser or portal URLs.
#[derive(Debug, Parser)]
#[command(name = "revlink")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to revlink.toml in this or a parent directory)
    #[arg(short, long, global = true, env = "REVLINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP redirect service
    Serve(commands::serve::ServeArgs),

    /// Resolve one commit reference and print where it leads
    Resolve(commands::resolve::ResolveArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        let config = self.load_config()?;

        match self.command {
            Commands::Serve(args) => commands::serve::run(args, config),
            Commands::Resolve(args) => commands::resolve::run(&args, &config),
        }
    }

    /// Loads the explicit configuration file, else the nearest `revlink.toml`,
    /// else the defaults.
    fn load_config(&self) -> Result<Config> {
        let (config, source) = load_config_or_default(self.config.as_deref())
            .context("failed to load configuration")?;

        match source {
            ConfigSource::File(path) => debug!(path = %path.display(), "loaded configuration"),
            ConfigSource::Defaults => debug!("using default configuration"),
        }

        Ok(config)
    }
}
