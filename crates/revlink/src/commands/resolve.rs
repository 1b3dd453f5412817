//! Resolve command.

use anyhow::{Context, Result};
use clap::Args;

use revlink_config::Config;
use revlink_core::Resolver;

/// Arguments for the resolve command.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Repository identifier (e.g. "frameworks-kcoreaddons")
    pub identifier: String,

    /// Commit hash or unambiguous prefix
    pub revision: String,

    /// Print a JSON object with the resolution kind and URL
    #[arg(long)]
    pub json: bool,
}

/// Runs the resolve command.
pub fn run(args: &ResolveArgs, config: &Config) -> Result<()> {
    let resolver = Resolver::from_config(config).context("failed to initialize resolver")?;

    let resolution = resolver.resolve(&args.identifier, &args.revision);
    let url = resolver.urls().render(&resolution);

    if args.json {
        let output = serde_json::json!({
            "kind": resolution.kind(),
            "url": url,
        });
        println!("{output}");
    } else {
        println!("{url}");
    }

    Ok(())
}
