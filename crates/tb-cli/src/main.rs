use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tb_cli::commands::{check, extract, now, pattern, scan};
use tb_cli::{Cli, Commands, Config};

/// Load config, logging what was found.
fn load_config(cli: &Cli) -> Result<Config> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

/// The must-contain text: the flag if given, else the configured preference.
fn must_contain(flag: Option<&str>, config: &Config) -> Option<String> {
    tb_core::resolve_must_contain(flag, config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Check {
            text,
            must_contain: flag,
            themes,
        }) => {
            let config = load_config(&cli)?;
            let gate = must_contain(flag.as_deref(), &config);
            check::run(&mut stdout, text, gate.as_deref(), *themes)?;
        }
        Some(Commands::Extract { text, json }) => {
            // Extraction ignores the must-contain preference
            extract::run(&mut stdout, text, *json)?;
        }
        Some(Commands::Scan {
            paths,
            must_contain: flag,
            json,
        }) => {
            let config = load_config(&cli)?;
            let gate = must_contain(flag.as_deref(), &config);
            scan::run(&mut stdout, paths, gate.as_deref(), *json)?;
        }
        Some(Commands::Now {
            path,
            at,
            exclude_closed,
            details,
            must_contain: flag,
        }) => {
            let config = load_config(&cli)?;
            let gate = must_contain(flag.as_deref(), &config);
            let options = now::NowOptions {
                at: *at,
                exclude_closed: *exclude_closed || config.default_exclude_closed,
                details: *details,
                must_contain: gate.as_deref(),
            };
            now::run(&mut stdout, path, &options)?;
        }
        Some(Commands::Pattern { themes }) => {
            pattern::run(&mut stdout, *themes)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
