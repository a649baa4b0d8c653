//! absolutify CLI
//!
//! Reads an HTML fragment from a file or stdin and writes it back with
//! relative `href`/`src` references made absolute.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use absolutify::{
    Absolutifier,
    error::{AppError, Result},
    models::{BaseUri, Config},
};
use clap::Parser;

/// absolutify - make links in HTML fragments absolute
#[derive(Parser, Debug)]
#[command(
    name = "absolutify",
    version,
    about = "Rewrite relative links and image sources into absolute URLs"
)]
struct Cli {
    /// Input HTML file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Base URL to resolve against (overrides rewrite.base_url)
    #[arg(short, long)]
    base: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "absolutify.toml")]
    config: PathBuf,

    /// Output file (writes stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print rewrite statistics as JSON to stderr
    #[arg(long)]
    stats: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging; `-v` wins over the configured level, `RUST_LOG` over both.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut html = String::new();
            io::stdin().read_to_string(&mut html)?;
            Ok(html)
        }
    }
}

fn write_output(output: Option<&PathBuf>, html: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, html)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        Config::load_or_default(&cli.config)
    } else {
        Config::default()
    };
    init_logging(cli.verbose, &config.logging.level);

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let base_url = config.base_url(cli.base.as_deref())?;
    let base = BaseUri::parse(base_url)
        .map_err(|e| AppError::config(format!("Invalid base URL '{base_url}': {e}")))?;
    log::info!("Resolving against {}", base);

    let html = read_input(cli.input.as_ref())?;
    let rewritten = Absolutifier::with_base(base).rewrite(&html);
    write_output(cli.output.as_ref(), &rewritten.html)?;

    log::info!(
        "Rewrote {} of {} references ({} unresolvable)",
        rewritten.stats.rewritten,
        rewritten.stats.attributes,
        rewritten.stats.unresolvable
    );
    if cli.stats {
        eprintln!("{}", serde_json::to_string_pretty(&rewritten.stats)?);
    }

    Ok(())
}
