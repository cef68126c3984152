//! Riptide CLI - topical web crawler
//!
//! Loads a crawl configuration, runs the crawl engine to completion, and
//! writes accepted pages to the configured output file.

use anyhow::Result;
use clap::Parser;
use riptide_cli::sink;
use riptide_config::{EngineConfig, LogFormat};
use riptide_spider::Engine;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "riptide")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Topical web crawler", long_about = None)]
struct Cli {
    /// Path to the crawl configuration TOML file
    #[arg(long, default_value = "riptide.toml")]
    config: PathBuf,

    /// Override the worker pool size
    #[arg(long)]
    concurrency: Option<usize>,

    /// Override the maximum crawl depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Override the output file path
    #[arg(long)]
    output: Option<String>,

    /// Verbose mode - debug-level logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Quiet mode - only warnings and errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

#[repr(i32)]
enum ExitCode {
    Success = 0,
    ConfigurationError = 2,
    RuntimeError = 1,
}

#[tokio::main]
async fn main() {
    std::process::exit(match run().await {
        Ok(()) => ExitCode::Success as i32,
        Err(e) => {
            eprintln!("error: {e:#}");
            match e.downcast_ref::<riptide_types::RiptideError>() {
                Some(err) if err.is_fatal() => ExitCode::ConfigurationError as i32,
                _ => ExitCode::RuntimeError as i32,
            }
        }
    });
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = EngineConfig::load(&cli.config)?;

    if let Some(concurrency) = cli.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(output) = cli.output.clone() {
        config.output_file = output;
    }
    config.validate()?;

    init_logging(&config, cli.verbose, cli.quiet);

    let output_file = config.output_file.clone();
    let engine = Arc::new(Engine::new(config));
    let records = engine.run().await?;

    sink::write_records(&output_file, &records)?;
    tracing::info!(pages = records.len(), output = %output_file, "wrote results");
    Ok(())
}

fn init_logging(config: &EngineConfig, verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_config_path_is_riptide_toml() {
        let cli = Cli::parse_from(["riptide"]);
        assert_eq!(cli.config, PathBuf::from("riptide.toml"));
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn overrides_are_parsed() {
        let cli = Cli::parse_from([
            "riptide",
            "--config",
            "custom.toml",
            "--concurrency",
            "8",
            "--max-depth",
            "3",
            "--output",
            "out.json",
            "-v",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.concurrency, Some(8));
        assert_eq!(cli.max_depth, Some(3));
        assert_eq!(cli.output, Some("out.json".to_string()));
        assert!(cli.verbose);
    }
}
