//! Adapter generator CLI
//!
//! Run with: cargo run --bin generate-adapter -- <spec-file.(json|yaml)> <ProviderName>

use adaptergen::{
    config::{Config, TargetLanguage},
    generator::AdapterGenerator,
    provider::ProviderClient,
    reporter::Reporter,
    Telemetry,
};
use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "generate-adapter")]
#[command(version, about = "Generate a billing adapter stub and field mapping from an OpenAPI spec", long_about = None)]
struct Cli {
    /// Provider OpenAPI spec (JSON or YAML)
    spec: PathBuf,

    /// Provider name, used for the adapter class and file names
    provider: String,

    /// Directory adapters are written into (default: adapters)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Language of the generated adapter (python, rust)
    #[arg(short, long)]
    language: Option<TargetLanguage>,

    /// LLM model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Base URL for an OpenAI-compatible endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// API key - overrides config file, env vars and auth.json
    #[arg(long)]
    api_key: Option<String>,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for JSON log files
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build configuration from CLI args and the optional config file
/// Priority: CLI flags > config file > defaults
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::default(),
    };

    if let Some(ref output_dir) = cli.output_dir {
        config = config.with_output_dir(output_dir.clone());
    }
    if let Some(language) = cli.language {
        config.language = language;
    }
    if let Some(ref model) = cli.model {
        config.llm.model = model.clone();
    }
    if let Some(ref base_url) = cli.base_url {
        config.llm.base_url = Some(base_url.clone());
    }
    if let Some(ref api_key) = cli.api_key {
        config = config.with_api_key(api_key.clone());
    }
    if let Some(ref log_dir) = cli.log_dir {
        config = config.with_log_dir(log_dir.clone());
    }
    if cli.verbose {
        config = config.with_verbose(true);
    }

    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    let _telemetry = Telemetry::init(&config.telemetry)?;

    tracing::debug!(
        model = %config.llm.model,
        output_dir = %config.output_dir.display(),
        language = config.language.as_str(),
        "Configuration resolved"
    );

    let client = ProviderClient::from_llm_config(&config.llm);
    let generator = AdapterGenerator::from_config(client, &config)?.with_reporter(Reporter::console());

    generator
        .generate(&cli.spec, &cli.provider)
        .await
        .with_context(|| format!("Failed to generate adapter for {}", cli.provider))?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            // Usage errors exit 1, not clap's default 2
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::from(1)
        }
    }
}
