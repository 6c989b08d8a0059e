//! chait-ingest - Thesaurus ingest CLI
//!
//! Loads a JSON-LD thesaurus export for one organization and upserts every
//! concept into the CHAI-T store. Prints the batch summary as JSON on
//! stdout; logs go to stderr.
//!
//! Exit status is 1 on invalid arguments, missing or unparseable input,
//! store configuration or connection failure, or when any record failed.

use anyhow::Context;
use chait_common::config::{ConfigResolver, TomlConfig};
use chait_ingest::organization::Organization;
use chait_ingest::utils::RetryPolicy;
use chait_ingest::{log_summary, run_ingest, IngestOptions};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// CLI for CHAI-T, adding new data
#[derive(Debug, Parser)]
#[command(name = "chait-ingest", version, about)]
struct Args {
    /// Path to the input file (JSON array of JSON-LD records)
    #[arg(short = 'f', long = "file")]
    file: PathBuf,

    /// Organization that produced the export (MOMU)
    #[arg(short = 'o', long = "org")]
    org: String,

    /// Config file (defaults to <config dir>/chait/config.toml)
    #[arg(long, env = "CHAIT_CONFIG")]
    config: Option<PathBuf>,

    /// Store URL: sqlite://<path> or the REST project URL
    #[arg(long)]
    store_url: Option<String>,

    /// Store access key (REST backend)
    #[arg(long)]
    store_key: Option<String>,

    /// Default log level when RUST_LOG is not set
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Credentials may live in a local .env file
    let _ = dotenvy::dotenv();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let resolver = ConfigResolver::new()
        .with_cli_store(args.store_url.clone(), args.store_key.clone())
        .with_config_file(args.config.clone());
    let toml = resolver.load_toml();

    let level = args
        .log_level
        .clone()
        .or_else(|| toml.as_ref().ok().map(|t| t.logging.level.clone()))
        .unwrap_or_else(|| "info".to_string());
    init_tracing(&level);

    info!(
        "Starting CHAI-T ingest (chait-ingest) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let run = async {
        let organization: Organization = args.org.parse()?;
        let toml = toml?;
        let options = resolve_options(&args, organization, &resolver, &toml)?;
        let result = run_ingest(&options).await?;
        anyhow::Ok(result)
    };

    // Interrupt abandons the in-flight record; nothing further is written
    let outcome = tokio::select! {
        outcome = run => outcome,
        _ = tokio::signal::ctrl_c() => {
            info!("Gracefully shutting down...");
            return ExitCode::SUCCESS;
        }
    };

    match outcome {
        Ok(result) => {
            log_summary(&result);
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("Failed to serialize summary: {}", e);
                    return ExitCode::FAILURE;
                }
            }

            if result.has_failures() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn resolve_options(
    args: &Args,
    organization: Organization,
    resolver: &ConfigResolver,
    toml: &TomlConfig,
) -> anyhow::Result<IngestOptions> {
    let store = resolver
        .resolve_store(toml)
        .context("Missing store configuration")?;

    Ok(IngestOptions {
        file: args.file.clone(),
        organization,
        store,
        retry: RetryPolicy::from(toml.retry),
    })
}

fn init_tracing(level: &str) {
    let directive: Directive = level
        .parse()
        .unwrap_or_else(|_| tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();
}
