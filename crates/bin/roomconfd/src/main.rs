//! # roomconfd: roomconf command-line tool and daemon
//!
//! Composition root that wires the adapters together.
//!
//! ## Responsibilities
//! - Parse CLI arguments and configuration (config file, env vars)
//! - Initialise `tracing` once for the whole process
//! - Construct the file adapters and the configuration service
//! - `compile` / `check`: run one compilation over a sections file
//! - `serve`: build the axum router, bind to a TCP port and serve until
//!   SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod cli;
mod config;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use roomconf_adapter_fs::{JsonFileSink, JsonFileSource};
use roomconf_adapter_http_axum::state::AppState;
use roomconf_app::compiler::Compiler;
use roomconf_app::error_format::to_lines;
use roomconf_app::ports::SectionSource;
use roomconf_app::services::configuration_service::ConfigurationService;
use roomconf_domain::error::RoomConfError;

use crate::cli::{CheckArgs, Cli, Command, CompileArgs};
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_tracing(&config.logging.filter);

    match cli.command {
        Command::Compile(args) => compile(&config, args).await,
        Command::Check(args) => check(args).await,
        Command::Serve(args) => {
            if let Some(bind) = args.bind.as_deref() {
                config.set_bind(bind);
            }
            serve(&config).await
        }
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {filter:?} ({err}), falling back to `info`");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Print validation errors as display lines, one per line.
fn report(errors: &RoomConfError) -> bool {
    let RoomConfError::Compilation(errors) = errors else {
        return false;
    };
    for line in to_lines(errors.errors()) {
        eprintln!("{line}");
    }
    true
}

async fn compile(config: &Config, args: CompileArgs) -> anyhow::Result<ExitCode> {
    let output = args.output.unwrap_or_else(|| config.output.path.clone());
    let source = JsonFileSource::new(args.sections);
    let service = ConfigurationService::new(JsonFileSink::new(&output));

    match service.publish_from(&source).await {
        Ok(submission) if submission.success => {
            println!("configuration written to {}", output.display());
            Ok(ExitCode::SUCCESS)
        }
        Ok(submission) => {
            eprintln!(
                "configuration refused: {}",
                submission.error_msg.as_deref().unwrap_or("no reason given")
            );
            Ok(ExitCode::FAILURE)
        }
        Err(err) if report(&err) => Ok(ExitCode::FAILURE),
        Err(err) => Err(err).context("failed to compile configuration"),
    }
}

async fn check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let source = JsonFileSource::new(args.sections);
    let sections = source.load().await.context("failed to load sections")?;
    let mut compiler = Compiler::new();

    match compiler.validate_devices(&sections) {
        Ok(registry) => {
            println!("The following devices have been identified:");
            for (name, kind) in registry.iter() {
                println!("  {name}\t{kind}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            for line in to_lines(&errors) {
                eprintln!("{line}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn serve(config: &Config) -> anyhow::Result<ExitCode> {
    let service = ConfigurationService::new(JsonFileSink::new(&config.output.path));
    let app = roomconf_adapter_http_axum::router::build(AppState::new(service));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(%bind_addr, output = %config.output.path.display(), "roomconfd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(ExitCode::SUCCESS)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
