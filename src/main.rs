//! Command line front end for `msgframe`.
//!
//! Reads a message document or an encoded message, runs it through the
//! codec and prints the result. Failures are reported on stderr as a
//! problem document.

mod cli;

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use msgframe::{
    codec::MessageCodec,
    config::{AppConfig, ConfigError},
    error::ErrorCategory,
    limits::{LimitsError, MessageLimits},
    transport::{
        DecodeRequest,
        MessageDocument,
        MessageService,
        ProblemDetails,
        TransportError,
        error_chain,
    },
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid limits: {0}")]
    Limits(#[from] LimitsError),
    #[error("failed to read {}", input_name(.path.as_deref()))]
    Input {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
    #[error("invalid message document: {0}")]
    Document(#[from] serde_json::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to render output")]
    Render(#[source] serde_json::Error),
}

fn input_name(path: Option<&Path>) -> String {
    path.map_or_else(|| "standard input".to_owned(), |p| p.display().to_string())
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only command output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = cli::Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => report(&err),
    }
}

fn run(cli: cli::Cli) -> Result<String, CliError> {
    let limits = resolve_limits(&cli)?;
    let service = MessageService::new(MessageCodec::new(limits)?);

    match cli.command {
        cli::Command::Encode { input } => {
            let text = read_input(input.as_deref())?;
            let document: MessageDocument = serde_json::from_slice(&text)?;
            Ok(service.encode(document)?)
        }
        cli::Command::Decode { base64, input } => {
            let request = match (base64, input) {
                (Some(text), _) => DecodeRequest::from_base64(text),
                (None, Some(path)) => DecodeRequest::from_bytes(read_input(Some(path.as_path()))?),
                (None, None) => DecodeRequest::default(),
            };
            let document = service.decode(request)?;
            serde_json::to_string_pretty(&document).map_err(CliError::Render)
        }
    }
}

/// Layer defaults, the configuration file, then command line overrides.
fn resolve_limits(cli: &cli::Cli) -> Result<MessageLimits, CliError> {
    let mut limits = match cli.config.as_deref() {
        Some(path) => AppConfig::load(path)?.codec,
        None => MessageLimits::default(),
    };
    if let Some(bytes) = cli.max_payload_bytes {
        limits = limits.max_payload_bytes(bytes);
    }
    if let Some(count) = cli.max_headers {
        limits = limits.max_headers(count);
    }
    if let Some(bytes) = cli.max_header_key_bytes {
        limits = limits.max_header_key_bytes(bytes);
    }
    if let Some(bytes) = cli.max_header_value_bytes {
        limits = limits.max_header_value_bytes(bytes);
    }
    Ok(limits)
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>, CliError> {
    let result = match path {
        Some(path) => fs::read(path),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).map(|_| buf)
        }
    };
    result.map_err(|source| CliError::Input {
        path: path.map(Path::to_path_buf),
        source,
    })
}

fn report(err: &CliError) -> ExitCode {
    let problem = match err {
        CliError::Transport(err) => ProblemDetails::from(err),
        CliError::Document(_) => ProblemDetails {
            status: ErrorCategory::BadRequest.status(),
            title: format!("HTTP {}", ErrorCategory::BadRequest.status()),
            detail: err.to_string(),
        },
        CliError::Config(_)
        | CliError::Limits(_)
        | CliError::Input { .. }
        | CliError::Render(_) => {
            tracing::error!(error = %error_chain(err), "msgframe failed");
            return ExitCode::FAILURE;
        }
    };
    match serde_json::to_string(&problem) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!("{}", problem.detail),
    }
    if problem.status == ErrorCategory::BadRequest.status() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}
