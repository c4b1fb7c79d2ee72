// SPDX-License-Identifier: Apache-2.0

// Sends a single structured log record to an OTLP collector over gRPC.

use chrono::Utc;
use clap::Parser;
use logship::export::{ExporterConfig, LogsClient, RequestBuilder, DEFAULT_ENDPOINT};
use logship::model::{KeyValue, LogRecord, Resource, Scope, Severity};
use std::process::ExitCode;
use std::time::Duration;
use tower::BoxError;
use tracing::metadata::LevelFilter;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "logship")]
#[command(bin_name = "logship")]
#[command(version, about = "Send a structured log record to an OTLP collector over gRPC")]
struct Arguments {
    /// Collector endpoint
    #[arg(long, env = "LOGSHIP_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Encrypt the channel with TLS
    #[arg(long, env = "LOGSHIP_TLS")]
    tls: bool,

    /// Per-call deadline in milliseconds
    #[arg(long, env = "LOGSHIP_DEADLINE_MS", default_value = "30000")]
    deadline_ms: u64,

    /// Log record body
    #[arg(long, default_value = "Hello from manual OTLP gRPC log sender")]
    body: String,

    /// Severity label, carried verbatim and mapped to the matching ordinal
    #[arg(long, default_value = "INFO")]
    severity: String,

    /// Additional record attribute as key=value, repeatable
    #[arg(long = "attr", value_parser = parse_attribute)]
    attrs: Vec<(String, String)>,
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected key=value, got: {}", raw)),
    }
}

fn severity_from_label(label: &str) -> Severity {
    match label.to_ascii_uppercase().as_str() {
        "TRACE" => Severity::Trace,
        "DEBUG" => Severity::Debug,
        "INFO" => Severity::Info,
        "WARN" | "WARNING" => Severity::Warn,
        "ERROR" => Severity::Error,
        "FATAL" => Severity::Fatal,
        _ => Severity::Unspecified,
    }
}

fn main() -> ExitCode {
    let args = Arguments::parse();

    if let Err(e) = setup_logging() {
        eprintln!("ERROR: failed to setup logging: {}", e);
        return ExitCode::from(1);
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Export failed.");
            ExitCode::from(1)
        }
    }
}

fn setup_logging() -> Result<(), BoxError> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

#[tokio::main]
async fn run(args: Arguments) -> Result<(), BoxError> {
    info!(endpoint = %args.endpoint, "About to send a log message.");

    let now_ns = Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64;
    let mut record = LogRecord::new(now_ns)
        .with_severity(severity_from_label(&args.severity))
        .with_severity_text(args.severity)
        .with_body(args.body);
    for (key, value) in args.attrs {
        record = record.with_attribute(KeyValue::new(key, value));
    }

    let resource = Resource::new().with_scope(
        Scope::named("logship")
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_record(record),
    );
    let request = RequestBuilder::new().build(&[resource]);

    let client = LogsClient::new(
        ExporterConfig::new(args.endpoint)
            .with_tls(args.tls)
            .with_request_timeout(Duration::from_millis(args.deadline_ms)),
    );

    let response = client.export(request).await?;
    match response.partial_success {
        Some(partial) if partial.rejected_log_records > 0 => {
            warn!(
                rejected = partial.rejected_log_records,
                message = %partial.error_message,
                "Collector rejected some log records."
            );
        }
        _ => info!("Export accepted by collector."),
    }
    client.shutdown().await;

    Ok(())
}
