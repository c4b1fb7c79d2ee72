// SPDX-License-Identifier: Apache-2.0

//! OTLP log export over gRPC.
//!
//! # Modules
//!
//! - `config`: exporter configuration (endpoint, TLS, per-call deadline)
//! - `errors`: error types for export operations
//! - `request`: conversion of the data model into OTLP export requests
//! - `client`: the gRPC export client

pub mod client;
pub mod config;
pub mod errors;
pub mod request;

use std::time::Duration;

/// Default per-call deadline for export requests
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default collector endpoint for local testing
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4317";

pub use client::LogsClient;
pub use config::ExporterConfig;
pub use errors::ExportError;
pub use request::RequestBuilder;
