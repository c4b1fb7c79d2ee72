// SPDX-License-Identifier: Apache-2.0

//! A minimal OTLP log-export client.
//!
//! `logship` builds structured log records in a wire-independent data model,
//! assembles them into an OTLP `ExportLogsServiceRequest` and sends the
//! request to a collector over gRPC.

pub mod export;
pub mod model;
