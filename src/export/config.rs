// SPDX-License-Identifier: Apache-2.0

use crate::export::DEFAULT_REQUEST_TIMEOUT;
use std::time::Duration;

/// Configuration for the OTLP logs export client.
#[derive(Clone, Debug)]
pub struct ExporterConfig {
    pub(crate) endpoint: String,
    pub(crate) tls: bool,
    pub(crate) request_timeout: Duration,
}

impl ExporterConfig {
    /// Creates a configuration targeting the given collector endpoint,
    /// e.g. `http://localhost:4317`. TLS is off by default and the per-call
    /// deadline defaults to 30 seconds.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            tls: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
