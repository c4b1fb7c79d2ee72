// SPDX-License-Identifier: Apache-2.0

//! The gRPC export client.
//!
//! `LogsClient` owns a channel to a single collector endpoint and performs
//! one `Export` call per invocation. It never retries and never logs on the
//! caller's behalf; every failure is returned as a typed [`ExportError`]
//! scoped to that one call.

use crate::export::config::ExporterConfig;
use crate::export::errors::ExportError;
use opentelemetry_proto::tonic::collector::logs::v1::logs_service_client::LogsServiceClient;
use opentelemetry_proto::tonic::collector::logs::v1::{
    ExportLogsServiceRequest, ExportLogsServiceResponse,
};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

enum ChannelState {
    Disconnected,
    Connected(Channel),
    Closed,
}

/// OTLP logs export client.
///
/// The channel is established lazily on the first export; establishing it
/// does not prove the collector is reachable, only a call does. Channel
/// clones are multiplexed over one HTTP/2 connection, so a shared client
/// supports concurrent in-flight exports without blocking callers on each
/// other. No ordering is guaranteed between concurrent calls; a caller that
/// needs ordering must serialize its exports.
pub struct LogsClient {
    config: ExporterConfig,
    state: Mutex<ChannelState>,
}

impl LogsClient {
    pub fn new(config: ExporterConfig) -> Self {
        Self {
            config,
            state: Mutex::new(ChannelState::Disconnected),
        }
    }

    /// Sends one export request and returns the collector's response.
    ///
    /// The call suspends until the collector responds, the configured
    /// deadline elapses, or the transport fails. A partially rejected
    /// request (`partial_success` populated) is still `Ok`; inspect
    /// `rejected_log_records` to decide whether action is needed.
    ///
    /// Transport failures are not retried here. Re-sending the same request
    /// after a transport failure may cause duplicate ingestion on the
    /// collector side; that trade-off belongs to the caller.
    pub async fn export(
        &self,
        request: ExportLogsServiceRequest,
    ) -> Result<ExportLogsServiceResponse, ExportError> {
        let channel = self.channel().await?;
        let mut client = LogsServiceClient::new(channel);

        let response = timeout(self.config.request_timeout, client.export(request))
            .await
            .map_err(|_| ExportError::DeadlineExceeded)?
            .map_err(ExportError::from_status)?;

        Ok(response.into_inner())
    }

    /// Like [`export`](Self::export), but abandons the in-flight call and
    /// returns [`ExportError::Cancelled`] as soon as the token fires.
    pub async fn export_with_cancellation(
        &self,
        request: ExportLogsServiceRequest,
        token: &CancellationToken,
    ) -> Result<ExportLogsServiceResponse, ExportError> {
        tokio::select! {
            _ = token.cancelled() => Err(ExportError::Cancelled),
            result = self.export(request) => result,
        }
    }

    /// Closes the client. The transition is terminal; subsequent exports
    /// return [`ExportError::Closed`].
    pub async fn shutdown(&self) {
        let mut state = self.state.lock().await;
        *state = ChannelState::Closed;
    }

    async fn channel(&self) -> Result<Channel, ExportError> {
        let mut state = self.state.lock().await;
        match &*state {
            ChannelState::Connected(channel) => Ok(channel.clone()),
            ChannelState::Closed => Err(ExportError::Closed),
            ChannelState::Disconnected => {
                let channel = self.open_channel()?;
                *state = ChannelState::Connected(channel.clone());
                Ok(channel)
            }
        }
    }

    fn open_channel(&self) -> Result<Channel, ExportError> {
        let mut endpoint = Endpoint::from_shared(self.config.endpoint.clone()).map_err(|e| {
            ExportError::Transport(format!("invalid endpoint {}: {}", self.config.endpoint, e))
        })?;
        if self.config.tls {
            endpoint = endpoint
                .tls_config(ClientTlsConfig::new().with_native_roots())
                .map_err(|e| ExportError::Transport(format!("tls configuration: {}", e)))?;
        }
        Ok(endpoint.connect_lazy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::request::RequestBuilder;
    use crate::model::{LogRecord, Resource, Scope, Severity};
    use opentelemetry_proto::tonic::collector::logs::v1::logs_service_server::{
        LogsService, LogsServiceServer,
    };
    use opentelemetry_proto::tonic::collector::logs::v1::ExportLogsPartialSuccess;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};
    use tokio::spawn;
    use tokio::sync::oneshot;
    use tokio_stream::wrappers::TcpListenerStream;
    use tokio_test::assert_ok;
    use tonic::transport::Server;
    use tonic::{Request, Response, Status};

    #[derive(Clone)]
    struct MockCollector {
        requests: Arc<Mutex<Vec<ExportLogsServiceRequest>>>,
        rejected: i64,
        delay: Option<Duration>,
    }

    impl MockCollector {
        fn new() -> Self {
            Self {
                requests: Arc::new(Mutex::new(Vec::new())),
                rejected: 0,
                delay: None,
            }
        }

        fn rejecting(rejected: i64) -> Self {
            Self {
                rejected,
                ..Self::new()
            }
        }

        fn delayed(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::new()
            }
        }
    }

    #[tonic::async_trait]
    impl LogsService for MockCollector {
        async fn export(
            &self,
            request: Request<ExportLogsServiceRequest>,
        ) -> Result<Response<ExportLogsServiceResponse>, Status> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.requests.lock().unwrap().push(request.into_inner());

            let partial_success = (self.rejected > 0).then(|| ExportLogsPartialSuccess {
                rejected_log_records: self.rejected,
                error_message: "records failed validation".to_string(),
            });
            Ok(Response::new(ExportLogsServiceResponse { partial_success }))
        }
    }

    async fn spawn_collector(mock: MockCollector) -> (u16, oneshot::Sender<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let (shut_tx, shut_rx) = oneshot::channel::<()>();
        let incoming = TcpListenerStream::new(listener);
        spawn(async move {
            Server::builder()
                .add_service(LogsServiceServer::new(mock))
                .serve_with_incoming_shutdown(incoming, async move {
                    let _ = shut_rx.await;
                })
                .await
        });
        (port, shut_tx)
    }

    fn client_for(port: u16, deadline: Duration) -> LogsClient {
        LogsClient::new(
            ExporterConfig::new(format!("http://127.0.0.1:{}", port))
                .with_request_timeout(deadline),
        )
    }

    fn hello_request() -> ExportLogsServiceRequest {
        let record = LogRecord::new(1_700_000_000_000_000_000)
            .with_severity(Severity::Info)
            .with_severity_text("INFO")
            .with_body("Hello from manual OTLP gRPC log sender");
        let resource = Resource::new().with_scope(Scope::named("app").with_record(record));
        RequestBuilder::new().build(&[resource])
    }

    #[tokio::test]
    async fn export_delivers_a_single_record() {
        let mock = MockCollector::new();
        let requests = mock.requests.clone();
        let (port, shut_tx) = spawn_collector(mock).await;

        let client = client_for(port, Duration::from_secs(5));
        let response = client.export(hello_request()).await;
        let response = assert_ok!(response);
        assert!(response.partial_success.is_none());

        let received = requests.lock().unwrap();
        assert_eq!(received.len(), 1);
        let record = &received[0].resource_logs[0].scope_logs[0].log_records[0];
        assert_eq!(record.time_unix_nano, 1_700_000_000_000_000_000);
        assert_eq!(record.severity_number, 9);
        assert_eq!(record.severity_text, "INFO");
        drop(received);

        shut_tx.send(()).unwrap();
    }

    #[tokio::test]
    async fn partial_rejection_is_returned_inside_ok() {
        let mock = MockCollector::rejecting(1);
        let requests = mock.requests.clone();
        let (port, shut_tx) = spawn_collector(mock).await;

        let client = client_for(port, Duration::from_secs(5));
        let response = client.export(hello_request()).await;
        let response = assert_ok!(response);

        let partial = response.partial_success.unwrap();
        assert_eq!(partial.rejected_log_records, 1);
        assert_eq!(partial.error_message, "records failed validation");

        // One request on the server proves the rejection did not trigger a resend
        assert_eq!(requests.lock().unwrap().len(), 1);
        shut_tx.send(()).unwrap();
    }

    #[tokio::test]
    async fn refused_connection_surfaces_as_transport_error() {
        // Bind and drop a listener so the port is known to refuse connections
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = client_for(port, Duration::from_secs(1));
        let start = Instant::now();
        let result = client.export(hello_request()).await;

        assert!(matches!(result, Err(ExportError::Transport(_))));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn deadline_cuts_off_a_slow_collector() {
        let mock = MockCollector::delayed(Duration::from_millis(500));
        let (port, shut_tx) = spawn_collector(mock).await;

        let client = client_for(port, Duration::from_millis(100));
        let start = Instant::now();
        let result = client.export(hello_request()).await;

        assert!(matches!(result, Err(ExportError::DeadlineExceeded)));
        assert!(start.elapsed() < Duration::from_millis(400));
        shut_tx.send(()).unwrap();
    }

    #[tokio::test]
    async fn cancellation_abandons_the_in_flight_call() {
        let mock = MockCollector::delayed(Duration::from_secs(2));
        let (port, shut_tx) = spawn_collector(mock).await;

        let client = client_for(port, Duration::from_secs(5));
        let token = CancellationToken::new();
        let canceller = token.clone();
        spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let start = Instant::now();
        let result = client
            .export_with_cancellation(hello_request(), &token)
            .await;

        assert!(matches!(result, Err(ExportError::Cancelled)));
        assert!(start.elapsed() < Duration::from_secs(1));
        shut_tx.send(()).unwrap();
    }

    #[tokio::test]
    async fn export_after_shutdown_is_rejected() {
        let client = LogsClient::new(ExporterConfig::new("http://127.0.0.1:4317"));
        client.shutdown().await;

        let result = client.export(hello_request()).await;
        assert!(matches!(result, Err(ExportError::Closed)));
    }

    #[tokio::test]
    async fn concurrent_exports_share_one_client() {
        let mock = MockCollector::new();
        let requests = mock.requests.clone();
        let (port, shut_tx) = spawn_collector(mock).await;

        let client = client_for(port, Duration::from_secs(5));
        let (first, second) =
            tokio::join!(client.export(hello_request()), client.export(hello_request()));

        assert_ok!(first);
        assert_ok!(second);
        assert_eq!(requests.lock().unwrap().len(), 2);
        shut_tx.send(()).unwrap();
    }
}
