//! Authenticated transport for registrar operations.
//!
//! [`SpaceshipClient::send`] turns one [`OperationRequest`] into exactly one
//! HTTP call and folds every possible result into a [`RawResponse`]. Nothing
//! here interprets payloads; that is the normalizer's job.

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::logging::{FacadeSink, LogEvent, LogSink};
use crate::operation::OperationRequest;
use crate::{ClientConfig, ValidationError};

/// The single shape every call produces, whatever the transport did.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    /// 2xx with a decoded body. An empty body decodes to `null`.
    Json { status_code: u16, body: Value },
    /// Non-2xx status, transport failure (`status_code == 0`), or an
    /// undecodable 2xx body. `message` is the response text verbatim where
    /// one exists.
    Failure { status_code: u16, message: String },
}

impl RawResponse {
    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self::Failure {
            status_code,
            message: message.into(),
        }
    }

    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Json { status_code, .. } | Self::Failure { status_code, .. } => *status_code,
        }
    }
}

/// Registrar API client. Holds only immutable configuration, so one instance
/// may serve concurrent callers.
#[derive(Clone)]
pub struct SpaceshipClient {
    http_client: Arc<dyn HttpClient>,
    config: ClientConfig,
    log_sink: Arc<dyn LogSink>,
}

impl SpaceshipClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(config: ClientConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            config,
            log_sink: Arc::new(FacadeSink),
        }
    }

    pub fn with_log_sink(mut self, log_sink: Arc<dyn LogSink>) -> Self {
        self.log_sink = log_sink;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate, then issue one call. Validation failures never touch the network.
    pub async fn send(&self, request: &OperationRequest) -> Result<RawResponse, ValidationError> {
        self.config.credentials.validate()?;
        request.validate()?;

        let operation = request.operation();
        let route = request.route();
        let request_id = Uuid::new_v4();

        let mut http_request = HttpRequest::new(route.method, self.config.credentials.url(&route.path))
            .with_auth(&self.config.credentials.auth())
            .with_header("content-type", "application/json")
            .with_timeout_ms(self.config.timeout_ms);

        match request.body() {
            Ok(Some(body)) => http_request = http_request.with_body(body.to_string()),
            Ok(None) => {}
            Err(error) => {
                return Ok(RawResponse::failure(
                    0,
                    format!("{operation}: failed to encode request body: {error}"),
                ))
            }
        }

        self.trace(|| {
            LogEvent::debug(format!("{operation} {} {}", route.method, route.path))
                .with_request_id(request_id)
        });

        let response = match self.http_client.execute(http_request).await {
            Ok(response) => response,
            Err(error) => {
                self.trace(|| {
                    LogEvent::error(format!("{operation} transport failure: {}", error.message()))
                        .with_request_id(request_id)
                });
                return Ok(RawResponse::failure(0, error.message()));
            }
        };

        if !response.is_success() {
            self.trace(|| {
                LogEvent::error(format!("{operation} returned status {}", response.status))
                    .with_request_id(request_id)
            });
            return Ok(RawResponse::failure(response.status, response.body));
        }

        self.trace(|| {
            LogEvent::debug(format!(
                "{operation} returned status {} ({} bytes)",
                response.status,
                response.body.len()
            ))
            .with_request_id(request_id)
        });

        if response.body.trim().is_empty() {
            return Ok(RawResponse::Json {
                status_code: response.status,
                body: Value::Null,
            });
        }

        Ok(match serde_json::from_str(&response.body) {
            Ok(body) => RawResponse::Json {
                status_code: response.status,
                body,
            },
            Err(error) => RawResponse::failure(
                response.status,
                format!("{operation}: response is not valid JSON: {error}"),
            ),
        })
    }

    fn trace(&self, event: impl FnOnce() -> LogEvent) {
        if self.config.debug {
            self.log_sink.record(&event());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    use super::*;
    use crate::http_client::{HttpError, HttpMethod, HttpResponse};
    use crate::{Credentials, DomainName};

    struct RecordingHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn returning(response: Result<HttpResponse, HttpError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    #[derive(Default)]
    struct MemorySink {
        events: Mutex<Vec<LogEvent>>,
    }

    impl LogSink for MemorySink {
        fn record(&self, event: &LogEvent) {
            self.events
                .lock()
                .expect("event store should not be poisoned")
                .push(event.clone());
        }
    }

    fn config() -> ClientConfig {
        ClientConfig::new(Credentials::new(
            "key-id",
            "top-secret",
            "https://registrar.test/api/v1/",
        ))
    }

    fn domain_info() -> OperationRequest {
        OperationRequest::GetDomainInfo {
            domain: DomainName::parse("example.com").expect("valid domain"),
        }
    }

    #[test]
    fn builds_authenticated_request_against_endpoint() {
        let http = Arc::new(RecordingHttpClient::returning(Ok(HttpResponse::ok_json(
            r#"{"name":"example.com"}"#,
        ))));
        let client = SpaceshipClient::with_http_client(config(), http.clone());

        let raw = block_on(client.send(&domain_info())).expect("valid request");
        assert_eq!(
            raw,
            RawResponse::Json {
                status_code: 200,
                body: serde_json::json!({"name": "example.com"})
            }
        );

        let requests = http.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].url, "https://registrar.test/api/v1/domains/example.com");
        assert_eq!(requests[0].header("x-api-key"), Some("key-id"));
        assert_eq!(requests[0].header("x-api-secret"), Some("top-secret"));
        assert_eq!(requests[0].header("content-type"), Some("application/json"));
        assert_eq!(requests[0].body, None);
    }

    #[test]
    fn empty_credentials_never_reach_the_transport() {
        let http = Arc::new(RecordingHttpClient::returning(Ok(HttpResponse::ok_json("{}"))));
        let config = ClientConfig::new(Credentials::new("key", "", "https://registrar.test"));
        let client = SpaceshipClient::with_http_client(config, http.clone());

        let err = block_on(client.send(&domain_info())).expect_err("must fail validation");
        assert_eq!(err, ValidationError::MissingCredential { field: "api_secret" });
        assert!(http.recorded_requests().is_empty());
    }

    #[test]
    fn error_status_keeps_body_verbatim() {
        let body = r#"{"detail":"domain already registered"}"#;
        let http = Arc::new(RecordingHttpClient::returning(Ok(HttpResponse::new(400, body))));
        let client = SpaceshipClient::with_http_client(config(), http);

        let raw = block_on(client.send(&domain_info())).expect("valid request");
        assert_eq!(raw, RawResponse::failure(400, body));
    }

    #[test]
    fn transport_failure_has_status_zero() {
        let http = Arc::new(RecordingHttpClient::returning(Err(HttpError::new(
            "connection failed",
        ))));
        let client = SpaceshipClient::with_http_client(config(), http);

        let raw = block_on(client.send(&domain_info())).expect("valid request");
        assert_eq!(raw, RawResponse::failure(0, "connection failed"));
    }

    #[test]
    fn undecodable_success_is_tagged_with_operation() {
        let http = Arc::new(RecordingHttpClient::returning(Ok(HttpResponse::ok_json(
            "<html>maintenance</html>",
        ))));
        let client = SpaceshipClient::with_http_client(config(), http);

        let raw = block_on(client.send(&domain_info())).expect("valid request");
        match raw {
            RawResponse::Failure {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 200);
                assert!(message.starts_with("get_domain_info: response is not valid JSON"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn empty_success_body_decodes_to_null() {
        let http = Arc::new(RecordingHttpClient::returning(Ok(HttpResponse::new(204, ""))));
        let client = SpaceshipClient::with_http_client(config(), http);

        let raw = block_on(client.send(&domain_info())).expect("valid request");
        assert_eq!(
            raw,
            RawResponse::Json {
                status_code: 204,
                body: Value::Null
            }
        );
    }

    #[test]
    fn debug_events_are_emitted_only_when_enabled_and_omit_secret() {
        let http = Arc::new(RecordingHttpClient::returning(Ok(HttpResponse::ok_json("{}"))));
        let sink = Arc::new(MemorySink::default());

        let quiet = SpaceshipClient::with_http_client(config(), http.clone())
            .with_log_sink(sink.clone());
        block_on(quiet.send(&domain_info())).expect("valid request");
        assert!(sink.events.lock().expect("events").is_empty());

        let verbose = SpaceshipClient::with_http_client(config().with_debug(true), http)
            .with_log_sink(sink.clone());
        block_on(verbose.send(&domain_info())).expect("valid request");

        let events = sink.events.lock().expect("events").clone();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "get_domain_info GET domains/example.com");
        assert_eq!(events[0].request_id, events[1].request_id);
        assert!(events.iter().all(|event| !event.message.contains("top-secret")));
    }

    fn block_on<F>(future: F) -> F::Output
    where
        F: Future,
    {
        let waker = noop_waker();
        let mut context = Context::from_waker(&waker);
        let mut future = Box::pin(future);

        loop {
            match future.as_mut().poll(&mut context) {
                Poll::Ready(output) => return output,
                Poll::Pending => std::thread::yield_now(),
            }
        }
    }

    fn noop_waker() -> Waker {
        // SAFETY: the vtable functions never dereference the data pointer.
        unsafe { Waker::from_raw(noop_raw_waker()) }
    }

    fn noop_raw_waker() -> RawWaker {
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        fn wake(_: *const ()) {}
        fn wake_by_ref(_: *const ()) {}
        fn drop(_: *const ()) {}

        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, wake, wake_by_ref, drop);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }
}
