use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    config::GatewayConfig,
    error::Error,
    types::{ExecutionRequest, RawEnvelope},
};

/// Seam between the gateway and the transport.
///
/// Dispatch is infallible by contract: every transport failure is folded
/// into a [`RawEnvelope`] kind for the classifier to interpret.
#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn dispatch(&self, request: &ExecutionRequest) -> RawEnvelope;
}

/// HTTP client for the remote compile-and-run service.
pub struct ExecutionClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl ExecutionClient {
    /// Build a client from the gateway configuration.
    ///
    /// The timeout is set on the reqwest client itself so it covers the
    /// whole exchange, connect through body read.
    pub fn new(config: &GatewayConfig) -> Result<Self, Error> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout: config.timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Dispatch for ExecutionClient {
    async fn dispatch(&self, request: &ExecutionRequest) -> RawEnvelope {
        debug!(
            language = %request.language,
            entry_point = %request.entry_point,
            "dispatching execution request"
        );

        // Single POST, no retries: the remote execution is not idempotent,
        // so a retry could run the program twice.
        let result = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(err) if err.is_timeout() => {
                warn!("remote call exceeded {}s timeout", self.timeout.as_secs());
                return RawEnvelope::Timeout;
            }
            Err(err) => {
                warn!("remote call failed before a response arrived: {err}");
                return RawEnvelope::NetworkError;
            }
        };

        let status = response.status();
        let body = match response.json::<Value>().await {
            Ok(body) => body,
            Err(err) if err.is_timeout() => return RawEnvelope::Timeout,
            // Unparseable payload; the classifier reports it as malformed.
            Err(_) => Value::Null,
        };

        if status.is_success() {
            RawEnvelope::Ok { body }
        } else {
            debug!(status = status.as_u16(), "remote service returned an error status");
            RawEnvelope::HttpError {
                status: status.as_u16(),
                body,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_request() -> ExecutionRequest {
        ExecutionRequest {
            language: "java".to_string(),
            code: "public class Foo { public static void main(String[] a){} }".to_string(),
            stdin: String::new(),
            entry_point: "Foo".to_string(),
        }
    }

    fn client_for(uri: String, timeout: Duration) -> ExecutionClient {
        let config = GatewayConfig::new(uri).with_timeout(timeout);
        ExecutionClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn success_produces_ok_envelope_with_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/run"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({
                "language": "java",
                "code": "public class Foo { public static void main(String[] a){} }",
                "stdin": "",
                "filename": "Foo"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "output": "hello\n" } })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(format!("{}/run", mock_server.uri()), Duration::from_secs(5));
        let envelope = client.dispatch(&test_request()).await;

        match envelope {
            RawEnvelope::Ok { body } => assert_eq!(body["data"]["output"], "hello\n"),
            other => panic!("expected ok envelope, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_status_produces_http_error_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(json!({ "data": { "error": "compilation failed" } })),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(mock_server.uri(), Duration::from_secs(5));
        let envelope = client.dispatch(&test_request()).await;

        match envelope {
            RawEnvelope::HttpError { status, body } => {
                assert_eq!(status, 422);
                assert_eq!(body["data"]["error"], "compilation failed");
            }
            other => panic!("expected http-error envelope, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn delayed_response_produces_timeout_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&mock_server)
            .await;

        let client = client_for(mock_server.uri(), Duration::from_millis(200));
        let envelope = client.dispatch(&test_request()).await;

        assert!(matches!(envelope, RawEnvelope::Timeout));
    }

    #[tokio::test]
    async fn unreachable_endpoint_produces_network_error_envelope() {
        // Reserved port with nothing listening.
        let client = client_for("http://127.0.0.1:9".to_string(), Duration::from_secs(2));
        let envelope = client.dispatch(&test_request()).await;

        assert!(matches!(envelope, RawEnvelope::NetworkError));
    }

    #[tokio::test]
    async fn non_json_success_body_degrades_to_null() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(mock_server.uri(), Duration::from_secs(5));
        let envelope = client.dispatch(&test_request()).await;

        match envelope {
            RawEnvelope::Ok { body } => assert!(body.is_null()),
            other => panic!("expected ok envelope, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unconfigured_endpoint() {
        let config = GatewayConfig::new("");
        assert!(matches!(
            ExecutionClient::new(&config),
            Err(Error::Configuration(_))
        ));
    }
}
