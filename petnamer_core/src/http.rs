//! Raw HTTP execution behind a trait so the transport can run against a mock.

use crate::error::ServiceError;
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{Client, Method, Url};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    pub fn json(value: serde_json::Value) -> Self {
        Self::ok(value.to_string())
    }

    pub fn status(status: u16, status_text: &str) -> Self {
        Self {
            status,
            status_text: status_text.to_string(),
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync + Clone + 'static {
    /// Executes one request. Only connection-level failures are errors here;
    /// any status code comes back as a response.
    async fn execute(
        &self,
        request: &HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, ServiceError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(
        &self,
        request: &HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, ServiceError> {
        let mut req = self
            .client
            .request(request.method.clone(), &request.url)
            .header("Content-Type", "application/json")
            .timeout(timeout);
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| normalize_reqwest_error(e, timeout))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| normalize_reqwest_error(e, timeout))?;

        tracing::debug!(status = status.as_u16(), response_len = body.len(), "HTTP request completed");

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body,
        })
    }
}

fn normalize_reqwest_error(err: reqwest::Error, timeout: Duration) -> ServiceError {
    if err.is_timeout() {
        ServiceError::connectivity(format!(
            "Request timed out after {}s. Please try again.",
            timeout.as_secs()
        ))
    } else if err.is_connect() {
        ServiceError::connectivity(format!(
            "Failed to connect to the API. Please try again. ({})",
            err
        ))
    } else {
        ServiceError::connectivity(err.to_string())
    }
}

/// Scriptable client for tests. Responses are queued per `"{METHOD} {path?query}"`
/// key and handed out in FIFO order.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, Vec<MockResponse>>>>,
    calls: Arc<Mutex<Vec<HttpRequest>>>,
}

enum MockResponse {
    Immediate(Result<HttpResponse, ServiceError>),
    Triggered {
        response: Result<HttpResponse, ServiceError>,
        trigger: oneshot::Receiver<()>,
    },
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_response(&self, key: &str, response: Result<HttpResponse, ServiceError>) {
        self.responses
            .lock()
            .entry(key.to_string())
            .or_default()
            .push(MockResponse::Immediate(response));
    }

    /// Queues a response that is held back until the returned sender fires (or drops).
    pub fn add_response_with_trigger(
        &self,
        key: &str,
        response: Result<HttpResponse, ServiceError>,
    ) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.responses
            .lock()
            .entry(key.to_string())
            .or_default()
            .push(MockResponse::Triggered {
                response,
                trigger: rx,
            });
        tx
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

fn request_key(request: &HttpRequest) -> String {
    let path = Url::parse(&request.url)
        .map(|url| match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        })
        .unwrap_or_else(|_| request.url.clone());
    format!("{} {}", request.method, path)
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(
        &self,
        request: &HttpRequest,
        _timeout: Duration,
    ) -> Result<HttpResponse, ServiceError> {
        self.calls.lock().push(request.clone());

        let key = request_key(request);
        let queued = {
            let mut responses = self.responses.lock();
            responses
                .get_mut(&key)
                .filter(|queue| !queue.is_empty())
                .map(|queue| queue.remove(0))
        };

        match queued {
            Some(MockResponse::Immediate(response)) => response,
            Some(MockResponse::Triggered { response, trigger }) => {
                let _ = trigger.await;
                response
            }
            None => Ok(HttpResponse::status(404, "Not Found")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn get(url: &str) -> HttpRequest {
        HttpRequest {
            method: Method::GET,
            url: url.to_string(),
            body: None,
        }
    }

    #[tokio::test]
    async fn mock_returns_queued_responses_in_order() {
        let mock = MockHttpClient::new();
        mock.add_response("GET /pets/dog/random", Ok(HttpResponse::json(json!({"name": "Rex"}))));
        mock.add_response("GET /pets/dog/random", Ok(HttpResponse::status(500, "Internal Server Error")));

        let first = mock
            .execute(&get("http://localhost:8000/pets/dog/random"), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(first.body, r#"{"name":"Rex"}"#);

        let second = mock
            .execute(&get("http://localhost:8000/pets/dog/random"), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(second.status, 500);
        assert!(!second.is_success());

        let unknown = mock
            .execute(&get("http://localhost:8000/pets/dog/random"), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(unknown.status, 404);
        assert_eq!(mock.call_count(), 3);
    }

    #[test]
    fn request_key_keeps_query_string() {
        let key = request_key(&get(
            "http://localhost:8000/pets/cat/names?count=5&random_selection=true",
        ));
        assert_eq!(key, "GET /pets/cat/names?count=5&random_selection=true");
    }

    #[tokio::test]
    async fn triggered_response_waits_for_signal() {
        let mock = MockHttpClient::new();
        let trigger = mock.add_response_with_trigger("GET /facts/random", Ok(HttpResponse::json(json!({"fact": "f"}))));

        let client = mock.clone();
        let handle = tokio::spawn(async move {
            client
                .execute(&get("http://h/facts/random"), Duration::from_secs(1))
                .await
        });

        tokio::task::yield_now().await;
        assert!(!handle.is_finished());
        trigger.send(()).unwrap();
        let response = handle.await.unwrap().unwrap();
        assert!(response.is_success());
    }
}
