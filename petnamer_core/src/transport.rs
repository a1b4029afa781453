use crate::error::ServiceError;
use crate::http::{HttpClient, HttpRequest};
use reqwest::Method;
use std::time::Duration;
use tokio::sync::mpsc;

/// Start/end markers for every call, used to drive the loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportSignal {
    RequestStarted,
    RequestEnded,
}

#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub method: Option<Method>,
    pub body: Option<serde_json::Value>,
}

/// Applies the base address, timeout and error normalization to every call.
#[derive(Clone)]
pub struct Transport<C: HttpClient> {
    client: C,
    base_url: String,
    timeout: Duration,
    signals: Option<mpsc::UnboundedSender<TransportSignal>>,
}

impl<C: HttpClient> Transport<C> {
    pub fn new(client: C, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
            signals: None,
        }
    }

    pub fn with_signals(mut self, signals: mpsc::UnboundedSender<TransportSignal>) -> Self {
        self.signals = Some(signals);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base address + `path`, verbatim.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn call(
        &self,
        path: &str,
        options: CallOptions,
    ) -> Result<serde_json::Value, ServiceError> {
        self.signal(TransportSignal::RequestStarted);
        let result = self.call_inner(path, options).await;
        self.signal(TransportSignal::RequestEnded);

        if let Err(e) = &result {
            tracing::error!(path, error = %e, "API call failed");
        }
        result
    }

    async fn call_inner(
        &self,
        path: &str,
        options: CallOptions,
    ) -> Result<serde_json::Value, ServiceError> {
        let request = HttpRequest {
            method: options.method.unwrap_or(Method::GET),
            url: self.url_for(path),
            body: options.body,
        };
        tracing::debug!(method = %request.method, url = %request.url, "API call");

        let response = tokio::time::timeout(self.timeout, self.client.execute(&request, self.timeout))
            .await
            .map_err(|_| {
                ServiceError::connectivity(format!(
                    "Request timed out after {}s. Please try again.",
                    self.timeout.as_secs()
                ))
            })??;

        if !response.is_success() {
            return Err(ServiceError::Http {
                status: response.status,
                status_text: response.status_text,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| ServiceError::MalformedResponse {
            message: e.to_string(),
        })
    }

    fn signal(&self, signal: TransportSignal) {
        if let Some(tx) = &self.signals {
            let _ = tx.send(signal);
        }
    }
}
