//! Network boundary for the client
//!
//! `Transport` is the single seam between the cache logic and the wire. The
//! production implementation wraps a `reqwest::Client`; tests substitute a
//! scripted transport so request counts can be asserted.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Raw response as seen by the client, before any JSON parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase, empty if unknown
    pub reason: String,
    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Performs HTTP requests on behalf of `ApiClient`
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET and returns whatever the server answered
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;

    /// POSTs a multipart form holding a single file field
    async fn upload(
        &self,
        url: &str,
        field: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).get(url).await
    }

    async fn upload(
        &self,
        url: &str,
        field: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<HttpResponse, TransportError> {
        (**self).upload(url, field, filename, bytes).await
    }
}

/// `Transport` backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a transport whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("devdash/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    async fn into_response(response: reqwest::Response) -> Result<HttpResponse, TransportError> {
        let status = response.status();
        let body = response.text().await?;
        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self.client.get(url).send().await?;
        Self::into_response(response).await
    }

    async fn upload(
        &self,
        url: &str,
        field: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<HttpResponse, TransportError> {
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part(field.to_string(), part);
        let response = self.client.post(url).multipart(form).send().await?;
        Self::into_response(response).await
    }
}

#[cfg(test)]
pub(crate) use mock::MockTransport;

#[cfg(test)]
mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    enum Scripted {
        Respond(HttpResponse),
        Fail(String),
    }

    /// A recorded multipart upload
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) struct UploadCall {
        pub url: String,
        pub field: String,
        pub filename: String,
        pub len: usize,
    }

    /// Transport that answers from a script and records every call
    ///
    /// Unscripted URLs answer 404. Each call yields once before answering so
    /// that concurrently polled requests overlap.
    #[derive(Default)]
    pub(crate) struct MockTransport {
        script: Mutex<HashMap<String, Scripted>>,
        calls: Mutex<Vec<String>>,
        uploads: Mutex<Vec<UploadCall>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn respond(&self, url: &str, status: u16, body: &str) -> &Self {
            let reason = reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or_default()
                .to_string();
            self.script.lock().unwrap().insert(
                url.to_string(),
                Scripted::Respond(HttpResponse {
                    status,
                    reason,
                    body: body.to_string(),
                }),
            );
            self
        }

        pub(crate) fn fail(&self, url: &str, message: &str) -> &Self {
            self.script
                .lock()
                .unwrap()
                .insert(url.to_string(), Scripted::Fail(message.to_string()));
            self
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub(crate) fn call_count(&self, url: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| *c == url).count()
        }

        pub(crate) fn uploads(&self) -> Vec<UploadCall> {
            self.uploads.lock().unwrap().clone()
        }

        fn answer(&self, url: &str) -> Result<HttpResponse, TransportError> {
            match self.script.lock().unwrap().get(url) {
                Some(Scripted::Respond(response)) => Ok(response.clone()),
                Some(Scripted::Fail(message)) => Err(TransportError::new(message.clone())),
                None => Ok(HttpResponse {
                    status: 404,
                    reason: "Not Found".to_string(),
                    body: r#"{"detail":"Not Found"}"#.to_string(),
                }),
            }
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
            self.calls.lock().unwrap().push(url.to_string());
            tokio::task::yield_now().await;
            self.answer(url)
        }

        async fn upload(
            &self,
            url: &str,
            field: &str,
            filename: &str,
            bytes: Vec<u8>,
        ) -> Result<HttpResponse, TransportError> {
            self.uploads.lock().unwrap().push(UploadCall {
                url: url.to_string(),
                field: field.to_string(),
                filename: filename.to_string(),
                len: bytes.len(),
            });
            tokio::task::yield_now().await;
            self.answer(url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_success_range() {
        let ok = |status| HttpResponse {
            status,
            reason: String::new(),
            body: String::new(),
        };
        assert!(ok(200).is_success());
        assert!(ok(204).is_success());
        assert!(!ok(304).is_success());
        assert!(!ok(404).is_success());
        assert!(!ok(500).is_success());
    }

    #[test]
    fn test_reqwest_transport_builds() {
        assert!(ReqwestTransport::new(Duration::from_secs(5)).is_ok());
    }

    #[tokio::test]
    async fn test_mock_transport_unscripted_url_is_404() {
        let mock = MockTransport::new();
        let response = mock.get("http://host/api/nothing").await.unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(mock.call_count("http://host/api/nothing"), 1);
    }

    #[tokio::test]
    async fn test_mock_transport_scripted_failure() {
        let mock = MockTransport::new();
        mock.fail("http://host/api/down", "connection refused");
        let err = mock.get("http://host/api/down").await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
    }
}
