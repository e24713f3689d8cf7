//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;

use super::types::FetchError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// User agent sent with every request. Nominatim rejects anonymous clients.
pub const USER_AGENT: &str = concat!("camdodge/", env!("CARGO_PKG_VERSION"));

/// A successful HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// Value of the `Content-Type` header, if present.
    pub content_type: Option<String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a JSON response, mostly useful for tests.
    pub fn json(body: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: Some("application/json".to_string()),
            body: body.into(),
        }
    }

    /// Fails unless the content type contains `expected`.
    pub fn require_content_type(&self, expected: &str) -> Result<(), FetchError> {
        match self.content_type.as_deref() {
            Some(actual) if actual.contains(expected) => Ok(()),
            other => Err(FetchError::ContentType {
                expected: expected.to_string(),
                actual: other.unwrap_or("<none>").to_string(),
            }),
        }
    }
}

/// Trait for async HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests. Non-success status codes are
/// reported as [`FetchError::Status`].
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an HTTP GET request.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, FetchError>> + Send;

    /// Performs an HTTP POST with an `application/x-www-form-urlencoded` body.
    fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> impl Future<Output = Result<HttpResponse, FetchError>> + Send;
}

/// Real HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn finish(url: &str, response: reqwest::Response) -> Result<HttpResponse, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Http(format!("Failed to read response: {}", e)))?;

        Ok(HttpResponse {
            content_type,
            body: body.to_vec(),
        })
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http(format!("Request failed: {}", e)))?;

        Self::finish(url, response).await
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<HttpResponse, FetchError> {
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| FetchError::Http(format!("Request failed: {}", e)))?;

        Self::finish(url, response).await
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// A request captured by [`MockAsyncHttpClient`].
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRequest {
        pub method: &'static str,
        pub url: String,
        pub form: Vec<(String, String)>,
    }

    /// Mock async HTTP client for testing
    pub struct MockAsyncHttpClient {
        pub response: Result<HttpResponse, FetchError>,
        pub requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockAsyncHttpClient {
        pub fn new(response: Result<HttpResponse, FetchError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn json(body: &str) -> Self {
            Self::new(Ok(HttpResponse::json(body)))
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().len()
        }

        pub fn last_request(&self) -> Option<RecordedRequest> {
            self.requests.lock().last().cloned()
        }
    }

    impl AsyncHttpClient for MockAsyncHttpClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
            self.requests.lock().push(RecordedRequest {
                method: "GET",
                url: url.to_string(),
                form: Vec::new(),
            });
            self.response.clone()
        }

        async fn post_form(
            &self,
            url: &str,
            form: &[(&str, &str)],
        ) -> Result<HttpResponse, FetchError> {
            self.requests.lock().push(RecordedRequest {
                method: "POST",
                url: url.to_string(),
                form: form
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            });
            self.response.clone()
        }
    }

    #[tokio::test]
    async fn test_mock_client_success() {
        let mock = MockAsyncHttpClient::json("{}");

        let result = mock.get("http://example.com").await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().body, b"{}".to_vec());
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let mock = MockAsyncHttpClient::new(Err(FetchError::Http("Test error".to_string())));

        let result = mock.post_form("http://example.com", &[("data", "q")]).await;
        assert!(result.is_err());
        assert_eq!(mock.last_request().unwrap().form[0].1, "q");
    }

    #[test]
    fn test_require_content_type() {
        let response = HttpResponse {
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: Vec::new(),
        };
        assert!(response.require_content_type("application/json").is_ok());

        let html = HttpResponse {
            content_type: Some("text/html".to_string()),
            body: Vec::new(),
        };
        assert!(matches!(
            html.require_content_type("application/json"),
            Err(FetchError::ContentType { .. })
        ));

        let missing = HttpResponse {
            content_type: None,
            body: Vec::new(),
        };
        assert!(missing.require_content_type("application/json").is_err());
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(ReqwestClient::with_timeout(5).is_ok());
    }
}
