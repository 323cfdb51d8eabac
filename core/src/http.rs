//! HTTP transport types and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. The client builds an `HttpRequest`,
//! hands it to a `Transport`, and classifies whatever comes back; it never
//! touches sockets itself. A transport reports completion through a boxed
//! callback, which lets an implementation finish on another thread (as
//! `UreqTransport` does) or in-line (as test doubles do).

use url::Url;

/// A GET request described as plain data.
///
/// `url` carries no query string; `query` holds the unencoded pairs in the
/// order they should be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    /// Look up a query value by key.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The absolute URL with the query string percent-encoded.
    pub fn full_url(&self) -> Result<Url, url::ParseError> {
        Url::parse_with_params(&self.url, &self.query)
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The request never produced a response (refused connection, DNS, timeout).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
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

/// Completion handler passed to [`Transport::get`]. Must be called exactly once.
pub type Completion = Box<dyn FnOnce(Result<HttpResponse, TransportError>) + Send + 'static>;

/// Performs GET requests on behalf of the client.
pub trait Transport: Send + Sync {
    fn get(&self, request: HttpRequest, on_complete: Completion);
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use super::{Completion, HttpRequest, HttpResponse, Transport, TransportError};

    /// Runs each request on a dedicated thread with a shared `ureq` agent.
    ///
    /// 4xx/5xx statuses come back as data rather than errors so the
    /// classifier sees them.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        fn get(&self, request: HttpRequest, on_complete: Completion) {
            let agent = self.agent.clone();
            std::thread::spawn(move || on_complete(execute(&agent, &request)));
        }
    }

    fn execute(agent: &ureq::Agent, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request
            .full_url()
            .map_err(|e| TransportError::new(format!("invalid url {}: {e}", request.url)))?;
        let mut response = agent
            .get(url.as_str())
            .call()
            .map_err(|e| TransportError::new(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::new(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}
