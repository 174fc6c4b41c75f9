//! HTTP exchange types and the transport seam.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` describe an exchange as plain owned data.
//! The core never opens a connection: `RulesClient` talks to a
//! `RulesTransport` supplied by the caller, and `Endpoints` helps a transport
//! implementation build the requests it has to execute. Connection handling,
//! auth headers and retries belong to the transport.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// Built by `Endpoints::build_*`. The transport executes it and hands back the
/// corresponding `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// A response with the given status and body and no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The two calls the rules client needs from an HTTP client.
///
/// `add_rules` posts `json_body` to the rules endpoint with `query_suffix`
/// appended verbatim to its URL (`""` or `"?dry_run=true"`). `get_rules`
/// fetches the current rule set. Implementations decide which failures are
/// errors; a response returned as `Ok` is decoded by the client.
pub trait RulesTransport {
    type Error: std::error::Error + Send + Sync + 'static;

    fn add_rules(&self, query_suffix: &str, json_body: &str) -> Result<HttpResponse, Self::Error>;

    fn get_rules(&self) -> Result<HttpResponse, Self::Error>;
}

impl<T: RulesTransport + ?Sized> RulesTransport for &T {
    type Error = T::Error;

    fn add_rules(&self, query_suffix: &str, json_body: &str) -> Result<HttpResponse, Self::Error> {
        (**self).add_rules(query_suffix, json_body)
    }

    fn get_rules(&self) -> Result<HttpResponse, Self::Error> {
        (**self).get_rules()
    }
}

impl<T: RulesTransport + ?Sized> RulesTransport for Box<T> {
    type Error = T::Error;

    fn add_rules(&self, query_suffix: &str, json_body: &str) -> Result<HttpResponse, Self::Error> {
        (**self).add_rules(query_suffix, json_body)
    }

    fn get_rules(&self) -> Result<HttpResponse, Self::Error> {
        (**self).get_rules()
    }
}
