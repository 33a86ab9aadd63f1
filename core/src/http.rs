//! HTTP request/response data and URL assembly.
//!
//! # Design
//! Requests and responses are plain data. `Client::build_*` methods produce
//! an `HttpRequest`, a `Transport` turns it into an `HttpResponse`, and the
//! envelope decoder consumes the response body. Keeping the request as data
//! lets tests assert on the exact method, URL, headers and body without any
//! network I/O.
//!
//! The response status is carried for logging only. API-level success is
//! signalled exclusively by the decoded envelope's `success` field.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters in the order they are encoded.
///
/// The remote API treats parameters as an unordered set; the ordering only
/// makes the produced URL deterministic.
pub type QueryParams = Vec<(String, String)>;

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON document, if the operation sends one.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Join `base` and the relative `path`, then append `params` as a query
/// string.
///
/// Values are inserted verbatim. Callers must supply URL-safe values; no
/// percent-encoding is applied.
pub fn build_url(base: &str, path: &str, params: &[(String, String)]) -> String {
    let mut url = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    for (i, (key, value)) in params.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(value);
    }
    url
}
