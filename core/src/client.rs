//! The shared request/response pipeline behind every API operation.
//!
//! # Design
//! `Client` holds immutable credentials, the API root and one transport
//! handle. An operation is split the same way everywhere: a `build_*`
//! method produces an `HttpRequest` as plain data, `Transport::execute`
//! performs the exchange, and `envelope::decode` turns the body into a typed
//! `Response`. Endpoint modules (`zones`, `dns_records`) only choose the verb,
//! path, query and body.
//!
//! Transport failures are always returned as `Err`. Whether an API-level
//! `success: false` becomes an `Err` is decided per operation.

use serde::de::DeserializeOwned;

use crate::config::{ClientConfig, Credentials};
use crate::envelope::{self, Response};
use crate::error::Result;
use crate::http::{build_url, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// Client for the zone and DNS record endpoints.
///
/// Cheap to share by reference across threads when `T` is; no state changes
/// after construction.
#[derive(Debug, Clone)]
pub struct Client<T = UreqTransport> {
    credentials: Credentials,
    base_url: String,
    transport: T,
}

impl Client<UreqTransport> {
    /// Client for the production API with no client-side timeout.
    pub fn new(email: &str, api_key: &str) -> Self {
        Self::from_config(&ClientConfig::new(email, api_key))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new(config.timeout()))
    }
}

impl<T: Transport> Client<T> {
    /// Client that sends every request through `transport`. The config's
    /// timeout is the transport's concern and is not read here.
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            credentials: config.credentials(),
            base_url: config.base_url.clone(),
            transport,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Assemble an authenticated request for `path` relative to the API root.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        params: &[(String, String)],
        body: Option<Vec<u8>>,
    ) -> HttpRequest {
        HttpRequest {
            method,
            url: build_url(&self.base_url, path, params),
            headers: self.credentials.headers(),
            body,
        }
    }

    /// Perform the exchange, whatever the HTTP status.
    pub(crate) fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        Ok(self.transport.execute(request)?)
    }

    /// Perform the exchange and decode the body as an envelope around `R`.
    pub(crate) fn call<R>(&self, request: &HttpRequest) -> Result<Response<R>>
    where
        R: DeserializeOwned + Default,
    {
        let response = self.send(request)?;
        Ok(envelope::decode(&response.body))
    }
}
