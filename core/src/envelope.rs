//! The success/errors/messages/result envelope shared by every endpoint.
//!
//! # Design
//! `Response<T>` is generic over the payload so one decoder serves single
//! entities and lists alike. Decoding is total: every field defaults when
//! missing or `null`, unknown fields are ignored, and a body that is not an
//! envelope at all becomes `Response::default()`. That makes `decode` a lossy
//! boundary. An empty envelope may mean the API really returned nothing, or
//! that the body was HTML from a proxy, or truncated JSON. Callers must check
//! `success` before trusting `result`; see `is_ambiguous_failure`.
//!
//! The payload is decoded separately from the envelope, so a `result` of an
//! unexpected shape still leaves `success`, `errors` and `messages` intact.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::{DnsRecord, Zone};

/// One `{code, message}` entry of the `errors` or `messages` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

/// Pagination details. Only list endpoints fill this in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub per_page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub total_pages: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub total_count: u32,
}

/// A decoded API response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Response<T> {
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub errors: Vec<ResponseInfo>,
    #[serde(deserialize_with = "null_as_default")]
    pub messages: Vec<ResponseInfo>,
    #[serde(deserialize_with = "null_as_default")]
    pub result_info: ResultInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub result: T,
}

pub type ZoneResponse = Response<Zone>;
pub type ZonesResponse = Response<Vec<Zone>>;
pub type DnsRecordResponse = Response<DnsRecord>;
pub type DnsRecordsResponse = Response<Vec<DnsRecord>>;

impl<T> Response<T> {
    pub fn ok(&self) -> bool {
        self.success
    }

    /// Every error as `"{code}: {message}. "`, concatenated in the order the
    /// API reported them. The trailing separator is kept.
    pub fn format_errors(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}. ", e.code, e.message))
            .collect()
    }

    /// `success` is false but the API gave no reason. Usually the body was
    /// not an envelope at all (a proxy error page, an empty body).
    pub fn is_ambiguous_failure(&self) -> bool {
        !self.success && self.errors.is_empty()
    }

    /// The payload if `success` is true, otherwise `Error::Api` holding
    /// `format_errors()`.
    pub fn into_result(self) -> Result<T> {
        if self.success {
            Ok(self.result)
        } else {
            Err(Error::Api {
                errors: self.format_errors(),
            })
        }
    }
}

/// Decode a response body into an envelope carrying a `T` payload.
///
/// Never fails. Malformed input yields zero values and is logged at `warn`.
pub fn decode<T>(body: &[u8]) -> Response<T>
where
    T: DeserializeOwned + Default,
{
    let raw: Response<serde_json::Value> = match serde_json::from_slice(body) {
        Ok(raw) => raw,
        Err(error) => {
            warn!(%error, bytes = body.len(), "response body is not an API envelope");
            return Response::default();
        }
    };

    let result = if raw.result.is_null() {
        T::default()
    } else {
        serde_json::from_value(raw.result).unwrap_or_else(|error| {
            warn!(%error, "response result has an unexpected shape");
            T::default()
        })
    };

    Response {
        success: raw.success,
        errors: raw.errors,
        messages: raw.messages,
        result_info: raw.result_info,
        result,
    }
}

/// Reads an explicit JSON `null` as `V::default()`.
pub(crate) fn null_as_default<'de, D, V>(deserializer: D) -> std::result::Result<V, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de> + Default,
{
    Ok(Option::<V>::deserialize(deserializer)?.unwrap_or_default())
}
