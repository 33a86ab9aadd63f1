//! Zone and DNS record DTOs, request bodies and list filters.
//!
//! # Design
//! Field names follow the remote API's JSON exactly. Read entities default
//! every missing field so partial payloads still decode. Request bodies omit
//! unset optional fields entirely rather than sending `null`, which the API
//! would read as "clear this value".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::envelope::null_as_default;
use crate::http::QueryParams;

/// A DNS-managed domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub name_servers: Vec<String>,
}

/// A single record within a zone, as returned by the API.
///
/// `id` and the server metadata (`proxiable`, `locked`, `zone_*`,
/// timestamps) are only populated on records read back from the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsRecord {
    #[serde(rename = "type", skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub record_type: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not", deserialize_with = "null_as_default")]
    pub proxiable: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not", deserialize_with = "null_as_default")]
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

/// Request payload for creating a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDnsRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// MX and SRV priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

impl NewDnsRecord {
    pub fn new(record_type: &str, name: &str, content: &str) -> Self {
        Self {
            record_type: record_type.to_string(),
            name: name.to_string(),
            content: content.to_string(),
            ..Self::default()
        }
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn proxied(mut self, proxied: bool) -> Self {
        self.proxied = Some(proxied);
        self
    }
}

/// Request payload for replacing an existing record. `type`, `name` and
/// `content` are always sent; omitted options fall back to server defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordUpdate {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

impl From<&DnsRecord> for DnsRecordUpdate {
    fn from(record: &DnsRecord) -> Self {
        Self {
            record_type: record.record_type.clone(),
            name: record.name.clone(),
            content: record.content.clone(),
            ttl: record.ttl,
            proxied: record.proxied,
        }
    }
}

/// Whether all or any of a filter's properties must match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    #[default]
    All,
    Any,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::All => "all",
            MatchMode::Any => "any",
        }
    }
}

/// Filter for listing the records of a zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsRecordFilter {
    /// A, AAAA, CNAME, TXT, SRV, LOC, MX, NS or SPF.
    pub record_type: Option<String>,
    /// Fully qualified record name, e.g. `www.example.com`.
    pub name: Option<String>,
    /// Record content, e.g. `127.0.0.1`.
    pub content: Option<String>,
    /// Server default (`all`) applies when unset.
    pub match_mode: Option<MatchMode>,
}

impl DnsRecordFilter {
    /// Query parameters for the non-empty properties, in the order type,
    /// name, content, match.
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_non_empty(&mut params, "type", self.record_type.as_deref());
        push_non_empty(&mut params, "name", self.name.as_deref());
        push_non_empty(&mut params, "content", self.content.as_deref());
        push_non_empty(&mut params, "match", self.match_mode.map(|m| m.as_str()));
        params
    }
}

/// Filter for listing zones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneFilter {
    pub name: Option<String>,
}

impl ZoneFilter {
    pub fn by_name(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
        }
    }

    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_non_empty(&mut params, "name", self.name.as_deref());
        params
    }
}

fn push_non_empty(params: &mut QueryParams, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        params.push((key.to_string(), value.to_string()));
    }
}
