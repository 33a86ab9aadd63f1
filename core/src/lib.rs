//! Synchronous client for the Cloudflare v4 zone and DNS record API.
//!
//! # Overview
//! Every call runs the same pipeline: a relative path and query parameters
//! become an authenticated `HttpRequest`, a `Transport` performs one blocking
//! exchange, and the body is decoded into a `Response<T>` envelope
//! (`success`, `errors`, `messages`, `result_info`, `result`).
//!
//! # Design
//! - `Client` is immutable after construction: credentials, API root and one
//!   shared transport.
//! - HTTP status codes are never inspected. API failures are reported through
//!   the envelope's `success` flag, transport failures through `Err`.
//! - Envelope decoding never fails; see `envelope::decode` for what that
//!   costs.
//! - No retries, caching, rate limiting or pagination traversal.
//!
//! ```no_run
//! use cfdns::{Client, NewDnsRecord};
//!
//! let client = Client::new("ops@example.com", "api-key");
//! let zone_id = client.zone_id_by_name("example.com")?;
//! let created = client.create_dns_record(&zone_id, &NewDnsRecord::new("A", "www.example.com", "192.0.2.1").ttl(120))?;
//! if !created.ok() {
//!     eprintln!("create failed: {}", created.format_errors());
//! }
//! # Ok::<(), cfdns::Error>(())
//! ```

pub mod client;
pub mod config;
pub mod dns_records;
pub mod envelope;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod zones;

pub use client::Client;
pub use config::{ClientConfig, Credentials, API_BASE_URL};
pub use envelope::{
    decode, DnsRecordResponse, DnsRecordsResponse, Response, ResponseInfo, ResultInfo, ZoneResponse, ZonesResponse,
};
pub use error::{Error, Result, TransportError};
pub use http::{build_url, HttpMethod, HttpRequest, HttpResponse, QueryParams};
pub use transport::{Transport, UreqTransport};
pub use types::{DnsRecord, DnsRecordFilter, DnsRecordUpdate, MatchMode, NewDnsRecord, Zone, ZoneFilter};
