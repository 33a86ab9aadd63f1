//! In-memory stand-in for the Cloudflare v4 zone and DNS record endpoints.
//!
//! Every response uses the API's envelope shape. Authentication is strict:
//! each request must carry `X-Auth-Email`, `X-Auth-Key` and a JSON
//! `Content-Type`, otherwise the server answers with the matching API error.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_EMAIL: &str = "dev@example.com";
pub const DEFAULT_API_KEY: &str = "dev-key";
pub const DEFAULT_ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";
pub const DEFAULT_ZONE_NAME: &str = "example.com";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub status: String,
}

impl Zone {
    pub fn active(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status: "active".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
    pub proxiable: bool,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    pub zone_id: String,
    pub zone_name: String,
    pub created_on: DateTime<Utc>,
    pub modified_on: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RecordInput {
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: String,
    pub ttl: Option<u32>,
    pub proxied: Option<bool>,
    pub priority: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ZoneQuery {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    pub name: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "match")]
    pub match_mode: Option<String>,
}

impl RecordQuery {
    /// `match=any` needs one set property to match, anything else needs all
    /// of them. No set properties matches every record.
    pub fn matches(&self, record: &DnsRecord) -> bool {
        let checks = [
            set(&self.record_type).map(|t| record.record_type.eq_ignore_ascii_case(t)),
            set(&self.name).map(|n| record.name == n),
            set(&self.content).map(|c| record.content == c),
        ];
        let mut checks = checks.into_iter().flatten().peekable();
        if checks.peek().is_none() {
            return true;
        }
        match self.match_mode.as_deref() {
            Some("any") => checks.any(|m| m),
            _ => checks.all(|m| m),
        }
    }
}

fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub code: u32,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub count: u32,
    pub total_count: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub errors: Vec<ApiMessage>,
    pub messages: Vec<ApiMessage>,
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_info: Option<ResultInfo>,
}

/// Account credentials and the zones the server starts with.
#[derive(Clone, Debug)]
pub struct Seed {
    pub email: String,
    pub api_key: String,
    pub zones: Vec<Zone>,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            email: DEFAULT_EMAIL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            zones: vec![Zone::active(DEFAULT_ZONE_ID, DEFAULT_ZONE_NAME)],
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    pub zones: Vec<Zone>,
    pub records: Vec<DnsRecord>,
}

impl Store {
    fn zone(&self, zone_id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == zone_id)
    }

    fn record_mut(&mut self, zone_id: &str, record_id: &str) -> Option<&mut DnsRecord> {
        self.records
            .iter_mut()
            .find(|r| r.zone_id == zone_id && r.id == record_id)
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    email: Arc<str>,
    api_key: Arc<str>,
    db: Db,
}

pub fn app(seed: Seed) -> Router {
    let state = AppState {
        email: seed.email.into(),
        api_key: seed.api_key.into(),
        db: Arc::new(RwLock::new(Store {
            zones: seed.zones,
            records: Vec::new(),
        })),
    };

    let api = Router::new()
        .route("/zones", get(list_zones))
        .route("/zones/{zone_id}/dns_records", get(list_records).post(create_record))
        .route(
            "/zones/{zone_id}/dns_records/{record_id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new().nest("/client/v4", api)
}

pub async fn run(listener: TcpListener, seed: Seed) -> Result<(), std::io::Error> {
    axum::serve(listener, app(seed)).await
}

fn ok<T: Serialize>(result: T) -> Response {
    Json(Envelope {
        success: true,
        errors: Vec::new(),
        messages: Vec::new(),
        result: Some(result),
        result_info: None,
    })
    .into_response()
}

fn ok_list<T: Serialize>(items: Vec<T>) -> Response {
    let count = items.len() as u32;
    Json(Envelope {
        success: true,
        errors: Vec::new(),
        messages: Vec::new(),
        result: Some(items),
        result_info: Some(ResultInfo {
            page: 1,
            per_page: 100,
            total_pages: 1,
            count,
            total_count: count,
        }),
    })
    .into_response()
}

fn fail(status: StatusCode, code: u32, message: &str) -> Response {
    let envelope: Envelope<()> = Envelope {
        success: false,
        errors: vec![ApiMessage {
            code,
            message: message.to_string(),
        }],
        messages: Vec::new(),
        result: None,
        result_info: None,
    };
    (status, Json(envelope)).into_response()
}

fn unknown_zone(zone_id: &str) -> Response {
    fail(
        StatusCode::NOT_FOUND,
        7003,
        &format!("Could not route to /zones/{zone_id}/dns_records, perhaps your object identifier is invalid?"),
    )
}

fn unknown_record() -> Response {
    fail(StatusCode::NOT_FOUND, 81044, "Record does not exist.")
}

async fn require_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let headers = request.headers();
    let value = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    let Some(email) = value("x-auth-email") else {
        debug!("rejecting request without X-Auth-Email");
        return fail(StatusCode::BAD_REQUEST, 9106, "Missing X-Auth-Email header");
    };
    let Some(key) = value("x-auth-key") else {
        debug!("rejecting request without X-Auth-Key");
        return fail(StatusCode::BAD_REQUEST, 9107, "Missing X-Auth-Key header");
    };
    if email != &*state.email || key != &*state.api_key {
        debug!(email, "rejecting unknown credentials");
        return fail(StatusCode::FORBIDDEN, 9103, "Unknown X-Auth-Key or X-Auth-Email");
    }
    let json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if !json {
        return fail(StatusCode::BAD_REQUEST, 6003, "Invalid request headers");
    }

    next.run(request).await
}

async fn list_zones(State(state): State<AppState>, Query(query): Query<ZoneQuery>) -> Response {
    let store = state.db.read().await;
    let zones = store
        .zones
        .iter()
        .filter(|z| set(&query.name).map_or(true, |name| z.name == name))
        .cloned()
        .collect();
    ok_list::<Zone>(zones)
}

async fn list_records(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
    Query(query): Query<RecordQuery>,
) -> Response {
    let store = state.db.read().await;
    if store.zone(&zone_id).is_none() {
        return unknown_zone(&zone_id);
    }
    let records = store
        .records
        .iter()
        .filter(|r| r.zone_id == zone_id && query.matches(r))
        .cloned()
        .collect();
    ok_list::<DnsRecord>(records)
}

async fn get_record(
    State(state): State<AppState>,
    Path((zone_id, record_id)): Path<(String, String)>,
) -> Response {
    let store = state.db.read().await;
    match store.records.iter().find(|r| r.zone_id == zone_id && r.id == record_id) {
        Some(record) => ok(record),
        None => unknown_record(),
    }
}

/// Expand `@` and relative names to a fully qualified name inside `zone`.
pub fn qualify(name: &str, zone: &str) -> String {
    if name == "@" || name == zone {
        zone.to_string()
    } else if name.ends_with(&format!(".{zone}")) {
        name.to_string()
    } else {
        format!("{name}.{zone}")
    }
}

fn parse_input(body: &Bytes) -> Result<RecordInput, Response> {
    let input: RecordInput = serde_json::from_slice(body)
        .map_err(|_| fail(StatusCode::BAD_REQUEST, 9207, "Request body is invalid."))?;
    if input.record_type.is_empty() || input.name.is_empty() || input.content.is_empty() {
        return Err(fail(StatusCode::BAD_REQUEST, 1004, "DNS Validation Error"));
    }
    Ok(input)
}

async fn create_record(State(state): State<AppState>, Path(zone_id): Path<String>, body: Bytes) -> Response {
    let input = match parse_input(&body) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let mut store = state.db.write().await;
    let Some(zone) = store.zone(&zone_id).cloned() else {
        return unknown_zone(&zone_id);
    };
    let name = qualify(&input.name, &zone.name);
    let exists = store.records.iter().any(|r| {
        r.zone_id == zone.id && r.record_type == input.record_type && r.name == name && r.content == input.content
    });
    if exists {
        return fail(StatusCode::BAD_REQUEST, 81057, "Record already exists.");
    }

    let now = Utc::now();
    let record = DnsRecord {
        id: Uuid::new_v4().simple().to_string(),
        proxiable: matches!(input.record_type.as_str(), "A" | "AAAA" | "CNAME"),
        record_type: input.record_type,
        name,
        content: input.content,
        ttl: input.ttl.unwrap_or(1),
        proxied: input.proxied.unwrap_or(false),
        locked: false,
        priority: input.priority,
        zone_id: zone.id,
        zone_name: zone.name,
        created_on: now,
        modified_on: now,
    };
    info!(id = %record.id, name = %record.name, record_type = %record.record_type, "created record");
    store.records.push(record.clone());
    ok(record)
}

async fn update_record(
    State(state): State<AppState>,
    Path((zone_id, record_id)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    let input = match parse_input(&body) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let mut store = state.db.write().await;
    let Some(zone_name) = store.zone(&zone_id).map(|z| z.name.clone()) else {
        return unknown_zone(&zone_id);
    };
    let Some(record) = store.record_mut(&zone_id, &record_id) else {
        return unknown_record();
    };
    record.proxiable = matches!(input.record_type.as_str(), "A" | "AAAA" | "CNAME");
    record.name = qualify(&input.name, &zone_name);
    record.record_type = input.record_type;
    record.content = input.content;
    record.ttl = input.ttl.unwrap_or(1);
    record.proxied = input.proxied.unwrap_or(false);
    record.modified_on = Utc::now();
    info!(id = %record.id, "updated record");
    ok(record.clone())
}

async fn delete_record(
    State(state): State<AppState>,
    Path((zone_id, record_id)): Path<(String, String)>,
) -> Response {
    let mut store = state.db.write().await;
    let before = store.records.len();
    store.records.retain(|r| !(r.zone_id == zone_id && r.id == record_id));
    if store.records.len() == before {
        return unknown_record();
    }
    info!(id = %record_id, "deleted record");
    ok(serde_json::json!({ "id": record_id }))
}
