//! Zone and DNS record lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every client
//! operation over real HTTP through the default `UreqTransport`. This covers
//! what the unit tests fake out: header serialization on the wire, bodies
//! read from non-2xx responses, and the envelope decode of real payloads.

use std::net::SocketAddr;
use std::time::Duration;

use cfdns::{
    Client, ClientConfig, DnsRecordFilter, DnsRecordUpdate, Error, MatchMode, NewDnsRecord, ZoneFilter,
};
use mock_server::{Seed, DEFAULT_API_KEY, DEFAULT_EMAIL, DEFAULT_ZONE_ID};

/// Start the mock server on a background thread and return its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, Seed::default()).await
        })
        .unwrap();
    });

    addr
}

fn client(addr: SocketAddr, email: &str, api_key: &str) -> Client {
    let mut config = ClientConfig::new(email, api_key).with_base_url(&format!("http://{addr}/client/v4/"));
    config.timeout_secs = Some(10);
    Client::from_config(&config)
}

#[test]
fn zone_and_record_lifecycle() {
    let addr = start_server();
    let client = client(addr, DEFAULT_EMAIL, DEFAULT_API_KEY);

    // Step 1: list zones by name.
    let zones = client.list_zones(&ZoneFilter::by_name("example.com")).unwrap();
    assert!(zones.ok(), "{}", zones.format_errors());
    assert_eq!(zones.result.len(), 1);
    assert_eq!(zones.result[0].id, DEFAULT_ZONE_ID);
    assert_eq!(zones.result[0].name, "example.com");
    assert_eq!(zones.result_info.total_count, 1);

    // Step 2: resolve the zone id.
    let zone_id = client.zone_id_by_name("example.com").unwrap();
    assert_eq!(zone_id, DEFAULT_ZONE_ID);

    // Step 3: no records yet.
    let records = client.list_dns_records(&zone_id, &DnsRecordFilter::default()).unwrap();
    assert!(records.ok());
    assert!(records.result.is_empty());

    // Step 4: create with ttl and proxied set.
    let created = client
        .create_dns_record(
            &zone_id,
            &NewDnsRecord::new("A", "www.example.com", "192.0.2.1").ttl(120).proxied(true),
        )
        .unwrap();
    assert!(created.ok(), "{}", created.format_errors());
    let record = created.result;
    let record_id = record.id.clone().expect("created record has an id");
    assert_eq!(record.ttl, Some(120));
    assert_eq!(record.proxied, Some(true));
    assert_eq!(record.zone_id.as_deref(), Some(DEFAULT_ZONE_ID));
    assert!(record.created_on.is_some());

    // Step 5: an MX record with a priority.
    let mx = client
        .create_dns_record(
            &zone_id,
            &NewDnsRecord::new("MX", "example.com", "mail.example.com").priority(10),
        )
        .unwrap();
    assert!(mx.ok());
    assert_eq!(mx.result.priority, Some(10));

    // Step 6: creating the same record again fails at the API level only.
    let duplicate = client
        .create_dns_record(&zone_id, &NewDnsRecord::new("A", "www.example.com", "192.0.2.1"))
        .unwrap();
    assert!(!duplicate.ok());
    assert_eq!(duplicate.format_errors(), "81057: Record already exists.. ");

    // Step 7: filtered listing.
    let filter = DnsRecordFilter {
        record_type: Some("A".to_string()),
        name: Some("www.example.com".to_string()),
        ..DnsRecordFilter::default()
    };
    let records = client.list_dns_records(&zone_id, &filter).unwrap();
    assert_eq!(records.result.len(), 1);
    assert_eq!(records.result[0].id.as_deref(), Some(record_id.as_str()));

    let any = DnsRecordFilter {
        record_type: Some("MX".to_string()),
        name: Some("www.example.com".to_string()),
        match_mode: Some(MatchMode::Any),
        ..DnsRecordFilter::default()
    };
    let records = client.list_dns_records(&zone_id, &any).unwrap();
    assert_eq!(records.result.len(), 2);

    // Step 8: update content, keep the rest.
    let mut update = DnsRecordUpdate::from(&record);
    update.content = "198.51.100.7".to_string();
    let updated = client.update_dns_record(&zone_id, &record_id, &update).unwrap();
    assert!(updated.ok(), "{}", updated.format_errors());
    assert_eq!(updated.result.content, "198.51.100.7");
    assert_eq!(updated.result.ttl, Some(120));
    assert_eq!(updated.result.proxied, Some(true));

    // Step 9: delete.
    client.delete_dns_record(&zone_id, &record_id).unwrap();
    let records = client.list_dns_records(&zone_id, &filter).unwrap();
    assert!(records.result.is_empty(), "expected record to be gone");

    // Step 10: deleting again is an API failure, which delete does not report.
    client.delete_dns_record(&zone_id, &record_id).unwrap();

    // Step 11: updating the deleted record returns the failed envelope.
    let missing = client.update_dns_record(&zone_id, &record_id, &update).unwrap();
    assert!(!missing.ok());
    assert_eq!(missing.errors[0].code, 81044);
}

#[test]
fn unknown_zone_name() {
    let addr = start_server();
    let client = client(addr, DEFAULT_EMAIL, DEFAULT_API_KEY);

    let err = client.zone_id_by_name("nope.example").unwrap_err();
    assert!(matches!(err, Error::ZoneNotFound(ref name) if name == "nope.example"));
}

#[test]
fn bad_credentials_surface_through_the_envelope() {
    let addr = start_server();
    let client = client(addr, DEFAULT_EMAIL, "wrong-key");

    let zones = client.list_zones(&ZoneFilter::default()).unwrap();
    assert!(!zones.ok());
    assert_eq!(zones.format_errors(), "9103: Unknown X-Auth-Key or X-Auth-Email. ");

    match client.zone_id_by_name("example.com") {
        Err(Error::Api { errors }) => assert_eq!(errors, "9103: Unknown X-Auth-Key or X-Auth-Email. "),
        other => panic!("expected Api error, got {other:?}"),
    }

    // Delete only reports transport failures.
    client.delete_dns_record(DEFAULT_ZONE_ID, "anything").unwrap();
}

#[test]
fn non_envelope_body_is_an_ambiguous_failure() {
    let addr = start_server();
    let client = client(addr, DEFAULT_EMAIL, DEFAULT_API_KEY);

    // Not a routed endpoint: the server answers 404 with no JSON body.
    let records = client
        .list_dns_records(&format!("{DEFAULT_ZONE_ID}/dns_records/extra"), &DnsRecordFilter::default())
        .unwrap();
    assert!(!records.ok());
    assert!(records.is_ambiguous_failure());
    assert!(records.result.is_empty());
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let mut config = ClientConfig::new(DEFAULT_EMAIL, DEFAULT_API_KEY).with_base_url(&format!("http://{addr}/client/v4"));
    config.timeout_secs = Some(5);
    let client = Client::from_config(&config);

    assert!(matches!(
        client.list_zones(&ZoneFilter::default()),
        Err(Error::Transport(_))
    ));
    assert!(matches!(
        client.delete_dns_record(DEFAULT_ZONE_ID, "r1"),
        Err(Error::Transport(_))
    ));
    assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
}
