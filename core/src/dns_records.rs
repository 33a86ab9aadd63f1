//! DNS record endpoints of a zone.
//!
//! None of these check `success`. List, create and update hand back the
//! decoded envelope; delete reports only whether the exchange itself
//! completed.

use tracing::instrument;

use crate::client::Client;
use crate::envelope::{DnsRecordResponse, DnsRecordsResponse};
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::Transport;
use crate::types::{DnsRecordFilter, DnsRecordUpdate, NewDnsRecord};

fn records_path(zone_id: &str) -> String {
    format!("zones/{zone_id}/dns_records")
}

fn record_path(zone_id: &str, record_id: &str) -> String {
    format!("zones/{zone_id}/dns_records/{record_id}")
}

impl<T: Transport> Client<T> {
    pub fn build_list_dns_records(&self, zone_id: &str, filter: &DnsRecordFilter) -> HttpRequest {
        self.build_request(HttpMethod::Get, &records_path(zone_id), &filter.to_query(), None)
    }

    pub fn build_create_dns_record(&self, zone_id: &str, record: &NewDnsRecord) -> Result<HttpRequest> {
        let body = serde_json::to_vec(record)?;
        Ok(self.build_request(HttpMethod::Post, &records_path(zone_id), &[], Some(body)))
    }

    pub fn build_update_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &DnsRecordUpdate,
    ) -> Result<HttpRequest> {
        let body = serde_json::to_vec(record)?;
        Ok(self.build_request(HttpMethod::Put, &record_path(zone_id, record_id), &[], Some(body)))
    }

    pub fn build_delete_dns_record(&self, zone_id: &str, record_id: &str) -> HttpRequest {
        self.build_request(HttpMethod::Delete, &record_path(zone_id, record_id), &[], None)
    }

    #[instrument(skip(self))]
    pub fn list_dns_records(&self, zone_id: &str, filter: &DnsRecordFilter) -> Result<DnsRecordsResponse> {
        self.call(&self.build_list_dns_records(zone_id, filter))
    }

    #[instrument(skip(self, record), fields(name = %record.name, record_type = %record.record_type))]
    pub fn create_dns_record(&self, zone_id: &str, record: &NewDnsRecord) -> Result<DnsRecordResponse> {
        self.call(&self.build_create_dns_record(zone_id, record)?)
    }

    #[instrument(skip(self, record))]
    pub fn update_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &DnsRecordUpdate,
    ) -> Result<DnsRecordResponse> {
        self.call(&self.build_update_dns_record(zone_id, record_id, record)?)
    }

    /// `DELETE zones/{zone_id}/dns_records/{record_id}`.
    ///
    /// Succeeds whenever the server answered, even with `success: false`.
    /// List the zone's records afterwards to confirm removal.
    #[instrument(skip(self))]
    pub fn delete_dns_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        self.send(&self.build_delete_dns_record(zone_id, record_id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::{Error, TransportError};
    use crate::transport::fake::RecordingTransport;
    use crate::types::MatchMode;

    const ZONE: &str = "023e105f4ecef8ad9ca31a8372d0c353";
    const RECORD: &str = "372e67954025e0ba6aaa6d586b9e0b59";

    fn client(transport: RecordingTransport) -> Client<RecordingTransport> {
        Client::with_transport(&ClientConfig::new("ops@example.com", "key-123"), transport)
    }

    fn body_json(req: &HttpRequest) -> serde_json::Value {
        serde_json::from_slice(req.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn list_sends_only_set_filters() {
        let c = client(RecordingTransport::responding(
            200,
            r#"{"success":true,"result":[{"id":"r1","type":"A","name":"www.example.com","content":"192.0.2.1","ttl":1,"proxied":false}]}"#,
        ));
        let filter = DnsRecordFilter {
            record_type: Some("A".to_string()),
            name: Some("www.example.com".to_string()),
            content: None,
            match_mode: Some(MatchMode::All),
        };
        let response = c.list_dns_records(ZONE, &filter).unwrap();

        let req = c.transport().last_request();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            format!("https://api.cloudflare.com/client/v4/zones/{ZONE}/dns_records?type=A&name=www.example.com&match=all")
        );
        assert_eq!(response.result.len(), 1);
        assert_eq!(response.result[0].content, "192.0.2.1");
    }

    #[test]
    fn create_posts_record_body() {
        let c = client(RecordingTransport::responding(
            200,
            r#"{"success":true,"result":{"id":"r2","type":"A","name":"www.example.com","content":"192.0.2.1","ttl":120,"proxied":true}}"#,
        ));
        let record = NewDnsRecord::new("A", "www.example.com", "192.0.2.1").ttl(120).proxied(true);
        let response = c.create_dns_record(ZONE, &record).unwrap();

        let req = c.transport().last_request();
        assert_eq!(req.method, HttpMethod::Post);
        assert!(req.url.ends_with(&format!("zones/{ZONE}/dns_records")));
        assert_eq!(
            body_json(&req),
            serde_json::json!({"type": "A", "name": "www.example.com", "content": "192.0.2.1", "ttl": 120, "proxied": true})
        );
        assert_eq!(response.result.id.as_deref(), Some("r2"));
        assert_eq!(response.result.ttl, Some(120));
        assert_eq!(response.result.proxied, Some(true));
    }

    #[test]
    fn create_returns_failed_envelope_unchecked() {
        let c = client(RecordingTransport::responding(
            400,
            r#"{"success":false,"errors":[{"code":81057,"message":"Record already exists."}],"result":null}"#,
        ));
        let response = c
            .create_dns_record(ZONE, &NewDnsRecord::new("A", "www.example.com", "192.0.2.1"))
            .unwrap();
        assert!(!response.ok());
        assert_eq!(response.errors[0].code, 81057);
    }

    #[test]
    fn update_puts_to_record_path() {
        let c = client(RecordingTransport::responding(200, r#"{"success":true,"result":{"id":"r1"}}"#));
        let update = DnsRecordUpdate {
            record_type: "A".to_string(),
            name: "www.example.com".to_string(),
            content: "198.51.100.7".to_string(),
            ttl: None,
            proxied: None,
        };
        c.update_dns_record(ZONE, RECORD, &update).unwrap();

        let req = c.transport().last_request();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(
            req.url,
            format!("https://api.cloudflare.com/client/v4/zones/{ZONE}/dns_records/{RECORD}")
        );
        let body = body_json(&req);
        assert_eq!(body["content"], "198.51.100.7");
        assert!(body.get("ttl").is_none());
        assert!(body.get("proxied").is_none());
    }

    #[test]
    fn delete_sends_empty_body() {
        let c = client(RecordingTransport::responding(200, r#"{"success":true,"result":{"id":"r1"}}"#));
        c.delete_dns_record(ZONE, RECORD).unwrap();

        let req = c.transport().last_request();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(
            req.url,
            format!("https://api.cloudflare.com/client/v4/zones/{ZONE}/dns_records/{RECORD}")
        );
        assert!(req.body.is_none());
        assert_eq!(req.header("X-Auth-Key"), Some("key-123"));
    }

    #[test]
    fn delete_ignores_api_failure() {
        let c = client(RecordingTransport::responding(
            200,
            r#"{"success":false,"errors":[{"code":81044,"message":"Record does not exist."}]}"#,
        ));
        assert!(c.delete_dns_record(ZONE, RECORD).is_ok());
    }

    #[test]
    fn delete_reports_transport_failure() {
        let c = client(RecordingTransport::refusing());
        let err = c.delete_dns_record(ZONE, RECORD).unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Io(_))));
    }

    #[test]
    fn transport_failure_yields_no_envelope() {
        let c = client(RecordingTransport::refusing());
        assert!(c.list_dns_records(ZONE, &DnsRecordFilter::default()).is_err());
        assert!(c
            .update_dns_record(ZONE, RECORD, &DnsRecordUpdate::default())
            .is_err());
        assert_eq!(c.transport().requests.lock().unwrap().len(), 2);
    }
}
