//! Zone endpoints.

use tracing::instrument;

use crate::client::Client;
use crate::envelope::ZonesResponse;
use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::Transport;
use crate::types::ZoneFilter;

impl<T: Transport> Client<T> {
    pub fn build_list_zones(&self, filter: &ZoneFilter) -> HttpRequest {
        self.build_request(HttpMethod::Get, "zones", &filter.to_query(), None)
    }

    /// `GET zones`. The envelope is returned as decoded; check `ok()`.
    #[instrument(skip(self))]
    pub fn list_zones(&self, filter: &ZoneFilter) -> Result<ZonesResponse> {
        self.call(&self.build_list_zones(filter))
    }

    /// Id of the first zone called `name`.
    ///
    /// Unlike `list_zones` this checks `success` and turns API errors into
    /// `Error::Api`.
    #[instrument(skip(self))]
    pub fn zone_id_by_name(&self, name: &str) -> Result<String> {
        let zones = self.list_zones(&ZoneFilter::by_name(name))?.into_result()?;
        zones
            .into_iter()
            .next()
            .map(|zone| zone.id)
            .ok_or_else(|| Error::ZoneNotFound(name.to_string()))
    }
}
