use reqwest::{blocking::Client, Url};
use std::time::Duration;

use crate::error::{EtaError, RouteLookupError};
use crate::routing::{RawRouteResult, RouteLookup};

use super::parser::parse_directions_response;
use super::response::DirectionsResponse;

/// Thin blocking HTTP client for a directions endpoint.
#[derive(Debug, Clone)]
pub struct DirectionsRouteLookup {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl DirectionsRouteLookup {
    /// Create a client for `endpoint`; every request is bounded by `timeout`.
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, EtaError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EtaError::Config(format!("failed to build directions client: {e}")))?;
        Url::parse(endpoint)
            .map_err(|e| {
                EtaError::Config(format!("invalid directions endpoint {endpoint:?}: {e}"))
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn request_url(&self, pickup: &str, drop: &str) -> Result<Url, RouteLookupError> {
        let mut url = Url::parse(&self.endpoint).map_err(|err| {
            RouteLookupError::Api(format!("failed to build directions URL: {}", err))
        })?;
        url.query_pairs_mut()
            .append_pair("origin", pickup)
            .append_pair("destination", drop)
            .append_pair("mode", "driving")
            .append_pair("key", &self.api_key);
        Ok(url)
    }
}

impl RouteLookup for DirectionsRouteLookup {
    fn lookup(&self, pickup: &str, drop: &str) -> Result<RawRouteResult, RouteLookupError> {
        let url = self.request_url(pickup, drop)?;
        log::debug!("directions request {:?} -> {:?}", pickup, drop);

        let response = self.client.get(url).send()?.error_for_status()?;
        let parsed: DirectionsResponse = response.json()?;
        parse_directions_response(parsed).inspect_err(|err| {
            log::debug!("directions lookup {:?} -> {:?} failed: {}", pickup, drop, err);
        })
    }
}
