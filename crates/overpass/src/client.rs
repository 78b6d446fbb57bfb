//! HTTP client for the Overpass API.

use landbank_store::ingest::SourceElement;
use tracing::debug;

use crate::dto::OverpassResponse;
use crate::query::{railway_station_query, vacant_land_query, BoundingBox};

pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

#[derive(Debug, thiserror::Error)]
pub enum OverpassError {
    #[error("Overpass request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, OverpassError>;

/// Client for bounding-box land and station queries.
///
/// Fetch failures propagate to the caller, which decides whether to retry
/// or present an empty collection; no retry policy lives here.
#[derive(Clone, Debug)]
pub struct OverpassClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OverpassClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Point the client at a non-default interpreter (mirror or test server)
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Fetch candidate vacant/disused land ways within the bounding box
    pub async fn fetch_vacant_land(&self, bbox: &BoundingBox) -> Result<Vec<SourceElement>> {
        self.run(vacant_land_query(bbox)).await
    }

    /// Fetch railway station nodes within the bounding box
    pub async fn fetch_railway_stations(&self, bbox: &BoundingBox) -> Result<Vec<SourceElement>> {
        self.run(railway_station_query(bbox)).await
    }

    async fn run(&self, query: String) -> Result<Vec<SourceElement>> {
        debug!(endpoint = %self.endpoint, "sending Overpass query");

        let response: OverpassResponse = self
            .http
            .get(&self.endpoint)
            .query(&[("data", query.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let elements = response.into_source_elements();
        debug!(count = elements.len(), "decoded Overpass elements");
        Ok(elements)
    }
}

impl Default for OverpassClient {
    fn default() -> Self {
        Self::new()
    }
}
