//! HTTP client for the Mapbox Isochrone API.

use geo::Point;
use geojson::FeatureCollection;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Travel-time contour used for the accessibility analysis
pub const DEFAULT_CONTOUR_MINUTES: u32 = 8;

// Mapbox has no public-transport profile; driving-traffic is a reasonable
// stand-in for urban public transport reach.
const PROFILE: &str = "mapbox/driving-traffic";

#[derive(Debug, thiserror::Error)]
pub enum IsochroneError {
    #[error("isochrone request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, IsochroneError>;

/// Client fetching travel-time polygons around a parcel centroid.
///
/// Failures propagate as errors and must never corrupt store state; the
/// caller simply skips scoring on a failed fetch.
#[derive(Clone, Debug)]
pub struct IsochroneClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl IsochroneClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Fetch the polygon(s) reachable from `center` within `minutes`
    pub async fn fetch(&self, center: Point, minutes: u32) -> Result<FeatureCollection> {
        let url = format!(
            "{}/isochrone/v1/{}/{},{}",
            self.base_url,
            PROFILE,
            center.x(),
            center.y(),
        );
        debug!(lon = center.x(), lat = center.y(), minutes, "fetching isochrone");

        let isochrone: FeatureCollection = self
            .http
            .get(&url)
            .query(&[
                ("contours_minutes", minutes.to_string()),
                ("polygons", "true".to_string()),
                ("generalize", "0".to_string()),
                ("access_token", self.token.clone()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(features = isochrone.features.len(), "isochrone received");
        Ok(isochrone)
    }
}
