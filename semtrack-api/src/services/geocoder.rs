//! Nominatim geocoding client
//!
//! Resolves a free-text place (`city, country`) to a coordinate pair via the
//! OpenStreetMap Nominatim search endpoint. Resolution is strictly
//! best-effort: every failure mode collapses to `None` and the caller keeps
//! its unresolved-coordinates sentinel.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const USER_AGENT: &str = "SemTrack/0.1 (https://github.com/semtrack/semtrack)";
const RATE_LIMIT_MS: u64 = 1000; // Nominatim usage policy: 1 request per second

/// Geocoding client errors (internal; the [`Geocoder`] trait absorbs them)
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("No candidates for query: {0}")]
    NoCandidates(String),
}

/// A resolved coordinate pair in signed decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Injectable place-resolution capability.
///
/// Implementations are fail-open: a lookup that cannot produce a coordinate
/// pair returns `None`, never an error, so record writes proceed regardless.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, city: &str, country: &str) -> Option<GeoPoint>;
}

/// One Nominatim search candidate. Coordinates arrive as strings.
#[derive(Debug, Clone, Deserialize)]
struct SearchCandidate {
    lat: String,
    lon: String,
}

/// Enforces the polite minimum interval between outbound requests
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval: Duration::from_millis(min_interval_ms),
        }
    }

    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// Nominatim search client
pub struct NominatimClient {
    http_client: reqwest::Client,
    rate_limiter: RateLimiter,
}

impl NominatimClient {
    pub fn new() -> Result<Self, GeocodeError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GeocodeError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            rate_limiter: RateLimiter::new(RATE_LIMIT_MS),
        })
    }

    /// Search for `city, country`, requesting a single candidate
    async fn search(&self, city: &str, country: &str) -> Result<GeoPoint, GeocodeError> {
        self.rate_limiter.wait().await;

        let place = format!("{}, {}", city, country);
        let url = format!("{}/search", NOMINATIM_BASE_URL);

        tracing::debug!(place = %place, "Querying Nominatim");

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", place.as_str()), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| GeocodeError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeocodeError::ApiError(status.as_u16(), error_text));
        }

        let candidates: Vec<SearchCandidate> = response
            .json()
            .await
            .map_err(|e| GeocodeError::ParseError(e.to_string()))?;

        let Some(first) = candidates.first() else {
            return Err(GeocodeError::NoCandidates(place));
        };

        let latitude = first
            .lat
            .parse::<f64>()
            .map_err(|e| GeocodeError::ParseError(e.to_string()))?;
        let longitude = first
            .lon
            .parse::<f64>()
            .map_err(|e| GeocodeError::ParseError(e.to_string()))?;

        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn resolve(&self, city: &str, country: &str) -> Option<GeoPoint> {
        match self.search(city, country).await {
            Ok(point) => {
                tracing::info!(
                    city = %city,
                    country = %country,
                    latitude = point.latitude,
                    longitude = point.longitude,
                    "Geocoded place"
                );
                Some(point)
            }
            Err(e) => {
                tracing::warn!(
                    city = %city,
                    country = %country,
                    error = %e,
                    "Geocoding failed, coordinates stay unresolved"
                );
                None
            }
        }
    }
}
