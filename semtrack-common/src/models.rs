//! Seminar record models
//!
//! Field names are the transport and storage contract: records are
//! serialized as camelCase JSON and stored in identically named SQLite
//! columns, so external ingesters and the browser client share one shape.

use serde::{Deserialize, Serialize};

/// One tracked seminar event.
///
/// `startDate`/`endDate` are ISO 8601 date strings (`YYYY-MM-DD`) and
/// `lastScraped` is an RFC 3339 timestamp. Both order lexicographically,
/// which the date-range filter relies on.
///
/// `(0.0, 0.0)` coordinates double as "not yet resolved". A record that
/// genuinely takes place at the equator/prime meridian is indistinguishable
/// from an unresolved one; see the geocoding gate in the resolution pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seminar {
    pub id: String,
    pub title: String,
    pub instructor: String,
    pub instructor_rank: Option<String>,
    pub organization: Option<String>,
    pub style: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub venue: Option<String>,
    pub city: String,
    pub country: String,
    /// Two-letter convention; not validated for ISO membership.
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    /// Known values: `all`, `beginner`, `intermediate`, `advanced`.
    pub level: Option<String>,
    pub registration_url: Option<String>,
    pub contact_email: Option<String>,
    pub fee: Option<String>,
    /// Provenance tag: `"manual"` for records written through this service,
    /// an ingestion-source tag for records produced by a scraper.
    pub source: String,
    /// Set only by non-manual ingestion.
    pub source_url: Option<String>,
    /// Timestamp of the last resolution-pipeline write. Despite the name,
    /// updated on manual edits too.
    pub last_scraped: String,
    /// True once a record has been touched through the manual create/update
    /// path. Monotone: never reset to false by this service.
    pub manual_override: bool,
}

/// Create/update request body: every mutable field of [`Seminar`].
///
/// `id`, `source`, `sourceUrl`, `lastScraped` and `manualOverride` are
/// assigned by the resolution pipeline, never by the caller. All fields
/// default so that missing and empty required fields take the same
/// validation path instead of failing at deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeminarDraft {
    pub title: String,
    pub instructor: String,
    pub instructor_rank: Option<String>,
    pub organization: Option<String>,
    pub style: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub venue: Option<String>,
    pub city: String,
    pub country: String,
    pub country_code: String,
    /// Defaults to the unresolved sentinel when absent.
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    pub level: Option<String>,
    pub registration_url: Option<String>,
    pub contact_email: Option<String>,
    pub fee: Option<String>,
}

impl Default for SeminarDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            instructor: String::new(),
            instructor_rank: None,
            organization: None,
            style: None,
            start_date: String::new(),
            end_date: String::new(),
            venue: None,
            city: String::new(),
            country: String::new(),
            country_code: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            description: None,
            level: None,
            registration_url: None,
            contact_email: None,
            fee: None,
        }
    }
}

/// One distinct `(country, countryCode)` pair present in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryEntry {
    pub country: String,
    pub country_code: String,
}
