//! Record resolution pipeline
//!
//! The create/update workflow: validate the candidate body, fill in missing
//! coordinates through the injected geocoder, stamp provenance metadata,
//! persist, and return the record as read back from the store.
//!
//! Geocoding is best-effort and never fails a write. Every operation touches
//! exactly one record, so there are no partial writes to unwind.

use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use semtrack_common::{Error, Result, Seminar, SeminarDraft};

use crate::db;
use crate::services::geocoder::Geocoder;

/// Provenance tag for records written through this pipeline
const SOURCE_MANUAL: &str = "manual";

pub struct ResolutionPipeline {
    geocoder: Arc<dyn Geocoder>,
}

impl ResolutionPipeline {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    /// Create a seminar record from a candidate body.
    ///
    /// Assigns a fresh id, stamps `source = "manual"`, `lastScraped = now`
    /// and `manualOverride = true`, and returns the persisted record.
    pub async fn create(&self, pool: &SqlitePool, draft: SeminarDraft) -> Result<Seminar> {
        validate_draft(&draft)?;

        let mut draft = draft;
        self.resolve_coordinates(&mut draft).await;

        let record = Seminar {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            instructor: draft.instructor,
            instructor_rank: draft.instructor_rank,
            organization: draft.organization,
            style: draft.style,
            start_date: draft.start_date,
            end_date: draft.end_date,
            venue: draft.venue,
            city: draft.city,
            country: draft.country,
            country_code: draft.country_code,
            latitude: draft.latitude,
            longitude: draft.longitude,
            description: draft.description,
            level: draft.level,
            registration_url: draft.registration_url,
            contact_email: draft.contact_email,
            fee: draft.fee,
            source: SOURCE_MANUAL.to_string(),
            source_url: None,
            last_scraped: Utc::now().to_rfc3339(),
            manual_override: true,
        };

        db::seminars::insert_seminar(pool, &record).await?;
        info!(id = %record.id, title = %record.title, "Created seminar");

        // Read-after-write: return what the store now holds
        db::seminars::get_seminar(pool, &record.id)
            .await?
            .ok_or_else(|| Error::Internal(format!("Seminar {} missing after insert", record.id)))
    }

    /// Replace every mutable field of an existing record.
    ///
    /// Fails with `NotFound` when the target id does not exist. Re-stamps
    /// `lastScraped` and forces `manualOverride = true` regardless of the
    /// record's provenance, so ingester-created records become manual once
    /// edited here.
    pub async fn update(&self, pool: &SqlitePool, id: &str, draft: SeminarDraft) -> Result<Seminar> {
        if db::seminars::get_seminar(pool, id).await?.is_none() {
            return Err(Error::NotFound(format!("Seminar not found: {}", id)));
        }

        validate_draft(&draft)?;

        let mut draft = draft;
        self.resolve_coordinates(&mut draft).await;

        let now = Utc::now().to_rfc3339();
        db::seminars::update_seminar(pool, id, &draft, &now).await?;
        info!(id = %id, "Updated seminar");

        db::seminars::get_seminar(pool, id)
            .await?
            .ok_or_else(|| Error::Internal(format!("Seminar {} missing after update", id)))
    }

    /// Fill in coordinates when both sit at the unresolved sentinel and a
    /// place is available. A supplied non-zero coordinate is trusted
    /// verbatim and the resolver is never consulted.
    async fn resolve_coordinates(&self, draft: &mut SeminarDraft) {
        let unresolved = draft.latitude == 0.0 && draft.longitude == 0.0;
        if !unresolved || draft.city.is_empty() || draft.country.is_empty() {
            return;
        }

        if let Some(point) = self.geocoder.resolve(&draft.city, &draft.country).await {
            draft.latitude = point.latitude;
            draft.longitude = point.longitude;
        }
    }
}

/// Reject a body whose required fields are missing or blank
fn validate_draft(draft: &SeminarDraft) -> Result<()> {
    let required = [
        ("title", &draft.title),
        ("instructor", &draft.instructor),
        ("startDate", &draft.start_date),
        ("endDate", &draft.end_date),
        ("city", &draft.city),
        ("country", &draft.country),
        ("countryCode", &draft.country_code),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(Error::InvalidInput(format!(
                "Missing required field: {}",
                field
            )));
        }
    }

    Ok(())
}
