//! Seminar CRUD queries
//!
//! The listing scan composes its WHERE clause from the shared filter
//! predicate engine, so the store-side decisions are compiled from the same
//! rule table as the in-memory evaluator.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use semtrack_common::filter::where_clause;
use semtrack_common::{CountryEntry, FilterState, Result, Seminar, SeminarDraft};

/// Map one storage row to a record
fn seminar_from_row(row: &SqliteRow) -> Seminar {
    Seminar {
        id: row.get("id"),
        title: row.get("title"),
        instructor: row.get("instructor"),
        instructor_rank: row.get("instructorRank"),
        organization: row.get("organization"),
        style: row.get("style"),
        start_date: row.get("startDate"),
        end_date: row.get("endDate"),
        venue: row.get("venue"),
        city: row.get("city"),
        country: row.get("country"),
        country_code: row.get("countryCode"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        description: row.get("description"),
        level: row.get("level"),
        registration_url: row.get("registrationUrl"),
        contact_email: row.get("contactEmail"),
        fee: row.get("fee"),
        source: row.get("source"),
        source_url: row.get("sourceUrl"),
        last_scraped: row.get("lastScraped"),
        manual_override: row.get::<i64, _>("manualOverride") != 0,
    }
}

/// Filtered scan, ascending by start date
pub async fn query_seminars(pool: &SqlitePool, filter: &FilterState) -> Result<Vec<Seminar>> {
    let predicate = where_clause(filter);
    let sql = format!(
        "SELECT * FROM seminars{} ORDER BY startDate ASC",
        predicate.to_where()
    );

    let mut query = sqlx::query(&sql);
    for value in &predicate.bindings {
        query = query.bind(value);
    }

    let rows = query.fetch_all(pool).await?;
    Ok(rows.iter().map(seminar_from_row).collect())
}

/// Exact-key lookup
pub async fn get_seminar(pool: &SqlitePool, id: &str) -> Result<Option<Seminar>> {
    let row = sqlx::query("SELECT * FROM seminars WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(seminar_from_row))
}

/// Insert a fully resolved record
pub async fn insert_seminar(pool: &SqlitePool, s: &Seminar) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO seminars (
            id, title, instructor, instructorRank, organization, style,
            startDate, endDate, venue, city, country, countryCode,
            latitude, longitude, description, level, registrationUrl,
            contactEmail, fee, source, sourceUrl, lastScraped, manualOverride
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&s.id)
    .bind(&s.title)
    .bind(&s.instructor)
    .bind(&s.instructor_rank)
    .bind(&s.organization)
    .bind(&s.style)
    .bind(&s.start_date)
    .bind(&s.end_date)
    .bind(&s.venue)
    .bind(&s.city)
    .bind(&s.country)
    .bind(&s.country_code)
    .bind(s.latitude)
    .bind(s.longitude)
    .bind(&s.description)
    .bind(&s.level)
    .bind(&s.registration_url)
    .bind(&s.contact_email)
    .bind(&s.fee)
    .bind(&s.source)
    .bind(&s.source_url)
    .bind(&s.last_scraped)
    .bind(s.manual_override as i64)
    .execute(pool)
    .await?;

    Ok(())
}

/// Replace every mutable field of an existing record.
///
/// `source` and `sourceUrl` keep their stored values; `manualOverride` is
/// forced on and never cleared, keeping the flag monotone.
pub async fn update_seminar(
    pool: &SqlitePool,
    id: &str,
    draft: &SeminarDraft,
    last_scraped: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE seminars SET
            title = ?, instructor = ?, instructorRank = ?, organization = ?,
            style = ?, startDate = ?, endDate = ?, venue = ?,
            city = ?, country = ?, countryCode = ?,
            latitude = ?, longitude = ?, description = ?, level = ?,
            registrationUrl = ?, contactEmail = ?, fee = ?,
            lastScraped = ?, manualOverride = 1
        WHERE id = ?
        "#,
    )
    .bind(&draft.title)
    .bind(&draft.instructor)
    .bind(&draft.instructor_rank)
    .bind(&draft.organization)
    .bind(&draft.style)
    .bind(&draft.start_date)
    .bind(&draft.end_date)
    .bind(&draft.venue)
    .bind(&draft.city)
    .bind(&draft.country)
    .bind(&draft.country_code)
    .bind(draft.latitude)
    .bind(draft.longitude)
    .bind(&draft.description)
    .bind(&draft.level)
    .bind(&draft.registration_url)
    .bind(&draft.contact_email)
    .bind(&draft.fee)
    .bind(last_scraped)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete by key. Returns false when no row had the id.
pub async fn delete_seminar(pool: &SqlitePool, id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM seminars WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Distinct `(country, countryCode)` pairs, ascending by country
pub async fn list_countries(pool: &SqlitePool) -> Result<Vec<CountryEntry>> {
    let rows = sqlx::query("SELECT DISTINCT country, countryCode FROM seminars ORDER BY country ASC")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .iter()
        .map(|row| CountryEntry {
            country: row.get("country"),
            country_code: row.get("countryCode"),
        })
        .collect())
}

/// Total row count (used by tests to pin no-write invariants)
pub async fn count_seminars(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM seminars")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
