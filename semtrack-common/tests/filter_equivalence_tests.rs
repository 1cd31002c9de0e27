//! Equivalence tests for the filter predicate engine
//!
//! The predicate is evaluated in two execution contexts: in memory against a
//! materialized record set, and as a translated WHERE clause on the store
//! scan. These tests load a fixed record set into SQLite and assert that,
//! for a battery of filter states, both interpreters accept exactly the same
//! subset.

use semtrack_common::db::initialize_schema;
use semtrack_common::filter::{matches, where_clause};
use semtrack_common::{FilterState, Seminar};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

/// In-memory SQLite is per-connection, so the pool must not open a second one.
async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    initialize_schema(&pool).await.expect("Schema initialization failed");
    pool
}

fn seminar(
    id: &str,
    instructor: &str,
    organization: Option<&str>,
    level: Option<&str>,
    country_code: &str,
    start: &str,
    end: &str,
) -> Seminar {
    Seminar {
        id: id.to_string(),
        title: format!("Seminar {}", id),
        instructor: instructor.to_string(),
        instructor_rank: None,
        organization: organization.map(str::to_string),
        style: None,
        start_date: start.to_string(),
        end_date: end.to_string(),
        venue: None,
        city: "Somewhere".to_string(),
        country: "Somewhere".to_string(),
        country_code: country_code.to_string(),
        latitude: 0.0,
        longitude: 0.0,
        description: None,
        level: level.map(str::to_string),
        registration_url: None,
        contact_email: None,
        fee: None,
        source: "manual".to_string(),
        source_url: None,
        last_scraped: "2026-01-01T00:00:00Z".to_string(),
        manual_override: true,
    }
}

async fn insert(pool: &SqlitePool, s: &Seminar) {
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
    .await
    .expect("insert should succeed");
}

/// Ids accepted by the store-side interpreter.
async fn sql_accepted(pool: &SqlitePool, filter: &FilterState) -> Vec<String> {
    let predicate = where_clause(filter);
    let sql = format!(
        "SELECT id FROM seminars{} ORDER BY id ASC",
        predicate.to_where()
    );
    let mut query = sqlx::query(&sql);
    for value in &predicate.bindings {
        query = query.bind(value);
    }
    query
        .fetch_all(pool)
        .await
        .expect("filtered scan should succeed")
        .iter()
        .map(|row| row.get::<String, _>("id"))
        .collect()
}

/// Ids accepted by the in-memory interpreter.
fn memory_accepted(records: &[Seminar], filter: &FilterState) -> Vec<String> {
    let mut ids: Vec<String> = records
        .iter()
        .filter(|s| matches(filter, s))
        .map(|s| s.id.clone())
        .collect();
    ids.sort();
    ids
}

fn fixture() -> Vec<Seminar> {
    vec![
        seminar("s1", "Morihiro Ueshiba", Some("Aikikai"), Some("all"), "JP", "2026-03-10", "2026-03-12"),
        seminar("s2", "Christian Tissier", Some("Aikikai"), Some("advanced"), "FR", "2026-03-12", "2026-03-14"),
        seminar("s3", "Pat Hendricks", Some("Birankai"), Some("beginner"), "US", "2026-05-01", "2026-05-01"),
        seminar("s4", "Seishiro Endo", None, None, "DE", "2026-03-01", "2026-03-09"),
        seminar("s5", "endo takeshi", Some("Aikikai"), Some("all"), "DE", "2026-06-20", "2026-06-22"),
        seminar("s6", "Miles O'Brien", Some("Ki Society"), Some("intermediate"), "IE", "2026-03-13", "2026-03-15"),
    ]
}

fn battery() -> Vec<FilterState> {
    vec![
        // No active fields
        FilterState::default(),
        // Single-field filters
        FilterState { country: Some("DE".to_string()), ..Default::default() },
        FilterState { country: Some("de".to_string()), ..Default::default() },
        FilterState { instructor: Some("ueshiba".to_string()), ..Default::default() },
        FilterState { instructor: Some("ENDO".to_string()), ..Default::default() },
        FilterState { organization: Some("Aikikai".to_string()), ..Default::default() },
        FilterState { organization: Some("Nobody".to_string()), ..Default::default() },
        FilterState { level: Some("all".to_string()), ..Default::default() },
        FilterState { level: Some("advanced".to_string()), ..Default::default() },
        // Interval bounds, including exact boundary touches
        FilterState { start_date: Some("2026-03-12".to_string()), ..Default::default() },
        FilterState { start_date: Some("2026-03-13".to_string()), ..Default::default() },
        FilterState { end_date: Some("2026-03-10".to_string()), ..Default::default() },
        FilterState { end_date: Some("2026-03-09".to_string()), ..Default::default() },
        FilterState {
            start_date: Some("2026-03-01".to_string()),
            end_date: Some("2026-03-31".to_string()),
            ..Default::default()
        },
        // Empty strings are inactive, not match-nothing
        FilterState {
            country: Some(String::new()),
            instructor: Some(String::new()),
            organization: Some(String::new()),
            level: Some(String::new()),
            start_date: Some(String::new()),
            end_date: Some(String::new()),
        },
        // LIKE metacharacters must stay literal
        FilterState { instructor: Some("100%".to_string()), ..Default::default() },
        FilterState { instructor: Some("o'b".to_string()), ..Default::default() },
        // Everything at once
        FilterState {
            country: Some("FR".to_string()),
            instructor: Some("tissier".to_string()),
            organization: Some("Aikikai".to_string()),
            level: Some("advanced".to_string()),
            start_date: Some("2026-03-01".to_string()),
            end_date: Some("2026-03-31".to_string()),
        },
    ]
}

#[tokio::test]
async fn both_interpreters_accept_identical_subsets() {
    let pool = setup_pool().await;
    let records = fixture();
    for record in &records {
        insert(&pool, record).await;
    }

    for (i, filter) in battery().iter().enumerate() {
        let from_sql = sql_accepted(&pool, filter).await;
        let from_memory = memory_accepted(&records, filter);
        assert_eq!(
            from_sql, from_memory,
            "interpreters disagree on filter case #{}: {:?}",
            i, filter
        );
    }
}

#[tokio::test]
async fn overlap_boundaries_match_on_both_sides() {
    let pool = setup_pool().await;
    let record = seminar("s1", "A", None, None, "JP", "2026-03-10", "2026-03-12");
    insert(&pool, &record).await;

    let visible = [
        FilterState { start_date: Some("2026-03-12".to_string()), ..Default::default() },
        FilterState { end_date: Some("2026-03-10".to_string()), ..Default::default() },
    ];
    let invisible = [
        FilterState { start_date: Some("2026-03-13".to_string()), ..Default::default() },
        FilterState { end_date: Some("2026-03-09".to_string()), ..Default::default() },
    ];

    for filter in &visible {
        assert!(matches(filter, &record));
        assert_eq!(sql_accepted(&pool, filter).await, vec!["s1".to_string()]);
    }
    for filter in &invisible {
        assert!(!matches(filter, &record));
        assert!(sql_accepted(&pool, filter).await.is_empty());
    }
}
