//! Database initialization
//!
//! Opens (or creates) the SQLite database and brings the schema up to date.
//! Initialization is idempotent: every statement is CREATE ... IF NOT EXISTS,
//! so repeated startups against an existing database are safe.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers while the single writer persists
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    // Wait out short-lived write locks instead of failing immediately
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    initialize_schema(&pool).await?;

    Ok(pool)
}

/// Create the seminars table and its secondary indexes.
///
/// Column names are camelCase: they are the storage half of the transport
/// contract and must stay byte-identical to the JSON field names.
pub async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS seminars (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            instructor TEXT NOT NULL,
            instructorRank TEXT,
            organization TEXT,
            style TEXT,
            startDate TEXT NOT NULL,
            endDate TEXT NOT NULL,
            venue TEXT,
            city TEXT NOT NULL,
            country TEXT NOT NULL,
            countryCode TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            description TEXT,
            level TEXT,
            registrationUrl TEXT,
            contactEmail TEXT,
            fee TEXT,
            source TEXT NOT NULL,
            sourceUrl TEXT,
            lastScraped TEXT NOT NULL,
            manualOverride INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Indexes backing the query interface: date range, country,
    // organization. Instructor substring scans stay unindexed (LIKE with a
    // leading wildcard cannot use one).
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_seminars_startDate ON seminars(startDate)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_seminars_countryCode ON seminars(countryCode)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_seminars_organization ON seminars(organization)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
