//! # SemTrack Common Library
//!
//! Shared code for the SemTrack seminar tracking service:
//! - Seminar record and filter models
//! - Filter predicate engine (one rule table, two interpreters)
//! - Database initialization and schema
//! - Configuration loading and root folder resolution
//! - Common error types

pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod models;

pub use error::{Error, Result};
pub use filter::FilterState;
pub use models::{CountryEntry, Seminar, SeminarDraft};
