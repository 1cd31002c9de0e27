//! Seminar database operations

pub mod seminars;
