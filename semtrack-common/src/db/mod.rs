//! Database initialization and schema

pub mod init;

pub use init::{init_database, initialize_schema};
