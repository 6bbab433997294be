//! Bookshelf backend - a GraphQL book catalogue on SQLite
//!
//! All operations are exposed via GraphQL at /graphql.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod logging;
