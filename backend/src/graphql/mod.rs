//! GraphQL API for the book catalogue
//!
//! Queries and mutations live in domain modules under `queries/` and
//! `mutations/`; each defines a `#[derive(Default)]` struct with an `#[Object]`
//! impl, merged into the roots in `schema.rs` with `MergedObject`.

pub mod helpers;
pub mod mutations;
pub mod queries;
mod schema;
pub mod types;

pub use schema::{BookshelfSchema, MutationRoot, QueryRoot, build_schema};
pub use types::Book;
