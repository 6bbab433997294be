//! GraphQL object types

use async_graphql::{ID, SimpleObject};

use crate::db::BookRecord;

/// A book in the catalogue
#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct Book {
    /// Assigned on creation, never reused
    pub id: ID,
    pub title: String,
    pub author: String,
    pub published_year: Option<i32>,
}

impl From<BookRecord> for Book {
    fn from(r: BookRecord) -> Self {
        Self {
            id: ID::from(r.id.to_string()),
            title: r.title,
            author: r.author,
            published_year: r.published_year,
        }
    }
}
