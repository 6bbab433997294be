//! GraphQL schema definition

use async_graphql::extensions::Tracing;
use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::db::Database;

use super::mutations::BookMutations;
use super::queries::BookQueries;

/// The GraphQL schema type
pub type BookshelfSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(BookQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(BookMutations);

/// Build the GraphQL schema; resolvers reach storage through the injected [Database]
pub fn build_schema(db: Database) -> BookshelfSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(db)
    .extension(Tracing)
    .finish()
}
