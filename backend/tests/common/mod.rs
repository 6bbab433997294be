//! Shared setup for integration tests: a schema over a throwaway SQLite file.

#![allow(dead_code)]

use async_graphql::{Request, Response, Variables};
use bookshelf::db::{Database, SeedMode};
use bookshelf::graphql::{BookshelfSchema, build_schema};
use serde_json::Value;
use tempfile::TempDir;

pub struct TestApp {
    // Keeps the database file alive for the duration of the test
    _dir: TempDir,
    pub db: Database,
    pub schema: BookshelfSchema,
}

impl TestApp {
    pub async fn new(mode: SeedMode) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.sqlite");
        let db = Database::connect(path.to_str().unwrap(), 1).await.unwrap();
        db.initialize(mode).await.unwrap();
        let schema = build_schema(db.clone());
        Self {
            _dir: dir,
            db,
            schema,
        }
    }

    pub async fn execute(&self, query: &str, variables: Value) -> Response {
        self.schema
            .execute(Request::new(query).variables(Variables::from_json(variables)))
            .await
    }

    /// Execute and return `data`, failing the test on any GraphQL error
    pub async fn data(&self, query: &str, variables: Value) -> Value {
        let response = self.execute(query, variables).await;
        assert!(
            response.errors.is_empty(),
            "unexpected errors: {:?}",
            response.errors
        );
        response.data.into_json().unwrap()
    }

    pub async fn add_book(&self, title: &str, author: &str, year: Option<i32>) -> Value {
        let data = self
            .data(
                "mutation($title: String!, $author: String!, $year: Int) {
                    addBook(title: $title, author: $author, publishedYear: $year) {
                        id title author publishedYear
                    }
                }",
                serde_json::json!({ "title": title, "author": author, "year": year }),
            )
            .await;
        data["addBook"].clone()
    }

    pub async fn book(&self, id: &Value) -> Value {
        let data = self
            .data(
                "query($id: ID!) { book(id: $id) { id title author publishedYear } }",
                serde_json::json!({ "id": id }),
            )
            .await;
        data["book"].clone()
    }

    pub async fn book_count(&self) -> usize {
        let data = self.data("{ books { id } }", Value::Null).await;
        data["books"].as_array().unwrap().len()
    }
}

/// `extensions.code` of the first error in a response
pub fn error_code(response: &Response) -> Option<String> {
    let first = response.errors.first()?;
    let json = serde_json::to_value(first).unwrap();
    json["extensions"]["code"].as_str().map(str::to_string)
}
