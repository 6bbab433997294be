//! Books database repository
//!
//! Storage adapter for the `books` table. Each method is a single statement
//! except [BookRepository::update], which is an unguarded read-modify-write:
//! concurrent updates of the same row are last-write-wins.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteRow;

use crate::db::schema_sync::{ColumnDef, TableSchema};
use crate::db::sqlite_helpers::{now_iso8601, str_to_datetime};

/// Book record from database
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub published_year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TableSchema for BookRecord {
    const TABLE_NAME: &'static str = "books";

    fn columns() -> &'static [ColumnDef] {
        const COLUMNS: &[ColumnDef] = &[
            ColumnDef::new("id", "INTEGER").serial_key(),
            ColumnDef::new("title", "TEXT").not_null(),
            ColumnDef::new("author", "TEXT").not_null(),
            ColumnDef::new("published_year", "INTEGER"),
            ColumnDef::new("created_at", "TEXT").not_null(),
            ColumnDef::new("updated_at", "TEXT").not_null(),
        ];
        COLUMNS
    }
}

impl sqlx::FromRow<'_, SqliteRow> for BookRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        use sqlx::Row;

        let created_str: String = row.try_get("created_at")?;
        let updated_str: String = row.try_get("updated_at")?;

        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            published_year: row.try_get("published_year")?,
            created_at: str_to_datetime(&created_str).map_err(|e| sqlx::Error::Decode(e.into()))?,
            updated_at: str_to_datetime(&updated_str).map_err(|e| sqlx::Error::Decode(e.into()))?,
        })
    }
}

/// Input for creating a book
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub published_year: Option<i32>,
}

/// Input for updating a book. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    /// `Some(None)` clears the year
    pub published_year: Option<Option<i32>>,
}

impl UpdateBook {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.published_year.is_none()
    }

    /// Overwrite the supplied fields of `record`
    pub fn apply_to(self, record: &mut BookRecord) {
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(author) = self.author {
            record.author = author;
        }
        if let Some(published_year) = self.published_year {
            record.published_year = published_year;
        }
    }
}

/// Book repository
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all books in insertion order
    pub async fn list_all(&self) -> Result<Vec<BookRecord>> {
        let records = sqlx::query_as::<_, BookRecord>(&format!(
            "{} ORDER BY id ASC",
            BookRecord::select_sql()
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Get a book by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<BookRecord>> {
        let record = sqlx::query_as::<_, BookRecord>(&format!(
            "{} WHERE id = ?1",
            BookRecord::select_sql()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Number of stored books
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Insert a book; the database assigns its id
    pub async fn create(&self, input: CreateBook) -> Result<BookRecord> {
        let now = now_iso8601();

        let result = sqlx::query(
            r#"
            INSERT INTO books (title, author, published_year, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
        )
        .bind(&input.title)
        .bind(&input.author)
        .bind(input.published_year)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("Failed to retrieve book {} after insert", id))
    }

    /// Write every field of `record` back to its row.
    ///
    /// Returns `None` when the row no longer exists.
    pub async fn save(&self, record: &BookRecord) -> Result<Option<BookRecord>> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = ?2, author = ?3, published_year = ?4, updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(&record.author)
        .bind(record.published_year)
        .bind(now_iso8601())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            self.get_by_id(record.id).await
        } else {
            Ok(None)
        }
    }

    /// Apply `input` to an existing book.
    ///
    /// Returns `None` without writing anything when no book has this id.
    pub async fn update(&self, id: i64, input: UpdateBook) -> Result<Option<BookRecord>> {
        let Some(mut record) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        if input.is_empty() {
            // Nothing to update, just return the existing record
            return Ok(Some(record));
        }

        input.apply_to(&mut record);
        self.save(&record).await
    }

    /// Hard-delete a book, returning the number of rows removed
    pub async fn delete_by_id(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
