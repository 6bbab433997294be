//! Sample data for the `books` table.
//!
//! Runs at startup after the table is prepared. [SeedMode::IfEmpty] only
//! inserts into an empty table, so restarts never duplicate rows;
//! [SeedMode::Reset] drops every existing row first.

use anyhow::Result;
use tracing::{debug, info};

use crate::db::Database;
use crate::db::books::{BookRecord, CreateBook};
use crate::db::schema_sync::{SchemaSyncResult, reset_table, sync_table};

/// Startup policy for the sample rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Drop and recreate the table, then insert the samples
    Reset,
    /// Insert the samples only into an empty table
    #[default]
    IfEmpty,
    /// Prepare the table, never insert
    Off,
}

impl SeedMode {
    pub fn from_arg(value: &str) -> Option<Self> {
        match value {
            "reset" => Some(SeedMode::Reset),
            "if-empty" => Some(SeedMode::IfEmpty),
            "off" => Some(SeedMode::Off),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeedMode::Reset => "reset",
            SeedMode::IfEmpty => "if-empty",
            SeedMode::Off => "off",
        }
    }
}

#[derive(Debug)]
struct SampleBook {
    title: &'static str,
    author: &'static str,
    published_year: i32,
}

const SAMPLE_BOOKS: &[SampleBook] = &[
    SampleBook {
        title: "해리 포터와 마법사의 돌",
        author: "J.K. 롤링",
        published_year: 1997,
    },
    SampleBook {
        title: "반지의 제왕",
        author: "J.R.R. 톨킨",
        published_year: 1954,
    },
    SampleBook {
        title: "1984",
        author: "조지 오웰",
        published_year: 1949,
    },
];

/// Result of preparing storage.
#[derive(Debug, Default)]
pub struct SeedResult {
    pub schema: SchemaSyncResult,
    pub rows_inserted: u64,
}

/// Prepare the `books` table according to `mode` and insert the samples when due.
pub async fn run_seeds(db: &Database, mode: SeedMode) -> Result<SeedResult> {
    let schema = match mode {
        SeedMode::Reset => reset_table::<BookRecord>(db.pool()).await?,
        SeedMode::IfEmpty | SeedMode::Off => sync_table::<BookRecord>(db.pool()).await?,
    };

    let should_insert = match mode {
        SeedMode::Reset => true,
        SeedMode::IfEmpty => db.books().count().await? == 0,
        SeedMode::Off => false,
    };

    let mut rows_inserted = 0u64;
    if should_insert {
        let books = db.books();
        for sample in SAMPLE_BOOKS {
            let record = books
                .create(CreateBook {
                    title: sample.title.to_string(),
                    author: sample.author.to_string(),
                    published_year: Some(sample.published_year),
                })
                .await?;
            debug!(book_id = record.id, title = %record.title, "Seeded book");
            rows_inserted += 1;
        }
        info!(count = rows_inserted, mode = mode.as_str(), "Sample books added");
    } else {
        debug!(mode = mode.as_str(), "Skipping sample books");
    }

    Ok(SeedResult {
        schema,
        rows_inserted,
    })
}
