//! Table schema declarations and startup synchronization
//!
//! Record types declare their columns once through [TableSchema]. At startup:
//! - [sync_table] creates a missing table and adds missing columns
//! - [reset_table] drops the table and creates it again (destructive reseed)
//!
//! Column renames and type changes are not handled; they require a reset.

use sqlx::SqlitePool;
use tracing::{debug, info};

/// Column definition for schema generation.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    /// Column name in the database
    pub name: &'static str,
    /// SQLite column type (TEXT, INTEGER, REAL, BLOB)
    pub sql_type: &'static str,
    /// Whether the column can be NULL
    pub nullable: bool,
    /// Whether this is the primary key
    pub is_primary_key: bool,
    /// Never reuse rowids of deleted rows
    pub auto_increment: bool,
    /// Default value expression
    pub default: Option<&'static str>,
}

impl ColumnDef {
    pub const fn new(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            nullable: true,
            is_primary_key: false,
            auto_increment: false,
            default: None,
        }
    }

    /// `INTEGER PRIMARY KEY AUTOINCREMENT`
    pub const fn serial_key(mut self) -> Self {
        self.is_primary_key = true;
        self.auto_increment = true;
        self.nullable = false;
        self
    }

    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Generate the column definition SQL
    pub fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.sql_type);

        if self.is_primary_key {
            sql.push_str(" PRIMARY KEY");
            if self.auto_increment {
                sql.push_str(" AUTOINCREMENT");
            }
        }

        if !self.nullable && !self.is_primary_key {
            sql.push_str(" NOT NULL");
        }

        if let Some(default) = self.default {
            sql.push_str(&format!(" DEFAULT {}", default));
        }

        sql
    }
}

/// Table layout of a record type.
pub trait TableSchema {
    /// The SQL table name (e.g., "books")
    const TABLE_NAME: &'static str;

    /// All column definitions for this table, in select order
    fn columns() -> &'static [ColumnDef];

    /// Generate CREATE TABLE IF NOT EXISTS SQL
    fn create_table_sql() -> String {
        let column_defs: Vec<String> = Self::columns().iter().map(|c| c.to_sql()).collect();

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
            Self::TABLE_NAME,
            column_defs.join(",\n  ")
        )
    }

    /// Build a SELECT query for all columns
    fn select_sql() -> String {
        let columns: Vec<&str> = Self::columns().iter().map(|c| c.name).collect();
        format!("SELECT {} FROM {}", columns.join(", "), Self::TABLE_NAME)
    }
}

/// Result of a schema sync operation
#[derive(Debug, Default)]
pub struct SchemaSyncResult {
    pub tables_created: Vec<String>,
    pub columns_added: Vec<(String, String)>, // (table, column)
}

/// Check if a table exists in the database
async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool, sqlx::Error> {
    let result: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
            .bind(table_name)
            .fetch_optional(pool)
            .await?;

    Ok(result.is_some())
}

/// Get existing columns for a table
async fn get_table_columns(
    pool: &SqlitePool,
    table_name: &str,
) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(i32, String, String, i32, Option<String>, i32)> =
        sqlx::query_as(&format!("PRAGMA table_info({})", table_name))
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().map(|(_, name, _, _, _, _)| name).collect())
}

/// Create the table if missing, otherwise add any columns it lacks
pub async fn sync_table<T: TableSchema>(
    pool: &SqlitePool,
) -> Result<SchemaSyncResult, sqlx::Error> {
    let mut result = SchemaSyncResult::default();
    let table_name = T::TABLE_NAME;

    if !table_exists(pool, table_name).await? {
        let create_sql = T::create_table_sql();
        debug!("Creating table {}: {}", table_name, create_sql);
        sqlx::query(&create_sql).execute(pool).await?;
        info!("Created table: {}", table_name);
        result.tables_created.push(table_name.to_string());
        return Ok(result);
    }

    let existing_columns = get_table_columns(pool, table_name).await?;
    for col_def in T::columns() {
        if existing_columns.iter().any(|c| c == col_def.name) {
            continue;
        }
        let alter_sql = generate_add_column_sql(table_name, col_def);
        debug!("Adding column to {}: {}", table_name, alter_sql);
        sqlx::query(&alter_sql).execute(pool).await?;
        info!("Added column {}.{}", table_name, col_def.name);
        result
            .columns_added
            .push((table_name.to_string(), col_def.name.to_string()));
    }

    Ok(result)
}

/// Drop the table (and its rows) and create it again
pub async fn reset_table<T: TableSchema>(
    pool: &SqlitePool,
) -> Result<SchemaSyncResult, sqlx::Error> {
    let table_name = T::TABLE_NAME;
    sqlx::query(&format!("DROP TABLE IF EXISTS {}", table_name))
        .execute(pool)
        .await?;
    info!("Dropped table: {}", table_name);

    sqlx::query(&T::create_table_sql()).execute(pool).await?;
    info!("Created table: {}", table_name);

    Ok(SchemaSyncResult {
        tables_created: vec![table_name.to_string()],
        columns_added: Vec::new(),
    })
}

/// Generate ALTER TABLE ADD COLUMN SQL
fn generate_add_column_sql(table_name: &str, col: &ColumnDef) -> String {
    let mut sql = format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        table_name, col.name, col.sql_type
    );

    // SQLite cannot add a NOT NULL column without a default
    if let Some(default) = col.default {
        sql.push_str(&format!(" DEFAULT {}", default));
    } else if !col.nullable {
        let default_val = match col.sql_type {
            "INTEGER" => "0",
            "REAL" => "0.0",
            _ => "''",
        };
        sql.push_str(&format!(" NOT NULL DEFAULT {}", default_val));
    }

    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    impl TableSchema for Widget {
        const TABLE_NAME: &'static str = "widgets";

        fn columns() -> &'static [ColumnDef] {
            const COLUMNS: &[ColumnDef] = &[
                ColumnDef::new("id", "INTEGER").serial_key(),
                ColumnDef::new("name", "TEXT").not_null(),
                ColumnDef::new("weight", "REAL"),
            ];
            COLUMNS
        }
    }

    #[test]
    fn test_column_sql() {
        let cols = Widget::columns();
        assert_eq!(cols[0].to_sql(), "id INTEGER PRIMARY KEY AUTOINCREMENT");
        assert_eq!(cols[1].to_sql(), "name TEXT NOT NULL");
        assert_eq!(cols[2].to_sql(), "weight REAL");
    }

    #[test]
    fn test_create_and_select_sql() {
        assert_eq!(
            Widget::create_table_sql(),
            "CREATE TABLE IF NOT EXISTS widgets (\n  id INTEGER PRIMARY KEY AUTOINCREMENT,\n  name TEXT NOT NULL,\n  weight REAL\n)"
        );
        assert_eq!(Widget::select_sql(), "SELECT id, name, weight FROM widgets");
    }

    #[test]
    fn test_add_column_sql_supplies_default_for_not_null() {
        let cols = Widget::columns();
        assert_eq!(
            generate_add_column_sql("widgets", &cols[1]),
            "ALTER TABLE widgets ADD COLUMN name TEXT NOT NULL DEFAULT ''"
        );
        assert_eq!(
            generate_add_column_sql("widgets", &cols[2]),
            "ALTER TABLE widgets ADD COLUMN weight REAL"
        );
    }
}
