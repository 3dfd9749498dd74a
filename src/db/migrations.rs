// src/db/migrations.rs
//
// Database schema initialization and migrations
//
// PRINCIPLES:
// - Explicit schema versions
// - No automatic migrations
// - Clear error messages
// - Idempotent operations

use rusqlite::Connection;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Current schema version
/// Increment this when adding migrations
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Data tables in dependency order (parents first)
const DATA_TABLES: [&str; 10] = [
    "authors",
    "categories",
    "podcasts",
    "podcast_categories",
    "episodes",
    "users",
    "subscriptions",
    "reviews",
    "playlists",
    "playlist_episodes",
];

/// Initialize the database schema
///
/// This function:
/// 1. Checks current schema version
/// 2. Applies necessary migrations
/// 3. Updates version tracking
///
/// Safe to call multiple times (idempotent).
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        // Fresh database - apply initial schema
        apply_initial_schema(conn)?;
        set_schema_version(conn, CURRENT_SCHEMA_VERSION)?;
        log::info!("Applied database schema version {}", CURRENT_SCHEMA_VERSION);
    } else if current_version < CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(format!(
            "Schema version {} is outdated. Expected {}. Manual migration required.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    } else if current_version > CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(format!(
            "Schema version {} is newer than supported {}. Update the application.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    }

    Ok(())
}

/// Get current schema version
/// Returns 0 if schema_version table doesn't exist (fresh database)
fn get_schema_version(conn: &Connection) -> AppResult<i32> {
    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Apply initial schema (version 1)
fn apply_initial_schema(conn: &Connection) -> AppResult<()> {
    let schema = include_str!("../../schema.sql");

    conn.execute_batch(schema)
        .map_err(|e| AppError::Other(format!("Failed to apply initial schema: {}", e)))?;

    Ok(())
}

/// Delete every row from the data tables, children first.
/// The schema itself (and its version) is kept.
pub fn clear_all_tables(conn: &mut Connection) -> AppResult<()> {
    let tx = conn.transaction()?;
    for table in DATA_TABLES.iter().rev() {
        tx.execute(&format!("DELETE FROM {}", table), [])?;
    }
    tx.commit()?;
    log::info!("Cleared all catalogue tables");
    Ok(())
}

/// True when no data table holds a row
pub fn is_empty(conn: &Connection) -> AppResult<bool> {
    for table in DATA_TABLES {
        let has_rows: bool = conn.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {})", table),
            [],
            |row| row.get(0),
        )?;
        if has_rows {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Verify database integrity
///
/// Runs SQLite's integrity check.
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

    if result != "ok" {
        return Err(AppError::Other(format!(
            "Database integrity check failed: {}",
            result
        )));
    }

    Ok(())
}

/// Get database statistics
///
/// Returns useful info for debugging and monitoring
pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let page_count: i64 = conn.query_row("PRAGMA page_count", [], |row| row.get(0))?;
    let page_size: i64 = conn.query_row("PRAGMA page_size", [], |row| row.get(0))?;

    let count = |table: &str| -> AppResult<i64> {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })?)
    };

    Ok(DatabaseStats {
        size_bytes: page_count * page_size,
        page_count,
        page_size,
        podcast_count: count("podcasts")?,
        episode_count: count("episodes")?,
        user_count: count("users")?,
        review_count: count("reviews")?,
    })
}

/// Database statistics
#[derive(Debug, Serialize)]
pub struct DatabaseStats {
    pub size_bytes: i64,
    pub page_count: i64,
    pub page_size: i64,
    pub podcast_count: i64,
    pub episode_count: i64,
    pub user_count: i64,
    pub review_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_connection;

    #[test]
    fn test_initialize_fresh_database() {
        let conn = create_test_connection().unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 0);

        initialize_database(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 1);

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        // data tables + schema_version
        assert_eq!(table_count, 11);
    }

    #[test]
    fn test_initialize_idempotent() {
        let conn = create_test_connection().unwrap();

        initialize_database(&conn).unwrap();
        initialize_database(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        // Episode pointing at a podcast that does not exist
        let result = conn.execute(
            "INSERT INTO episodes (id, podcast_id, title) VALUES (1, 999, 'orphan')",
            [],
        );

        assert!(result.is_err(), "Foreign key constraint should have been violated");
    }

    #[test]
    fn test_rating_check_constraint() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO authors (id, name) VALUES (1, 'a');
             INSERT INTO podcasts (id, title, author_id) VALUES (1, 'p', 1);
             INSERT INTO users (id, username, password) VALUES (1, 'u', 'pw');",
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO reviews (id, podcast_id, user_id, rating, comment) VALUES (1, 1, 1, 6, 'x')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_clear_and_is_empty() {
        let mut conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        assert!(is_empty(&conn).unwrap());

        conn.execute_batch(
            "INSERT INTO authors (id, name) VALUES (1, 'a');
             INSERT INTO podcasts (id, title, author_id) VALUES (1, 'p', 1);
             INSERT INTO episodes (id, podcast_id, title) VALUES (1, 1, 'e');",
        )
        .unwrap();
        assert!(!is_empty(&conn).unwrap());

        clear_all_tables(&mut conn).unwrap();
        assert!(is_empty(&conn).unwrap());
        assert_eq!(get_schema_version(&conn).unwrap(), 1);
    }

    #[test]
    fn test_database_stats() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let stats = get_database_stats(&conn).unwrap();

        assert!(stats.size_bytes > 0);
        assert_eq!(stats.podcast_count, 0);
        assert_eq!(stats.episode_count, 0);
        assert_eq!(stats.user_count, 0);
    }

    #[test]
    fn test_integrity_check() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        verify_database_integrity(&conn).unwrap();
    }
}
