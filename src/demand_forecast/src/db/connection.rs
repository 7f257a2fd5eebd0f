//! SQLite connection helpers.
//!
//! Provides [`connect_sqlite`] that opens a connection and applies recommended PRAGMAs:
//! WAL journaling, foreign_keys=ON, and a 5000ms busy_timeout.
//!
//! Example:
//! ```no_run
//! use demand_forecast::db::connection::connect_sqlite;
//!
//! let path = std::env::temp_dir().join("demand_forecast_example.db");
//! let _conn = connect_sqlite(path.to_str().unwrap()).expect("open sqlite");
//! ```

use std::path::Path;

use anyhow::Context;
use diesel::{Connection, RunQueryDsl, SqliteConnection, sql_query};

/// Strip an optional `sqlite://` / `sqlite:` scheme, leaving a path or `:memory:`.
///
/// Plain paths and `file:` URIs pass through unchanged.
pub fn sqlite_target(database_url: &str) -> &str {
    let url = database_url.trim();
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
}

/// Like [`connect_sqlite`], but fails instead of creating a missing database file.
///
/// `:memory:` and `file:` URIs are passed through unchecked.
pub fn connect_existing_sqlite(database_url: &str) -> anyhow::Result<SqliteConnection> {
    let target = sqlite_target(database_url);
    if target != ":memory:" && !target.starts_with("file:") && !Path::new(target).is_file() {
        anyhow::bail!("sqlite database not found at {target}");
    }
    connect_sqlite(target)
}

/// Open a SQLite connection and apply connection-wide PRAGMAs.
///
/// The database file is created if it does not exist.
pub fn connect_sqlite(database_url: &str) -> anyhow::Result<SqliteConnection> {
    let target = sqlite_target(database_url);
    let mut conn = SqliteConnection::establish(target)
        .with_context(|| format!("connect sqlite at {target}"))?;

    sql_query("PRAGMA journal_mode=WAL;").execute(&mut conn)?;
    sql_query("PRAGMA foreign_keys=ON;").execute(&mut conn)?;
    sql_query("PRAGMA busy_timeout=5000;").execute(&mut conn)?;
    Ok(conn)
}
