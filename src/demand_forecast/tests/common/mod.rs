#![allow(dead_code)]

use demand_forecast::db::{connection, migrate};
use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text};
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(QueryableByName)]
struct JournalMode {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}
#[derive(QueryableByName)]
struct ForeignKeys {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}
#[derive(QueryableByName)]
struct BusyTimeout {
    #[diesel(sql_type = Integer, column_name = "timeout")]
    busy_timeout: i32,
}
#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = BigInt)]
    n: i64,
}

pub struct TestDb {
    _dir: TempDir,    // keep alive for the life of the test
    pub path: String, // <tmpdir>/test.db
}

pub fn setup_db() -> (TestDb, SqliteConnection) {
    let dir = TempDir::new().expect("tempdir");
    let mut p = PathBuf::from(dir.path());
    p.push("test.db");
    let path = p.to_string_lossy().to_string();

    migrate::run_all(&path).expect("migrations");

    let conn = connection::connect_sqlite(&path).expect("connect");
    (TestDb { _dir: dir, path }, conn)
}

pub fn assert_sqlite_pragmas(conn: &mut SqliteConnection) {
    use diesel::sql_query;

    let jm: JournalMode = sql_query("PRAGMA journal_mode;").get_result(conn).unwrap();
    assert_eq!(jm.journal_mode.to_lowercase(), "wal"); // WAL is persistent per DB file

    let fk: ForeignKeys = sql_query("PRAGMA foreign_keys;").get_result(conn).unwrap();
    assert_eq!(fk.foreign_keys, 1);

    let bt: BusyTimeout = sql_query("PRAGMA busy_timeout;").get_result(conn).unwrap();
    assert_eq!(bt.busy_timeout, 5000);
}

pub fn count(conn: &mut SqliteConnection, table: &str) -> i64 {
    let c: Count = diesel::sql_query(format!("SELECT COUNT(*) AS n FROM {table}"))
        .get_result(conn)
        .unwrap();
    c.n
}

/// Raw insert that bypasses `insert_purchases`, so tests can store malformed rows.
pub fn insert_raw(conn: &mut SqliteConnection, item: Option<&str>, date: &str, qty: f64) {
    use demand_forecast::schema::purchase_history::dsl as ph;

    diesel::insert_into(ph::purchase_history)
        .values((
            ph::item_name.eq(item),
            ph::purchase_date.eq(date),
            ph::quantity.eq(qty),
        ))
        .execute(conn)
        .unwrap();
}

/// One purchase per consecutive UTC day starting at `first_day` (YYYY-MM-DD).
pub fn insert_daily(conn: &mut SqliteConnection, item: &str, first_day: &str, quantities: &[f64]) {
    let start = chrono::NaiveDate::parse_from_str(first_day, "%Y-%m-%d").unwrap();
    for (i, q) in quantities.iter().enumerate() {
        let day = start + chrono::Duration::days(i as i64);
        insert_raw(conn, Some(item), &format!("{day}T12:00:00.000Z"), *q);
    }
}
