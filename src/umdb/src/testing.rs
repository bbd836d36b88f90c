//! In-memory snapshot fixtures shared by unit tests.

use crate::db::MasterDb;
use rusqlite::Connection;

pub(crate) const SCHEMA: &str = include_str!("../tests/fixtures/schema.sql");

/// Empty snapshot with the full schema
pub(crate) fn fixture_db() -> MasterDb {
    fixture_db_with("")
}

/// Snapshot with the full schema plus the given inserts
pub(crate) fn fixture_db_with(inserts: &str) -> MasterDb {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    conn.execute_batch(inserts).unwrap();
    MasterDb::from_connection(conn)
}
