//! Read-only access to the master data snapshot.
//!
//! Every extractor shares one [`MasterDb`] and issues its queries strictly
//! one after another. Any query failure is fatal for the run.

use crate::error::{ExportError, Result};
use crate::extract::SchemaVersion;
use rusqlite::{Connection, OpenFlags, Params, Row};
use std::path::Path;

/// Default snapshot file name
pub const DEFAULT_DB_PATH: &str = "master.mdb";

/// Category codes of the generic `text_data` table
pub mod category {
    pub const CARD_NAME: i32 = 5;
    pub const CHARA_CAST_NAME: i32 = 7;
    pub const RACE_INSTANCE_NAME: i32 = 29;
    pub const SKILL_NAME: i32 = 47;
    pub const SUPPORT_CARD_NAME: i32 = 75;
    pub const WINS_SADDLE_NAME: i32 = 111;
    pub const TEAM_STADIUM_SCORE_BONUS: i32 = 148;
    pub const CHARA_NAME: i32 = 170;
    pub const STORY_NAME: i32 = 181;
    pub const LIVE_SQUARE_CONTENT: i32 = 207;
    pub const LIVE_SQUARE_TITLE: i32 = 209;
}

/// Tables the extractors read from
pub const REQUIRED_TABLES: &[&str] = &[
    "text_data",
    "support_card_data",
    "succession_relation",
    "succession_relation_member",
    "race_instance",
    "race",
    "race_course_set",
    "single_mode_wins_saddle",
    "single_mode_program",
    "single_mode_chara_program",
    "skill_data",
    "single_mode_live_square",
];

/// Read-only handle to a master data snapshot
pub struct MasterDb {
    conn: Connection,
}

impl MasterDb {
    /// Open a snapshot file without write access
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| ExportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { conn })
    }

    /// Wrap an existing connection (fixtures, in-memory databases)
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Run a query and map every row, preserving the row order SQLite returns.
    pub fn query<T, P, F>(
        &self,
        context: &'static str,
        sql: &str,
        params: P,
        map_row: F,
    ) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let wrap = |source| ExportError::Query { context, source };

        let mut stmt = self.conn.prepare(sql).map_err(wrap)?;
        let rows = stmt
            .query_map(params, map_row)
            .map_err(wrap)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(wrap)?;
        Ok(rows)
    }

    /// Check whether a table is present in the snapshot
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        let found = self.query(
            "table lookup",
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(!found.is_empty())
    }

    /// Tables read under `schema` that the snapshot lacks
    pub fn missing_tables(&self, schema: SchemaVersion) -> Result<Vec<&'static str>> {
        let mut missing = Vec::new();
        for table in required_tables(schema) {
            if !self.table_exists(table)? {
                missing.push(table);
            }
        }
        Ok(missing)
    }
}

/// Subset of [`REQUIRED_TABLES`] that `schema` reads
pub fn required_tables(schema: SchemaVersion) -> impl Iterator<Item = &'static str> {
    REQUIRED_TABLES
        .iter()
        .copied()
        .filter(move |&table| table != "single_mode_live_square" || schema.has_live_squares())
}

/// Build `?1, ?2, ...` placeholders for an `IN` clause of `count` values
pub(crate) fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture_db, fixture_db_with};

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(1), "?1");
        assert_eq!(placeholders(3), "?1, ?2, ?3");
        assert_eq!(placeholders(0), "");
    }

    #[test]
    fn test_query_returns_rows_in_statement_order() {
        let db = fixture_db_with(
            r#"INSERT INTO text_data ("index", category, text) VALUES
               (30, 5, 'c'), (10, 5, 'a'), (20, 5, 'b'), (40, 7, 'x');"#,
        );
        let sql = r#"SELECT "index" FROM text_data WHERE category = ?1"#;

        let ids = db.query("test", sql, [5], |row| row.get::<_, i32>(0)).unwrap();
        let mut stmt = db.conn.prepare(sql).unwrap();
        let direct: Vec<i32> = stmt
            .query_map([5], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(ids, direct);
        assert_eq!(ids.len(), 3);

        let descending = db
            .query(
                "test",
                r#"SELECT "index" FROM text_data WHERE category = ?1 ORDER BY "index" DESC"#,
                [5],
                |row| row.get::<_, i32>(0),
            )
            .unwrap();
        assert_eq!(descending, vec![30, 20, 10]);
    }

    #[test]
    fn test_query_missing_table_is_error() {
        let db = MasterDb::from_connection(Connection::open_in_memory().unwrap());
        let result = db.query("missing", "SELECT id FROM nope", [], |row| {
            row.get::<_, i32>(0)
        });
        match result {
            Err(ExportError::Query { context, .. }) => assert_eq!(context, "missing"),
            other => panic!("expected query error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_missing_tables() {
        let db = fixture_db();
        assert!(db.missing_tables(SchemaVersion::Current).unwrap().is_empty());

        let empty = MasterDb::from_connection(Connection::open_in_memory().unwrap());
        assert_eq!(
            empty.missing_tables(SchemaVersion::Current).unwrap().len(),
            REQUIRED_TABLES.len()
        );
    }

    #[test]
    fn test_legacy_schema_does_not_require_live_squares() {
        let db = fixture_db_with("DROP TABLE single_mode_live_square;");
        assert!(db.missing_tables(SchemaVersion::Legacy).unwrap().is_empty());
        assert_eq!(
            db.missing_tables(SchemaVersion::Current).unwrap(),
            vec!["single_mode_live_square"]
        );
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = MasterDb::open(dir.path().join("absent.mdb"));
        assert!(matches!(result, Err(ExportError::Open { .. })));
    }
}
