// ============================================================
// Layer 4 — SQLite Observation Store
// ============================================================
// Persists the dataset in a single table, `library_usage`,
// using rusqlite with a bundled SQLite.
//
//   save() → DROP + CREATE + INSERT inside one transaction
//            (whole-table replace, never append)
//   load() → SELECT all rows ordered by rowid; a missing file
//            or a missing table is "no data yet", not an error
//
// Dates are stored as ISO-8601 TEXT via rusqlite's chrono
// support, booleans as 0/1 INTEGERs.
//
// Reference: rusqlite documentation (Transaction, query_map)

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OpenFlags};
use std::{fs, path::PathBuf};

use crate::domain::observation::Observation;
use crate::domain::traits::ObservationStore;

const TABLE: &str = "library_usage";

/// Observation storage backed by one SQLite database file.
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn table_exists(conn: &Connection) -> Result<bool> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            [TABLE],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

impl ObservationStore for SqliteStore {
    fn save(&self, observations: &[Observation]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }

        let mut conn = Connection::open(&self.path)
            .with_context(|| format!("Cannot open database '{}'", self.path.display()))?;

        let tx = conn.transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {TABLE};
             CREATE TABLE {TABLE} (
                 date                  TEXT    NOT NULL,
                 day_of_week           INTEGER NOT NULL,
                 is_holiday            INTEGER NOT NULL,
                 is_exam_week          INTEGER NOT NULL,
                 is_librarian_present  INTEGER NOT NULL,
                 total_campus_students INTEGER NOT NULL,
                 library_student_count INTEGER NOT NULL
             );"
        ))?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {TABLE} (
                     date, day_of_week, is_holiday, is_exam_week,
                     is_librarian_present, total_campus_students, library_student_count
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
            ))?;

            for o in observations {
                stmt.execute(params![
                    o.date,
                    o.day_of_week,
                    o.is_holiday,
                    o.is_exam_week,
                    o.is_librarian_present,
                    o.total_campus_students,
                    o.library_student_count,
                ])?;
            }
        }

        tx.commit()
            .with_context(|| format!("Cannot commit to '{}'", self.path.display()))?;

        tracing::info!(
            "Saved {} observations to table '{}' in '{}'",
            observations.len(),
            TABLE,
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> Result<Vec<Observation>> {
        if !self.path.exists() {
            tracing::warn!(
                "Database '{}' does not exist — returning empty dataset",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let conn = Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("Cannot open database '{}'", self.path.display()))?;

        if !Self::table_exists(&conn)? {
            tracing::warn!("Table '{}' not found — returning empty dataset", TABLE);
            return Ok(Vec::new());
        }

        let mut stmt = conn.prepare(&format!(
            "SELECT date, day_of_week, is_holiday, is_exam_week,
                    is_librarian_present, total_campus_students, library_student_count
             FROM {TABLE}
             ORDER BY rowid"
        ))?;

        let rows = stmt.query_map([], |row| {
            Ok(Observation {
                date:                  row.get(0)?,
                day_of_week:           row.get(1)?,
                is_holiday:            row.get(2)?,
                is_exam_week:          row.get(3)?,
                is_librarian_present:  row.get(4)?,
                total_campus_students: row.get(5)?,
                library_student_count: row.get(6)?,
            })
        })?;

        let observations = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("Cannot read table '{}'", TABLE))?;

        tracing::debug!("Loaded {} observations", observations.len());
        Ok(observations)
    }
}
