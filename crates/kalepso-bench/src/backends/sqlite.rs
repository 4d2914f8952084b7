//! SQLite reference sink.
//!
//! Runs the same schema and statements as the MySQL-dialect engines against an
//! embedded database, so the driver sequence can be exercised without a server.
//! SQLite has no per-table size catalog, so storage measurement is reported as
//! unsupported rather than approximated from page counts.

use std::path::Path;
use std::time::{Duration, Instant};

use rusqlite::{params, Connection};

use crate::dataset::SalaryRecord;
use crate::error::{Error, Result};
use crate::workload::RangeQuery;

use super::salaries::{INSERT, RANGE};
use super::Backend;

const NAME: &str = "sqlite";

const SCHEMA: &str = r#"
    DROP TABLE IF EXISTS salaries;

    CREATE TABLE salaries (
        fullname TEXT,
        jobtitle TEXT,
        salary REAL,
        overtimepay REAL,
        other REAL,
        benefits REAL NULL,
        total REAL,
        totalPlusBenefits REAL,
        year INTEGER,
        notes TEXT NULL,
        agency TEXT,
        status TEXT NULL
    );

    CREATE INDEX totalPlusBenefitsIndex ON salaries(totalPlusBenefits);
"#;

/// SQLite backend.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Create a new in-memory SQLite database.
    pub fn new() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::connection(NAME, e))?;
        Ok(Self { conn })
    }

    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| Error::connection(NAME, e))?;
        Ok(Self { conn })
    }

    /// Indexed values matching a range query.
    pub fn fetch_range(&self, query: &RangeQuery) -> Result<Vec<f64>> {
        let mut stmt = self
            .conn
            .prepare_cached(
                "SELECT totalPlusBenefits FROM salaries WHERE totalPlusBenefits BETWEEN ?1 AND ?2",
            )
            .map_err(|e| Error::query(NAME, e))?;

        let values = stmt
            .query_map(params![query.low, query.high], |row| row.get(0))
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<f64>>>())
            .map_err(|e| Error::query(NAME, e))?;
        Ok(values)
    }

    /// Number of rows in the benchmark table.
    pub fn row_count(&self) -> Result<usize> {
        self.conn
            .query_row("SELECT COUNT(*) FROM salaries", [], |row| row.get::<_, i64>(0))
            .map(|n| n as usize)
            .map_err(|e| Error::query(NAME, e))
    }
}

impl Backend for SqliteBackend {
    fn name(&self) -> &str {
        NAME
    }

    fn prepare_schema(&mut self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA)
            .map_err(|e| Error::schema(NAME, e))
    }

    fn bulk_insert(&mut self, rows: &[SalaryRecord]) -> Result<Duration> {
        let start = Instant::now();
        for row in rows {
            let tx = self.conn.transaction().map_err(|e| Error::insert(NAME, e))?;
            tx.execute(
                INSERT,
                params![
                    row.full_name,
                    row.job_title,
                    row.base_pay,
                    row.overtime_pay,
                    row.other_pay,
                    row.benefits,
                    row.total_pay,
                    row.total_pay_benefits,
                    row.year,
                    row.notes,
                    row.agency,
                    row.status,
                ],
            )
            .map_err(|e| Error::insert(NAME, e))?;
            tx.commit().map_err(|e| Error::insert(NAME, e))?;
        }
        Ok(start.elapsed())
    }

    fn run_queries(&mut self, queries: &[RangeQuery]) -> Result<Duration> {
        let start = Instant::now();
        let mut stmt = self
            .conn
            .prepare_cached(RANGE)
            .map_err(|e| Error::query(NAME, e))?;

        for query in queries {
            let mut rows = stmt
                .query(params![query.low, query.high])
                .map_err(|e| Error::query(NAME, e))?;
            while rows.next().map_err(|e| Error::query(NAME, e))?.is_some() {}
        }
        Ok(start.elapsed())
    }

    fn measures_storage(&self) -> bool {
        false
    }

    fn measure_storage(&mut self) -> Result<u64> {
        Err(Error::unsupported(
            NAME,
            "measure_storage",
            "sqlite exposes no per-table size catalog",
        ))
    }
}
