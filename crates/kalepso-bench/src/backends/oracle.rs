//! Oracle backend with transparent column encryption.
//!
//! Only the indexed value is stored: a single `NUMBER ENCRYPT NO SALT` column
//! with a plain index over it. Enable with `--features oracle`; the Oracle
//! client libraries must be installed at runtime.

use std::time::{Duration, Instant};

use ::oracle::Connection;

use crate::config::ConnectionConfig;
use crate::dataset::SalaryRecord;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::workload::RangeQuery;

use super::Backend;

/// Service name of the benchmark container database.
pub const SERVICE_NAME: &str = "ORCLCDB.localdomain";

const DROP_TABLE: &str =
    "BEGIN EXECUTE IMMEDIATE 'DROP TABLE ranges'; EXCEPTION WHEN OTHERS THEN NULL; END;";
const CREATE_TABLE: &str = "CREATE TABLE ranges (point NUMBER ENCRYPT NO SALT)";
const CREATE_INDEX: &str = "CREATE INDEX pointIndex ON ranges (point)";
const INSERT: &str = "INSERT INTO ranges (point) VALUES (:1)";
const RANGE: &str = "SELECT point FROM ranges WHERE point BETWEEN :1 AND :2";
const TABLE_SIZE: &str = "SELECT NVL(SUM(bytes), 0) FROM user_segments \
    WHERE segment_name IN ('RANGES', 'POINTINDEX')";

/// Oracle backend.
pub struct OracleBackend {
    conn: Connection,
}

impl OracleBackend {
    /// Connect to `host:port/ORCLCDB.localdomain`.
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        let connect_string = format!("{}:{}/{}", config.host, config.port, SERVICE_NAME);
        tracing::info!(
            engine = %Engine::Oracle,
            connect_string = %connect_string,
            user = %config.user,
            "connecting"
        );

        let conn = Connection::connect(&config.user, &config.password, &connect_string)
            .map_err(|e| Error::connection(Engine::Oracle.name(), e))?;
        Ok(Self { conn })
    }

    /// Number of points a single range query returns.
    pub fn count_range(&self, query: &RangeQuery) -> Result<usize> {
        let name = Engine::Oracle.name();
        let rows = self
            .conn
            .query(RANGE, &[&query.low, &query.high])
            .map_err(|e| Error::query(name, e))?;
        let mut count = 0;
        for row in rows {
            row.map_err(|e| Error::query(name, e))?;
            count += 1;
        }
        Ok(count)
    }
}

impl Backend for OracleBackend {
    fn name(&self) -> &str {
        Engine::Oracle.name()
    }

    fn prepare_schema(&mut self) -> Result<()> {
        let name = Engine::Oracle.name();
        for ddl in [DROP_TABLE, CREATE_TABLE, CREATE_INDEX] {
            tracing::debug!(engine = name, ddl, "executing");
            self.conn
                .execute(ddl, &[])
                .map_err(|e| Error::schema(name, e))?;
        }
        self.conn.commit().map_err(|e| Error::schema(name, e))
    }

    fn bulk_insert(&mut self, rows: &[SalaryRecord]) -> Result<Duration> {
        let name = Engine::Oracle.name();
        let start = Instant::now();
        for row in rows {
            self.conn
                .execute(INSERT, &[&row.total_pay_benefits])
                .map_err(|e| Error::insert(name, e))?;
            self.conn.commit().map_err(|e| Error::insert(name, e))?;
        }
        Ok(start.elapsed())
    }

    fn run_queries(&mut self, queries: &[RangeQuery]) -> Result<Duration> {
        let name = Engine::Oracle.name();
        let start = Instant::now();
        for query in queries {
            let rows = self
                .conn
                .query(RANGE, &[&query.low, &query.high])
                .map_err(|e| Error::query(name, e))?;
            for row in rows {
                row.map_err(|e| Error::query(name, e))?;
            }
        }
        Ok(start.elapsed())
    }

    fn measure_storage(&mut self) -> Result<u64> {
        let name = Engine::Oracle.name();
        let bytes = self
            .conn
            .query_row_as::<i64>(TABLE_SIZE, &[])
            .map_err(|e| Error::storage(name, e))?;
        segment_bytes(name, bytes)
    }
}

fn segment_bytes(name: &str, bytes: i64) -> Result<u64> {
    if bytes <= 0 {
        return Err(Error::unsupported(
            name,
            "measure_storage",
            "user_segments reports no segments for the ranges table",
        ));
    }
    Ok(bytes as u64)
}
