//! MySQL-dialect backend (Kalepso and MariaDB).
//!
//! Both engines speak the MySQL wire protocol and share one schema: the full
//! salary row with a secondary index on `totalPlusBenefits`.

use std::time::{Duration, Instant};

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection};
use tokio::runtime::{Builder, Runtime};

use crate::config::ConnectionConfig;
use crate::dataset::SalaryRecord;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::workload::RangeQuery;

use super::salaries::{DATABASE, INSERT, RANGE, TABLE};
use super::Backend;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS salaries (
        fullname VARCHAR(100),
        jobtitle VARCHAR(100),
        salary FLOAT,
        overtimepay FLOAT,
        other FLOAT,
        benefits FLOAT NULL,
        total FLOAT,
        totalPlusBenefits FLOAT,
        year INT,
        notes VARCHAR(150) NULL,
        agency VARCHAR(100),
        status VARCHAR(30) NULL,

        INDEX totalPlusBenefitsIndex (totalPlusBenefits)
    )
"#;

const TABLE_SIZE: &str = r#"
    SELECT CAST(DATA_LENGTH + INDEX_LENGTH AS UNSIGNED)
    FROM information_schema.TABLES
    WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
"#;

/// MySQL-dialect backend.
///
/// The sqlx client is async; a current-thread runtime drives it so every call
/// blocks until its round trip completes.
pub struct MysqlBackend {
    // Declared before `rt` so the connection drops while its runtime is alive.
    conn: MySqlConnection,
    engine: Engine,
    rt: Runtime,
}

impl MysqlBackend {
    /// Connect to `engine` and select the benchmark database, creating it if
    /// needed.
    pub fn connect(engine: Engine, config: &ConnectionConfig) -> Result<Self> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password);

        tracing::info!(
            engine = %engine,
            host = %config.host,
            port = config.port,
            user = %config.user,
            "connecting"
        );

        let rt = runtime(engine)?;
        let conn = rt
            .block_on(options.connect())
            .map_err(|e| Error::connection(engine.name(), e))?;

        Self::with_connection(engine, conn, rt)
    }

    /// Connect using a `mysql://` URL.
    pub fn connect_url(engine: Engine, url: &str) -> Result<Self> {
        let rt = runtime(engine)?;
        let conn = rt
            .block_on(MySqlConnection::connect(url))
            .map_err(|e| Error::connection(engine.name(), e))?;

        Self::with_connection(engine, conn, rt)
    }

    fn with_connection(engine: Engine, mut conn: MySqlConnection, rt: Runtime) -> Result<Self> {
        rt.block_on(async {
            sqlx::raw_sql(&format!("CREATE DATABASE IF NOT EXISTS {}", DATABASE))
                .execute(&mut conn)
                .await?;
            sqlx::raw_sql(&format!("USE {}", DATABASE))
                .execute(&mut conn)
                .await?;
            Ok::<_, sqlx::Error>(())
        })
        .map_err(|e| Error::connection(engine.name(), e))?;

        Ok(Self { conn, engine, rt })
    }

    /// Number of rows a single range query returns.
    pub fn count_range(&mut self, query: &RangeQuery) -> Result<usize> {
        let name = self.engine.name();
        let conn = &mut self.conn;
        let rows = self
            .rt
            .block_on(
                sqlx::query(RANGE)
                    .bind(query.low)
                    .bind(query.high)
                    .fetch_all(&mut *conn),
            )
            .map_err(|e| Error::query(name, e))?;
        Ok(rows.len())
    }
}

fn runtime(engine: Engine) -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::connection(engine.name(), e))
}

impl Backend for MysqlBackend {
    fn name(&self) -> &str {
        self.engine.name()
    }

    fn prepare_schema(&mut self) -> Result<()> {
        let name = self.engine.name();
        let conn = &mut self.conn;

        tracing::debug!(engine = name, table = TABLE, "recreating table");
        self.rt
            .block_on(async {
                sqlx::raw_sql("DROP TABLE IF EXISTS salaries")
                    .execute(&mut *conn)
                    .await?;
                sqlx::raw_sql(CREATE_TABLE).execute(&mut *conn).await?;
                sqlx::raw_sql("SET SESSION query_cache_type=0")
                    .execute(&mut *conn)
                    .await?;
                Ok::<_, sqlx::Error>(())
            })
            .map_err(|e| Error::schema(name, e))
    }

    fn bulk_insert(&mut self, rows: &[SalaryRecord]) -> Result<Duration> {
        let name = self.engine.name();
        let conn = &mut self.conn;

        let start = Instant::now();
        self.rt
            .block_on(async {
                for row in rows {
                    let mut tx = conn.begin().await?;
                    sqlx::query(INSERT)
                        .bind(&row.full_name)
                        .bind(&row.job_title)
                        .bind(row.base_pay)
                        .bind(row.overtime_pay)
                        .bind(row.other_pay)
                        .bind(row.benefits)
                        .bind(row.total_pay)
                        .bind(row.total_pay_benefits)
                        .bind(row.year)
                        .bind(row.notes.as_deref())
                        .bind(&row.agency)
                        .bind(row.status.as_deref())
                        .execute(&mut *tx)
                        .await?;
                    tx.commit().await?;
                }
                Ok::<_, sqlx::Error>(())
            })
            .map_err(|e| Error::insert(name, e))?;

        Ok(start.elapsed())
    }

    fn run_queries(&mut self, queries: &[RangeQuery]) -> Result<Duration> {
        let name = self.engine.name();
        let conn = &mut self.conn;

        let start = Instant::now();
        let fetched = self
            .rt
            .block_on(async {
                let mut fetched = 0usize;
                for query in queries {
                    let rows = sqlx::query(RANGE)
                        .bind(query.low)
                        .bind(query.high)
                        .fetch_all(&mut *conn)
                        .await?;
                    fetched += rows.len();
                }
                Ok::<_, sqlx::Error>(fetched)
            })
            .map_err(|e| Error::query(name, e))?;
        let elapsed = start.elapsed();

        tracing::debug!(engine = name, fetched, "range queries complete");
        Ok(elapsed)
    }

    fn measure_storage(&mut self) -> Result<u64> {
        let name = self.engine.name();
        let conn = &mut self.conn;

        let row = self.rt.block_on(
            sqlx::query_scalar::<_, Option<u64>>(TABLE_SIZE)
                .bind(DATABASE)
                .bind(TABLE)
                .fetch_optional(&mut *conn),
        );
        catalog_size(name, row)
    }
}

/// Interpret the `information_schema.TABLES` lookup for the benchmark table.
fn catalog_size(
    name: &str,
    row: std::result::Result<Option<Option<u64>>, sqlx::Error>,
) -> Result<u64> {
    row.map_err(|e| Error::storage(name, e))?
        .flatten()
        .ok_or_else(|| {
            Error::unsupported(
                name,
                "measure_storage",
                format!("no size information for {}.{} in information_schema", DATABASE, TABLE),
            )
        })
}
