//! Database backends for the range-query benchmark.
//!
//! Every live engine implements [`Backend`], so the driver can time schema
//! setup, insertion, querying and storage measurement the same way no matter
//! which dialect sits underneath.

pub mod mysql;
pub mod sqlite;
pub mod text;

#[cfg(feature = "oracle")]
pub mod oracle;

pub use mysql::MysqlBackend;
pub use sqlite::SqliteBackend;

#[cfg(feature = "oracle")]
pub use self::oracle::OracleBackend;

use std::time::Duration;

use crate::dataset::SalaryRecord;
use crate::error::Result;
use crate::workload::RangeQuery;

/// Capability set shared by every live sink.
///
/// A backend owns its connection; dropping the backend releases it.
pub trait Backend {
    /// Engine name used in logs, errors and the report line.
    fn name(&self) -> &str;

    /// Drop and recreate the benchmark table and its index.
    fn prepare_schema(&mut self) -> Result<()>;

    /// Insert `rows` one statement and one commit at a time.
    fn bulk_insert(&mut self, rows: &[SalaryRecord]) -> Result<Duration>;

    /// Run each range query in order, fetching and discarding the rows.
    fn run_queries(&mut self, queries: &[RangeQuery]) -> Result<Duration>;

    /// Whether [`Backend::measure_storage`] can succeed on this sink.
    fn measures_storage(&self) -> bool {
        true
    }

    /// Data plus index size of the benchmark table, in bytes.
    fn measure_storage(&mut self) -> Result<u64>;
}

/// Schema shared by the MySQL-dialect sinks.
pub mod salaries {
    /// Database holding the benchmark table.
    pub const DATABASE: &str = "CA_public_employees_salaries_2019";

    /// Benchmark table name.
    pub const TABLE: &str = "salaries";

    pub const INSERT: &str = "INSERT INTO salaries \
        (fullname, jobtitle, salary, overtimepay, other, benefits, total, totalPlusBenefits, year, notes, agency, status) \
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

    pub const RANGE: &str = "SELECT * FROM salaries WHERE totalPlusBenefits BETWEEN ? AND ?";
}
