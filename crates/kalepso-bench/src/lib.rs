//! Kalepso Range-Query Benchmark
//!
//! This crate drives a uniform range-query benchmark against several relational
//! engines and measures insertion time, query time and on-disk table size.
//!
//! # Components
//!
//! - **Dataset**: loads the salary dataset (CSV, local file or URL)
//! - **Workload**: samples rows and generates random range queries from a seed
//! - **Backends**: per-engine adapters sharing one timing contract
//! - **Driver**: sequences schema setup, insertion, querying and measurement

pub mod backends;
pub mod config;
pub mod dataset;
pub mod driver;
pub mod engine;
pub mod error;
pub mod fixtures;
pub mod workload;

pub use backends::{Backend, MysqlBackend, SqliteBackend};
#[cfg(feature = "oracle")]
pub use backends::OracleBackend;
pub use dataset::SalaryRecord;
pub use config::{BenchConfig, ConnectionConfig};
pub use driver::{BenchmarkResult, Outcome};
pub use engine::{AdapterKind, Engine};
pub use error::{Error, Result};
pub use workload::{RangeQuery, Workload, WorkloadParams};
