//! Benchmark driver.
//!
//! Resolves the engine to an adapter, generates the workload once and then
//! runs the adapter stages strictly in order: schema, insert, query, storage.
//! The first failing stage ends the run; nothing is retried and no partial
//! result is reported.

use std::fmt;
use std::time::Duration;

use crate::backends::{text, Backend, MysqlBackend};
use crate::config::BenchConfig;
use crate::dataset::{self, SalaryRecord};
use crate::engine::{AdapterKind, Engine};
use crate::error::{Error, Result};
use crate::workload::{self, Workload};

/// Measurements of one benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkResult {
    /// Engine the numbers belong to.
    pub engine: String,
    /// Wall-clock time of the per-row insert loop.
    pub insertion: Duration,
    /// Wall-clock time of the range-query loop.
    pub queries: Duration,
    /// Data plus index size, if the sink can report it.
    pub storage_bytes: Option<u64>,
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "For {}: inserted in {} ms, queries in {} ms, ",
            self.engine,
            self.insertion.as_millis(),
            self.queries.as_millis()
        )?;
        match self.storage_bytes {
            Some(bytes) => write!(f, "database size is {} bytes", bytes),
            None => write!(f, "database size is not available"),
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Timings from a live engine.
    Measured(BenchmarkResult),
    /// Workload text for an engine without a programmatic client.
    Emitted(String),
}

/// Run a benchmark, loading the dataset from `config.source`.
pub fn run(config: &BenchConfig) -> Result<Outcome> {
    config.workload.validate()?;
    resolve(config.engine)?;

    let source = dataset::load(&config.source)?;
    tracing::info!(rows = source.len(), "dataset loaded");

    run_with_source(config, &source)
}

/// Run a benchmark against an already loaded dataset.
pub fn run_with_source(config: &BenchConfig, source: &[SalaryRecord]) -> Result<Outcome> {
    config.workload.validate()?;
    let kind = resolve(config.engine)?;

    let workload = workload::generate(source, &config.workload, config.seed)?;
    tracing::info!(
        engine = %config.engine,
        rows = workload.rows.len(),
        queries = workload.queries.len(),
        seed = config.seed,
        "workload generated"
    );

    match kind {
        AdapterKind::TextEmission => Ok(Outcome::Emitted(text::emit(&workload))),
        AdapterKind::RelationalBulk => {
            let mut backend = MysqlBackend::connect(config.engine, &config.connection)?;
            measure(&mut backend, &workload).map(Outcome::Measured)
        }
        AdapterKind::EncryptedColumn => measure_oracle(config, &workload).map(Outcome::Measured),
    }
}

/// Check that this build can drive `engine`.
fn resolve(engine: Engine) -> Result<AdapterKind> {
    let kind = engine.adapter_kind();
    if kind == AdapterKind::EncryptedColumn && !cfg!(feature = "oracle") {
        return Err(Error::unsupported(
            engine.name(),
            "resolve",
            "built without Oracle support, rebuild with `--features oracle`",
        ));
    }
    Ok(kind)
}

#[cfg(feature = "oracle")]
fn measure_oracle(config: &BenchConfig, workload: &Workload) -> Result<BenchmarkResult> {
    let mut backend = crate::backends::OracleBackend::connect(&config.connection)?;
    measure(&mut backend, workload)
}

#[cfg(not(feature = "oracle"))]
fn measure_oracle(config: &BenchConfig, _workload: &Workload) -> Result<BenchmarkResult> {
    Err(Error::unsupported(
        config.engine.name(),
        "resolve",
        "built without Oracle support",
    ))
}

/// Run the timed stages of `backend` over `workload`.
pub fn measure<B: Backend>(backend: &mut B, workload: &Workload) -> Result<BenchmarkResult> {
    let engine = backend.name().to_string();

    backend.prepare_schema()?;
    tracing::info!(engine = %engine, "schema prepared");

    let insertion = backend.bulk_insert(&workload.rows)?;
    tracing::info!(
        engine = %engine,
        rows = workload.rows.len(),
        elapsed_ms = insertion.as_millis() as u64,
        "rows inserted"
    );

    let queries = backend.run_queries(&workload.queries)?;
    tracing::info!(
        engine = %engine,
        queries = workload.queries.len(),
        elapsed_ms = queries.as_millis() as u64,
        "queries executed"
    );

    let storage_bytes = if backend.measures_storage() {
        let bytes = backend.measure_storage()?;
        tracing::info!(engine = %engine, bytes, "storage measured");
        Some(bytes)
    } else {
        tracing::info!(engine = %engine, "storage measurement not available");
        None
    };

    Ok(BenchmarkResult {
        engine,
        insertion,
        queries,
        storage_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::SqliteBackend;
    use crate::config::ConnectionConfig;
    use crate::fixtures::synthetic_salaries;
    use crate::workload::WorkloadParams;

    #[test]
    fn test_report_line() {
        let result = BenchmarkResult {
            engine: "kalepso".to_string(),
            insertion: Duration::from_millis(1520),
            queries: Duration::from_micros(83_900),
            storage_bytes: Some(114_688),
        };
        assert_eq!(
            result.to_string(),
            "For kalepso: inserted in 1520 ms, queries in 83 ms, database size is 114688 bytes"
        );
    }

    #[test]
    fn test_report_line_without_storage() {
        let result = BenchmarkResult {
            engine: "sqlite".to_string(),
            insertion: Duration::from_millis(3),
            queries: Duration::from_millis(1),
            storage_bytes: None,
        };
        assert!(result.to_string().ends_with("database size is not available"));
    }

    #[test]
    fn test_measure_against_sqlite() {
        let source = synthetic_salaries(400, 3);
        let params = WorkloadParams::new(150, 50, 120);
        let workload = workload::generate(&source, &params, 8).unwrap();

        let mut backend = SqliteBackend::new().unwrap();
        let result = measure(&mut backend, &workload).unwrap();

        assert_eq!(result.engine, "sqlite");
        assert!(result.storage_bytes.is_none());
        assert_eq!(backend.row_count().unwrap(), 150);
    }

    #[test]
    fn test_text_engine_emits_workload() {
        let source = synthetic_salaries(300, 4);
        let config = BenchConfig::new(Engine::Microsoft)
            .with_workload(WorkloadParams::new(100, 10, 100))
            .with_seed(1);

        let text = match run_with_source(&config, &source).unwrap() {
            Outcome::Emitted(text) => text,
            other => panic!("expected emitted workload, got {:?}", other),
        };

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "100");
        assert_eq!(lines[1], "99");
        assert_eq!(lines.len(), 2 + 100 + 99);
        assert!(!text.contains("ms"));
    }

    #[test]
    fn test_invalid_params_fail_before_generation() {
        let config = BenchConfig::new(Engine::Microsoft)
            .with_workload(WorkloadParams::new(100, 5000, 100));

        let err = run_with_source(&config, &[]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_generation_error_aborts_run() {
        let source = synthetic_salaries(50, 4);
        let config = BenchConfig::new(Engine::Microsoft)
            .with_workload(WorkloadParams::new(100, 10, 100));

        let err = run_with_source(&config, &source).unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn test_unreachable_engine_is_connection_error() {
        let source = synthetic_salaries(200, 4);
        let config = BenchConfig::new(Engine::Mariadb)
            .with_workload(WorkloadParams::new(100, 10, 100))
            .with_connection(
                ConnectionConfig::for_engine(Engine::Mariadb)
                    .with_host("127.0.0.1")
                    .with_port(1),
            );

        let err = run_with_source(&config, &source).unwrap_err();
        assert!(matches!(err, Error::Connection { .. }), "{:?}", err);
        assert!(err.to_string().starts_with("mariadb:"));
    }

    #[cfg(not(feature = "oracle"))]
    #[test]
    fn test_oracle_requires_feature() {
        let config = BenchConfig::new(Engine::Oracle);
        let err = run(&config).unwrap_err();
        assert!(matches!(err, Error::Unsupported { .. }));
        assert_eq!(err.stage(), "resolve");
    }
}
