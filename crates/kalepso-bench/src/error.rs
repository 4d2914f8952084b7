//! Benchmark error types.

use thiserror::Error;

/// Result type for benchmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Benchmark errors.
///
/// Every variant is terminal for a run. Sink-facing variants carry the name of
/// the engine that failed so the top-level message is enough to diagnose.
#[derive(Debug, Error)]
pub enum Error {
    /// Out-of-range benchmark parameter.
    #[error("configuration error: {0}")]
    Config(String),

    /// Workload cannot be generated from the sampled data.
    #[error("generation error: {0}")]
    Generation(String),

    /// Source dataset could not be read or parsed.
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Could not open a connection to the sink.
    #[error("{engine}: connection error: {message}")]
    Connection { engine: String, message: String },

    /// DDL failed.
    #[error("{engine}: schema error: {message}")]
    Schema { engine: String, message: String },

    /// A row was rejected by the sink.
    #[error("{engine}: insert error: {message}")]
    Insert { engine: String, message: String },

    /// A range query failed to execute.
    #[error("{engine}: query error: {message}")]
    Query { engine: String, message: String },

    /// The storage catalog query failed.
    #[error("{engine}: storage error: {message}")]
    Storage { engine: String, message: String },

    /// The sink does not expose the requested capability.
    #[error("{engine}: unsupported: {message}")]
    Unsupported {
        engine: String,
        stage: &'static str,
        message: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn connection(engine: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Error::Connection {
            engine: engine.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn schema(engine: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Error::Schema {
            engine: engine.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn insert(engine: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Error::Insert {
            engine: engine.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn query(engine: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Error::Query {
            engine: engine.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn storage(engine: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Error::Storage {
            engine: engine.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn unsupported(
        engine: impl Into<String>,
        stage: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Error::Unsupported {
            engine: engine.into(),
            stage,
            message: message.into(),
        }
    }

    /// Name of the pipeline stage this error belongs to.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Generation(_) => "generation",
            Error::Dataset(_) | Error::Io(_) => "dataset",
            Error::Connection { .. } => "connect",
            Error::Schema { .. } => "prepare_schema",
            Error::Insert { .. } => "bulk_insert",
            Error::Query { .. } => "run_queries",
            Error::Storage { .. } => "measure_storage",
            Error::Unsupported { stage, .. } => *stage,
        }
    }
}
