//! Benchmark configuration.

use crate::dataset::DEFAULT_SOURCE;
use crate::engine::Engine;
use crate::workload::{WorkloadParams, DEFAULT_SEED};

/// Default database host.
pub const DEFAULT_HOST: &str = "localhost";

/// Connection settings for a live engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Host name or address of the engine.
    pub host: String,

    /// TCP port. Defaults to the engine's port.
    pub port: u16,

    /// Login user.
    pub user: String,

    /// Login password.
    pub password: String,
}

impl ConnectionConfig {
    /// Default connection settings for `engine`.
    ///
    /// Engines without a live client get empty credentials.
    pub fn for_engine(engine: Engine) -> Self {
        let (user, password) = engine.default_credentials().unwrap_or_default();
        Self {
            host: DEFAULT_HOST.to_string(),
            port: engine.port(),
            user: user.to_string(),
            password: password.to_string(),
        }
    }

    /// Set the host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the user.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}

/// Settings for one benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Engine to benchmark.
    pub engine: Engine,

    /// Sample size, range width and query count.
    pub workload: WorkloadParams,

    /// Seed for sampling and range placement.
    pub seed: i64,

    /// Dataset location (file path or URL).
    pub source: String,

    /// Connection settings, unused for text emission.
    pub connection: ConnectionConfig,
}

impl BenchConfig {
    /// Create a configuration for `engine` with default workload and connection.
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            workload: WorkloadParams::default(),
            seed: DEFAULT_SEED,
            source: DEFAULT_SOURCE.to_string(),
            connection: ConnectionConfig::for_engine(engine),
        }
    }

    /// Set the workload parameters.
    pub fn with_workload(mut self, workload: WorkloadParams) -> Self {
        self.workload = workload;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the dataset location.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the connection settings.
    pub fn with_connection(mut self, connection: ConnectionConfig) -> Self {
        self.connection = connection;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BenchConfig::new(Engine::Mariadb);
        assert_eq!(config.workload, WorkloadParams::new(1000, 10, 100));
        assert_eq!(config.seed, 123_456);
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.connection.host, "localhost");
        assert_eq!(config.connection.port, 3307);
        assert_eq!(config.connection.user, "root");
        assert_eq!(config.connection.password, "kalepso");
    }

    #[test]
    fn test_oracle_defaults() {
        let connection = ConnectionConfig::for_engine(Engine::Oracle);
        assert_eq!(connection.port, 1521);
        assert_eq!(connection.user, "dmytro");
    }

    #[test]
    fn test_text_engine_has_empty_credentials() {
        let connection = ConnectionConfig::for_engine(Engine::Microsoft);
        assert_eq!(connection.port, 1433);
        assert!(connection.user.is_empty());
        assert!(connection.password.is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = BenchConfig::new(Engine::Kalepso)
            .with_seed(-7)
            .with_source("data.csv")
            .with_workload(WorkloadParams::new(500, 20, 200))
            .with_connection(
                ConnectionConfig::for_engine(Engine::Kalepso)
                    .with_host("10.0.0.5")
                    .with_port(13306)
                    .with_user("bench")
                    .with_password("secret"),
            );

        assert_eq!(config.seed, -7);
        assert_eq!(config.source, "data.csv");
        assert_eq!(config.workload.size, 500);
        assert_eq!(config.connection.host, "10.0.0.5");
        assert_eq!(config.connection.port, 13306);
        assert_eq!(config.connection.user, "bench");
        assert_eq!(config.connection.password, "secret");
    }
}
