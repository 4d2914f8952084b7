//! Command-line arguments.

use clap::Parser;
use kalepso_bench::dataset::DEFAULT_SOURCE;
use kalepso_bench::workload::{DEFAULT_QUERIES, DEFAULT_RANGE, DEFAULT_SEED, DEFAULT_SIZE};
use kalepso_bench::{BenchConfig, ConnectionConfig, Engine, WorkloadParams};

/// Run simple uniform range queries on Kalepso.
#[derive(Parser, Debug)]
#[command(name = "uniform-range-queries")]
#[command(version, about = "Run simple uniform range queries on Kalepso", long_about = None)]
pub struct Args {
    /// The size of data [100 - 247000].
    #[arg(long, value_name = "input-size", default_value_t = DEFAULT_SIZE as u32,
          value_parser = clap::value_parser!(u32).range(100..=247_000))]
    pub size: u32,

    /// The number of queries [100 - 247000].
    #[arg(long, value_name = "queries-size", default_value_t = DEFAULT_QUERIES as u32,
          value_parser = clap::value_parser!(u32).range(100..=247_000))]
    pub queries: u32,

    /// The range size [2 - 1000].
    #[arg(long, value_name = "range-size", default_value_t = DEFAULT_RANGE,
          value_parser = clap::value_parser!(u32).range(2..=1000))]
    pub range: u32,

    /// Seed to use for the PRG.
    #[arg(long, default_value_t = DEFAULT_SEED, allow_negative_numbers = true)]
    pub seed: i64,

    /// Engine to run the benchmark against.
    #[arg(long, value_enum)]
    pub engine: Engine,

    /// Dataset CSV, as a file path or an http(s) URL.
    #[arg(long, default_value = DEFAULT_SOURCE)]
    pub data: String,

    /// Database host.
    #[arg(long, default_value = kalepso_bench::config::DEFAULT_HOST)]
    pub host: String,

    /// Database port (defaults to the engine's port).
    #[arg(long)]
    pub port: Option<u16>,

    /// Database user (defaults per engine).
    #[arg(long, env = "KALEPSO_BENCH_USER")]
    pub user: Option<String>,

    /// Database password (defaults per engine).
    #[arg(long, env = "KALEPSO_BENCH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl Args {
    /// Convert command-line arguments to a benchmark configuration.
    pub fn into_config(self) -> BenchConfig {
        let mut connection = ConnectionConfig::for_engine(self.engine).with_host(self.host);
        if let Some(port) = self.port {
            connection = connection.with_port(port);
        }
        if let Some(user) = self.user {
            connection = connection.with_user(user);
        }
        if let Some(password) = self.password {
            connection = connection.with_password(password);
        }

        BenchConfig::new(self.engine)
            .with_workload(WorkloadParams::new(
                self.size as usize,
                self.range,
                self.queries as usize,
            ))
            .with_seed(self.seed)
            .with_source(self.data)
            .with_connection(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("uniform-range-queries").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--engine", "kalepso"]).unwrap().into_config();
        assert_eq!(config.engine, Engine::Kalepso);
        assert_eq!(config.workload, WorkloadParams::new(1000, 10, 100));
        assert_eq!(config.seed, 123_456);
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.connection.port, 3306);
        assert_eq!(config.connection.user, "root");
    }

    #[test]
    fn test_overrides() {
        let config = parse(&[
            "--engine", "mariadb", "--size", "5000", "--queries", "250", "--range", "100",
            "--seed", "-3", "--data", "data.csv", "--host", "db", "--port", "4000",
            "--user", "bench", "--password", "pw",
        ])
        .unwrap()
        .into_config();

        assert_eq!(config.workload, WorkloadParams::new(5000, 100, 250));
        assert_eq!(config.seed, -3);
        assert_eq!(config.source, "data.csv");
        assert_eq!(config.connection.host, "db");
        assert_eq!(config.connection.port, 4000);
        assert_eq!(config.connection.user, "bench");
        assert_eq!(config.connection.password, "pw");
    }

    #[test]
    fn test_engine_is_required() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_unknown_engine_rejected() {
        let err = parse(&["--engine", "postgres"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("postgres"));
        assert!(message.contains("[possible values: kalepso, mariadb, oracle, microsoft]"));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(parse(&["--engine", "kalepso", "--size", "99"]).is_err());
        assert!(parse(&["--engine", "kalepso", "--size", "247001"]).is_err());
        assert!(parse(&["--engine", "kalepso", "--queries", "50"]).is_err());
        assert!(parse(&["--engine", "kalepso", "--range", "1"]).is_err());
        assert!(parse(&["--engine", "kalepso", "--range", "1001"]).is_err());
    }
}
