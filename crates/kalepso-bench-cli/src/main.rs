//! Uniform range-query benchmark driver.
//!
//! Samples the salary dataset, loads it into the selected engine and reports
//! insertion time, query time and table size. For `microsoft` the workload is
//! printed instead, for replay by an external program.

mod config;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Args;
use kalepso_bench::{driver, Outcome};

fn main() {
    // Logs go to stderr; stdout carries only the report or emitted workload.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kalepso_bench=info,uniform_range_queries=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = args.into_config();

    tracing::info!(
        engine = %config.engine,
        size = config.workload.size,
        queries = config.workload.queries,
        range = config.workload.range,
        seed = config.seed,
        "starting benchmark"
    );

    match driver::run(&config) {
        Ok(Outcome::Measured(result)) => println!("{}", result),
        Ok(Outcome::Emitted(text)) => print!("{}", text),
        Err(e) => {
            tracing::error!(engine = %config.engine, stage = e.stage(), error = %e, "benchmark failed");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
