//! Workload generation.
//!
//! A workload is a uniform sample of the source dataset plus a list of
//! fixed-width range queries over the "Total Pay & Benefits" column. All
//! randomness comes from a single [`StdRng`] seeded by the caller, so the same
//! source, parameters and seed always yield the same workload.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::SalaryRecord;
use crate::error::{Error, Result};

/// Smallest accepted sample size and query count.
pub const SIZE_MIN: usize = 100;
/// Largest accepted sample size and query count (rows in the source dataset).
pub const SIZE_MAX: usize = 247_000;
/// Smallest accepted range width.
pub const RANGE_MIN: u32 = 2;
/// Largest accepted range width.
pub const RANGE_MAX: u32 = 1000;

/// Default sample size.
pub const DEFAULT_SIZE: usize = 1000;
/// Default query count.
pub const DEFAULT_QUERIES: usize = DEFAULT_SIZE / 10;
/// Default range width.
pub const DEFAULT_RANGE: u32 = 10;
/// Default seed.
pub const DEFAULT_SEED: i64 = 123_456;

/// Closed interval `[low, high]` over the indexed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeQuery {
    pub low: i64,
    pub high: i64,
}

impl RangeQuery {
    pub fn new(low: i64, high: i64) -> Self {
        debug_assert!(low <= high);
        Self { low, high }
    }

    pub fn width(&self) -> i64 {
        self.high - self.low
    }

    /// Whether `value` falls inside the interval (both ends inclusive).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low as f64 && value <= self.high as f64
    }
}

/// Sizing of a workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadParams {
    /// Number of rows to sample.
    pub size: usize,
    /// Width of every range query.
    pub range: u32,
    /// Requested number of queries. One fewer is generated.
    pub queries: usize,
}

impl WorkloadParams {
    pub fn new(size: usize, range: u32, queries: usize) -> Self {
        Self {
            size,
            range,
            queries,
        }
    }

    /// Check the parameters against the accepted bounds.
    pub fn validate(&self) -> Result<()> {
        if !(SIZE_MIN..=SIZE_MAX).contains(&self.size) {
            return Err(Error::Config(format!(
                "input size must be {} to {}, given {}",
                SIZE_MIN, SIZE_MAX, self.size
            )));
        }
        if !(SIZE_MIN..=SIZE_MAX).contains(&self.queries) {
            return Err(Error::Config(format!(
                "number of queries must be {} to {}, given {}",
                SIZE_MIN, SIZE_MAX, self.queries
            )));
        }
        if !(RANGE_MIN..=RANGE_MAX).contains(&self.range) {
            return Err(Error::Config(format!(
                "range size must be {} to {}, given {}",
                RANGE_MIN, RANGE_MAX, self.range
            )));
        }
        Ok(())
    }
}

impl Default for WorkloadParams {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_RANGE, DEFAULT_QUERIES)
    }
}

/// Sampled rows and the range queries to run over them.
#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    pub rows: Vec<SalaryRecord>,
    pub queries: Vec<RangeQuery>,
}

impl Workload {
    /// Indexed values of the sampled rows, in sample order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.total_pay_benefits)
    }
}

/// Generate a workload from `source`.
///
/// Draws `params.size` rows without replacement, then `params.queries - 1`
/// ranges whose left bound is uniform in `[0, max - range]`, where `max` is
/// the largest sampled value truncated to an integer.
pub fn generate(source: &[SalaryRecord], params: &WorkloadParams, seed: i64) -> Result<Workload> {
    if params.size == 0 {
        return Err(Error::Generation("sample size must be positive".into()));
    }
    if source.len() < params.size {
        return Err(Error::Generation(format!(
            "dataset has {} rows, cannot sample {}",
            source.len(),
            params.size
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed as u64);

    let rows: Vec<SalaryRecord> = rand::seq::index::sample(&mut rng, source.len(), params.size)
        .into_iter()
        .map(|i| source[i].clone())
        .collect();

    let max = rows
        .iter()
        .map(|r| r.total_pay_benefits)
        .fold(f64::NEG_INFINITY, f64::max)
        .floor() as i64;

    let width = i64::from(params.range);
    if width > max {
        return Err(Error::Generation(format!(
            "range size {} exceeds the largest sampled value {}",
            width, max
        )));
    }

    let queries = (1..params.queries)
        .map(|_| {
            let low = rng.gen_range(0..=max - width);
            RangeQuery::new(low, low + width)
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        rows = rows.len(),
        queries = queries.len(),
        max_value = max,
        seed,
        "workload generated"
    );

    Ok(Workload { rows, queries })
}
