//! Synthetic salary data for tests and benchmarks.
//!
//! Generators are seeded so every call with the same arguments produces the
//! same rows.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::SalaryRecord;

const JOB_TITLES: [&str; 6] = [
    "Office Technician",
    "Correctional Officer",
    "Staff Services Analyst",
    "Associate Governmental Program Analyst",
    "Registered Nurse",
    "Highway Maintenance Worker",
];

const AGENCIES: [&str; 4] = ["Sacramento", "Los Angeles", "San Diego", "Fresno"];

const NAME_PREFIXES: [&str; 10] = [
    "Alice", "Bob", "Charlie", "David", "Eve", "Frank", "Grace", "Henry", "Ivy", "Jack",
];

/// Generate `count` salary rows with realistic pay spreads.
///
/// Names are unique per index; totals range roughly from 20k to 340k.
pub fn synthetic_salaries(count: usize, seed: u64) -> Vec<SalaryRecord> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let base_pay = rng.gen_range(18_000.0..220_000.0_f64).round();
            let overtime_pay = if rng.gen_bool(0.3) {
                rng.gen_range(0.0..40_000.0_f64).round()
            } else {
                0.0
            };
            let other_pay = rng.gen_range(0.0..5_000.0_f64).round();
            let benefits = if rng.gen_bool(0.05) {
                0.0
            } else {
                rng.gen_range(2_000.0..80_000.0_f64).round()
            };
            let total_pay = base_pay + overtime_pay + other_pay;

            SalaryRecord {
                full_name: format!("{}_{}", NAME_PREFIXES[i % NAME_PREFIXES.len()], i),
                job_title: JOB_TITLES[i % JOB_TITLES.len()].to_string(),
                base_pay,
                overtime_pay,
                other_pay,
                benefits,
                total_pay,
                total_pay_benefits: total_pay + benefits,
                year: 2019,
                notes: None,
                agency: AGENCIES[i % AGENCIES.len()].to_string(),
                status: if i % 3 == 0 { Some("FT".to_string()) } else { None },
            }
        })
        .collect()
}

/// Single row whose indexed value is exactly `total`.
pub fn salary_with_total(index: usize, total: f64) -> SalaryRecord {
    SalaryRecord {
        full_name: format!("Employee_{}", index),
        job_title: "Analyst".to_string(),
        base_pay: total,
        overtime_pay: 0.0,
        other_pay: 0.0,
        benefits: 0.0,
        total_pay: total,
        total_pay_benefits: total,
        year: 2019,
        notes: None,
        agency: "Sacramento".to_string(),
        status: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_salaries_deterministic() {
        let a = synthetic_salaries(50, 1);
        let b = synthetic_salaries(50, 1);
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
    }

    #[test]
    fn test_totals_are_consistent() {
        for row in synthetic_salaries(200, 2) {
            assert_eq!(row.total_pay, row.base_pay + row.overtime_pay + row.other_pay);
            assert_eq!(row.total_pay_benefits, row.total_pay + row.benefits);
            assert!(row.total_pay_benefits >= 18_000.0);
        }
    }
}
