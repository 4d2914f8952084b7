//! Text emission for engines without a programmatic client.
//!
//! The workload is written out so an external program can replay it: the row
//! count, the query count, one indexed value per row, then one `low high` pair
//! per query.

use std::fmt::Write;

use crate::workload::Workload;

/// Render `workload` for out-of-band replay.
pub fn emit(workload: &Workload) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", workload.rows.len());
    let _ = writeln!(out, "{}", workload.queries.len());
    for value in workload.values() {
        let _ = writeln!(out, "{}", value);
    }
    for query in &workload.queries {
        let _ = writeln!(out, "{} {}", query.low, query.high);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::salary_with_total;
    use crate::workload::RangeQuery;

    #[test]
    fn test_emit_layout() {
        let workload = Workload {
            rows: vec![salary_with_total(0, 66500.5), salary_with_total(1, 30000.0)],
            queries: vec![RangeQuery::new(10, 20), RangeQuery::new(500, 510)],
        };

        assert_eq!(emit(&workload), "2\n2\n66500.5\n30000\n10 20\n500 510\n");
    }

    #[test]
    fn test_emit_empty_queries() {
        let workload = Workload {
            rows: vec![salary_with_total(0, 42.0)],
            queries: vec![],
        };

        assert_eq!(emit(&workload), "1\n0\n42\n");
    }
}
