use chrono::Utc;
use tracing::info;

use crate::record::{Table, CONTENT};

/// Row and character counts before/after every pass of a stage run.
pub struct PassTracker {
    run_id: String,
    metrics: Vec<PassMetric>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassMetric {
    pub pass_name: String,
    pub rows_before: usize,
    pub rows_after: usize,
    pub chars_after: usize,
}

impl PassTracker {
    pub fn new(run_id: String) -> Self {
        PassTracker {
            run_id,
            metrics: Vec::new(),
        }
    }

    pub fn record(&mut self, pass_name: &str, table: &Table, rows_before: usize) {
        let rows_after = table.len();
        let chars_after = content_chars(table);
        println!(
            "  rows after {}: {} (removed {})",
            pass_name,
            rows_after,
            rows_before.saturating_sub(rows_after)
        );
        info!(
            run_id = %self.run_id,
            pass = pass_name,
            before = rows_before,
            after = rows_after,
            chars = chars_after,
            "pass finished"
        );
        self.metrics.push(PassMetric {
            pass_name: pass_name.to_string(),
            rows_before,
            rows_after,
            chars_after,
        });
    }

    pub fn metrics(&self) -> &[PassMetric] {
        &self.metrics
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn total_removed(&self) -> usize {
        match (self.metrics.first(), self.metrics.last()) {
            (Some(first), Some(last)) => first.rows_before.saturating_sub(last.rows_after),
            _ => 0,
        }
    }
}

pub fn new_run_id() -> String {
    format!("run-{}", Utc::now().format("%Y%m%dT%H%M%S"))
}

fn content_chars(table: &Table) -> usize {
    table
        .rows()
        .iter()
        .filter_map(|r| r.get(CONTENT))
        .map(|c| c.chars().count())
        .sum()
}
