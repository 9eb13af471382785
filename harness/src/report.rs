//! End-of-run report: a machine-readable summary of the determinism
//! signature.
//!
//! The report is a single JSON object (keys alphabetized by the default
//! `serde_json` map) logged through the broadcaster as the last captured
//! message. Two runs of the same configuration are deterministic exactly
//! when their reports are byte-identical apart from nothing — every field
//! is derived from the ledger and the run counters.

use verbatim_ledger::ledger::AggregateDigests;

use crate::driver::RunStats;

/// Schema tag for the run report.
pub const REPORT_SCHEMA_VERSION: &str = "determinism_report.v1";

/// Render the run report as a single log line.
#[must_use]
pub fn render_run_report(stats: &RunStats, aggregates: &AggregateDigests) -> String {
    let report = serde_json::json!({
        "iterations": stats.iterations_run,
        "lines_hashed": stats.lines_hashed,
        "lines_lost": stats.lines_lost,
        "prompt_hash_of_hashes": aggregates.prompt.as_hex(),
        "response_hash_of_hashes": aggregates.response.as_hex(),
        "schema_version": REPORT_SCHEMA_VERSION,
        "scores_hash_of_hashes": aggregates.scores.as_hex(),
        "tokens_decoded": stats.tokens_decoded,
    });
    format!("Run Report: {report}\n")
}
