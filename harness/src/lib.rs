//! Verbatim Harness: run-to-run determinism verification for a
//! text-generation backend.
//!
//! The harness drives an [`contract::InferenceEngineV1`] repeatedly over the
//! same prompt file and proves — via per-line SHA-256 digests and an
//! end-of-run hash-of-hashes — whether the backend produces byte-identical
//! text and score output across iterations.
//!
//! The harness does NOT implement hashing — it delegates to
//! `verbatim-ledger`. Engines provide generation only; the harness owns
//! orchestration, logging, and file naming.
//!
//! # Pipeline
//!
//! ```text
//! extract_harness_args() → parse_engine_args()
//!   → resolve_output_path() → LogBroadcaster attached
//!   → run_generation() → [per line: digest × 3 → ledger]
//!   → record_final_digests() → run report → close
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod args;
pub mod contract;
pub mod driver;
pub mod engines;
pub mod logger;
pub mod outfile;
pub mod report;
