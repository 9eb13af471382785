//! Verbatim Ledger: the hashing core of the determinism harness.
//!
//! This crate owns everything that must be byte-stable for two runs to be
//! comparable: the per-line digest primitive, the score-line rendering, and
//! the append-only hash ledger with its end-of-run "hash of hashes"
//! aggregation. Everything else (logging, file naming, the generation loop)
//! lives in `verbatim-harness` — it depends on this crate, never the other
//! way around.
//!
//! # Crate dependency graph
//!
//! ```text
//! verbatim-ledger  ←  verbatim-harness
//! (digests, ledger)   (driver, logging, CLI)
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod digest;
pub mod ledger;
pub mod score_line;
