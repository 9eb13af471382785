//! Shared helpers for verbatim benchmark suites.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

use verbatim_ledger::digest::{digest_bytes, Category};
use verbatim_ledger::ledger::HashLedger;
use verbatim_ledger::score_line::TokenId;

/// Builds a ledger holding `lines` records per category, with distinct
/// payloads so no two digests collide.
#[must_use]
pub fn populated_ledger(lines: usize) -> HashLedger {
    let mut ledger = HashLedger::new();
    for i in 0..lines {
        for category in Category::ALL {
            let payload = format!("{}-{i}", category.label());
            ledger.record(category, digest_bytes(payload.as_bytes()));
        }
    }
    ledger
}

/// Token/score pairs shaped like a real generation of `n` tokens.
#[must_use]
pub fn synthetic_score_pairs(n: usize) -> Vec<(TokenId, f32)> {
    (0..n)
        .map(|i| {
            let token = u32::try_from(i % 32_000).unwrap_or(0);
            #[allow(clippy::cast_precision_loss)]
            let score = (i as f32).mul_add(0.173, -9.5) % 20.0 - 10.0;
            (token, score)
        })
        .collect()
}
