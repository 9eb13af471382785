//! Serialized score line: the deterministic textual rendering of the
//! per-token (token, score) pairs collected during generation.
//!
//! The rendered string is both logged verbatim and hashed verbatim — the
//! hashed bytes are exactly the logged bytes, prefix and trailing newlines
//! included. Any change to this rendering changes every scores digest, so
//! the format is locked: `"Scores: "` prefix, then `"<token>:<score> "` per
//! pair (score with exactly 6 fractional digits, trailing space after every
//! pair), terminated by `"\n\n"`.

use std::fmt::Write as _;

/// Integer identifier for a sub-word unit produced by the engine.
pub type TokenId = u32;

/// Render the score line for a sequence of (token, score) pairs.
///
/// An empty sequence renders as `"Scores: \n\n"` — a response that produced
/// no tokens still gets a well-formed, hashable score line.
#[must_use]
pub fn render_score_line(pairs: &[(TokenId, f32)]) -> String {
    let mut out = String::from("Scores: ");
    for (token, score) in pairs {
        // Infallible: fmt::Write on String cannot fail.
        let _ = write!(out, "{token}:{score:.6} ");
    }
    out.push_str("\n\n");
    out
}
