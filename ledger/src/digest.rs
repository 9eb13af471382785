//! Per-line digest primitive and hash categories.
//!
//! Algorithm: SHA-256 over raw bytes — no normalization, no whitespace
//! trimming. Digests render as 64-char lowercase hex; the hex string itself
//! is the unit of aggregation (see [`crate::ledger`]), so its rendering is
//! part of the stable surface.

use sha2::{Digest, Sha256};

/// Length of a rendered digest in hex characters (SHA-256, 32 bytes).
pub const DIGEST_HEX_LEN: usize = 64;

/// The three hash categories recorded per prompt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Raw bytes of the prompt line.
    Prompt,
    /// Raw bytes of the generated response text.
    Response,
    /// Raw bytes of the serialized score line, exactly as logged.
    Scores,
}

impl Category {
    /// All categories, in ledger order.
    pub const ALL: [Self; 3] = [Self::Prompt, Self::Response, Self::Scores];

    /// Human-readable label used in log lines (`"Prompt Hash: ..."` etc.).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Prompt => "Prompt",
            Self::Response => "Response",
            Self::Scores => "Scores",
        }
    }
}

/// A finalized SHA-256 digest, rendered as lowercase hex.
///
/// Immutable after creation. Equality is hex-string equality, which is the
/// comparison the whole harness is built around.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineDigest {
    hex: String,
}

impl LineDigest {
    /// The 64-char lowercase hex rendering.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    /// Parse from a hex string. Returns `None` unless the input is exactly
    /// [`DIGEST_HEX_LEN`] lowercase hex characters.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() != DIGEST_HEX_LEN {
            return None;
        }
        if !s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)) {
            return None;
        }
        Some(Self { hex: s.to_string() })
    }
}

impl std::fmt::Display for LineDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex)
    }
}

/// SHA-256 of a byte slice, rendered as a [`LineDigest`].
#[must_use]
pub fn digest_bytes(data: &[u8]) -> LineDigest {
    let raw = Sha256::digest(data);
    LineDigest {
        hex: hex::encode(raw),
    }
}
