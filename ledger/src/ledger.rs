//! Append-only hash ledger and end-of-run aggregation.
//!
//! The ledger holds one hex digest per processed prompt line per category,
//! in processing order: iteration-major, then line order within the
//! iteration. It is consumed once at the very end to produce the three
//! headline "hash of hashes" values — the run's determinism signature.
//!
//! Aggregation is SHA-256 over the concatenation of a category's hex digest
//! strings with no separators. A single differing line-level digest anywhere
//! flips the headline digest for its category, so two runs are byte-identical
//! if and only if their three headline values match.

use crate::digest::{digest_bytes, Category, LineDigest};

/// A category tag plus a finalized line digest. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashRecord {
    /// Which category this digest belongs to.
    pub category: Category,
    /// The line-level digest.
    pub digest: LineDigest,
}

/// The three append-only per-category digest sequences for one run.
#[derive(Debug, Default, Clone)]
pub struct HashLedger {
    prompts: Vec<HashRecord>,
    responses: Vec<HashRecord>,
    scores: Vec<HashRecord>,
}

/// The three headline digests produced by [`HashLedger::aggregate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateDigests {
    /// Hash of hashes over the prompt category.
    pub prompt: LineDigest,
    /// Hash of hashes over the response category.
    pub response: LineDigest,
    /// Hash of hashes over the scores category.
    pub scores: LineDigest,
}

impl AggregateDigests {
    /// The headline digest for a category.
    #[must_use]
    pub fn for_category(&self, category: Category) -> &LineDigest {
        match category {
            Category::Prompt => &self.prompt,
            Category::Response => &self.response,
            Category::Scores => &self.scores,
        }
    }
}

impl HashLedger {
    /// An empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digest to its category sequence.
    pub fn record(&mut self, category: Category, digest: LineDigest) {
        self.sequence_mut(category).push(HashRecord { category, digest });
    }

    /// The recorded entries for a category, in processing order.
    #[must_use]
    pub fn records(&self, category: Category) -> &[HashRecord] {
        match category {
            Category::Prompt => &self.prompts,
            Category::Response => &self.responses,
            Category::Scores => &self.scores,
        }
    }

    /// Number of entries recorded for a category.
    #[must_use]
    pub fn len(&self, category: Category) -> usize {
        self.records(category).len()
    }

    /// True if no entries have been recorded in any category.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.records(*c).is_empty())
    }

    /// Compute the three headline hash-of-hashes digests.
    ///
    /// Per category: concatenate every recorded hex digest string (no
    /// separators) and digest the resulting byte string. An empty category
    /// aggregates to the digest of the empty string, which is itself a
    /// stable, comparable value.
    #[must_use]
    pub fn aggregate(&self) -> AggregateDigests {
        AggregateDigests {
            prompt: aggregate_category(&self.prompts),
            response: aggregate_category(&self.responses),
            scores: aggregate_category(&self.scores),
        }
    }

    fn sequence_mut(&mut self, category: Category) -> &mut Vec<HashRecord> {
        match category {
            Category::Prompt => &mut self.prompts,
            Category::Response => &mut self.responses,
            Category::Scores => &mut self.scores,
        }
    }
}

fn aggregate_category(records: &[HashRecord]) -> LineDigest {
    let mut concatenated = String::with_capacity(records.len() * crate::digest::DIGEST_HEX_LEN);
    for record in records {
        concatenated.push_str(record.digest.as_hex());
    }
    digest_bytes(concatenated.as_bytes())
}
