//! A fully deterministic seeded toy language model.
//!
//! `ToyLm` is the reference backend: every operation is a pure function of
//! the engine's mixed 64-bit state, which in turn is a pure function of the
//! construction parameters (model id, seed, temperature) and the decoded
//! token history. Same configuration + same prompts ⇒ byte-identical text
//! and scores, which is exactly what the harness needs a built-in backend
//! to guarantee.
//!
//! There is no model here — the "language" is a fixed word-piece vocabulary
//! and the "logits" are hash-derived. Any text is acceptable; only its
//! reproducibility is under test.

use crate::contract::{EngineError, InferenceEngineV1, TokenId};
use crate::engines::params::EngineParams;

/// Fixed word-piece vocabulary. Token id `i + 1` maps to `VOCAB[i]`;
/// token 0 is the end-of-generation marker.
const VOCAB: [&str; 32] = [
    " the", " a", " of", " to", " and", " in", " is", " it", " that", " was", " for", " on",
    " with", " as", " at", " by", " an", " be", " this", " from", " or", " one", " had",
    " not", " but", " all", " were", " when", " we", " there", " can", " more",
];

/// End-of-generation token id.
pub const EOG_TOKEN: TokenId = 0;

/// How often the sampler lands on the end-of-generation marker, roughly:
/// one draw in `EOG_PERIOD` ends the line.
const EOG_PERIOD: u64 = 24;

/// splitmix64: the state mixer behind every derived value.
fn mix(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Fold a byte string into a 64-bit value (FNV-1a).
fn fold_bytes(seed: u64, bytes: &[u8]) -> u64 {
    let mut acc = seed ^ 0xCBF2_9CE4_8422_2325;
    for b in bytes {
        acc = (acc ^ u64::from(*b)).wrapping_mul(0x0000_0100_0000_01B3);
    }
    acc
}

/// Map a mixed 64-bit value to a score in roughly [-10, 10).
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn unit_score(raw: u64) -> f32 {
    let unit = (raw >> 11) as f64 / f64::from(1u32 << 21) / f64::from(1u32 << 21) / 2048.0;
    (unit * 20.0 - 10.0) as f32
}

/// Deterministic seeded toy LM. See module docs.
#[derive(Debug, Clone)]
pub struct ToyLm {
    state: u64,
    scores: Vec<f32>,
    decode_calls: u64,
}

impl ToyLm {
    /// Build an engine from its configuration. Seed, temperature bits, and
    /// the model identifier are all folded into the initial state, so any
    /// configuration change yields a different (but still deterministic)
    /// output stream.
    #[must_use]
    pub fn new(params: &EngineParams) -> Self {
        let mut state = fold_bytes(params.seed, params.model.as_bytes());
        state = mix(state ^ u64::from(params.temperature.to_bits()));
        let mut engine = Self {
            state,
            scores: vec![0.0; VOCAB.len() + 1],
            decode_calls: 0,
        };
        engine.refresh_scores();
        engine
    }

    /// Recompute the score vector from the current state. Called after
    /// every decode step, mirroring a real backend's logit refresh.
    fn refresh_scores(&mut self) {
        for (i, slot) in self.scores.iter_mut().enumerate() {
            *slot = unit_score(mix(self.state ^ (i as u64).wrapping_mul(0xA24B_AED4_963E_E407)));
        }
    }
}

impl InferenceEngineV1 for ToyLm {
    fn tokenize(&mut self, text: &str) -> Result<Vec<TokenId>, EngineError> {
        // One token per whitespace-separated word, id derived from the word
        // bytes. Never fails for the toy vocabulary.
        let token_count = u32::try_from(VOCAB.len()).unwrap_or(u32::MAX);
        Ok(text
            .split_whitespace()
            .map(|word| 1 + (fold_bytes(0, word.as_bytes()) % u64::from(token_count)) as TokenId)
            .collect())
    }

    fn decode(&mut self, tokens: &[TokenId]) -> Result<(), EngineError> {
        for token in tokens {
            self.state = mix(self.state ^ u64::from(*token).wrapping_mul(0xD6E8_FEB8_6659_FD93));
        }
        self.decode_calls += 1;
        self.refresh_scores();
        Ok(())
    }

    fn sample(&mut self) -> TokenId {
        let draw = mix(self.state ^ 0x2545_F491_4F6C_DD1D);
        if draw % EOG_PERIOD == 0 {
            return EOG_TOKEN;
        }
        let vocab_len = u64::try_from(VOCAB.len()).unwrap_or(u64::MAX);
        #[allow(clippy::cast_possible_truncation)]
        let id = 1 + (draw % vocab_len) as TokenId;
        id
    }

    fn is_end_of_generation(&self, token: TokenId) -> bool {
        token == EOG_TOKEN
    }

    fn token_to_text(&self, token: TokenId) -> Result<String, EngineError> {
        let index = token
            .checked_sub(1)
            .map(|i| i as usize)
            .filter(|i| *i < VOCAB.len())
            .ok_or(EngineError::TokenTextFailed {
                token,
                detail: "token id outside vocabulary".to_string(),
            })?;
        Ok(VOCAB[index].to_string())
    }

    fn current_scores(&self) -> &[f32] {
        &self.scores
    }

    fn perf_summary(&self) -> String {
        format!(
            "toy_lm: vocab={} decode_calls={}",
            VOCAB.len(),
            self.decode_calls
        )
    }
}
