//! Inference engine contract: the seam between the harness and the backend.
//!
//! Engines provide tokenization, decode-step state advancement, sampling,
//! and score readout. Engines may NOT implement hashing, logging, or
//! iteration control — those are harness concerns.
//!
//! The engine's decode/sample calls are treated as synchronous and blocking;
//! the harness drives them strictly sequentially, one token at a time.

pub use verbatim_ledger::score_line::TokenId;

/// Typed failure for engine operations.
///
/// Which scope a failure short-circuits (token, line, or iteration) is
/// decided by the driver, not the engine — the same `DecodeFailed` aborts
/// the whole iteration when priming a prompt but only the current line's
/// generate loop when feeding back a sampled token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Tokenization of a prompt line failed.
    TokenizeFailed { detail: String },
    /// A decode step failed.
    DecodeFailed { detail: String },
    /// Token-to-text conversion failed.
    TokenTextFailed { token: TokenId, detail: String },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenizeFailed { detail } => write!(f, "tokenize failed: {detail}"),
            Self::DecodeFailed { detail } => write!(f, "decode failed: {detail}"),
            Self::TokenTextFailed { token, detail } => {
                write!(f, "token {token} to text failed: {detail}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// The contract a generation backend must implement to be driven by the
/// harness.
///
/// Call sequence per prompt line:
///
/// ```text
/// tokenize(line) → decode(prompt tokens)
///   → [sample → is_end_of_generation? → token_to_text
///      → decode([token]) → current_scores()[token]] × N
/// ```
///
/// Sampling strategy internals (seed, temperature) are configured at engine
/// construction and opaque to the harness.
pub trait InferenceEngineV1 {
    /// Convert a prompt line to a token sequence.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TokenizeFailed`] if the line cannot be
    /// tokenized. The driver skips the line (non-fatal, counted as lost).
    fn tokenize(&mut self, text: &str) -> Result<Vec<TokenId>, EngineError>;

    /// Advance internal model state by one decode step over a token batch.
    ///
    /// Called once with the full prompt token sequence (priming), then once
    /// per sampled token with a single-element batch.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DecodeFailed`] if the step fails.
    fn decode(&mut self, tokens: &[TokenId]) -> Result<(), EngineError>;

    /// Sample one token from the engine's current state.
    fn sample(&mut self) -> TokenId;

    /// Whether a sampled token is an end-of-generation marker.
    fn is_end_of_generation(&self, token: TokenId) -> bool;

    /// Convert a token to its display text.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TokenTextFailed`] if the token has no text
    /// rendering. The driver ends the current line's generate loop but keeps
    /// the data collected so far.
    fn token_to_text(&self, token: TokenId) -> Result<String, EngineError>;

    /// The per-token score vector for the current state, indexable by token
    /// id. Valid until the next decode step.
    fn current_scores(&self) -> &[f32];

    /// One-line performance summary, dumped once at run end. Content is
    /// engine-owned and opaque to the harness.
    fn perf_summary(&self) -> String;
}
