//! A programmable stub engine for sensitivity and error-path tests.
//!
//! `ScriptedEngine` replays a queue of [`LineScript`]s, one per prompt
//! line, in driver call order. Scripts can inject every failure the
//! driver must survive: tokenize failure, prompt-priming decode failure,
//! mid-generation feedback decode failure, and token-to-text failure.
//! They can also make one iteration's output differ from another's by a
//! single byte, which is how the hash-sensitivity property is exercised.
//!
//! Token ids within one script must be distinct — `token_to_text` looks
//! pieces up by id.

use std::collections::VecDeque;

use crate::contract::{EngineError, InferenceEngineV1, TokenId};

/// One scripted generated token.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedToken {
    /// Token id the sampler emits.
    pub token: TokenId,
    /// Display text for the token.
    pub piece: String,
    /// Score reported for the token.
    pub score: f32,
    /// If true, `token_to_text` fails for this token.
    pub piece_fails: bool,
}

/// What the engine does for one prompt line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineScript {
    /// Fail the `tokenize` call for this line.
    pub tokenize_fails: bool,
    /// Fail the prompt-priming `decode` call for this line.
    pub prime_decode_fails: bool,
    /// Tokens emitted in order; generation ends with EOG after the last.
    pub tokens: Vec<ScriptedToken>,
    /// Fail the Nth single-token feedback decode (0-based emitted index).
    pub fail_feedback_decode_at: Option<usize>,
}

impl LineScript {
    /// A normal reply emitting the given (token, piece, score) triples.
    #[must_use]
    pub fn reply(tokens: &[(TokenId, &str, f32)]) -> Self {
        Self {
            tokens: tokens
                .iter()
                .map(|(token, piece, score)| ScriptedToken {
                    token: *token,
                    piece: (*piece).to_string(),
                    score: *score,
                    piece_fails: false,
                })
                .collect(),
            ..Self::default()
        }
    }

    /// A line whose tokenization fails.
    #[must_use]
    pub fn tokenize_failure() -> Self {
        Self {
            tokenize_fails: true,
            ..Self::default()
        }
    }

    /// A line whose prompt-priming decode fails.
    #[must_use]
    pub fn prime_decode_failure() -> Self {
        Self {
            prime_decode_fails: true,
            ..Self::default()
        }
    }

    /// Make the feedback decode for emitted token `index` fail.
    #[must_use]
    pub fn with_feedback_decode_failure_at(mut self, index: usize) -> Self {
        self.fail_feedback_decode_at = Some(index);
        self
    }

    /// Make `token_to_text` fail for emitted token `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for the scripted tokens.
    #[must_use]
    pub fn with_piece_failure_at(mut self, index: usize) -> Self {
        self.tokens[index].piece_fails = true;
        self
    }
}

#[derive(Debug)]
struct ActiveLine {
    tokens: Vec<ScriptedToken>,
    next: usize,
    fail_feedback_decode_at: Option<usize>,
    feedback_calls: usize,
}

/// End-of-generation token id used by scripted replies.
pub const SCRIPTED_EOG: TokenId = 0;

/// The scripted engine. Scripts are consumed in prompt-line order across
/// all iterations — a two-iteration run over a two-line file consumes four
/// scripts.
#[derive(Debug)]
pub struct ScriptedEngine {
    scripts: VecDeque<LineScript>,
    active: Option<ActiveLine>,
    scores: Vec<f32>,
    lines_scripted: usize,
}

impl ScriptedEngine {
    /// Build an engine that will replay `scripts` in order.
    #[must_use]
    pub fn new(scripts: Vec<LineScript>) -> Self {
        Self {
            lines_scripted: scripts.len(),
            scripts: scripts.into(),
            active: None,
            scores: Vec::new(),
        }
    }
}

impl InferenceEngineV1 for ScriptedEngine {
    fn tokenize(&mut self, _text: &str) -> Result<Vec<TokenId>, EngineError> {
        if self.scripts.front().is_some_and(|s| s.tokenize_fails) {
            self.scripts.pop_front();
            return Err(EngineError::TokenizeFailed {
                detail: "scripted tokenize failure".to_string(),
            });
        }
        // Two tokens, so a prompt-priming batch is distinguishable from a
        // single-token feedback batch.
        Ok(vec![1, 2])
    }

    fn decode(&mut self, tokens: &[TokenId]) -> Result<(), EngineError> {
        if tokens.len() >= 2 {
            // Prompt priming: activate the next script.
            let script = self.scripts.pop_front().ok_or(EngineError::DecodeFailed {
                detail: "script queue exhausted".to_string(),
            })?;
            if script.prime_decode_fails {
                return Err(EngineError::DecodeFailed {
                    detail: "scripted prime decode failure".to_string(),
                });
            }
            let max_token = script.tokens.iter().map(|t| t.token).max().unwrap_or(0);
            self.scores = vec![0.0; max_token as usize + 1];
            for t in &script.tokens {
                self.scores[t.token as usize] = t.score;
            }
            self.active = Some(ActiveLine {
                fail_feedback_decode_at: script.fail_feedback_decode_at,
                tokens: script.tokens,
                next: 0,
                feedback_calls: 0,
            });
            return Ok(());
        }

        // Single-token feedback.
        let Some(active) = self.active.as_mut() else {
            return Err(EngineError::DecodeFailed {
                detail: "feedback decode without an active line".to_string(),
            });
        };
        if active.fail_feedback_decode_at == Some(active.feedback_calls) {
            return Err(EngineError::DecodeFailed {
                detail: "scripted feedback decode failure".to_string(),
            });
        }
        active.feedback_calls += 1;
        Ok(())
    }

    fn sample(&mut self) -> TokenId {
        let Some(active) = self.active.as_mut() else {
            return SCRIPTED_EOG;
        };
        if active.next >= active.tokens.len() {
            return SCRIPTED_EOG;
        }
        let token = active.tokens[active.next].token;
        active.next += 1;
        token
    }

    fn is_end_of_generation(&self, token: TokenId) -> bool {
        token == SCRIPTED_EOG
    }

    fn token_to_text(&self, token: TokenId) -> Result<String, EngineError> {
        let scripted = self
            .active
            .as_ref()
            .and_then(|active| active.tokens.iter().find(|t| t.token == token))
            .ok_or_else(|| EngineError::TokenTextFailed {
                token,
                detail: "token not in active script".to_string(),
            })?;
        if scripted.piece_fails {
            return Err(EngineError::TokenTextFailed {
                token,
                detail: "scripted piece failure".to_string(),
            });
        }
        Ok(scripted.piece.clone())
    }

    fn current_scores(&self) -> &[f32] {
        &self.scores
    }

    fn perf_summary(&self) -> String {
        format!("scripted: lines_scripted={}", self.lines_scripted)
    }
}
