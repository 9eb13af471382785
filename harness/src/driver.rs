//! Generation driver: the per-(iteration, line) state machine that feeds
//! the hash ledger.
//!
//! For each iteration, the prompt file is streamed line by line; each
//! non-empty line is tokenized, primed into the engine, and extended one
//! sampled token at a time until end-of-generation or the configured
//! bound. The accumulated text and (token, score) pairs are logged and
//! digested into the [`HashLedger`].
//!
//! # Failure scopes
//!
//! - Tokenize failure: skip the line (counted as lost, no hashes).
//! - Prompt-priming decode failure: abandon the current iteration's line
//!   loop; subsequent iterations still run.
//! - Feedback decode or token-to-text failure: end the current line's
//!   generate loop; the partial result is still logged and hashed.
//!
//! The priming/feedback asymmetry is deliberate and matches the backend
//! behavior this harness was built to audit — do not "fix" it.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Instant;

use verbatim_ledger::digest::{digest_bytes, Category};
use verbatim_ledger::ledger::{AggregateDigests, HashLedger};
use verbatim_ledger::score_line::{render_score_line, TokenId};

use crate::contract::InferenceEngineV1;
use crate::logger::LogBroadcaster;

/// Driver configuration for one run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Prompt-source file: one prompt per non-empty line.
    pub prompt_path: PathBuf,
    /// Generate-loop bound per line (`usize::MAX` for "no limit").
    pub max_new_tokens: usize,
    /// Number of full passes over the prompt file. Always ≥ 1.
    pub repeat: u32,
}

/// Counters accumulated across the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Iterations that ran (including ones abandoned by a priming failure).
    pub iterations_run: u32,
    /// Lines that produced all three hash records.
    pub lines_hashed: u64,
    /// Lines lost to tokenization failure (no hash records emitted).
    pub lines_lost: u64,
    /// Total tokens decoded across all lines and iterations.
    pub tokens_decoded: u64,
}

/// Fatal run failure. Everything else is contained at line or iteration
/// scope and reported to standard error.
#[derive(Debug)]
pub enum RunError {
    /// The prompt file could not be opened or read.
    PromptFileUnreadable { path: PathBuf, detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PromptFileUnreadable { path, detail } => {
                write!(f, "cannot read prompt file \"{}\": {detail}", path.display())
            }
        }
    }
}

impl std::error::Error for RunError {}

/// Run the full generation loop: `repeat` iterations over the prompt file,
/// recording three digests per processed line into `ledger`.
///
/// # Errors
///
/// Returns [`RunError::PromptFileUnreadable`] if the prompt file cannot be
/// opened or read at the start of any iteration — a configuration-level
/// failure, fatal to the whole run.
pub fn run_generation(
    engine: &mut dyn InferenceEngineV1,
    config: &DriverConfig,
    ledger: &mut HashLedger,
    log: &mut LogBroadcaster,
) -> Result<RunStats, RunError> {
    let mut stats = RunStats::default();

    for rep in 0..config.repeat {
        log.log(&format!("== Iteration {} of {} ==\n", rep + 1, config.repeat));
        stats.iterations_run += 1;

        let file = File::open(&config.prompt_path).map_err(|e| RunError::PromptFileUnreadable {
            path: config.prompt_path.clone(),
            detail: e.to_string(),
        })?;
        let reader = BufReader::new(file);

        let started = Instant::now();
        let mut n_decode: u64 = 0;

        for line in reader.lines() {
            let line = line.map_err(|e| RunError::PromptFileUnreadable {
                path: config.prompt_path.clone(),
                detail: e.to_string(),
            })?;
            if line.is_empty() {
                continue;
            }

            match run_line(engine, config, &line, ledger, log, &mut n_decode) {
                LineOutcome::Hashed => stats.lines_hashed += 1,
                LineOutcome::Lost => stats.lines_lost += 1,
                LineOutcome::IterationAborted => break,
            }
        }

        stats.tokens_decoded += n_decode;
        let elapsed = started.elapsed().as_secs_f64();
        #[allow(clippy::cast_precision_loss)]
        let tps = if elapsed > 0.0 { n_decode as f64 / elapsed } else { 0.0 };
        eprintln!("decoded {n_decode} tokens in {elapsed:.2} s, speed: {tps:.2} t/s");
    }

    Ok(stats)
}

/// Compute, log, and return the three headline hash-of-hashes values.
///
/// Invoked exactly once, after all iterations complete. The broadcaster
/// must still be attached — these records are part of the captured output.
pub fn record_final_digests(ledger: &HashLedger, log: &mut LogBroadcaster) -> AggregateDigests {
    let aggregates = ledger.aggregate();
    for category in Category::ALL {
        log.log(&format!(
            "Final {} Hash-of-Hashes: {}\n",
            category.label(),
            aggregates.for_category(category).as_hex()
        ));
    }
    aggregates
}

enum LineOutcome {
    Hashed,
    Lost,
    IterationAborted,
}

/// The per-line state machine: tokenize → prime → generate → finalize.
fn run_line(
    engine: &mut dyn InferenceEngineV1,
    config: &DriverConfig,
    line: &str,
    ledger: &mut HashLedger,
    log: &mut LogBroadcaster,
    n_decode: &mut u64,
) -> LineOutcome {
    log.log(&format!("Prompt: {line}\n\n"));

    // Tokenize: non-fatal, the line is lost and nothing is hashed for it.
    let prompt_tokens = match engine.tokenize(line) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("Error: failed to tokenize line: {e}");
            return LineOutcome::Lost;
        }
    };

    // Prime: fatal for this iteration only.
    if let Err(e) = engine.decode(&prompt_tokens) {
        eprintln!("Error: decode of line prompt failed: {e}");
        return LineOutcome::IterationAborted;
    }

    // Generate loop. Any failure here ends the loop but keeps the partial
    // result — it is still logged and hashed below.
    let mut generated_text = String::new();
    let mut generated_scores: Vec<(TokenId, f32)> = Vec::new();

    for _ in 0..config.max_new_tokens {
        let token = engine.sample();
        if engine.is_end_of_generation(token) {
            break;
        }

        let piece = match engine.token_to_text(token) {
            Ok(piece) => piece,
            Err(e) => {
                eprintln!("Error: token to text conversion failed: {e}");
                break;
            }
        };
        generated_text.push_str(&piece);
        *n_decode += 1;

        if let Err(e) = engine.decode(&[token]) {
            eprintln!("Error: decode failed while generating: {e}");
            break;
        }

        // Score readout happens after the token's own decode step; a score
        // vector too short for the token id is tolerated (no pair recorded).
        if let Some(score) = engine.current_scores().get(token as usize) {
            generated_scores.push((token, *score));
        }
    }

    // Finalize: log the prompt/response pair and the score line, then
    // record one digest per category.
    log.log(&format!("Response: {generated_text}\n"));
    let score_line = render_score_line(&generated_scores);
    log.log(&score_line);

    for (category, bytes) in [
        (Category::Prompt, line.as_bytes()),
        (Category::Response, generated_text.as_bytes()),
        (Category::Scores, score_line.as_bytes()),
    ] {
        let digest = digest_bytes(bytes);
        log.log(&format!("{} Hash: {}\n", category.label(), digest.as_hex()));
        ledger.record(category, digest);
    }

    LineOutcome::Hashed
}
