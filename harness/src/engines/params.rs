//! Engine-side configuration parsing.
//!
//! Consumes the argument remainder left over after the harness
//! pre-processor ([`crate::args`]) has removed its own flags. Flag names
//! and semantics here are engine-owned; the harness forwards the remainder
//! verbatim and never interprets it.

/// Engine configuration. Immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineParams {
    /// Model identifier. Folded into the deterministic state of the built-in
    /// toy engine; a real backend would load weights from it.
    pub model: String,
    /// Prompt-source file: plain text, one prompt per non-empty line.
    pub prompt_file: String,
    /// Decode batch size hint.
    pub n_batch: usize,
    /// Maximum new tokens per line. Negative means no limit.
    pub n_predict: i64,
    /// Sampling seed.
    pub seed: u64,
    /// Sampling temperature.
    pub temperature: f32,
}

impl EngineParams {
    /// The generate-loop bound: `n_predict`, with "no limit" realized as
    /// the largest representable count.
    #[must_use]
    pub fn max_new_tokens(&self) -> usize {
        usize::try_from(self.n_predict).unwrap_or(usize::MAX)
    }

    /// The parameter summary logged at run start.
    #[must_use]
    pub fn summary(&self, repeat: u32) -> String {
        format!(
            "== Determinism Test Parameters ==\n\
             model       : {}\n\
             n_batch     : {}\n\
             n_predict   : {}\n\
             seed        : {}\n\
             temperature : {}\n\
             repeat      : {repeat}\n\
             ----------------------------------\n\n",
            self.model, self.n_batch, self.n_predict, self.seed, self.temperature
        )
    }
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            model: "toy-lm".to_string(),
            prompt_file: String::new(),
            n_batch: 512,
            n_predict: 128,
            seed: 42,
            temperature: 0.8,
        }
    }
}

/// Typed failure for engine configuration parsing. All variants are fatal
/// before any generation occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineParamError {
    /// A flag was the last token — no value follows.
    MissingValue { flag: String },
    /// A flag value did not parse.
    InvalidValue { flag: String, value: String },
    /// An unrecognized token was found.
    UnknownFlag { flag: String },
    /// The required prompt-source flag (`--file`) is missing.
    MissingPromptFile,
}

impl std::fmt::Display for EngineParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingValue { flag } => write!(f, "{flag} requires a value"),
            Self::InvalidValue { flag, value } => {
                write!(f, "invalid value \"{value}\" for {flag}")
            }
            Self::UnknownFlag { flag } => write!(f, "unknown argument: {flag}"),
            Self::MissingPromptFile => {
                write!(f, "must pass --file <filename> for multi-line input")
            }
        }
    }
}

impl std::error::Error for EngineParamError {}

/// Parse the engine configuration from the filtered argument remainder.
///
/// Recognized flags: `--model`/`-m`, `--file`/`-f` (required), `--n-batch`,
/// `--n-predict`/`-n`, `--seed`/`-s`, `--temp`.
///
/// # Errors
///
/// Returns [`EngineParamError`] on a dangling flag, an unparsable value, an
/// unrecognized token, or a missing `--file`.
pub fn parse_engine_args(args: &[String]) -> Result<EngineParams, EngineParamError> {
    let mut params = EngineParams::default();
    let mut saw_prompt_file = false;

    let mut iter = args.iter();
    while let Some(token) = iter.next() {
        let mut value_for = |flag: &str| {
            iter.next().ok_or_else(|| EngineParamError::MissingValue {
                flag: flag.to_string(),
            })
        };
        match token.as_str() {
            "--model" | "-m" => params.model = value_for(token)?.clone(),
            "--file" | "-f" => {
                params.prompt_file = value_for(token)?.clone();
                saw_prompt_file = true;
            }
            "--n-batch" => params.n_batch = parse_value(token, value_for(token)?)?,
            "--n-predict" | "-n" => params.n_predict = parse_value(token, value_for(token)?)?,
            "--seed" | "-s" => params.seed = parse_value(token, value_for(token)?)?,
            "--temp" => params.temperature = parse_value(token, value_for(token)?)?,
            other => {
                return Err(EngineParamError::UnknownFlag {
                    flag: other.to_string(),
                })
            }
        }
    }

    if !saw_prompt_file {
        return Err(EngineParamError::MissingPromptFile);
    }

    Ok(params)
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, EngineParamError> {
    value.parse().map_err(|_| EngineParamError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}
