//! Harness argument pre-processor.
//!
//! One left-to-right scan over the raw argument list extracts the two
//! harness-owned flags (`-o <path>`, `--repeat <n>`) and preserves every
//! other token in original relative order. The filtered remainder is handed
//! unmodified to the engine's own configuration parser
//! ([`crate::engines::params`]) — the harness does not interpret or
//! validate any other flag.

/// Default output file name when `-o` is not given.
pub const DEFAULT_OUTPUT_PATH: &str = "determinism_results.txt";

/// Default repeat count when `--repeat` is not given.
pub const DEFAULT_REPEAT: u32 = 1;

/// The harness-owned configuration. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessArgs {
    /// Requested output file path (pre-resolution, see [`crate::outfile`]).
    pub out_path: String,
    /// Number of full passes over the prompt file. Always ≥ 1.
    pub repeat: u32,
}

impl Default for HarnessArgs {
    fn default() -> Self {
        Self {
            out_path: DEFAULT_OUTPUT_PATH.to_string(),
            repeat: DEFAULT_REPEAT,
        }
    }
}

/// Typed failure for harness flag extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    /// A recognized flag was the last token — no value follows.
    MissingValue { flag: &'static str },
    /// The `--repeat` value is not a positive integer.
    InvalidRepeat { value: String },
}

impl std::fmt::Display for ArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingValue { flag } => write!(f, "{flag} requires a value"),
            Self::InvalidRepeat { value } => {
                write!(f, "--repeat must be followed by a positive integer, got \"{value}\"")
            }
        }
    }
}

impl std::error::Error for ArgError {}

/// Extract the harness-owned flags, returning the parsed [`HarnessArgs`] and
/// the filtered remainder in original relative order.
///
/// # Errors
///
/// Returns [`ArgError::MissingValue`] if `-o` or `--repeat` is the last
/// token, and [`ArgError::InvalidRepeat`] if the repeat value does not parse
/// as a positive integer (zero is rejected — a zero-iteration run would
/// hash nothing and prove nothing).
pub fn extract_harness_args(
    args: Vec<String>,
) -> Result<(HarnessArgs, Vec<String>), ArgError> {
    let mut parsed = HarnessArgs::default();
    let mut remainder = Vec::with_capacity(args.len());

    let mut iter = args.into_iter();
    while let Some(token) = iter.next() {
        match token.as_str() {
            "-o" => {
                let value = iter.next().ok_or(ArgError::MissingValue { flag: "-o" })?;
                parsed.out_path = value;
            }
            "--repeat" => {
                let value = iter
                    .next()
                    .ok_or(ArgError::MissingValue { flag: "--repeat" })?;
                let repeat: u32 = value
                    .parse()
                    .map_err(|_| ArgError::InvalidRepeat { value: value.clone() })?;
                if repeat == 0 {
                    return Err(ArgError::InvalidRepeat { value });
                }
                parsed.repeat = repeat;
            }
            _ => remainder.push(token),
        }
    }

    Ok((parsed, remainder))
}
