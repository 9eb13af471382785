//! Output target resolver: choose a file name that is safe to create
//! without destroying existing data.
//!
//! If the requested path does not exist it is used unchanged. Otherwise
//! candidates `path.1`, `path.2`, … are probed in increasing order and the
//! first free name wins. This operation never deletes, overwrites, or
//! renames an existing file.
//!
//! The linear probe is capped at [`MAX_PROBE_ATTEMPTS`] so a pathological
//! directory (or a filesystem that reports everything as existing) cannot
//! loop forever; exceeding the cap is a configuration error.

use std::path::{Path, PathBuf};

/// Upper bound on suffix probes before giving up.
pub const MAX_PROBE_ATTEMPTS: u32 = 10_000;

/// The outcome of output path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputPath {
    /// The path the user asked for.
    pub requested: PathBuf,
    /// The path that is actually free to create.
    pub chosen: PathBuf,
}

impl ResolvedOutputPath {
    /// True if the requested name was taken and a suffixed name was chosen.
    #[must_use]
    pub fn was_redirected(&self) -> bool {
        self.requested != self.chosen
    }

    /// Diagnostic notice naming both paths, or `None` if the requested path
    /// was used unchanged.
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        if self.was_redirected() {
            Some(format!(
                "File \"{}\" already exists.\nUsing new output file: {}\n",
                self.requested.display(),
                self.chosen.display()
            ))
        } else {
            None
        }
    }
}

/// Typed failure for output path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPathError {
    /// Every candidate up to the probe cap already exists.
    ProbeLimitExceeded { requested: PathBuf, attempts: u32 },
}

impl std::fmt::Display for OutputPathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProbeLimitExceeded { requested, attempts } => write!(
                f,
                "no free output name for \"{}\" after {attempts} attempts",
                requested.display()
            ),
        }
    }
}

impl std::error::Error for OutputPathError {}

/// Resolve a requested output path to one that does not exist yet.
///
/// # Errors
///
/// Returns [`OutputPathError::ProbeLimitExceeded`] if `requested` and all
/// `requested.1` … `requested.N` candidates exist, N = [`MAX_PROBE_ATTEMPTS`].
pub fn resolve_output_path(requested: &Path) -> Result<ResolvedOutputPath, OutputPathError> {
    if !requested.exists() {
        return Ok(ResolvedOutputPath {
            requested: requested.to_path_buf(),
            chosen: requested.to_path_buf(),
        });
    }

    for counter in 1..=MAX_PROBE_ATTEMPTS {
        let candidate = PathBuf::from(format!("{}.{counter}", requested.display()));
        if !candidate.exists() {
            return Ok(ResolvedOutputPath {
                requested: requested.to_path_buf(),
                chosen: candidate,
            });
        }
    }

    Err(OutputPathError::ProbeLimitExceeded {
        requested: requested.to_path_buf(),
        attempts: MAX_PROBE_ATTEMPTS,
    })
}
