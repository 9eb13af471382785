//! Shared helpers for the conformance test suite.
//!
//! Single source of truth for log capture and prompt-file fixtures. Any
//! change here changes every conformance test, preventing silent drift
//! between what individual tests consider "the captured output".

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use verbatim_harness::logger::LogBroadcaster;

/// A `Write` sink backed by a shared buffer, so a test can inspect what a
/// moved-in boxed sink received.
#[derive(Clone, Default)]
pub struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl SharedSink {
    /// Everything written so far, as UTF-8.
    ///
    /// # Panics
    ///
    /// Panics if the captured bytes are not valid UTF-8 (log output is
    /// always UTF-8 in these tests).
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// A broadcaster with both sinks captured: (broadcaster, console, file).
#[must_use]
pub fn capture_logger() -> (LogBroadcaster, SharedSink, SharedSink) {
    let console = SharedSink::default();
    let file = SharedSink::default();
    let log = LogBroadcaster::new(Box::new(console.clone()), Box::new(file.clone()));
    (log, console, file)
}

/// Write a prompt file with the given lines (newline-joined).
///
/// # Panics
///
/// Panics on I/O failure — fixture setup, not behavior under test.
#[must_use]
pub fn write_prompt_file(lines: &[&str]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prompts.txt");
    std::fs::write(&path, lines.join("\n")).unwrap();
    (dir, path)
}

/// Extract the hex digests from captured log lines with the given prefix
/// (e.g. `"Prompt Hash: "`), in emission order.
#[must_use]
pub fn logged_digests(captured: &str, prefix: &str) -> Vec<String> {
    captured
        .lines()
        .filter_map(|line| line.strip_prefix(prefix))
        .map(ToString::to_string)
        .collect()
}
