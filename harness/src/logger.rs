//! Dual-sink log broadcaster.
//!
//! Every message is written verbatim, in call order, to two sinks: an
//! interactive console stream and the resolved output file. No level
//! filtering, no buffering beyond the underlying stream semantics.
//!
//! The broadcaster is an explicitly constructed value passed into every
//! component that logs — not process-global state. Lifecycle: attach after
//! the output path is resolved and before any message that must be captured
//! (parameter summary, iteration markers), keep attached through the final
//! aggregate-hash records, then [`LogBroadcaster::close`] once.
//!
//! Sink write failures are swallowed: a dying console or a full disk must
//! not change the generation or hashing behavior under test.

use std::io::Write;

/// A process-lifetime logging channel duplicating messages to two sinks.
pub struct LogBroadcaster {
    console: Box<dyn Write>,
    file: Box<dyn Write>,
}

impl std::fmt::Debug for LogBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogBroadcaster").finish_non_exhaustive()
    }
}

impl LogBroadcaster {
    /// Attach the broadcaster to a console sink and a file sink.
    #[must_use]
    pub fn new(console: Box<dyn Write>, file: Box<dyn Write>) -> Self {
        Self { console, file }
    }

    /// Write a message verbatim to both sinks.
    pub fn log(&mut self, message: &str) {
        let _ = self.console.write_all(message.as_bytes());
        let _ = self.file.write_all(message.as_bytes());
    }

    /// Flush both sinks and tear the broadcaster down.
    ///
    /// # Errors
    ///
    /// Returns the first flush error from either sink.
    pub fn close(mut self) -> std::io::Result<()> {
        self.console.flush()?;
        self.file.flush()
    }
}
