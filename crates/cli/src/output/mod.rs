//! Output formatting utilities
//!
//! Renders listing outcomes as the plain `Buckets:` listing, a table, or
//! JSON, and shows a spinner on stderr while a request runs.

mod formatter;
mod progress;

use std::io::{self, Write};

pub use formatter::{Formatter, render_json, render_table};
pub use progress::Spinner;

/// Output configuration derived from CLI flags and config defaults
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable the spinner
    pub no_progress: bool,
    /// Suppress non-error output
    pub quiet: bool,
}

/// Write `text` to stdout and flush
///
/// A closed stdout (a pipe into `head`, say) is a normal end of output, not
/// a failure. Other write errors are only logged: the exit code already
/// reflects the outcome being printed.
pub fn write_stdout(text: &str) {
    if let Err(e) = write_to(&mut io::stdout().lock(), text) {
        if e.kind() != io::ErrorKind::BrokenPipe {
            tracing::debug!(error = %e, "failed to write to stdout");
        }
    }
}

fn write_to<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}
