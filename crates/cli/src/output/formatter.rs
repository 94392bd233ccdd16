//! Output formatter for human-readable and JSON output
//!
//! Everything here goes to stdout through [`write_stdout`], including failures: a failed listing is
//! part of the normal output and is printed as one `Error: ...` line.

use comfy_table::{Table, presets};
use r2ls_core::listing::{BUCKETS_HEADER, ERROR_PREFIX, describe};
use r2ls_core::{BucketInfo, Error, ListOutcome};
use serde::Serialize;

use super::{OutputConfig, write_stdout};

#[derive(Serialize)]
struct BucketsOutput<'a> {
    buckets: &'a [BucketInfo],
}

#[derive(Serialize)]
struct ErrorOutput {
    error: String,
}

/// Formatter for CLI output
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Check if JSON output mode is enabled
    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Text to print for a listing outcome
    ///
    /// Returns None when quiet mode hides a successful listing. Failures are
    /// always rendered.
    pub fn render_outcome(&self, outcome: &ListOutcome, long: bool) -> Option<String> {
        if self.config.quiet && outcome.is_success() {
            return None;
        }

        let text = match outcome {
            _ if self.config.json => render_json(outcome),
            ListOutcome::Buckets(buckets) if long => render_table(buckets),
            _ => outcome.render(),
        };
        Some(text)
    }

    /// Print a listing outcome
    pub fn outcome(&self, outcome: &ListOutcome, long: bool) {
        if let Some(text) = self.render_outcome(outcome, long) {
            write_stdout(&text);
        }
    }

    /// Print a failure that happened before any request was made
    pub fn error(&self, error: &Error) {
        if self.config.json {
            self.json(&ErrorOutput {
                error: describe(error),
            });
        } else {
            write_stdout(&format!("{ERROR_PREFIX}{}\n", describe(error)));
        }
    }

    /// Output JSON directly
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => write_stdout(&format!("{json}\n")),
            Err(e) => write_stdout(&format!("{ERROR_PREFIX}failed to serialize output: {e}\n")),
        }
    }

    /// Print a line of text (respects quiet mode)
    pub fn println(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        write_stdout(&format!("{message}\n"));
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

/// JSON document for a listing outcome, newline-terminated
pub fn render_json(outcome: &ListOutcome) -> String {
    let json = match outcome {
        ListOutcome::Buckets(buckets) => {
            serde_json::to_string_pretty(&BucketsOutput { buckets })
        }
        ListOutcome::Failed(e) => serde_json::to_string_pretty(&ErrorOutput {
            error: describe(e),
        }),
    };
    match json {
        Ok(json) => format!("{json}\n"),
        Err(e) => format!("Error: failed to serialize output: {e}\n"),
    }
}

/// `Buckets:` header followed by a name/creation-date table
pub fn render_table(buckets: &[BucketInfo]) -> String {
    if buckets.is_empty() {
        return format!("{BUCKETS_HEADER}\n");
    }

    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_header(vec!["Name", "Created"]);

    for bucket in buckets {
        let created = bucket
            .creation_date
            .map(|d| d.strftime("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![bucket.name.clone(), created]);
    }

    format!("{BUCKETS_HEADER}\n{table}\n")
}
