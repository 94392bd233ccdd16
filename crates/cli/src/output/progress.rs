//! Spinner shown while the list request is in flight
//!
//! Draws on stderr only, so stdout keeps the exact listing output.

use super::OutputConfig;

/// Spinner wrapper
///
/// In quiet or JSON mode, or with `--no-progress`, nothing is drawn.
#[derive(Debug)]
pub struct Spinner {
    bar: Option<indicatif::ProgressBar>,
}

impl Spinner {
    /// Start a spinner with a message
    pub fn start(config: &OutputConfig, message: &str) -> Self {
        let bar = if config.quiet || config.json || config.no_progress {
            None
        } else {
            // Spinners draw to stderr by default.
            let bar = indicatif::ProgressBar::new_spinner();
            if let Ok(style) =
                indicatif::ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
            {
                bar.set_style(style);
            }
            bar.set_message(message.to_string());
            bar.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(bar)
        };

        Self { bar }
    }

    /// Finish and clear the spinner
    pub fn finish_and_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Check if the spinner is visible
    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_quiet_mode() {
        let config = OutputConfig {
            quiet: true,
            ..Default::default()
        };
        assert!(!Spinner::start(&config, "x").is_visible());
    }

    #[test]
    fn test_spinner_json_mode() {
        let config = OutputConfig {
            json: true,
            ..Default::default()
        };
        assert!(!Spinner::start(&config, "x").is_visible());
    }

    #[test]
    fn test_spinner_no_progress() {
        let config = OutputConfig {
            no_progress: true,
            ..Default::default()
        };
        assert!(!Spinner::start(&config, "x").is_visible());
    }

    #[test]
    fn test_spinner_normal() {
        let spinner = Spinner::start(&OutputConfig::default(), "Listing buckets");
        assert!(spinner.is_visible());
        spinner.finish_and_clear();
    }
}
