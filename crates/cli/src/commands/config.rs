//! config command - Show where r2ls would send requests
//!
//! Prints the merged settings without making any request. The secret key is
//! never shown, only whether one is set.

use clap::Subcommand;
use r2ls_core::endpoint::{R2_REGION, SignatureVersion};
use r2ls_core::{Endpoint, Error, R2Section};
use serde::Serialize;

use super::{Settings, failure_code};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

/// Resolved configuration, safe to print
#[derive(Debug, Serialize)]
struct ConfigView {
    config_file: String,
    config_found: bool,
    endpoint: Option<String>,
    region: &'static str,
    signature: &'static str,
    account_id: Option<String>,
    access_key_id: Option<String>,
    secret_access_key_set: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    problem: Option<String>,
}

impl ConfigView {
    fn new(settings: &Settings) -> Self {
        let r2 = &settings.r2;
        let (endpoint, problem) = match resolve_endpoint(r2) {
            Ok(endpoint) => (Some(endpoint.url), None),
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            config_file: settings.config_path.display().to_string(),
            config_found: settings.config_found,
            endpoint,
            region: R2_REGION,
            signature: SignatureVersion::V4.as_str(),
            account_id: r2.account_id.clone(),
            access_key_id: r2.access_key_id.as_deref().map(mask),
            secret_access_key_set: r2.secret_access_key.is_some(),
            problem,
        }
    }

    fn lines(&self) -> Vec<String> {
        let unset = || "(not set)".to_string();
        let found = if self.config_found { "" } else { " (not found)" };

        let mut lines = vec![
            format!("Config file:  {}{found}", self.config_file),
            format!("Endpoint:     {}", self.endpoint.clone().unwrap_or_else(unset)),
            format!("Region:       {}", self.region),
            format!("Signature:    {}", self.signature),
            format!("Account ID:   {}", self.account_id.clone().unwrap_or_else(unset)),
            format!("Access key:   {}", self.access_key_id.clone().unwrap_or_else(unset)),
            format!(
                "Secret key:   {}",
                if self.secret_access_key_set { "(set)" } else { "(not set)" }
            ),
        ];
        if let Some(problem) = &self.problem {
            lines.push(format!("Problem:      {problem}"));
        }
        lines
    }
}

fn resolve_endpoint(r2: &R2Section) -> Result<Endpoint, Error> {
    match (&r2.endpoint_url, &r2.account_id) {
        (Some(url), _) => Endpoint::with_url(url.clone()),
        (None, Some(account_id)) => Endpoint::for_account(account_id),
        (None, None) => Err(Error::Config(
            "account id is not set (pass it as a flag, set R2_ACCOUNT_ID, or add it to the config file)"
                .into(),
        )),
    }
}

/// Keep the first four characters of an access key id
fn mask(value: &str) -> String {
    let visible: String = value.chars().take(4).collect();
    if visible.len() == value.len() {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}

/// Execute a config subcommand
pub fn execute(
    cmd: ConfigCommands,
    settings: &Settings,
    formatter: &Formatter,
    strict: bool,
) -> ExitCode {
    match cmd {
        ConfigCommands::Path => {
            if formatter.is_json() {
                formatter.json(&serde_json::json!({
                    "config_file": settings.config_path.display().to_string(),
                    "config_found": settings.config_found,
                }));
            } else {
                formatter.println(&settings.config_path.display().to_string());
            }
            ExitCode::Success
        }
        ConfigCommands::Show => {
            let view = ConfigView::new(settings);
            if formatter.is_json() {
                formatter.json(&view);
            } else {
                for line in view.lines() {
                    formatter.println(&line);
                }
            }
            check(settings, strict)
        }
    }
}

/// Whether these settings are complete enough to build a connection
pub fn check(settings: &Settings, strict: bool) -> ExitCode {
    match settings.r2.clone().into_connection() {
        Ok(_) => ExitCode::Success,
        Err(e) => failure_code(&e, strict),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn settings(r2: R2Section) -> Settings {
        Settings {
            config_path: PathBuf::from("/tmp/r2ls/config.toml"),
            config_found: false,
            r2,
        }
    }

    fn complete() -> R2Section {
        R2Section {
            account_id: Some("acct".into()),
            access_key_id: Some("AKIDEXAMPLE".into()),
            secret_access_key: Some("very-secret".into()),
            endpoint_url: None,
        }
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("AKIDEXAMPLE"), "AKID****");
        assert_eq!(mask("abc"), "****");
    }

    #[test]
    fn test_view_of_complete_settings() {
        let view = ConfigView::new(&settings(complete()));
        assert_eq!(
            view.endpoint.as_deref(),
            Some("https://acct.r2.cloudflarestorage.com")
        );
        assert_eq!(view.region, "auto");
        assert_eq!(view.signature, "v4");
        assert!(view.secret_access_key_set);
        assert!(view.problem.is_none());

        let text = view.lines().join("\n");
        assert!(text.contains("(not found)"));
        assert!(text.contains("AKID****"));
        assert!(!text.contains("very-secret"));
        assert!(!text.contains("AKIDEXAMPLE"));
    }

    #[test]
    fn test_view_reports_missing_account() {
        let mut r2 = complete();
        r2.account_id = None;
        let view = ConfigView::new(&settings(r2));

        assert!(view.endpoint.is_none());
        assert!(view.problem.unwrap().contains("R2_ACCOUNT_ID"));
    }

    #[test]
    fn test_view_json_never_contains_secret() {
        let json = serde_json::to_string(&ConfigView::new(&settings(complete()))).unwrap();
        assert!(!json.contains("very-secret"));
        assert!(json.contains("\"secret_access_key_set\":true"));
    }

    #[test]
    fn test_check() {
        assert_eq!(check(&settings(complete()), true), ExitCode::Success);
        assert_eq!(
            check(&settings(R2Section::default()), true),
            ExitCode::UsageError
        );
    }
}
