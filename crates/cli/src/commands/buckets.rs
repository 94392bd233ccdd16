//! buckets command - List the buckets of the configured account
//!
//! Makes exactly one ListBuckets request. Every failure, from a missing
//! credential to a rejected signature, ends up as one `Error: ...` line.

use clap::Args;
use r2ls_core::{ListOutcome, R2Section, Result, list_buckets};
use r2ls_s3::S3Client;

use super::{Settings, failure_code};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, Spinner};

/// List buckets
#[derive(Args, Debug, Default)]
pub struct BucketsArgs {
    /// Show a table with creation dates
    #[arg(short, long)]
    pub long: bool,
}

/// Execute the buckets command
pub async fn execute(
    args: BucketsArgs,
    settings: Settings,
    formatter: &Formatter,
    strict: bool,
) -> ExitCode {
    let outcome = match connect(settings.r2).await {
        Ok(client) => {
            let spinner = Spinner::start(formatter.config(), "Listing buckets...");
            let outcome = list_buckets(&client).await;
            spinner.finish_and_clear();
            outcome
        }
        Err(e) => ListOutcome::Failed(e),
    };

    report(&outcome, formatter, args.long, strict)
}

async fn connect(r2: R2Section) -> Result<S3Client> {
    let connection = r2.into_connection()?;
    tracing::debug!(
        endpoint = %connection.endpoint.url,
        access_key_id = %connection.credentials.access_key_id,
        "resolved connection"
    );
    S3Client::new(&connection).await
}

/// Print an outcome and pick the exit code
pub fn report(outcome: &ListOutcome, formatter: &Formatter, long: bool, strict: bool) -> ExitCode {
    formatter.outcome(outcome, long);
    match outcome {
        ListOutcome::Buckets(_) => ExitCode::Success,
        ListOutcome::Failed(e) => failure_code(e, strict),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputConfig;
    use r2ls_core::{BucketInfo, Error};

    fn quiet() -> Formatter {
        Formatter::new(OutputConfig {
            quiet: true,
            ..Default::default()
        })
    }

    #[test]
    fn test_report_success() {
        let outcome = ListOutcome::Buckets(vec![BucketInfo::new("alpha")]);
        assert_eq!(report(&outcome, &quiet(), false, true), ExitCode::Success);
    }

    #[test]
    fn test_report_failure_exit_codes() {
        let outcome = ListOutcome::Failed(Error::Auth("AccessDenied".into()));
        assert_eq!(report(&outcome, &quiet(), false, false), ExitCode::Success);
        assert_eq!(report(&outcome, &quiet(), false, true), ExitCode::AuthError);
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_any_request() {
        let err = connect(R2Section::default()).await.err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_invalid_endpoint_is_config_failure() {
        let r2 = R2Section {
            access_key_id: Some("key".into()),
            secret_access_key: Some("secret".into()),
            endpoint_url: Some("ftp://nowhere".into()),
            ..Default::default()
        };
        let err = connect(r2).await.err().unwrap();
        assert_eq!(ExitCode::from_error(&err), ExitCode::UsageError);
    }
}
