//! beanstalk-platform-sync: keep an Elastic Beanstalk environment on an
//! expected solution stack.
//!
//! Designed to run as a CI/CD pipeline step. The exit code is the contract:
//! 0 means the environment runs a stack matching the expectation (already,
//! or after a successful update); every failure cause has its own code so
//! pipelines can branch on it.

use std::process;
use std::time::Duration;

use beanstalk_platform_sync_core::error::exit_codes;
use beanstalk_platform_sync_core::{
    AccessKeys, AwsSettings, EnvironmentRef, PlatformSyncService, StackExpectation, SyncReport,
    SyncRequest, SyncResult, WaitPolicy,
};
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use log::error;

#[derive(Parser, Debug)]
#[command(
    name = "beanstalk-platform-sync",
    version,
    about = "Keep an Elastic Beanstalk environment on an expected solution stack",
    long_about = "Checks which solution stack an Elastic Beanstalk environment is running. \
                  If it does not match the expectation, triggers a managed platform update \
                  and waits for the environment to settle on the new stack."
)]
struct Cli {
    /// Application the environment belongs to
    #[arg(long, value_name = "NAME", value_parser = NonEmptyStringValueParser::new())]
    application_name: String,

    /// Environment whose platform is checked and updated
    #[arg(long, value_name = "NAME", value_parser = NonEmptyStringValueParser::new())]
    environment_name: String,

    /// AWS region the environment lives in
    #[arg(long, env = "AWS_REGION", value_name = "REGION", value_parser = NonEmptyStringValueParser::new())]
    region: String,

    /// Expected solution stack name, or a pattern with --match-regex
    #[arg(long, value_name = "STACK", value_parser = NonEmptyStringValueParser::new())]
    expected: String,

    /// Treat --expected as a regular expression; the first available stack
    /// matching it becomes the update target
    #[arg(long)]
    match_regex: bool,

    /// Seconds to wait for a triggered update to finish
    #[arg(long, value_name = "SECONDS", default_value_t = 300)]
    wait_time: u64,

    /// Seconds between status polls while waiting
    #[arg(long, value_name = "SECONDS", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    poll_delay: u64,

    /// Static AWS access key id; the default credential provider chain is
    /// used when no keys are given
    #[arg(
        long,
        env = "AWS_ACCESS_KEY_ID",
        value_name = "KEY",
        requires = "aws_secret_access_key"
    )]
    aws_access_key_id: Option<String>,

    /// Static AWS secret access key
    #[arg(
        long,
        env = "AWS_SECRET_ACCESS_KEY",
        value_name = "SECRET",
        hide_env_values = true,
        requires = "aws_access_key_id"
    )]
    aws_secret_access_key: Option<String>,

    /// Session token for temporary credentials
    #[arg(
        long,
        env = "AWS_SESSION_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true,
        requires = "aws_access_key_id"
    )]
    aws_session_token: Option<String>,

    /// Resolve the update target and report, but trigger nothing
    #[arg(long)]
    dry_run: bool,

    /// Print a JSON report of the run to stdout
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn access_keys(&self) -> Option<AccessKeys> {
        match (&self.aws_access_key_id, &self.aws_secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => Some(AccessKeys {
                access_key_id: access_key_id.clone(),
                secret_access_key: secret_access_key.clone(),
                session_token: self.aws_session_token.clone(),
            }),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = parse_cli();
    let json = cli.json;
    match run(cli).await {
        Ok(report) => {
            if json {
                match serde_json::to_string_pretty(&report) {
                    Ok(rendered) => println!("{rendered}"),
                    Err(e) => {
                        error!("failed to render report: {e}");
                        process::exit(exit_codes::OPERATION_FAILED);
                    }
                }
            }
        }
        Err(e) => {
            error!("{e}");
            process::exit(e.exit_code());
        }
    }
}

/// clap exits with 2 on usage errors by default, which collides with the
/// reserved ambiguous-environment code. Usage errors are remapped to the
/// configuration code; --help and --version stay exit 0.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                exit_codes::INVALID_CONFIGURATION
            } else {
                0
            };
            let _ = e.print();
            process::exit(code);
        }
    }
}

async fn run(cli: Cli) -> SyncResult<SyncReport> {
    // The expectation is compiled before any AWS call is made.
    let expectation = StackExpectation::parse(&cli.expected, cli.match_regex)?;
    let access_keys = cli.access_keys();

    let service = PlatformSyncService::connect(AwsSettings {
        region: cli.region,
        access_keys,
    })
    .await?;

    let request = SyncRequest {
        target: EnvironmentRef::new(cli.application_name, cli.environment_name),
        expectation,
        wait: WaitPolicy {
            max_wait: Duration::from_secs(cli.wait_time),
            poll_delay: Duration::from_secs(cli.poll_delay),
        },
        dry_run: cli.dry_run,
    };
    service.sync(&request).await
}
