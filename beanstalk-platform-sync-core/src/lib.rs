//! # Beanstalk Platform Sync
//!
//! Core library for keeping an AWS Elastic Beanstalk environment on an
//! expected solution stack. One sync run:
//!
//! 1. Looks up the environment and the solution stack it is running.
//! 2. Compares that stack against the operator's expectation, either a
//!    literal name or a regex pattern.
//! 3. On drift, resolves the pattern against the available-stack catalog
//!    and triggers a managed platform update.
//! 4. Polls the environment until it settles on the target stack or the
//!    wait budget runs out.
//!
//! Every failure maps to a stable process exit code (see
//! [`error::exit_codes`]) so CI/CD pipelines can branch on the cause.

mod aws;
pub mod commands;
pub mod error;
mod expectation;
#[cfg(test)]
mod test_support;
mod types;

pub use aws::beanstalk::{BeanstalkClient, EnvironmentApi};
pub use aws::{AccessKeys, AwsSettings};
pub use commands::PlatformSyncService;
pub use error::{SyncError, SyncResult};
pub use expectation::StackExpectation;
pub use types::{
    EnvironmentRef, EnvironmentSnapshot, EnvironmentState, SyncDisposition, SyncReport,
    SyncRequest, WaitPolicy,
};
