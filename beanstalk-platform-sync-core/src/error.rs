//! Error taxonomy and the process exit-code contract.

use std::time::Duration;

use thiserror::Error;

/// Exit codes reserved by the pipeline contract.
///
/// Codes 1 through 4 are load-bearing for callers that branch on the failure
/// cause. Codes 5 and 6 extend the sequence so configuration mistakes and
/// operational failures are distinguishable from the reserved causes.
pub mod exit_codes {
    /// No live environment matched the application/environment pair.
    pub const ENVIRONMENT_NOT_FOUND: i32 = 1;
    /// More than one live environment matched; the name is ambiguous.
    pub const AMBIGUOUS_ENVIRONMENT: i32 = 2;
    /// The environment exists but reports no solution stack name.
    pub const MISSING_SOLUTION_STACK: i32 = 3;
    /// No available solution stack matched the requested pattern.
    pub const NO_MATCHING_STACK: i32 = 4;
    /// Bad invocation: missing inputs, empty names, invalid pattern syntax.
    pub const INVALID_CONFIGURATION: i32 = 5;
    /// The update was rejected, failed, timed out, or an AWS call failed.
    pub const OPERATION_FAILED: i32 = 6;
}

/// Errors produced while syncing an environment onto the expected stack.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Inputs were rejected before any AWS call was made.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The expected-stack pattern did not compile.
    #[error("invalid expected-stack pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("no environment \"{environment}\" in application \"{application}\" found")]
    EnvironmentNotFound {
        application: String,
        environment: String,
    },

    #[error("found {count} environments named \"{environment}\" in application \"{application}\", expected exactly one")]
    AmbiguousEnvironment {
        application: String,
        environment: String,
        count: usize,
    },

    #[error("environment \"{environment}\" in application \"{application}\" does not have a solution stack name")]
    MissingSolutionStack {
        application: String,
        environment: String,
    },

    #[error("no solution stack with a name matching \"{pattern}\" found")]
    NoMatchingStack { pattern: String },

    /// The update request itself was turned down by the service.
    #[error("platform update request rejected: {0}")]
    UpdateRejected(String),

    /// The update started but the environment did not settle on the target.
    #[error("platform update failed: {0}")]
    UpdateFailed(String),

    #[error("environment did not finish updating within {} seconds", .waited.as_secs())]
    UpdateTimedOut { waited: Duration },

    /// Transport or service failure on any AWS call.
    #[error("AWS request failed: {0}")]
    Api(String),
}

impl SyncError {
    /// The process exit code this error maps to (see [`exit_codes`]).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfiguration(_) | Self::InvalidPattern { .. } => {
                exit_codes::INVALID_CONFIGURATION
            }
            Self::EnvironmentNotFound { .. } => exit_codes::ENVIRONMENT_NOT_FOUND,
            Self::AmbiguousEnvironment { .. } => exit_codes::AMBIGUOUS_ENVIRONMENT,
            Self::MissingSolutionStack { .. } => exit_codes::MISSING_SOLUTION_STACK,
            Self::NoMatchingStack { .. } => exit_codes::NO_MATCHING_STACK,
            Self::UpdateRejected(_)
            | Self::UpdateFailed(_)
            | Self::UpdateTimedOut { .. }
            | Self::Api(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type for platform sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
