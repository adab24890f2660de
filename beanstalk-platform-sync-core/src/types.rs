//! Shared data types for a single sync run.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::expectation::StackExpectation;

/// Names exactly one deployed environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentRef {
    pub application: String,
    pub environment: String,
}

impl EnvironmentRef {
    pub fn new(application: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            environment: environment.into(),
        }
    }
}

/// Environment lifecycle states as reported by DescribeEnvironments.
///
/// `Other` carries states this tool has no special handling for, so new
/// service-side states degrade to "still in progress" instead of breaking
/// the wait loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentState {
    Launching,
    Updating,
    Ready,
    Aborting,
    Terminating,
    Terminated,
    Other(String),
}

impl From<&str> for EnvironmentState {
    fn from(status: &str) -> Self {
        match status {
            "Launching" => Self::Launching,
            "Updating" => Self::Updating,
            "Ready" => Self::Ready,
            "Aborting" => Self::Aborting,
            "Terminating" => Self::Terminating,
            "Terminated" => Self::Terminated,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EnvironmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Launching => "Launching",
            Self::Updating => "Updating",
            Self::Ready => "Ready",
            Self::Aborting => "Aborting",
            Self::Terminating => "Terminating",
            Self::Terminated => "Terminated",
            Self::Other(status) => status.as_str(),
        };
        f.write_str(name)
    }
}

/// One DescribeEnvironments observation of an environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    pub solution_stack: Option<String>,
    pub state: EnvironmentState,
    pub health: Option<String>,
}

/// Bounds for the wait after an update has been triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Total budget between trigger and the last status poll.
    pub max_wait: Duration,
    /// Pause between polls; the final pause is clamped to the remaining
    /// budget so the deadline itself still gets a poll.
    pub poll_delay: Duration,
}

impl WaitPolicy {
    pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(300);
    pub const DEFAULT_POLL_DELAY: Duration = Duration::from_secs(30);
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            max_wait: Self::DEFAULT_MAX_WAIT,
            poll_delay: Self::DEFAULT_POLL_DELAY,
        }
    }
}

/// Inputs for one sync run.
#[derive(Debug)]
pub struct SyncRequest {
    pub target: EnvironmentRef,
    pub expectation: StackExpectation,
    pub wait: WaitPolicy,
    /// Resolve the update target but stop before triggering anything.
    pub dry_run: bool,
}

/// How a successful run concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncDisposition {
    /// The running stack already satisfied the expectation.
    UpToDate,
    /// An update would have been triggered; the dry run stopped short of it.
    DryRun,
    /// The platform update completed within the wait budget.
    Updated,
}

/// Machine-readable summary of one completed run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub application: String,
    pub environment: String,
    /// Stack the environment was running when the run started.
    pub current_stack: String,
    /// Raw expectation text, literal name or pattern.
    pub expected: String,
    /// Stack the run updated (or would update) to; absent when up to date.
    pub target_stack: Option<String>,
    pub disposition: SyncDisposition,
}
