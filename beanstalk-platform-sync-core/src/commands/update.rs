//! Platform update orchestration: trigger, then wait for the environment to
//! settle.

use log::{debug, info};
use tokio::time::{sleep, Instant};

use crate::aws::beanstalk::EnvironmentApi;
use crate::error::{SyncError, SyncResult};
use crate::types::{EnvironmentRef, EnvironmentSnapshot, EnvironmentState, WaitPolicy};

impl<A: EnvironmentApi> super::service::PlatformSyncService<A> {
    /// Triggers the platform update and blocks until the environment settles
    /// on the target stack or the wait budget runs out.
    pub async fn update_platform(
        &self,
        target: &EnvironmentRef,
        solution_stack: &str,
        policy: WaitPolicy,
    ) -> SyncResult<EnvironmentSnapshot> {
        self.api
            .request_platform_update(target, solution_stack)
            .await?;
        info!(
            "Update triggered, waiting up to {} seconds for the update to finish.",
            policy.max_wait.as_secs()
        );
        self.await_platform_update(target, solution_stack, policy)
            .await
    }

    /// Polls until the environment reports `Ready` on the target stack.
    ///
    /// A poll may start any time up to and including the deadline; each
    /// sleep is clamped to the remaining budget so the loop takes one last
    /// look at the deadline itself instead of giving up a whole delay
    /// interval early.
    async fn await_platform_update(
        &self,
        target: &EnvironmentRef,
        solution_stack: &str,
        policy: WaitPolicy,
    ) -> SyncResult<EnvironmentSnapshot> {
        let deadline = Instant::now() + policy.max_wait;
        let mut last_state: Option<EnvironmentState> = None;
        // DescribeEnvironments can race the trigger and still show Ready on
        // the old stack; only after an in-progress state has been seen does
        // Ready on the wrong stack mean the update was rolled back.
        let mut update_observed = false;

        loop {
            let mut environments = self.api.describe_environments(target).await?;
            if environments.is_empty() {
                return Err(SyncError::UpdateFailed(format!(
                    "environment \"{}\" is no longer visible",
                    target.environment
                )));
            }
            let environment = environments.remove(0);

            if last_state.as_ref() != Some(&environment.state) {
                info!(
                    "Environment \"{}\" is {}.",
                    target.environment, environment.state
                );
                last_state = Some(environment.state.clone());
            }

            match environment.state {
                EnvironmentState::Ready => {
                    if environment.solution_stack.as_deref() == Some(solution_stack) {
                        return Ok(environment);
                    }
                    if update_observed {
                        return Err(SyncError::UpdateFailed(format!(
                            "environment \"{}\" settled on \"{}\" instead of \"{}\" (health: {})",
                            target.environment,
                            environment.solution_stack.as_deref().unwrap_or("none"),
                            solution_stack,
                            environment.health.as_deref().unwrap_or("unknown")
                        )));
                    }
                    debug!("Update not visible yet, continuing to poll.");
                }
                EnvironmentState::Terminating | EnvironmentState::Terminated => {
                    return Err(SyncError::UpdateFailed(format!(
                        "environment \"{}\" is {}",
                        target.environment, environment.state
                    )));
                }
                _ => update_observed = true,
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(SyncError::UpdateTimedOut {
                    waited: policy.max_wait,
                });
            }
            sleep(policy.poll_delay.min(deadline - now)).await;
        }
    }
}
