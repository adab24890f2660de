//! Elastic Beanstalk client wrapper behind the [`EnvironmentApi`] seam.

use async_trait::async_trait;
use aws_sdk_elasticbeanstalk::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_elasticbeanstalk::types::EnvironmentDescription;
use aws_sdk_elasticbeanstalk::Client;

use crate::error::{SyncError, SyncResult};
use crate::types::{EnvironmentRef, EnvironmentSnapshot, EnvironmentState};

/// The provider operations a sync run needs: observe one environment's
/// state, enumerate the platform catalog, and request a platform update.
#[async_trait]
pub trait EnvironmentApi: Send + Sync {
    /// All live (non-deleted) environments matching the reference.
    async fn describe_environments(
        &self,
        target: &EnvironmentRef,
    ) -> SyncResult<Vec<EnvironmentSnapshot>>;

    /// Solution stacks currently offered, in provider order.
    async fn list_solution_stacks(&self) -> SyncResult<Vec<String>>;

    /// Submits the platform update. Success means the request was accepted,
    /// not that the update completed.
    async fn request_platform_update(
        &self,
        target: &EnvironmentRef,
        solution_stack: &str,
    ) -> SyncResult<()>;
}

/// Production [`EnvironmentApi`] on top of the Elastic Beanstalk SDK client.
pub struct BeanstalkClient {
    client: Client,
}

impl BeanstalkClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EnvironmentApi for BeanstalkClient {
    async fn describe_environments(
        &self,
        target: &EnvironmentRef,
    ) -> SyncResult<Vec<EnvironmentSnapshot>> {
        let response = self
            .client
            .describe_environments()
            .application_name(&target.application)
            .environment_names(&target.environment)
            .include_deleted(false)
            .send()
            .await
            .map_err(|e| {
                SyncError::Api(format!(
                    "failed to describe environment \"{}\" in application \"{}\": {e}",
                    target.environment, target.application
                ))
            })?;
        Ok(response
            .environments()
            .iter()
            .map(snapshot_from_description)
            .collect())
    }

    async fn list_solution_stacks(&self) -> SyncResult<Vec<String>> {
        let response = self
            .client
            .list_available_solution_stacks()
            .send()
            .await
            .map_err(|e| SyncError::Api(format!("failed to list available solution stacks: {e}")))?;
        Ok(response.solution_stacks().to_vec())
    }

    async fn request_platform_update(
        &self,
        target: &EnvironmentRef,
        solution_stack: &str,
    ) -> SyncResult<()> {
        self.client
            .update_environment()
            .application_name(&target.application)
            .environment_name(&target.environment)
            .solution_stack_name(solution_stack)
            .send()
            .await
            .map_err(|e| match e {
                // The service turning the request down (environment busy,
                // stack not usable for updates) is reported with the
                // service's own message.
                SdkError::ServiceError(context) => {
                    let service_error = context.into_err();
                    let message = service_error
                        .message()
                        .map_or_else(|| service_error.to_string(), str::to_string);
                    SyncError::UpdateRejected(message)
                }
                other => SyncError::Api(format!(
                    "failed to request platform update for environment \"{}\": {other}",
                    target.environment
                )),
            })?;
        Ok(())
    }
}

/// Reduces the SDK's environment description to the fields a sync run reads.
fn snapshot_from_description(environment: &EnvironmentDescription) -> EnvironmentSnapshot {
    EnvironmentSnapshot {
        solution_stack: environment.solution_stack_name().map(str::to_string),
        state: environment.status().map_or_else(
            || EnvironmentState::Other("unknown".to_string()),
            |status| EnvironmentState::from(status.as_str()),
        ),
        health: environment
            .health()
            .map(|health| health.as_str().to_string()),
    }
}
