//! Environment inspection: which solution stack is currently deployed.

use log::debug;

use crate::aws::beanstalk::EnvironmentApi;
use crate::error::{SyncError, SyncResult};
use crate::types::EnvironmentRef;

impl<A: EnvironmentApi> super::service::PlatformSyncService<A> {
    /// The solution stack the environment is currently running.
    ///
    /// Exactly one live environment must match the reference; zero, several,
    /// or one without a stack name each fail with their own error so
    /// pipelines can branch on the cause.
    pub async fn current_solution_stack(&self, target: &EnvironmentRef) -> SyncResult<String> {
        if target.application.is_empty() || target.environment.is_empty() {
            return Err(SyncError::InvalidConfiguration(
                "application name and environment name must not be empty".to_string(),
            ));
        }

        let mut environments = self.api.describe_environments(target).await?;
        match environments.len() {
            0 => Err(SyncError::EnvironmentNotFound {
                application: target.application.clone(),
                environment: target.environment.clone(),
            }),
            1 => {
                let environment = environments.remove(0);
                debug!(
                    "Environment \"{}\" is {} (health: {})",
                    target.environment,
                    environment.state,
                    environment.health.as_deref().unwrap_or("unknown")
                );
                environment
                    .solution_stack
                    .ok_or_else(|| SyncError::MissingSolutionStack {
                        application: target.application.clone(),
                        environment: target.environment.clone(),
                    })
            }
            count => Err(SyncError::AmbiguousEnvironment {
                application: target.application.clone(),
                environment: target.environment.clone(),
                count,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::PlatformSyncService;
    use crate::error::SyncError;
    use crate::test_support::{environment, ready, FakeEnvironmentApi};
    use crate::types::{EnvironmentRef, EnvironmentState};

    fn target() -> EnvironmentRef {
        EnvironmentRef::new("shop", "shop-prod")
    }

    #[tokio::test]
    async fn test_reports_the_running_stack() {
        let api = FakeEnvironmentApi::new();
        api.queue_environments(vec![ready("64bit Amazon Linux 2 v5.8.0 running Node.js 18")]);
        let service = PlatformSyncService::with_api(api);

        let stack = service.current_solution_stack(&target()).await.unwrap();
        assert_eq!(stack, "64bit Amazon Linux 2 v5.8.0 running Node.js 18");
    }

    #[tokio::test]
    async fn test_no_matching_environment_is_not_found() {
        let api = FakeEnvironmentApi::new();
        api.queue_environments(vec![]);
        let service = PlatformSyncService::with_api(api);

        let err = service.current_solution_stack(&target()).await.unwrap_err();
        match err {
            SyncError::EnvironmentNotFound {
                application,
                environment,
            } => {
                assert_eq!(application, "shop");
                assert_eq!(environment, "shop-prod");
            }
            other => panic!("expected EnvironmentNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_multiple_matches_are_ambiguous() {
        let api = FakeEnvironmentApi::new();
        api.queue_environments(vec![ready("stack-a"), ready("stack-b"), ready("stack-c")]);
        let service = PlatformSyncService::with_api(api);

        let err = service.current_solution_stack(&target()).await.unwrap_err();
        match err {
            SyncError::AmbiguousEnvironment { count, .. } => assert_eq!(count, 3),
            other => panic!("expected AmbiguousEnvironment, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_environment_without_stack_name_is_rejected() {
        let api = FakeEnvironmentApi::new();
        api.queue_environments(vec![environment(EnvironmentState::Ready, None)]);
        let service = PlatformSyncService::with_api(api);

        let err = service.current_solution_stack(&target()).await.unwrap_err();
        assert!(matches!(err, SyncError::MissingSolutionStack { .. }));
    }

    #[tokio::test]
    async fn test_empty_names_fail_before_any_api_call() {
        let api = FakeEnvironmentApi::new();
        let service = PlatformSyncService::with_api(api.clone());

        let err = service
            .current_solution_stack(&EnvironmentRef::new("", "shop-prod"))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::InvalidConfiguration(_)));
        assert_eq!(api.describe_calls(), 0);
    }
}
