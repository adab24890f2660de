//! Pattern resolution against the available solution stack catalog.

use log::info;
use regex::Regex;

use crate::aws::beanstalk::EnvironmentApi;
use crate::error::{SyncError, SyncResult};

impl<A: EnvironmentApi> super::service::PlatformSyncService<A> {
    /// The first available solution stack whose name matches `pattern`.
    ///
    /// "First" follows the order the provider returns the catalog in; that
    /// order is provider-defined, not alphabetic or version-sorted. When
    /// nothing matches, the whole catalog is logged before failing so the
    /// pattern can be fixed without another round trip.
    pub async fn resolve_target_stack(&self, pattern: &Regex) -> SyncResult<String> {
        let stacks = self.api.list_solution_stacks().await?;
        if let Some(stack) = stacks.iter().find(|stack| pattern.is_match(stack)) {
            return Ok(stack.clone());
        }

        info!("The following solution stacks are available:");
        for stack in &stacks {
            info!("- {stack}");
        }
        Err(SyncError::NoMatchingStack {
            pattern: pattern.as_str().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use crate::commands::PlatformSyncService;
    use crate::error::SyncError;
    use crate::test_support::FakeEnvironmentApi;

    #[tokio::test]
    async fn test_picks_the_first_match_in_catalog_order() {
        let api = FakeEnvironmentApi::new();
        api.set_stacks(&[
            "64bit Amazon Linux 2 v5.9.0 running Node.js 20",
            "64bit Amazon Linux 2 v5.8.0 running Node.js 18",
            "64bit Amazon Linux 2 v5.7.0 running Node.js 18",
        ]);
        let service = PlatformSyncService::with_api(api);

        let pattern = Regex::new("Node\\.js 18").unwrap();
        let stack = service.resolve_target_stack(&pattern).await.unwrap();
        assert_eq!(stack, "64bit Amazon Linux 2 v5.8.0 running Node.js 18");
    }

    #[tokio::test]
    async fn test_no_match_names_the_pattern() {
        let api = FakeEnvironmentApi::new();
        api.set_stacks(&["64bit Amazon Linux 2 v3.4.0 running Python 3.8"]);
        let service = PlatformSyncService::with_api(api);

        let pattern = Regex::new("Node\\.js 18").unwrap();
        let err = service.resolve_target_stack(&pattern).await.unwrap_err();
        match err {
            SyncError::NoMatchingStack { pattern } => assert_eq!(pattern, "Node\\.js 18"),
            other => panic!("expected NoMatchingStack, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_catalog_never_matches() {
        let api = FakeEnvironmentApi::new();
        let service = PlatformSyncService::with_api(api);

        let pattern = Regex::new(".*").unwrap();
        let err = service.resolve_target_stack(&pattern).await.unwrap_err();
        assert!(matches!(err, SyncError::NoMatchingStack { .. }));
    }
}
