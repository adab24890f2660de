//! The pipeline step itself: inspect, compare, resolve, update, wait.

use log::info;

use crate::aws::beanstalk::EnvironmentApi;
use crate::error::SyncResult;
use crate::expectation::StackExpectation;
use crate::types::{SyncDisposition, SyncReport, SyncRequest};

impl<A: EnvironmentApi> super::service::PlatformSyncService<A> {
    /// Runs one sync: checks the running solution stack against the
    /// expectation and triggers a managed platform update when it drifts.
    pub async fn sync(&self, request: &SyncRequest) -> SyncResult<SyncReport> {
        let current_stack = self.current_solution_stack(&request.target).await?;
        info!(
            "Environment \"{}\" in application \"{}\" is currently running solution stack \"{}\".",
            request.target.environment, request.target.application, current_stack
        );

        if request.expectation.is_satisfied_by(&current_stack) {
            info!("Solution stack name matches expectation, no update required.");
            return Ok(report(
                request,
                current_stack,
                None,
                SyncDisposition::UpToDate,
            ));
        }

        // A literal expectation names the target directly; only a pattern
        // needs resolving against the catalog.
        let target_stack = match &request.expectation {
            StackExpectation::Literal(name) => name.clone(),
            StackExpectation::Pattern(pattern) => self.resolve_target_stack(pattern).await?,
        };

        if request.dry_run {
            info!(
                "Dry run: environment \"{}\" would be updated to solution stack \"{}\".",
                request.target.environment, target_stack
            );
            return Ok(report(
                request,
                current_stack,
                Some(target_stack),
                SyncDisposition::DryRun,
            ));
        }

        info!(
            "Updating environment \"{}\" in application \"{}\" to solution stack \"{}\".",
            request.target.environment, request.target.application, target_stack
        );
        self.update_platform(&request.target, &target_stack, request.wait)
            .await?;
        info!("Update complete.");

        Ok(report(
            request,
            current_stack,
            Some(target_stack),
            SyncDisposition::Updated,
        ))
    }
}

fn report(
    request: &SyncRequest,
    current_stack: String,
    target_stack: Option<String>,
    disposition: SyncDisposition,
) -> SyncReport {
    SyncReport {
        application: request.target.application.clone(),
        environment: request.target.environment.clone(),
        current_stack,
        expected: request.expectation.as_str().to_string(),
        target_stack,
        disposition,
    }
}
