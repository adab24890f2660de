//! In-memory [`EnvironmentApi`] for exercising command logic without AWS.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::aws::beanstalk::EnvironmentApi;
use crate::error::{SyncError, SyncResult};
use crate::types::{EnvironmentRef, EnvironmentSnapshot, EnvironmentState};

/// Scripted fake: describe responses are consumed in order and the last one
/// repeats, so wait loops can poll past the end of the script.
#[derive(Clone, Default)]
pub(crate) struct FakeEnvironmentApi {
    inner: Arc<FakeState>,
}

#[derive(Default)]
struct FakeState {
    describe_script: Mutex<VecDeque<Vec<EnvironmentSnapshot>>>,
    last_described: Mutex<Option<Vec<EnvironmentSnapshot>>>,
    stacks: Mutex<Vec<String>>,
    rejection: Mutex<Option<String>>,
    update_calls: Mutex<Vec<(EnvironmentRef, String)>>,
    describe_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl FakeEnvironmentApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues one describe response.
    pub(crate) fn queue_environments(&self, environments: Vec<EnvironmentSnapshot>) {
        self.inner
            .describe_script
            .lock()
            .unwrap()
            .push_back(environments);
    }

    pub(crate) fn set_stacks(&self, stacks: &[&str]) {
        *self.inner.stacks.lock().unwrap() = stacks.iter().map(|s| (*s).to_string()).collect();
    }

    /// Makes every update request fail with the given service message.
    pub(crate) fn reject_updates(&self, message: &str) {
        *self.inner.rejection.lock().unwrap() = Some(message.to_string());
    }

    pub(crate) fn update_calls(&self) -> Vec<(EnvironmentRef, String)> {
        self.inner.update_calls.lock().unwrap().clone()
    }

    pub(crate) fn describe_calls(&self) -> usize {
        self.inner.describe_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.inner.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EnvironmentApi for FakeEnvironmentApi {
    async fn describe_environments(
        &self,
        _target: &EnvironmentRef,
    ) -> SyncResult<Vec<EnvironmentSnapshot>> {
        self.inner.describe_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.inner.describe_script.lock().unwrap().pop_front();
        if let Some(environments) = next {
            *self.inner.last_described.lock().unwrap() = Some(environments.clone());
            Ok(environments)
        } else {
            Ok(self
                .inner
                .last_described
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_default())
        }
    }

    async fn list_solution_stacks(&self) -> SyncResult<Vec<String>> {
        self.inner.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.inner.stacks.lock().unwrap().clone())
    }

    async fn request_platform_update(
        &self,
        target: &EnvironmentRef,
        solution_stack: &str,
    ) -> SyncResult<()> {
        if let Some(message) = self.inner.rejection.lock().unwrap().clone() {
            return Err(SyncError::UpdateRejected(message));
        }
        self.inner
            .update_calls
            .lock()
            .unwrap()
            .push((target.clone(), solution_stack.to_string()));
        Ok(())
    }
}

/// Snapshot with the given state and stack, healthy by default.
pub(crate) fn environment(
    state: EnvironmentState,
    solution_stack: Option<&str>,
) -> EnvironmentSnapshot {
    EnvironmentSnapshot {
        solution_stack: solution_stack.map(str::to_string),
        state,
        health: Some("Green".to_string()),
    }
}

pub(crate) fn ready(solution_stack: &str) -> EnvironmentSnapshot {
    environment(EnvironmentState::Ready, Some(solution_stack))
}

pub(crate) fn updating(solution_stack: &str) -> EnvironmentSnapshot {
    environment(EnvironmentState::Updating, Some(solution_stack))
}
