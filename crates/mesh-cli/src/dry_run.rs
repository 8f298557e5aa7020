//! Runner that records plans instead of executing them

use std::sync::Mutex;

use async_trait::async_trait;
use mesh_core::error::RunnerError;
use mesh_core::{CommandPlan, CommandRunner};

/// Collects every plan it is asked to run
#[derive(Default)]
pub struct DryRunRunner {
    plans: Mutex<Vec<CommandPlan>>,
}

impl DryRunRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans received so far, in dispatch order
    pub fn plans(&self) -> Vec<CommandPlan> {
        self.plans
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl CommandRunner for DryRunRunner {
    async fn run(&self, plan: &CommandPlan) -> Result<i32, RunnerError> {
        tracing::debug!("Dry run, not dispatching to {}", plan.destination);
        self.plans
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(plan.clone());
        Ok(0)
    }
}
