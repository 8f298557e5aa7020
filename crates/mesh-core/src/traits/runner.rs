//! Command dispatch trait

use async_trait::async_trait;

use crate::error::RunnerError;
use crate::plan::CommandPlan;

/// Executes command plans
///
/// Implementations run a plan to completion of the dispatching shell and
/// report its exit code. Callers treat the code as informational only.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a plan and return the exit code of the dispatching process
    ///
    /// `-1` stands for termination by a signal.
    async fn run(&self, plan: &CommandPlan) -> Result<i32, RunnerError>;
}
