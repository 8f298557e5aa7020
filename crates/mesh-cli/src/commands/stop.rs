//! Stop command implementation

use mesh_core::{CommandRunner, NodeTarget, Planner};

use super::dispatch;
use crate::output::print_success;

/// Force-kill the router on every node
pub async fn stop_command(runner: &dyn CommandRunner, planner: &Planner<'_>, nodes: &[NodeTarget]) {
    for node in nodes {
        let plan = planner.stop(node);
        dispatch(runner, &plan).await;
        print_success(&format!("Stopped {}", plan.destination));
    }
}
