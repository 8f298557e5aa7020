//! Kill command implementation

use mesh_core::{CommandRunner, NodeTarget, Planner};

use super::dispatch;
use crate::output::print_success;

/// Unload the wireless driver and stop the router on every node
pub async fn kill_command(runner: &dyn CommandRunner, planner: &Planner<'_>, nodes: &[NodeTarget]) {
    for node in nodes {
        let plan = planner.kill(node);
        dispatch(runner, &plan).await;
        print_success(&format!("Killed {}", plan.destination));
    }
}
