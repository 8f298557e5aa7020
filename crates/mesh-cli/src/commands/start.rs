//! Start command implementation

use mesh_core::{CommandRunner, NodeTarget, Planner};

use super::dispatch;
use crate::output::print_success;

/// Regenerate the configuration and (re)launch the router on every node
pub async fn start_command(runner: &dyn CommandRunner, planner: &Planner<'_>, nodes: &[NodeTarget]) {
    let protocol = planner.run().protocol;

    for node in nodes {
        let plan = planner.start(node);
        dispatch(runner, &plan).await;
        print_success(&format!("Started {} on {}", protocol, plan.destination));
    }
}
