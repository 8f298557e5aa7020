//! Simulator configuration generation

use std::path::Path;

use mesh_core::{CommandRunner, NodeTarget, Planner};

use super::dispatch;
use crate::output::print_success;

/// Generate a simulator configuration for every node on this machine
///
/// Only the first node keeps the generator's diagnostics and reports
/// completion; the rest would just repeat them.
pub async fn simulate_command(
    runner: &dyn CommandRunner,
    planner: &Planner<'_>,
    nodes: &[NodeTarget],
    generator: &Path,
) {
    for (i, node) in nodes.iter().enumerate() {
        let first = i == 0;
        let plan = planner.simulated(node, generator, !first);
        dispatch(runner, &plan).await;

        if first {
            print_success(&format!(
                "Generated {} configuration for node {} in {}",
                planner.run().protocol,
                node,
                planner.config_file(node)
            ));
        }
    }
}
