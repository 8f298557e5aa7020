//! Prepare command implementation

use mesh_core::{CommandRunner, NodeTarget, Planner};

use super::dispatch;
use crate::output::{print_info, print_success};

/// Update, rebuild and reload the driver, then start, one node at a time
pub async fn prepare_command(
    runner: &dyn CommandRunner,
    planner: &Planner<'_>,
    nodes: &[NodeTarget],
) {
    let protocol = planner.run().protocol;

    for node in nodes {
        let prepare = planner.prepare(node);
        print_info(&format!("Updating {}...", prepare.destination));
        dispatch(runner, &prepare).await;

        let start = planner.start(node);
        dispatch(runner, &start).await;
        print_success(&format!(
            "Prepared and started {} on {}",
            protocol, start.destination
        ));
    }
}
