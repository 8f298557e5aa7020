//! CLI command implementations
//!
//! Every command walks the node list in order and hands one plan per node to
//! the runner, waiting for each dispatch before moving on. Outcomes on the
//! nodes are not inspected.

mod kill;
mod prepare;
mod simulate;
mod start;
mod stop;

pub use kill::kill_command;
pub use prepare::prepare_command;
pub use simulate::simulate_command;
pub use start::start_command;
pub use stop::stop_command;

use std::path::Path;

use mesh_core::{Action, CommandPlan, CommandRunner, Mode, NodeTarget, Planner};

use crate::output::print_warning;

/// Run the configured action on every node
///
/// `generator` is the local generator, used only in simulation mode.
pub async fn execute(
    runner: &dyn CommandRunner,
    planner: &Planner<'_>,
    nodes: &[NodeTarget],
    generator: &Path,
) {
    let run = planner.run();
    match (run.mode, run.action) {
        (Mode::Simulation, action) if action.starts() => {
            if action == Action::Prepare {
                print_warning("--prepare only updates testbed nodes; generating without it");
            }
            simulate_command(runner, planner, nodes, generator).await
        }
        (Mode::Simulation, action) => {
            print_warning(&format!(
                "--{} has no effect in simulation mode; nothing to do",
                action
            ));
        }
        (Mode::Hardware, Action::Start) => start_command(runner, planner, nodes).await,
        (Mode::Hardware, Action::Prepare) => prepare_command(runner, planner, nodes).await,
        (Mode::Hardware, Action::Stop) => stop_command(runner, planner, nodes).await,
        (Mode::Hardware, Action::Kill) => kill_command(runner, planner, nodes).await,
    }
}

/// Hand a plan to the runner without acting on the result
async fn dispatch(runner: &dyn CommandRunner, plan: &CommandPlan) {
    match runner.run(plan).await {
        Ok(code) if code != 0 => {
            tracing::debug!("{} returned {} (ignored)", plan.destination, code);
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!("Could not dispatch to {}: {}", plan.destination, e);
        }
    }
}
