//! Process-backed command runner
//!
//! Remote plans go through the configured ssh client, one connection per
//! plan. Local plans go through `sh -c`.

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::RemoteConfig;
use crate::error::RunnerError;
use crate::plan::{CommandPlan, Destination};
use crate::traits::CommandRunner;

/// Runs plans as child processes of the launcher
pub struct ProcessRunner {
    remote: RemoteConfig,
}

impl ProcessRunner {
    pub fn new(remote: RemoteConfig) -> Self {
        Self { remote }
    }

    /// Build the child process for a plan without starting it
    pub fn command(&self, plan: &CommandPlan) -> Command {
        match &plan.destination {
            Destination::Remote { host } => {
                let mut cmd = Command::new(&self.remote.ssh_program);
                cmd.args(&self.remote.ssh_options)
                    .arg(self.remote.destination(host))
                    .arg(&plan.command);
                cmd
            }
            Destination::Local => {
                let mut cmd = Command::new("sh");
                cmd.arg("-c").arg(&plan.command);
                cmd
            }
        }
    }

    fn program(&self, plan: &CommandPlan) -> &str {
        match plan.destination {
            Destination::Remote { .. } => self.remote.ssh_program.as_str(),
            Destination::Local => "sh",
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, plan: &CommandPlan) -> Result<i32, RunnerError> {
        tracing::debug!("Dispatching to {}: {}", plan.destination, plan.command);

        let status = self
            .command(plan)
            .status()
            .await
            .map_err(|source| RunnerError::Spawn {
                program: self.program(plan).to_string(),
                source,
            })?;

        let code = status.code().unwrap_or(-1);
        tracing::debug!("{} exited with {}", plan.destination, code);
        Ok(code)
    }
}
