//! mesh-core: Run configuration and command planning for mesh deployments
//!
//! This crate turns parsed operation flags into an immutable [`RunConfig`],
//! derives one [`CommandPlan`] per node and lifecycle action, and dispatches
//! plans through a [`CommandRunner`].

pub mod config;
pub mod error;
pub mod plan;
pub mod run;
pub mod runner;
pub mod traits;
pub mod types;

pub use error::{ArgumentError, ConfigError, RunnerError};
pub use plan::{CommandPlan, Destination, Planner};
pub use run::{RunConfig, RunOptions};
pub use runner::ProcessRunner;
pub use traits::CommandRunner;
pub use types::{Action, Mode, NodeTarget, Protocol};
