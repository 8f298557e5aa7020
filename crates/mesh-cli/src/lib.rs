//! mesh-launch: Command-line interface for mesh router deployments
//!
//! Provides the `mesh-launch` CLI that starts, stops and prepares the Click
//! router on testbed nodes, or generates simulator configurations locally.

pub mod commands;
pub mod dry_run;
pub mod output;
