//! Core error types for mesh-launch

use std::path::PathBuf;
use thiserror::Error;

/// Malformed or missing operation flags
///
/// Always fatal and always raised before any node is contacted.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgumentError {
    /// `--channel` missing for an action that needs it
    #[error("--channel is required unless --stop is given")]
    MissingChannel,

    /// Simulation mode without a node count
    #[error("simulation mode requires a node count")]
    MissingNodeCount,

    /// Node count that is not a positive integer
    #[error("invalid node count: {0}")]
    InvalidNodeCount(String),

    /// Node count beyond the numbered host range
    #[error("node count {count} exceeds the maximum of {max}")]
    TooManyNodes { count: u32, max: u32 },

    /// Extra positional arguments in simulation mode
    #[error("simulation mode takes a single node count, got {0} arguments")]
    TooManyArguments(usize),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure to hand a plan to the operating system
///
/// Exit statuses of the dispatched commands are never errors; only a
/// spawn that could not happen at all ends up here.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The program could not be started
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
