//! Core domain types

use std::fmt;

use crate::error::ArgumentError;

/// Routing protocol run by the forwarding process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    /// Backpressure scheduling
    Backpressure,
    /// Roofnet ETX routing
    #[default]
    Roofnet,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Backpressure => write!(f, "backpressure"),
            Protocol::Roofnet => write!(f, "roofnet"),
        }
    }
}

/// Where nodes live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Real testbed nodes reached over ssh
    #[default]
    Hardware,
    /// Local configuration generation for the simulator
    Simulation,
}

/// Lifecycle action applied to every node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Launch the router
    #[default]
    Start,
    /// Force-kill the router
    Stop,
    /// Unload the wireless driver, then stop
    Kill,
    /// Update, rebuild and reload the driver, then start
    Prepare,
}

impl Action {
    /// Resolve the action from the mutually overriding flags
    ///
    /// `--kill` wins over `--stop`, which wins over `--prepare`.
    pub fn from_flags(kill: bool, stop: bool, prepare: bool) -> Self {
        match (kill, stop, prepare) {
            (true, _, _) => Action::Kill,
            (false, true, _) => Action::Stop,
            (false, false, true) => Action::Prepare,
            _ => Action::Start,
        }
    }

    /// Whether this action launches the router
    pub fn starts(&self) -> bool {
        matches!(self, Action::Start | Action::Prepare)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Start => write!(f, "start"),
            Action::Stop => write!(f, "stop"),
            Action::Kill => write!(f, "kill"),
            Action::Prepare => write!(f, "prepare"),
        }
    }
}

/// Largest simulated node count, the span of three-digit node numbers
pub const MAX_SIMULATED_NODES: u32 = 999;

/// One mesh node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTarget {
    /// Simulator node, numbered from 1
    Index(u32),
    /// Testbed node as given on the command line
    Named(String),
}

impl NodeTarget {
    /// Resolve positional arguments into the ordered node list
    ///
    /// In simulation mode the single argument is a node count `N` and the
    /// result is `1..=N`. In hardware mode every argument is a node, verbatim.
    pub fn resolve(mode: Mode, args: &[String]) -> Result<Vec<NodeTarget>, ArgumentError> {
        match mode {
            Mode::Hardware => Ok(args.iter().cloned().map(NodeTarget::Named).collect()),
            Mode::Simulation => {
                let count = match args {
                    [] => return Err(ArgumentError::MissingNodeCount),
                    [count] => count,
                    _ => return Err(ArgumentError::TooManyArguments(args.len())),
                };
                let count: u32 = count
                    .trim()
                    .parse()
                    .map_err(|_| ArgumentError::InvalidNodeCount(count.clone()))?;
                if count > MAX_SIMULATED_NODES {
                    return Err(ArgumentError::TooManyNodes {
                        count,
                        max: MAX_SIMULATED_NODES,
                    });
                }
                Ok((1..=count).map(NodeTarget::Index).collect())
            }
        }
    }

    /// Host name used to reach this node
    ///
    /// Numeric identifiers become `prefix` + the number zero-padded to
    /// `width`; anything else is already a host name and is returned as-is,
    /// so applying this to its own output changes nothing.
    pub fn host_name(&self, prefix: &str, width: usize) -> String {
        match self {
            NodeTarget::Index(n) => format!("{prefix}{n:0width$}"),
            NodeTarget::Named(name) => match name.parse::<u32>() {
                Ok(n) => format!("{prefix}{n:0width$}"),
                Err(_) => name.clone(),
            },
        }
    }
}

impl fmt::Display for NodeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeTarget::Index(n) => write!(f, "{}", n),
            NodeTarget::Named(name) => write!(f, "{}", name),
        }
    }
}
