//! Resolved run configuration

use crate::config::DefaultsConfig;
use crate::error::ArgumentError;
use crate::types::{Action, Mode, Protocol};

/// Raw operation flags as parsed from the command line
///
/// `None` means the flag was not given and the configured default applies.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub backpressure: bool,
    pub simulation: bool,
    pub kill: bool,
    pub stop: bool,
    pub prepare: bool,
    pub channel: Option<String>,
    pub rate: Option<String>,
    pub power: Option<String>,
    pub ethernet: Option<String>,
    pub exp_id: Option<String>,
    pub oml_server: Option<String>,
}

/// Immutable options shared by every node operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub protocol: Protocol,
    pub mode: Mode,
    pub action: Action,
    /// Empty only when stopping
    pub channel: String,
    /// Forwarded verbatim, empty when unset
    pub rate: String,
    /// Forwarded verbatim, empty when unset
    pub power: String,
    pub ethernet: String,
    pub exp_id: String,
    pub oml_server: Option<String>,
}

impl RunConfig {
    /// Resolve flags against configured defaults
    pub fn resolve(options: RunOptions, defaults: &DefaultsConfig) -> Result<Self, ArgumentError> {
        let action = Action::from_flags(options.kill, options.stop, options.prepare);
        let channel = options.channel.unwrap_or_default();

        if channel.is_empty() && action != Action::Stop {
            return Err(ArgumentError::MissingChannel);
        }

        Ok(Self {
            protocol: if options.backpressure {
                Protocol::Backpressure
            } else {
                Protocol::Roofnet
            },
            mode: if options.simulation {
                Mode::Simulation
            } else {
                Mode::Hardware
            },
            action,
            channel,
            rate: options.rate.unwrap_or_default(),
            power: options.power.unwrap_or_default(),
            ethernet: options
                .ethernet
                .unwrap_or_else(|| defaults.ethernet.clone()),
            exp_id: options.exp_id.unwrap_or_else(|| defaults.exp_id.clone()),
            oml_server: options
                .oml_server
                .or_else(|| defaults.oml_server.clone())
                .filter(|server| !server.is_empty()),
        })
    }

    /// Whether telemetry arguments are passed along
    pub fn telemetry_enabled(&self) -> bool {
        self.oml_server.is_some()
    }
}
