//! Launcher configuration file

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of `config.toml`
///
/// Every section is optional; missing values fall back to the testbed
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// How nodes are reached
    pub remote: RemoteConfig,

    /// External executables and paths on the nodes
    pub tools: ToolConfig,

    /// Defaults for flags not given on the command line
    pub defaults: DefaultsConfig,
}

/// Remote shell settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// ssh client executable
    pub ssh_program: String,

    /// Extra options placed before the host
    pub ssh_options: Vec<String>,

    /// Login user, if not the local default
    pub user: Option<String>,

    /// Prefix of numeric node host names
    pub host_prefix: String,

    /// Zero-padded width of the node number
    pub host_width: usize,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            ssh_program: "ssh".to_string(),
            ssh_options: vec!["-o".to_string(), "BatchMode=yes".to_string()],
            user: None,
            host_prefix: "node".to_string(),
            host_width: 3,
        }
    }
}

impl RemoteConfig {
    /// ssh destination for a host, with the user when one is configured
    pub fn destination(&self, host: &str) -> String {
        match &self.user {
            Some(user) => format!("{}@{}", user, host),
            None => host.to_string(),
        }
    }
}

/// Executables, source trees and scratch paths
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Configuration generator. Run as-is on nodes; in simulation mode a
    /// relative path is resolved against the launcher's own directory.
    pub generator: String,

    /// Router executable started on nodes
    pub router: String,

    /// Process name matched by `killall`
    pub router_process: String,

    /// Directory holding generated configurations
    pub temp_dir: String,

    /// File name prefix of generated configurations
    pub temp_prefix: String,

    /// Source trees refreshed with `git pull` during prepare
    pub source_trees: Vec<String>,

    /// Tree rebuilt with `make` during prepare
    pub build_tree: String,

    /// Wireless driver kernel module
    pub driver_module: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            generator: "gen-config.py".to_string(),
            router: "click".to_string(),
            router_process: "click".to_string(),
            temp_dir: "/tmp".to_string(),
            temp_prefix: "bp-".to_string(),
            source_trees: vec!["click".to_string(), "backpressure".to_string()],
            build_tree: "click".to_string(),
            driver_module: "ath9k".to_string(),
        }
    }
}

impl ToolConfig {
    /// Generated configuration file for a node
    pub fn config_file(&self, node: &impl std::fmt::Display) -> String {
        format!(
            "{}/{}{}.click",
            self.temp_dir.trim_end_matches('/'),
            self.temp_prefix,
            node
        )
    }

    /// Generator used in simulation mode
    ///
    /// Relative paths are taken relative to `base`, normally the directory
    /// holding the launcher executable.
    pub fn local_generator(&self, base: &Path) -> PathBuf {
        let generator = Path::new(&self.generator);
        if generator.is_absolute() {
            generator.to_path_buf()
        } else {
            base.join(generator)
        }
    }
}

/// Fallbacks for optional flags
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Wired interface used to address nodes in hardware mode
    pub ethernet: String,

    /// Experiment id reported to the telemetry server
    pub exp_id: String,

    /// Telemetry (OML) server
    pub oml_server: Option<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            ethernet: "eth0".to_string(),
            exp_id: "bp".to_string(),
            oml_server: None,
        }
    }
}
