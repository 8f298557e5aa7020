//! mesh-launch CLI
//!
//! Starts, stops and prepares the Click mesh router on testbed nodes over
//! ssh, or generates simulator configurations on this machine:
//!
//! ```text
//! mesh-launch --bp --channel=36 --rate=11 7 12 31
//! mesh-launch --stop 7 12 31
//! mesh-launch --ns --channel=36 3
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mesh_core::config::{self, LaunchConfig};
use mesh_core::{Mode, NodeTarget, Planner, ProcessRunner, RunConfig, RunOptions};
use mesh_launch::commands;
use mesh_launch::dry_run::DryRunRunner;
use mesh_launch::output::{format_plans, print_error, print_info, print_warning};

#[derive(Parser)]
#[command(name = "mesh-launch")]
#[command(
    author,
    version,
    about = "Configure and launch the mesh router on testbed nodes or the simulator"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Run the backpressure protocol instead of roofnet
    #[arg(long)]
    bp: bool,

    /// Generate simulator configurations locally; NODES is a node count
    #[arg(long)]
    ns: bool,

    /// Unload the wireless driver and stop the router
    #[arg(long)]
    kill: bool,

    /// Stop the router
    #[arg(long)]
    stop: bool,

    /// Pull, rebuild and reload the driver before starting
    #[arg(long)]
    prepare: bool,

    /// Wireless channel (required unless --stop)
    #[arg(long)]
    channel: Option<String>,

    /// Transmit rate, passed to the generator verbatim
    #[arg(long)]
    rate: Option<String>,

    /// Transmit power, passed to the generator verbatim
    #[arg(long)]
    power: Option<String>,

    /// Wired interface of the nodes [default: eth0]
    #[arg(long)]
    ethernet: Option<String>,

    /// Experiment id reported to the OML server [default: bp]
    #[arg(long)]
    exp_id: Option<String>,

    /// OML server; enables measurement reporting
    #[arg(long)]
    oml_server: Option<String>,

    /// Print the commands instead of running them
    #[arg(long)]
    dry_run: bool,

    /// Node numbers or host names, or a node count with --ns
    #[arg(value_name = "NODES")]
    nodes: Vec<String>,
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            backpressure: self.bp,
            simulation: self.ns,
            kill: self.kill,
            stop: self.stop,
            prepare: self.prepare,
            channel: self.channel.clone(),
            rate: self.rate.clone(),
            power: self.power.clone(),
            ethernet: self.ethernet.clone(),
            exp_id: self.exp_id.clone(),
            oml_server: self.oml_server.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // clap exits with 2 on usage errors; this tool uses 1
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Setup logging based on verbosity
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = load_launch_config(cli.config.as_ref())?;

    // Everything below must be valid before any node is contacted
    let resolved = RunConfig::resolve(cli.run_options(), &config.defaults)
        .and_then(|run| NodeTarget::resolve(run.mode, &cli.nodes).map(|nodes| (run, nodes)));
    let (run, nodes) = match resolved {
        Ok(resolved) => resolved,
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if nodes.is_empty() {
        print_warning("No nodes given; nothing to do");
        return Ok(());
    }

    tracing::info!(
        "{} {} on {} node(s), mode {:?}",
        run.action,
        run.protocol,
        nodes.len(),
        run.mode
    );

    let generator = match run.mode {
        Mode::Simulation => config.tools.local_generator(&executable_dir()?),
        Mode::Hardware => PathBuf::from(&config.tools.generator),
    };
    let planner = Planner::new(&run, &config);

    if cli.dry_run {
        let runner = DryRunRunner::new();
        commands::execute(&runner, &planner, &nodes, &generator).await;
        print_info("Dry run, nothing was executed:");
        println!("{}", format_plans(&runner.plans()));
    } else {
        let runner = ProcessRunner::new(config.remote.clone());
        commands::execute(&runner, &planner, &nodes, &generator).await;
    }

    Ok(())
}

/// Load the configuration file, falling back to defaults
///
/// An explicitly given file must load; a broken default file only warns.
fn load_launch_config(config_path: Option<&PathBuf>) -> Result<LaunchConfig> {
    if let Some(config_path) = config_path {
        return config::load_config(config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path));
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(config::load_config(&default_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config from {:?}: {}", default_path, e);
            LaunchConfig::default()
        }))
    } else {
        tracing::debug!("Using default configuration");
        Ok(LaunchConfig::default())
    }
}

/// Directory holding the running executable
fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the mesh-launch executable")?;
    Ok(exe.parent().map(Path::to_path_buf).unwrap_or_default())
}
