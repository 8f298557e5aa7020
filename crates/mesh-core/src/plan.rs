//! Per-node command planning
//!
//! Every lifecycle action is turned into a single shell command string for
//! one node. Planning is pure: the same [`RunConfig`], [`LaunchConfig`] and
//! [`NodeTarget`] always produce the same [`CommandPlan`].
//!
//! Generator arguments are built from [`GENERATOR_RULES`], an ordered table
//! of `(predicate, formatter)` pairs. A rule contributes its arguments only
//! when its predicate holds, so optional flags such as `--rate` simply
//! disappear when unset and the order of the remaining ones never changes.

use std::fmt;
use std::path::Path;

use crate::config::LaunchConfig;
use crate::run::RunConfig;
use crate::types::{Mode, NodeTarget, Protocol};

/// Where a plan is executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Remote shell on a testbed host
    Remote { host: String },
    /// Local shell
    Local,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Remote { host } => write!(f, "{}", host),
            Destination::Local => write!(f, "local"),
        }
    }
}

/// Fully formatted command for one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    pub node: NodeTarget,
    pub destination: Destination,
    pub command: String,
}

/// One optional-argument rule
pub struct ArgRule {
    pub applies: fn(&RunConfig, &NodeTarget) -> bool,
    pub render: fn(&RunConfig, &NodeTarget) -> Vec<String>,
}

/// Generator arguments, in emission order
pub const GENERATOR_RULES: &[ArgRule] = &[
    // addressing
    ArgRule {
        applies: |run, _| run.mode == Mode::Hardware,
        render: |run, _| vec![format!("--dev={}", run.ethernet)],
    },
    ArgRule {
        applies: |run, _| run.mode == Mode::Simulation,
        render: |_, node| vec!["--ns".to_string(), format!("--id={}", node)],
    },
    ArgRule {
        applies: |_, _| true,
        render: |run, _| vec![format!("--channel={}", run.channel)],
    },
    ArgRule {
        applies: |run, _| run.protocol == Protocol::Backpressure,
        render: |_, _| vec!["--bp".to_string()],
    },
    ArgRule {
        applies: |run, _| !run.rate.is_empty(),
        render: |run, _| vec![format!("--rate={}", run.rate)],
    },
    ArgRule {
        applies: |run, _| !run.power.is_empty(),
        render: |run, _| vec![format!("--power={}", run.power)],
    },
    // on hardware the router gets these instead
    ArgRule {
        applies: |run, _| run.mode == Mode::Simulation && run.telemetry_enabled(),
        render: telemetry_args,
    },
];

/// Generator arguments for a node
pub fn generator_args(run: &RunConfig, node: &NodeTarget) -> Vec<String> {
    GENERATOR_RULES
        .iter()
        .filter(|rule| (rule.applies)(run, node))
        .flat_map(|rule| (rule.render)(run, node))
        .collect()
}

/// Experiment id, node id and server, or nothing without a server
pub fn telemetry_args(run: &RunConfig, node: &NodeTarget) -> Vec<String> {
    match &run.oml_server {
        Some(server) => vec![
            format!("--exp-id={}", run.exp_id),
            format!("--node-id={}", node),
            format!("--oml-server={}", server),
        ],
        None => Vec::new(),
    }
}

/// Quote a word for a POSIX shell when it needs it
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@,+%~".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

fn join_words<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    words
        .into_iter()
        .map(shell_quote)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds command plans for one run
pub struct Planner<'a> {
    run: &'a RunConfig,
    config: &'a LaunchConfig,
}

impl<'a> Planner<'a> {
    pub fn new(run: &'a RunConfig, config: &'a LaunchConfig) -> Self {
        Self { run, config }
    }

    /// Run configuration this planner was built for
    pub fn run(&self) -> &RunConfig {
        self.run
    }

    /// Host name of a testbed node
    pub fn host(&self, node: &NodeTarget) -> String {
        node.host_name(&self.config.remote.host_prefix, self.config.remote.host_width)
    }

    /// Generated configuration file of a node
    pub fn config_file(&self, node: &NodeTarget) -> String {
        self.config.tools.config_file(node)
    }

    fn remote(&self, node: &NodeTarget, steps: Vec<String>) -> CommandPlan {
        CommandPlan {
            node: node.clone(),
            destination: Destination::Remote {
                host: self.host(node),
            },
            command: steps.join("; "),
        }
    }

    fn generate(&self, generator: &str, node: &NodeTarget) -> String {
        let args = generator_args(self.run, node);
        let mut words = vec![generator];
        words.extend(args.iter().map(String::as_str));
        format!(
            "{} > {}",
            join_words(words),
            shell_quote(&self.config.tools.config_file(node))
        )
    }

    /// Pull both source trees, rebuild one, reload the driver
    pub fn prepare(&self, node: &NodeTarget) -> CommandPlan {
        let tools = &self.config.tools;
        let mut steps: Vec<String> = tools
            .source_trees
            .iter()
            .map(|tree| format!("(cd {} && git pull)", shell_quote(tree)))
            .collect();
        steps.push(format!("(cd {} && make)", shell_quote(&tools.build_tree)));
        steps.push(format!("rmmod {}", shell_quote(&tools.driver_module)));
        steps.push(format!("modprobe {}", shell_quote(&tools.driver_module)));
        self.remote(node, steps)
    }

    /// Replace any running router with a freshly generated one
    pub fn start(&self, node: &NodeTarget) -> CommandPlan {
        let tools = &self.config.tools;
        let config_file = tools.config_file(node);
        let telemetry = telemetry_args(self.run, node);

        let mut router = vec![tools.router.as_str(), config_file.as_str()];
        router.extend(telemetry.iter().map(String::as_str));

        self.remote(
            node,
            vec![
                format!("killall -9 {} 2>/dev/null", shell_quote(&tools.router_process)),
                self.generate(&tools.generator, node),
                format!(
                    "nohup {} > /dev/null 2>&1 < /dev/null &",
                    join_words(router)
                ),
            ],
        )
    }

    /// Force-kill the router
    pub fn stop(&self, node: &NodeTarget) -> CommandPlan {
        self.remote(node, vec![self.stop_step()])
    }

    /// Unload the driver, then stop
    pub fn kill(&self, node: &NodeTarget) -> CommandPlan {
        self.remote(
            node,
            vec![
                format!("rmmod {}", shell_quote(&self.config.tools.driver_module)),
                self.stop_step(),
            ],
        )
    }

    fn stop_step(&self) -> String {
        format!(
            "killall -9 {}",
            shell_quote(&self.config.tools.router_process)
        )
    }

    /// Generate a simulator configuration locally
    ///
    /// `quiet` discards the generator's stderr.
    pub fn simulated(&self, node: &NodeTarget, generator: &Path, quiet: bool) -> CommandPlan {
        let mut command = self.generate(&generator.to_string_lossy(), node);
        if quiet {
            command.push_str(" 2>/dev/null");
        }
        CommandPlan {
            node: node.clone(),
            destination: Destination::Local,
            command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultsConfig;
    use crate::run::RunOptions;

    fn run_config(options: RunOptions) -> RunConfig {
        RunConfig::resolve(options, &DefaultsConfig::default()).unwrap()
    }

    fn hardware() -> RunOptions {
        RunOptions {
            channel: Some("36".into()),
            ..Default::default()
        }
    }

    fn simulation() -> RunOptions {
        RunOptions {
            simulation: true,
            ..hardware()
        }
    }

    fn count(args: &[String], flag: &str) -> usize {
        args.iter().filter(|a| a.as_str() == flag || a.starts_with(&format!("{flag}="))).count()
    }

    #[test]
    fn test_base_args_hardware() {
        let run = run_config(hardware());
        let args = generator_args(&run, &NodeTarget::Named("7".into()));
        assert_eq!(args, vec!["--dev=eth0", "--channel=36"]);
    }

    #[test]
    fn test_base_args_simulation() {
        let run = run_config(simulation());
        let args = generator_args(&run, &NodeTarget::Index(2));
        assert_eq!(args, vec!["--ns", "--id=2", "--channel=36"]);
    }

    #[test]
    fn test_protocol_flag_only_for_backpressure() {
        for options in [hardware(), simulation()] {
            let roofnet = run_config(options.clone());
            let bp = run_config(RunOptions {
                backpressure: true,
                ..options
            });
            let node = NodeTarget::Index(1);
            assert_eq!(count(&generator_args(&roofnet, &node), "--bp"), 0);
            assert_eq!(count(&generator_args(&bp, &node), "--bp"), 1);
        }
    }

    #[test]
    fn test_rate_and_power_are_optional() {
        let node = NodeTarget::Named("3".into());

        let run = run_config(RunOptions {
            rate: Some(String::new()),
            ..hardware()
        });
        let args = generator_args(&run, &node);
        assert_eq!(count(&args, "--rate"), 0);
        assert_eq!(count(&args, "--power"), 0);

        let run = run_config(RunOptions {
            rate: Some("11".into()),
            power: Some("15".into()),
            ..hardware()
        });
        let args = generator_args(&run, &node);
        assert_eq!(count(&args, "--rate"), 1);
        assert!(args.contains(&"--rate=11".to_string()));
        assert!(args.contains(&"--power=15".to_string()));
    }

    #[test]
    fn test_argument_order_is_fixed() {
        let run = run_config(RunOptions {
            backpressure: true,
            rate: Some("6".into()),
            power: Some("20".into()),
            oml_server: Some("tcp:oml:3003".into()),
            ..simulation()
        });
        let args = generator_args(&run, &NodeTarget::Index(4));
        assert_eq!(
            args,
            vec![
                "--ns",
                "--id=4",
                "--channel=36",
                "--bp",
                "--rate=6",
                "--power=20",
                "--exp-id=bp",
                "--node-id=4",
                "--oml-server=tcp:oml:3003",
            ]
        );
    }

    #[test]
    fn test_start_plan_hardware() {
        let run = run_config(RunOptions {
            backpressure: true,
            ..hardware()
        });
        let config = LaunchConfig::default();
        let plan = Planner::new(&run, &config).start(&NodeTarget::Named("7".into()));

        assert_eq!(
            plan.destination,
            Destination::Remote {
                host: "node007".into()
            }
        );
        assert_eq!(
            plan.command,
            "killall -9 click 2>/dev/null; \
             gen-config.py --dev=eth0 --channel=36 --bp > /tmp/bp-7.click; \
             nohup click /tmp/bp-7.click > /dev/null 2>&1 < /dev/null &"
        );
    }

    #[test]
    fn test_start_plan_telemetry_goes_to_router() {
        let run = run_config(RunOptions {
            oml_server: Some("tcp:oml:3003".into()),
            exp_id: Some("exp9".into()),
            ..hardware()
        });
        let config = LaunchConfig::default();
        let plan = Planner::new(&run, &config).start(&NodeTarget::Named("12".into()));

        assert!(plan.command.contains(
            "nohup click /tmp/bp-12.click --exp-id=exp9 --node-id=12 --oml-server=tcp:oml:3003 >"
        ));
        assert!(plan
            .command
            .contains("gen-config.py --dev=eth0 --channel=36 > /tmp/bp-12.click"));
    }

    #[test]
    fn test_stop_and_kill_plans() {
        let run = run_config(RunOptions {
            stop: true,
            ..Default::default()
        });
        let config = LaunchConfig::default();
        let planner = Planner::new(&run, &config);
        let node = NodeTarget::Named("42".into());

        assert_eq!(planner.stop(&node).command, "killall -9 click");
        assert_eq!(planner.kill(&node).command, "rmmod ath9k; killall -9 click");
        assert_eq!(
            planner.kill(&node).destination,
            Destination::Remote {
                host: "node042".into()
            }
        );
    }

    #[test]
    fn test_prepare_plan() {
        let run = run_config(hardware());
        let config = LaunchConfig::default();
        let plan = Planner::new(&run, &config).prepare(&NodeTarget::Named("1".into()));
        assert_eq!(
            plan.command,
            "(cd click && git pull); (cd backpressure && git pull); \
             (cd click && make); rmmod ath9k; modprobe ath9k"
        );
    }

    #[test]
    fn test_simulated_plan_is_local() {
        let run = run_config(simulation());
        let config = LaunchConfig::default();
        let planner = Planner::new(&run, &config);
        let generator = Path::new("/opt/mesh/gen-config.py");

        let first = planner.simulated(&NodeTarget::Index(1), generator, false);
        assert_eq!(first.destination, Destination::Local);
        assert_eq!(
            first.command,
            "/opt/mesh/gen-config.py --ns --id=1 --channel=36 > /tmp/bp-1.click"
        );

        let second = planner.simulated(&NodeTarget::Index(2), generator, true);
        assert_eq!(
            second.command,
            "/opt/mesh/gen-config.py --ns --id=2 --channel=36 > /tmp/bp-2.click 2>/dev/null"
        );
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("--rate=11"), "--rate=11");
        assert_eq!(shell_quote("/my tools/gen"), "'/my tools/gen'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }
}
