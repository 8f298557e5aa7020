//! Output formatting utilities for the CLI
//!
//! Colored status messages for per-node progress and a table view of
//! command plans for `--dry-run`.

use tabled::{settings::Style, Table, Tabled};

use mesh_core::CommandPlan;

/// Format command plans as an ASCII table
///
/// # Returns
/// A formatted string suitable for terminal output, or "No commands planned"
/// if the list is empty.
pub fn format_plans(plans: &[CommandPlan]) -> String {
    if plans.is_empty() {
        return "No commands planned".to_string();
    }

    #[derive(Tabled)]
    struct PlanRow {
        #[tabled(rename = "NODE")]
        node: String,
        #[tabled(rename = "HOST")]
        host: String,
        #[tabled(rename = "COMMAND")]
        command: String,
    }

    let rows: Vec<PlanRow> = plans
        .iter()
        .map(|p| PlanRow {
            node: p.node.to_string(),
            host: p.destination.to_string(),
            command: p.command.clone(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print a success message in green with a checkmark prefix
pub fn print_success(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stdout = std::io::stdout();
    let _ = crossterm::execute!(
        stdout,
        SetForegroundColor(Color::Green),
        Print("✓ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print an error message in red with an X prefix
///
/// Outputs to stderr.
pub fn print_error(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Red),
        Print("✗ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print a warning message in yellow with a warning symbol prefix
///
/// Outputs to stderr.
pub fn print_warning(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Yellow),
        Print("⚠ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print an informational message in cyan with an info symbol prefix
pub fn print_info(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stdout = std::io::stdout();
    let _ = crossterm::execute!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print("ℹ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}
