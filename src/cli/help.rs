//! CLI help and command-name contract for logging and record tagging.

use crate::cli::parse::Commands;

pub const PROGRAM_NAME: &str = "blade";

/// Command name string for logs (e.g. "status", "revoke").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Status { .. } => "status",
        Commands::Revoke { .. } => "revoke",
        Commands::Create { .. } => "create",
        Commands::Destroy { .. } => "destroy",
        Commands::Prepare { .. } => "prepare",
    }
}

/// Textual command path recorded on experiments, e.g. `blade create docker cpu-fullload`.
pub fn create_command_path(target: &str, action: &str) -> String {
    format!("{} create {} {}", PROGRAM_NAME, target, action)
}
