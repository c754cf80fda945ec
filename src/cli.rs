//! CLI domain: parse, route, help, and output only.
//! No record logic; the route table dispatches to the core components.

mod help;
mod output;
mod parse;
mod route;

pub use help::command_name;
pub use output::{map_error, render, Presentation};
pub use parse::{Cli, Commands};
pub use route::RunContext;
