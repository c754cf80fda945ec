//! Blade CLI Binary
//!
//! Command-line interface for blade experiment and preparation records.

use blade::cli::{command_name, render, Cli, Presentation, RunContext};
use blade::config::ConfigLoader;
use blade::logging::{init_logging, resolve_log_file_path, LoggingConfig};
use clap::Parser;
use std::io::IsTerminal;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();
    let presentation = Presentation::from_terminal(std::io::stdout().is_terminal());

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging, continuing without logs: {}", e);
    }

    info!(command = command_name(&cli.command), "blade starting");

    let context = match RunContext::new(cli.config.as_deref(), cli.store.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing run context: {}", e);
            println!("{}", render(&blade::cli::map_error(e), presentation));
            process::exit(1);
        }
    };

    let response = context.execute(&cli.command);
    println!("{}", render(&response, presentation));
    if !response.success {
        error!(code = response.code, error = %response.err, "command failed");
        process::exit(1);
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = ConfigLoader::load_optional(cli.config.as_deref())
        .ok()
        .map(|c| c.logging)
        .unwrap_or_default();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.debug {
        config.level = "debug".to_string();
        if config.output == "file" {
            config.output = "file+stderr".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if config.output.contains("file") {
        config.file = Some(resolve_log_file_path(cli.log_file.clone(), config.file.clone()));
    }

    config
}
