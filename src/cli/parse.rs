//! CLI parse: clap types for blade. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// blade - experiment and preparation record lifecycle
#[derive(Parser)]
#[command(name = "blade")]
#[command(about = "Track experiment and preparation records and revoke prepared environments")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered above the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Record store directory (overrides storage.store_path)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Debug logging, mirrored to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get command or experiment status
    #[command(visible_alias = "s", after_help = "Examples:\n  blade status cc015e9bd9c68406\n  blade status --type create")]
    Status {
        /// Prepare or experiment uid
        uid: Option<String>,
        /// Prepare or experiment uid (the positional uid wins)
        #[arg(long = "uid", value_name = "UID")]
        uid_flag: Option<String>,
        /// Command type: create|destroy|prepare|revoke (or c|d|p|r)
        #[arg(long = "type", value_name = "TYPE")]
        command_type: Option<String>,
        /// Experiment target, for example: docker
        #[arg(long)]
        target: Option<String>,
    },
    /// Revoke a prepared environment
    #[command(visible_alias = "r", after_help = "Example:\n  blade revoke <UID>")]
    Revoke {
        /// Preparation uid
        uid: String,
    },
    /// Register an experiment record for TARGET ACTION
    #[command(visible_alias = "c")]
    Create {
        /// Experiment target, for example: docker
        target: String,
        /// Target action, for example: cpu-fullload
        action: String,
        /// Serialized experiment parameters
        #[arg(long, default_value = "")]
        flag: String,
    },
    /// Mark an experiment record destroyed
    #[command(visible_alias = "d")]
    Destroy {
        /// Experiment uid
        uid: String,
    },
    /// Register a running preparation record
    #[command(visible_alias = "p")]
    Prepare {
        /// Preparation type, for example: jvm or k8s
        program_type: String,
        /// Backend handle, e.g. the sandbox port for jvm
        #[arg(long, default_value = "")]
        port: String,
        /// Target process name
        #[arg(long, default_value = "")]
        process: String,
        /// Target process id
        #[arg(long, default_value = "")]
        pid: String,
    },
}
