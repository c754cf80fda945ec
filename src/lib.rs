//! Blade: experiment and preparation record lifecycle
//!
//! Tracks the records a fault-injection tool creates for experiments and
//! prepared environments, generates collision-free uids for them, resolves
//! status queries across both record kinds, and revokes preparations through
//! pluggable backend teardowns. Every operation answers with a
//! [`response::Response`].

pub mod cli;
pub mod command_path;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod recorder;
pub mod response;
pub mod revoke;
pub mod status;
pub mod store;
pub mod uid;
