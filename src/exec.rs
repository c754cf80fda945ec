//! External process execution.
//!
//! Backends that shell out (cluster teardown) go through a [`Channel`] so the
//! process boundary can be replaced in tests.

use crate::response::{Response, ResponseCode};
use std::process::Command;
use tracing::{debug, warn};

/// Runner for an external program with a space-separated argument string.
pub trait Channel {
    fn run(&self, program: &str, args: &str) -> Response;
}

/// Runs programs on the local host, blocking until they exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalChannel;

impl LocalChannel {
    pub fn new() -> Self {
        LocalChannel
    }
}

impl Channel for LocalChannel {
    fn run(&self, program: &str, args: &str) -> Response {
        let cmd_str = format!("{} {}", program, args);
        debug!(command = %cmd_str, "running external command");
        let output = match Command::new(program).args(args.split_whitespace()).output() {
            Ok(output) => output,
            Err(e) => {
                warn!(command = %cmd_str, error = %e, "failed to spawn command");
                return Response::fail(
                    ResponseCode::ExecCommandError,
                    format!("{}: {}", cmd_str, e),
                );
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if output.status.success() {
            return Response::success(&stdout);
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            format!("{} exited with {}", cmd_str, output.status)
        } else {
            stderr
        };
        Response::fail(ResponseCode::ExecCommandError, message)
    }
}
