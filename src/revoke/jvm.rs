//! JVM teardown: asks the attached sandbox agent to shut itself down over its
//! local HTTP control port.

use crate::response::{Response, ResponseCode};
use crate::revoke::registry::Teardown;
use crate::store::PreparationRecord;
use std::time::Duration;
use tracing::debug;

const SHUTDOWN_API: &str = "sandbox-control/shutdown";

pub struct JvmSandboxTeardown {
    host: String,
    timeout: Option<Duration>,
}

impl JvmSandboxTeardown {
    pub fn new(host: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            host: host.into(),
            timeout,
        }
    }

    /// Control URL for `api` on the sandbox listening at `port`.
    pub fn sandbox_url(&self, port: u16, api: &str) -> String {
        format!(
            "http://{}:{}/sandbox/default/module/http/{}",
            self.host, port, api
        )
    }

    fn shutdown(&self, port: u16) -> Response {
        let url = self.sandbox_url(port, SHUTDOWN_API);
        debug!(url = %url, "requesting sandbox shutdown");

        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = match builder.build() {
            Ok(client) => client,
            Err(e) => return Response::fail(ResponseCode::SandboxInvokeError, e.to_string()),
        };

        let response = match client.get(&url).send() {
            Ok(response) => response,
            Err(e) => return Response::fail(ResponseCode::SandboxInvokeError, e.to_string()),
        };
        let status = response.status();
        let body = match response.text() {
            Ok(body) => body,
            Err(e) => {
                return Response::fail(
                    ResponseCode::SandboxInvokeError,
                    format!("read sandbox response failed: {}", e),
                )
            }
        };
        if status == reqwest::StatusCode::OK {
            Response::success(&body)
        } else if body.is_empty() {
            Response::fail(
                ResponseCode::SandboxInvokeError,
                format!("sandbox responded with {}", status),
            )
        } else {
            Response::fail(ResponseCode::SandboxInvokeError, body)
        }
    }
}

impl Teardown for JvmSandboxTeardown {
    fn detach(&self, record: &PreparationRecord) -> Response {
        match record.port.trim().parse::<u16>() {
            Ok(port) => self.shutdown(port),
            Err(_) => Response::fail(
                ResponseCode::IllegalParameters,
                format!("illegal sandbox port {:?}", record.port),
            ),
        }
    }
}
