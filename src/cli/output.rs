//! CLI output: response rendering and error mapping to the stable CLI surface.

use crate::error::ApiError;
use crate::response::Response;
use serde::Serialize;

/// Where the response is going; decided once by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// A terminal: tab-indented JSON
    Interactive,
    /// A pipe or file: single-line JSON
    Piped,
}

impl Presentation {
    pub fn from_terminal(is_terminal: bool) -> Self {
        if is_terminal {
            Presentation::Interactive
        } else {
            Presentation::Piped
        }
    }
}

pub fn render(response: &Response, presentation: Presentation) -> String {
    match presentation {
        Presentation::Piped => response.print(),
        Presentation::Interactive => {
            let mut buf = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            match response.serialize(&mut ser) {
                Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| response.print()),
                Err(_) => response.print(),
            }
        }
    }
}

/// Map domain errors to a response for CLI output.
pub fn map_error(e: ApiError) -> Response {
    Response::from(e)
}
