//! Command path parsing for record tagging.

use crate::error::ApiError;

const SEGMENTS: usize = 4;

/// Split a command invocation such as `blade create docker cpu-fullload` into
/// its `(command, sub_command)` pair.
///
/// The path is split on single spaces into at most four segments, so anything
/// after the fourth separator stays in the sub-command.
pub fn parse_command_path(command_path: &str) -> Result<(String, String), ApiError> {
    let segments: Vec<&str> = command_path.splitn(SEGMENTS, ' ').collect();
    if segments.len() < SEGMENTS {
        return Err(ApiError::InvalidArgument(format!(
            "not illegal command: {:?}",
            command_path
        )));
    }
    Ok((segments[2].to_string(), segments[3].to_string()))
}
