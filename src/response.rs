//! Response envelope
//!
//! Every observable operation returns a [`Response`], failures included, so the
//! CLI boundary can render it uniformly and callers can match on
//! `{success, code}` instead of error values.

use crate::error::{ApiError, StorageError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable response codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    Ok,
    ServerError,
    EncodeError,
    DatabaseError,
    DataNotFound,
    EnvironmentError,
    IllegalParameters,
    IllegalCommand,
    ExecCommandError,
    SandboxInvokeError,
    ResourceExhausted,
}

const ALL_CODES: [ResponseCode; 11] = [
    ResponseCode::Ok,
    ResponseCode::ServerError,
    ResponseCode::EncodeError,
    ResponseCode::DatabaseError,
    ResponseCode::DataNotFound,
    ResponseCode::EnvironmentError,
    ResponseCode::IllegalParameters,
    ResponseCode::IllegalCommand,
    ResponseCode::ExecCommandError,
    ResponseCode::SandboxInvokeError,
    ResponseCode::ResourceExhausted,
];

impl ResponseCode {
    pub fn code(self) -> u32 {
        match self {
            ResponseCode::Ok => 200,
            ResponseCode::ServerError => 500,
            ResponseCode::EncodeError => 512,
            ResponseCode::DatabaseError => 701,
            ResponseCode::DataNotFound => 702,
            ResponseCode::EnvironmentError => 800,
            ResponseCode::IllegalParameters => 804,
            ResponseCode::IllegalCommand => 805,
            ResponseCode::ExecCommandError => 806,
            ResponseCode::SandboxInvokeError => 808,
            ResponseCode::ResourceExhausted => 809,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ResponseCode::Ok => "success",
            ResponseCode::ServerError => "server error",
            ResponseCode::EncodeError => "encode error",
            ResponseCode::DatabaseError => "execute db error",
            ResponseCode::DataNotFound => "data not found",
            ResponseCode::EnvironmentError => "environment error",
            ResponseCode::IllegalParameters => "illegal parameters",
            ResponseCode::IllegalCommand => "illegal command",
            ResponseCode::ExecCommandError => "exec command error",
            ResponseCode::SandboxInvokeError => "invoke sandbox error",
            ResponseCode::ResourceExhausted => "resource exhausted",
        }
    }

    /// Reverse lookup of a numeric code.
    pub fn from_code(code: u32) -> Option<Self> {
        ALL_CODES.into_iter().find(|c| c.code() == code)
    }
}

/// Uniform result wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub code: u32,
    pub success: bool,
    #[serde(rename = "error", default, skip_serializing_if = "String::is_empty")]
    pub err: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl Response {
    /// Successful response carrying `payload`.
    ///
    /// A payload that cannot be serialized turns into an `EncodeError` failure.
    pub fn success<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(value) => Self {
                code: ResponseCode::Ok.code(),
                success: true,
                err: String::new(),
                result: Some(value),
            },
            Err(e) => Self::fail(ResponseCode::EncodeError, e.to_string()),
        }
    }

    /// Successful response without payload.
    pub fn ok() -> Self {
        Self {
            code: ResponseCode::Ok.code(),
            success: true,
            err: String::new(),
            result: None,
        }
    }

    pub fn fail(code: ResponseCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            success: false,
            err: message.into(),
            result: None,
        }
    }

    /// Failure carrying the code's default message.
    pub fn from_code(code: ResponseCode) -> Self {
        Self::fail(code, code.message())
    }

    pub fn kind(&self) -> Option<ResponseCode> {
        ResponseCode::from_code(self.code)
    }

    pub fn is(&self, code: ResponseCode) -> bool {
        self.code == code.code()
    }

    /// Decode the payload into a concrete type.
    pub fn result_as<T: DeserializeOwned>(&self) -> Option<T> {
        self.result
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Compact single-line JSON form.
    pub fn print(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                "{{\"code\":{},\"success\":false,\"error\":{:?}}}",
                ResponseCode::EncodeError.code(),
                e.to_string()
            )
        })
    }
}

impl From<&ApiError> for ResponseCode {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::StorageError(StorageError::RecordNotFound(_)) => ResponseCode::DataNotFound,
            ApiError::StorageError(_) => ResponseCode::DatabaseError,
            ApiError::NotFound(_) => ResponseCode::DataNotFound,
            ApiError::InvalidArgument(_) => ResponseCode::IllegalParameters,
            ApiError::UidGeneration(_) => ResponseCode::ServerError,
            ApiError::ResourceExhausted(_) => ResponseCode::ResourceExhausted,
            ApiError::ConfigError(_) => ResponseCode::EnvironmentError,
        }
    }
}

impl From<ApiError> for Response {
    fn from(err: ApiError) -> Self {
        Response::fail(ResponseCode::from(&err), err.to_string())
    }
}
