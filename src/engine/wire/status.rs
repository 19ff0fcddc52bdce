use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::errors::RowBlockError;

/// Transport-neutral status codes. Discriminants are stable on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum StatusCode {
    Ok = 0,
    NotFound = 1,
    Corruption = 2,
    InvalidArgument = 3,
    IoError = 4,
    RuntimeError = 5,
    Unknown = 255,
}

impl StatusCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(code: u8) -> Self {
        match code {
            0 => StatusCode::Ok,
            1 => StatusCode::NotFound,
            2 => StatusCode::Corruption,
            3 => StatusCode::InvalidArgument,
            4 => StatusCode::IoError,
            5 => StatusCode::RuntimeError,
            _ => StatusCode::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "NOT_FOUND",
            StatusCode::Corruption => "CORRUPTION",
            StatusCode::InvalidArgument => "INVALID_ARGUMENT",
            StatusCode::IoError => "IO_ERROR",
            StatusCode::RuntimeError => "RUNTIME_ERROR",
            StatusCode::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireStatus {
    pub code: StatusCode,
    pub message: String,
}

impl WireStatus {
    pub fn ok() -> Self {
        Self {
            code: StatusCode::Ok,
            message: String::new(),
        }
    }

    pub fn from_error(err: &RowBlockError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }

    pub fn from_result<T>(result: &Result<T, RowBlockError>) -> Self {
        match result {
            Ok(_) => Self::ok(),
            Err(err) => Self::from_error(err),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == StatusCode::Ok
    }

    /// Turns a received status back into a local result. The message is kept
    /// verbatim; codes this side does not know become runtime errors.
    pub fn into_result(self) -> Result<(), RowBlockError> {
        match self.code {
            StatusCode::Ok => Ok(()),
            StatusCode::NotFound => Err(RowBlockError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                self.message,
            ))),
            StatusCode::Corruption => Err(RowBlockError::Corrupt(self.message)),
            StatusCode::InvalidArgument => Err(RowBlockError::InvalidArgument(self.message)),
            StatusCode::IoError => Err(RowBlockError::Io(io::Error::other(self.message))),
            StatusCode::RuntimeError => Err(RowBlockError::Runtime(self.message)),
            StatusCode::Unknown => {
                warn!(
                    target: "rowblock::wire",
                    message = %self.message,
                    "Unknown status code in wire status"
                );
                Err(RowBlockError::Runtime(format!(
                    "unknown status code: {}",
                    self.message
                )))
            }
        }
    }
}
