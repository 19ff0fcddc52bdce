use thiserror::Error;
use tracing::{debug, error, warn};

use crate::engine::wire::StatusCode;

/// Errors raised while building, encoding, resolving or framing row blocks.
#[derive(Debug, Error)]
pub enum RowBlockError {
    #[error("Row block has {actual} bytes of data but expected {expected} for {row_count} rows")]
    SizeMismatch {
        actual: usize,
        expected: usize,
        row_count: usize,
    },

    #[error("Row #{row} contained bad indirect slice for column {column}: ({offset}, {length})")]
    BadIndirect {
        row: usize,
        column: String,
        offset: u64,
        length: u64,
    },

    #[error("Corruption: {0}")]
    Corrupt(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RowBlockError {
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            RowBlockError::SizeMismatch { .. }
                | RowBlockError::BadIndirect { .. }
                | RowBlockError::Corrupt(_)
        )
    }

    pub fn code(&self) -> StatusCode {
        match self {
            RowBlockError::SizeMismatch { .. }
            | RowBlockError::BadIndirect { .. }
            | RowBlockError::Corrupt(_) => StatusCode::Corruption,
            RowBlockError::InvalidArgument(_) | RowBlockError::Json(_) => {
                StatusCode::InvalidArgument
            }
            RowBlockError::Runtime(_) => StatusCode::RuntimeError,
            RowBlockError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                StatusCode::NotFound
            }
            RowBlockError::Io(_) => StatusCode::IoError,
        }
    }

    pub fn log_error(&self) {
        match self {
            RowBlockError::SizeMismatch { .. } | RowBlockError::BadIndirect { .. } => {
                warn!("Rejected row block: {}", self);
            }
            RowBlockError::Corrupt(msg) => {
                warn!("Corrupt row block message: {}", msg);
            }
            RowBlockError::InvalidArgument(msg) => {
                error!("Invalid row block argument: {}", msg);
            }
            RowBlockError::Runtime(msg) => {
                error!("Row block runtime error: {}", msg);
            }
            RowBlockError::Io(e) => {
                error!("Row block I/O failed: {}", e);
                debug!("Row block I/O error details: {:?}", e);
            }
            RowBlockError::Json(e) => {
                error!("Row block JSON error: {}", e);
                debug!("Row block JSON error details: {:?}", e);
            }
        }
    }
}
