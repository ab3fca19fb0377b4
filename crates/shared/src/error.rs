use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which store call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteOperation {
    Create,
    ListExpenses,
    ScanCategories,
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RemoteOperation::Create => "create expense",
            RemoteOperation::ListExpenses => "list expenses",
            RemoteOperation::ScanCategories => "scan categories",
        })
    }
}

/// Error body returned by the document store on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default)]
    pub code: u16,
    #[serde(default, rename = "type")]
    pub kind: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_empty() {
            write!(f, "{} ({})", self.message, self.code)
        } else {
            write!(f, "{} ({} {})", self.message, self.code, self.kind)
        }
    }
}

/// Any failure from a store call: transport, rejection or authorization,
/// deliberately undifferentiated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{operation} failed: {message}")]
pub struct RemoteOperationFailed {
    pub operation: RemoteOperation,
    pub message: String,
}

impl RemoteOperationFailed {
    pub fn new(operation: RemoteOperation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

impl From<(RemoteOperation, ApiError)> for RemoteOperationFailed {
    fn from((operation, error): (RemoteOperation, ApiError)) -> Self {
        Self::new(operation, error.to_string())
    }
}
