//! Results returned by every facade operation.
//!
//! Expected failures (access denied, missing record) are data, not `Err`s or
//! panics, so callers handle every outcome the same way.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::policy::Operation;
use crate::store::StoreError;

/// Coarse outcome tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Success,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => f.write_str("Success"),
            Status::Error => f.write_str("Error"),
        }
    }
}

/// Why an operation did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// The caller's role is below the operation's minimum role.
    #[error("Access denied: insufficient permissions to {0} a message.")]
    AccessDenied(Operation),
    /// The store reported that the id does not exist.
    #[error("Message not found.")]
    NotFound,
    /// The store failed for a reason other than a missing id.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for OperationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => OperationError::NotFound,
            StoreError::Unavailable(detail) => OperationError::Unavailable(detail),
        }
    }
}

/// Outcome of a facade operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    Success(String),
    Error(OperationError),
}

impl OperationResult {
    pub fn success(message: impl Into<String>) -> Self {
        OperationResult::Success(message.into())
    }

    pub fn status(&self) -> Status {
        match self {
            OperationResult::Success(_) => Status::Success,
            OperationResult::Error(_) => Status::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success(_))
    }

    /// Human-readable message: the payload on success, the error text otherwise.
    pub fn message(&self) -> String {
        match self {
            OperationResult::Success(message) => message.clone(),
            OperationResult::Error(err) => err.to_string(),
        }
    }

    pub fn error(&self) -> Option<&OperationError> {
        match self {
            OperationResult::Success(_) => None,
            OperationResult::Error(err) => Some(err),
        }
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, OperationResult::Error(OperationError::AccessDenied(_)))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, OperationResult::Error(OperationError::NotFound))
    }
}

impl From<OperationError> for OperationResult {
    fn from(err: OperationError) -> Self {
        OperationResult::Error(err)
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status(), self.message())
    }
}

/// Serialized as `{"status": "Success" | "Error", "message": "..."}`.
impl Serialize for OperationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OperationResult", 2)?;
        state.serialize_field("status", &self.status())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}
