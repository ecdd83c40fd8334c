use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LibraryError {
    #[error("{message}")]
    DuplicateKey {
        message: String,
    },
    #[error("{message}")]
    NotFound {
        message: String,
    },
    // This is a retry-able error, which indicates that the book stream or the patron has advanced
    // since it was loaded by the caller. The caller can reload and try again.
    #[error("{message} expected={expected} actual={actual}")]
    ConcurrentModification {
        message: String,
        expected: i64,
        actual: i64,
    },
    #[error("{message}")]
    CorruptedState {
        message: String,
    },
    #[error("{message} {reason_code:?}")]
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    #[error("{message}")]
    Serialization {
        message: String,
    },
}

impl LibraryError {
    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn concurrent_modification(message: &str, expected: i64, actual: i64) -> LibraryError {
        LibraryError::ConcurrentModification { message: message.to_string(), expected, actual }
    }

    pub fn corrupted_state(message: &str) -> LibraryError {
        LibraryError::CorruptedState { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::ConcurrentModification { .. } => { true }
            LibraryError::CorruptedState { .. } => { false }
            LibraryError::Validation { .. } => { false }
            LibraryError::Serialization { .. } => { false }
        }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<uuid::Error> for LibraryError {
    fn from(err: uuid::Error) -> Self {
        LibraryError::validation(
            format!("invalid identifier {:?}", err).as_str(), Some("400".to_string()))
    }
}

/// A specialized Result type for the lending context.
pub type LibraryResult<T> = Result<T, LibraryError>;

// BookStatus is the persisted tag of a book variant. Unknown tags are never defaulted
// because a book reconstructed from corrupted data must not silently become available.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum BookStatus {
    Available,
    OnHold,
}

impl TryFrom<&str> for BookStatus {
    type Error = LibraryError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "Available" => Ok(BookStatus::Available),
            "OnHold" => Ok(BookStatus::OnHold),
            other => Err(LibraryError::corrupted_state(
                format!("unrecognized book status {:?}", other).as_str())),
        }
    }
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BookStatus::Available => write!(f, "Available"),
            BookStatus::OnHold => write!(f, "OnHold"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum PatronType {
    Regular,
    Researcher,
}

impl Display for PatronType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            PatronType::Regular => write!(f, "Regular"),
            PatronType::Researcher => write!(f, "Researcher"),
        }
    }
}
