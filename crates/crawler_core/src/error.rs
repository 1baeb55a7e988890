use std::fmt;

use thiserror::Error;

use crate::TaskId;

/// Why a task draft was refused before reaching the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("url must not be empty")]
    EmptyUrl,
    #[error("interval {raw:?} is not a number")]
    NotANumber { raw: String },
    #[error("interval must not be zero")]
    ZeroInterval,
    #[error("interval must not be negative")]
    NegativeInterval,
    #[error("interval must be a whole number of seconds")]
    FractionalInterval,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Encode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::Encode => write!(f, "request body could not be encoded"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// A failed call against the remote task service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct RemoteError {
    pub kind: FailureKind,
    pub message: String,
}

impl RemoteError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The remote call a [`RemoteError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListTasks,
    CreateTask,
    DeleteTask,
    ListResponses,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListTasks => "list tasks",
            Operation::CreateTask => "create task",
            Operation::DeleteTask => "delete task",
            Operation::ListResponses => "list responses",
        };
        f.write_str(name)
    }
}

/// Failure surfaced to the presentation layer through `last_error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrawlerError {
    #[error("invalid task: {0}")]
    Validation(#[from] ValidationError),
    #[error("{operation} failed: {source}")]
    Remote {
        operation: Operation,
        #[source]
        source: RemoteError,
    },
    #[error("task {0} is not in the current task list")]
    UnknownTask(TaskId),
}

impl CrawlerError {
    pub fn remote(operation: Operation, source: RemoteError) -> Self {
        CrawlerError::Remote { operation, source }
    }
}
