use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote service.
pub type TaskId = u64;

/// A URL the remote crawler polls every `interval` seconds.
///
/// Zero-valued fields are omitted by the service, hence the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: TaskId,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub interval: u64,
}

/// One recorded crawl of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub response: String,
    /// Unix seconds.
    #[serde(default)]
    pub created_at: i64,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
}

/// Raw operator input for a new task, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    pub url: String,
    pub interval: String,
}

impl TaskDraft {
    pub fn new(url: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            interval: interval.into(),
        }
    }
}

/// A validated draft; serializes to the create request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub url: String,
    pub interval: u64,
}
