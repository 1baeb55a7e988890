#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Mutex, Once};
use std::time::Duration;

use crawler_core::{FailureKind, NewTask, RemoteError, Response, Task, TaskId};
use crawler_engine::RemoteTaskClient;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(crawler_logging::initialize_for_tests);
}

pub fn response(payload: &str, created_at: i64) -> Response {
    Response {
        response: payload.to_string(),
        created_at,
        duration: 0.1,
    }
}

/// In-memory stand-in for the remote task service.
#[derive(Default)]
pub struct MemoryTaskClient {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    tasks: Vec<Task>,
    next_id: TaskId,
    histories: HashMap<TaskId, Vec<Response>>,
    history_delays: HashMap<TaskId, Duration>,
    fail_list: bool,
    fail_create: bool,
    fail_delete: bool,
}

fn unreachable_service() -> RemoteError {
    RemoteError::new(FailureKind::Network, "connection refused")
}

impl MemoryTaskClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        Self {
            inner: Mutex::new(Inner {
                tasks,
                next_id,
                ..Inner::default()
            }),
        }
    }

    pub fn set_history(&self, task_id: TaskId, history: Vec<Response>) {
        self.inner.lock().unwrap().histories.insert(task_id, history);
    }

    pub fn delay_history(&self, task_id: TaskId, delay: Duration) {
        self.inner
            .lock()
            .unwrap()
            .history_delays
            .insert(task_id, delay);
    }

    pub fn fail_list(&self, fail: bool) {
        self.inner.lock().unwrap().fail_list = fail;
    }

    pub fn fail_create(&self, fail: bool) {
        self.inner.lock().unwrap().fail_create = fail;
    }

    pub fn fail_delete(&self, fail: bool) {
        self.inner.lock().unwrap().fail_delete = fail;
    }

    pub fn stored_tasks(&self) -> Vec<Task> {
        self.inner.lock().unwrap().tasks.clone()
    }
}

#[async_trait::async_trait]
impl RemoteTaskClient for MemoryTaskClient {
    async fn list_tasks(&self) -> Result<Vec<Task>, RemoteError> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_list {
            return Err(unreachable_service());
        }
        Ok(inner.tasks.clone())
    }

    async fn create_task(&self, task: &NewTask) -> Result<Option<TaskId>, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_create {
            return Err(RemoteError::new(
                FailureKind::HttpStatus(500),
                "500 Internal Server Error",
            ));
        }
        inner.next_id += 1;
        let id = inner.next_id;
        inner.tasks.push(Task {
            id,
            url: task.url.clone(),
            interval: task.interval,
        });
        Ok(Some(id))
    }

    async fn delete_task(&self, task_id: TaskId) -> Result<(), RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_delete {
            return Err(unreachable_service());
        }
        let before = inner.tasks.len();
        inner.tasks.retain(|task| task.id != task_id);
        if inner.tasks.len() == before {
            return Err(RemoteError::new(
                FailureKind::HttpStatus(404),
                "404 Not Found",
            ));
        }
        inner.histories.remove(&task_id);
        Ok(())
    }

    async fn list_responses(&self, task_id: TaskId) -> Result<Vec<Response>, RemoteError> {
        let (delay, history) = {
            let inner = self.inner.lock().unwrap();
            (
                inner.history_delays.get(&task_id).copied(),
                inner.histories.get(&task_id).cloned().unwrap_or_default(),
            )
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(history)
    }
}
