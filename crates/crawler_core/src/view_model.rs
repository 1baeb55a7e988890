use crate::{CrawlerError, Response, Task, TaskId};

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub tasks: Vec<Task>,
    pub responses: Vec<Response>,
    pub selected_task: Option<TaskId>,
    pub last_error: Option<CrawlerError>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }
}
