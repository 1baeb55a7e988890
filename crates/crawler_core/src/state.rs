use crate::view_model::AppViewModel;
use crate::{window, CrawlerError, IntervalPolicy, Response, Task, TaskId};

/// Authoritative client-side state. Only [`crate::update`] mutates it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    policy: IntervalPolicy,
    tasks: Vec<Task>,
    displayed_responses: Vec<Response>,
    selected_task: Option<TaskId>,
    selection_generation: u64,
    last_error: Option<CrawlerError>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: IntervalPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            tasks: self.tasks.clone(),
            responses: self.displayed_responses.clone(),
            selected_task: self.selected_task,
            last_error: self.last_error.clone(),
            dirty: self.dirty,
        }
    }

    pub fn policy(&self) -> IntervalPolicy {
        self.policy
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn displayed_responses(&self) -> &[Response] {
        &self.displayed_responses
    }

    pub fn last_error(&self) -> Option<&CrawlerError> {
        self.last_error.as_ref()
    }

    pub fn selection_generation(&self) -> u64 {
        self.selection_generation
    }

    pub fn has_task(&self, task_id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id == task_id)
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.dirty = true;
    }

    /// Starts a new selection; completions tagged with older generations are stale.
    pub(crate) fn next_selection(&mut self) -> u64 {
        self.selection_generation += 1;
        self.selection_generation
    }

    pub(crate) fn is_current_selection(&self, generation: u64) -> bool {
        generation == self.selection_generation
    }

    pub(crate) fn show_history(&mut self, task_id: TaskId, history: &[Response]) {
        self.displayed_responses = window(history);
        self.selected_task = Some(task_id);
        self.dirty = true;
    }

    pub(crate) fn report(&mut self, error: CrawlerError) {
        self.last_error = Some(error);
        self.dirty = true;
    }

    pub(crate) fn clear_error(&mut self) {
        if self.last_error.take().is_some() {
            self.dirty = true;
        }
    }
}
