use crate::{RemoteError, Response, Task, TaskDraft, TaskId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Front end mounted or the operator asked for a reload.
    Initialize,
    /// Operator submitted the new-task form.
    CreateSubmitted(TaskDraft),
    /// Operator clicked delete on a task row.
    DeleteClicked(TaskId),
    /// Operator clicked a task row to see its history.
    TaskSelected(TaskId),
    /// Completion of [`crate::Effect::FetchTasks`].
    TasksLoaded(Result<Vec<Task>, RemoteError>),
    /// Completion of [`crate::Effect::CreateTask`], with the id from the service if it sent one.
    TaskCreated(Result<Option<TaskId>, RemoteError>),
    /// Completion of [`crate::Effect::DeleteTask`].
    TaskDeleted {
        task_id: TaskId,
        result: Result<(), RemoteError>,
    },
    /// Completion of [`crate::Effect::FetchResponses`].
    ResponsesLoaded {
        generation: u64,
        task_id: TaskId,
        result: Result<Vec<Response>, RemoteError>,
    },
}

impl Msg {
    /// True for messages that carry the result of an [`crate::Effect`].
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Msg::TasksLoaded(_)
                | Msg::TaskCreated(_)
                | Msg::TaskDeleted { .. }
                | Msg::ResponsesLoaded { .. }
        )
    }
}
