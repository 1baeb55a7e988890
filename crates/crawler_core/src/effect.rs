use crate::{Msg, NewTask, RemoteError, TaskId};

/// Network work requested by [`crate::update`]; each one completes with a [`crate::Msg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchTasks,
    CreateTask(NewTask),
    DeleteTask(TaskId),
    FetchResponses { generation: u64, task_id: TaskId },
}

impl Effect {
    /// The completion this effect would produce had its call failed with `err`.
    ///
    /// Used when the effect could not be started at all.
    pub fn failed(self, err: RemoteError) -> Msg {
        match self {
            Effect::FetchTasks => Msg::TasksLoaded(Err(err)),
            Effect::CreateTask(_) => Msg::TaskCreated(Err(err)),
            Effect::DeleteTask(task_id) => Msg::TaskDeleted {
                task_id,
                result: Err(err),
            },
            Effect::FetchResponses {
                generation,
                task_id,
            } => Msg::ResponsesLoaded {
                generation,
                task_id,
                result: Err(err),
            },
        }
    }
}
