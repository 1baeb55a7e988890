use crate::{validate, AppState, CrawlerError, Effect, Msg, Operation};

/// Pure update function: applies a message to state and returns any effects.
///
/// Task state is never changed optimistically. Creates and deletes only lead
/// to a fresh [`Effect::FetchTasks`]; the task list changes when that read
/// completes.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Initialize => {
            state.clear_error();
            vec![Effect::FetchTasks]
        }
        Msg::CreateSubmitted(draft) => {
            state.clear_error();
            match validate(&draft, state.policy()) {
                Ok(new_task) => vec![Effect::CreateTask(new_task)],
                Err(err) => {
                    state.report(CrawlerError::Validation(err));
                    Vec::new()
                }
            }
        }
        Msg::DeleteClicked(task_id) => {
            state.clear_error();
            if state.has_task(task_id) {
                vec![Effect::DeleteTask(task_id)]
            } else {
                state.report(CrawlerError::UnknownTask(task_id));
                Vec::new()
            }
        }
        Msg::TaskSelected(task_id) => {
            state.clear_error();
            if state.has_task(task_id) {
                let generation = state.next_selection();
                vec![Effect::FetchResponses {
                    generation,
                    task_id,
                }]
            } else {
                state.report(CrawlerError::UnknownTask(task_id));
                Vec::new()
            }
        }
        Msg::TasksLoaded(result) => {
            match result {
                Ok(tasks) => state.replace_tasks(tasks),
                Err(err) => state.report(CrawlerError::remote(Operation::ListTasks, err)),
            }
            Vec::new()
        }
        Msg::TaskCreated(result) => match result {
            Ok(_) => vec![Effect::FetchTasks],
            Err(err) => {
                state.report(CrawlerError::remote(Operation::CreateTask, err));
                Vec::new()
            }
        },
        Msg::TaskDeleted { result, .. } => match result {
            Ok(()) => vec![Effect::FetchTasks],
            Err(err) => {
                state.report(CrawlerError::remote(Operation::DeleteTask, err));
                Vec::new()
            }
        },
        Msg::ResponsesLoaded {
            generation,
            task_id,
            result,
        } => {
            // A newer selection was issued after this fetch started.
            if !state.is_current_selection(generation) {
                return (state, Vec::new());
            }
            match result {
                Ok(history) => state.show_history(task_id, &history),
                Err(err) => state.report(CrawlerError::remote(Operation::ListResponses, err)),
            }
            Vec::new()
        }
    };

    (state, effects)
}
