use std::io;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use crawler_core::{
    update, AppState, AppViewModel, CrawlerError, FailureKind, IntervalPolicy, Msg, RemoteError,
    TaskDraft, TaskId,
};
use crawler_logging::{crawler_info, crawler_warn};

use crate::{EngineHandle, RemoteTaskClient};

/// Owns the task/response state and drives it from operator intents and
/// network completions.
///
/// Intents return immediately; their network calls run in the background.
/// Call [`Orchestrator::process_pending`] (or [`Orchestrator::settle`]) to
/// apply completions. Each applied change is published to subscribers as an
/// [`AppViewModel`] snapshot.
pub struct Orchestrator {
    state: AppState,
    engine: EngineHandle,
    in_flight: usize,
    subscribers: Vec<mpsc::Sender<AppViewModel>>,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn RemoteTaskClient>, policy: IntervalPolicy) -> io::Result<Self> {
        Ok(Self {
            state: AppState::with_policy(policy),
            engine: EngineHandle::new(client)?,
            in_flight: 0,
            subscribers: Vec::new(),
        })
    }

    /// Loads the task list. Also the way to reload it on demand.
    pub fn initialize(&mut self) {
        crawler_info!("Initialize: loading tasks");
        self.dispatch(Msg::Initialize);
    }

    /// Validates and submits a new task; the list refreshes once the service accepts it.
    ///
    /// A draft refused locally is returned as an error and also kept in `last_error`.
    pub fn create_task(&mut self, draft: TaskDraft) -> Result<(), CrawlerError> {
        crawler_info!("CreateTask url={:?} interval={:?}", draft.url, draft.interval);
        self.raise(Msg::CreateSubmitted(draft))
    }

    pub fn delete_task(&mut self, task_id: TaskId) -> Result<(), CrawlerError> {
        crawler_info!("DeleteTask id={}", task_id);
        self.raise(Msg::DeleteClicked(task_id))
    }

    pub fn select_task(&mut self, task_id: TaskId) -> Result<(), CrawlerError> {
        crawler_info!("SelectTask id={}", task_id);
        self.raise(Msg::TaskSelected(task_id))
    }

    /// Returns a channel that receives a snapshot after every state change.
    pub fn subscribe(&mut self) -> mpsc::Receiver<AppViewModel> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Number of network calls whose completion has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Applies every completion that has already arrived. Returns how many were applied.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(msg) = self.engine.try_recv() {
            self.dispatch(msg);
            applied += 1;
        }
        applied
    }

    /// Blocks until no call is in flight or `timeout` elapses.
    ///
    /// Returns true if everything settled in time.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        self.process_pending();
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                crawler_warn!("{} call(s) still in flight after {:?}", self.in_flight, timeout);
                return false;
            }
            if let Some(msg) = self.engine.recv_timeout(remaining) {
                self.dispatch(msg);
            }
        }
        true
    }

    /// Stops the background runner after applying completions that already arrived.
    ///
    /// Calls still running are abandoned. Later intents fail with a network error.
    pub fn shutdown(&mut self) {
        self.process_pending();
        self.engine.shutdown();
        if self.in_flight > 0 {
            crawler_warn!("Abandoning {} call(s) still in flight", self.in_flight);
            self.in_flight = 0;
        }
    }

    fn raise(&mut self, msg: Msg) -> Result<(), CrawlerError> {
        if self.dispatch(msg) > 0 {
            return Ok(());
        }
        match self.state.last_error() {
            Some(err) => {
                crawler_warn!("Intent rejected: {}", err);
                Err(err.clone())
            }
            None => Ok(()),
        }
    }

    /// Runs one message through `update`, starts its effects and publishes the result.
    fn dispatch(&mut self, msg: Msg) -> usize {
        if msg.is_completion() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.log_completion(&msg);
        }

        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        let mut issued = 0;
        let mut dropped = Vec::new();
        for effect in effects {
            match self.engine.execute(effect) {
                Ok(()) => {
                    self.in_flight += 1;
                    issued += 1;
                }
                Err(effect) => dropped.push(effect),
            }
        }

        self.publish();
        for effect in dropped {
            // The synthesized completion decrements this again.
            self.in_flight += 1;
            let err = RemoteError::new(FailureKind::Network, "effect runner has stopped");
            self.dispatch(effect.failed(err));
        }
        issued
    }

    fn publish(&mut self) {
        let view = self.state.view();
        if !self.state.consume_dirty() {
            return;
        }
        self.subscribers
            .retain(|subscriber| subscriber.send(view.clone()).is_ok());
    }

    fn log_completion(&self, msg: &Msg) {
        match msg {
            Msg::TasksLoaded(Ok(tasks)) => crawler_info!("Loaded {} task(s)", tasks.len()),
            Msg::TasksLoaded(Err(err)) => crawler_warn!("Listing tasks failed: {}", err),
            Msg::TaskCreated(Ok(Some(task_id))) => {
                crawler_info!("Task {} created; refreshing", task_id)
            }
            Msg::TaskCreated(Ok(None)) => crawler_info!("Task created; refreshing"),
            Msg::TaskCreated(Err(err)) => crawler_warn!("Creating task failed: {}", err),
            Msg::TaskDeleted {
                task_id,
                result: Ok(()),
            } => crawler_info!("Task {} deleted; refreshing", task_id),
            Msg::TaskDeleted {
                task_id,
                result: Err(err),
            } => crawler_warn!("Deleting task {} failed: {}", task_id, err),
            Msg::ResponsesLoaded {
                generation,
                task_id,
                ..
            } if *generation != self.state.selection_generation() => {
                crawler_warn!(
                    "Discarding stale history for task {} (selection {} superseded by {})",
                    task_id,
                    generation,
                    self.state.selection_generation()
                )
            }
            Msg::ResponsesLoaded {
                task_id,
                result: Ok(history),
                ..
            } => crawler_info!("Loaded {} response(s) for task {}", history.len(), task_id),
            Msg::ResponsesLoaded {
                task_id,
                result: Err(err),
                ..
            } => crawler_warn!("Loading history for task {} failed: {}", task_id, err),
            _ => {}
        }
    }
}
