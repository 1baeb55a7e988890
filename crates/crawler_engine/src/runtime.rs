use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use crawler_core::{Effect, Msg};
use crawler_logging::{crawler_debug, crawler_warn};

use crate::RemoteTaskClient;

/// Runs effects on a background tokio runtime and reports each completion as a [`Msg`].
///
/// Every effect yields exactly one completion message. Completions arrive in
/// the order the calls finish, not the order they were issued.
pub struct EngineHandle {
    effect_tx: Option<mpsc::Sender<Effect>>,
    msg_rx: mpsc::Receiver<Msg>,
}

impl EngineHandle {
    pub fn new(client: Arc<dyn RemoteTaskClient>) -> io::Result<Self> {
        let (effect_tx, effect_rx) = mpsc::channel::<Effect>();
        let (msg_tx, msg_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("crawler-engine")
            .build()?;

        thread::Builder::new()
            .name("crawler-effects".to_string())
            .spawn(move || {
                while let Ok(effect) = effect_rx.recv() {
                    let client = client.clone();
                    let msg_tx = msg_tx.clone();
                    runtime.spawn(async move {
                        let msg = run_effect(client.as_ref(), effect).await;
                        let _ = msg_tx.send(msg);
                    });
                }
                // Handle dropped: pending requests are abandoned with the runtime.
                runtime.shutdown_background();
            })?;

        Ok(Self {
            effect_tx: Some(effect_tx),
            msg_rx,
        })
    }

    /// Hands the effect back if the runner has stopped; no completion will follow for it.
    pub fn execute(&self, effect: Effect) -> Result<(), Effect> {
        crawler_debug!("Executing {:?}", effect);
        let Some(effect_tx) = &self.effect_tx else {
            crawler_warn!("Effect runner is shut down; dropped {:?}", effect);
            return Err(effect);
        };
        effect_tx.send(effect).map_err(|mpsc::SendError(effect)| {
            crawler_warn!("Effect runner has stopped; dropped {:?}", effect);
            effect
        })
    }

    /// Stops the runner. Calls still in progress are abandoned without a completion.
    pub fn shutdown(&mut self) {
        if self.effect_tx.take().is_some() {
            crawler_debug!("Effect runner shutting down");
        }
    }

    pub fn try_recv(&self) -> Option<Msg> {
        self.msg_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Msg> {
        self.msg_rx.recv_timeout(timeout).ok()
    }
}

async fn run_effect(client: &dyn RemoteTaskClient, effect: Effect) -> Msg {
    match effect {
        Effect::FetchTasks => Msg::TasksLoaded(client.list_tasks().await),
        Effect::CreateTask(task) => Msg::TaskCreated(client.create_task(&task).await),
        Effect::DeleteTask(task_id) => Msg::TaskDeleted {
            task_id,
            result: client.delete_task(task_id).await,
        },
        Effect::FetchResponses {
            generation,
            task_id,
        } => Msg::ResponsesLoaded {
            generation,
            task_id,
            result: client.list_responses(task_id).await,
        },
    }
}
