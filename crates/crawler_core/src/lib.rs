//! Crawler core: pure task/response state machine, validation and windowing.
mod effect;
mod error;
mod msg;
mod state;
mod types;
mod update;
mod validate;
mod view_model;
mod window;

pub use effect::Effect;
pub use error::{CrawlerError, FailureKind, Operation, RemoteError, ValidationError};
pub use msg::Msg;
pub use state::AppState;
pub use types::{NewTask, Response, Task, TaskDraft, TaskId};
pub use update::update;
pub use validate::{validate, IntervalPolicy};
pub use view_model::AppViewModel;
pub use window::{window, RESPONSE_WINDOW};
