//! Crawler engine: remote task client, effect runtime and the orchestrator facade.
mod client;
mod orchestrator;
mod runtime;

pub use client::{ClientSettings, RemoteTaskClient, ReqwestTaskClient};
pub use orchestrator::Orchestrator;
pub use runtime::EngineHandle;
