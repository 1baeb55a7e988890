mod commands;
mod config;
mod logging;
mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use anyhow::Context;
use clap::Parser;
use crawler_core::AppViewModel;
use crawler_engine::{Orchestrator, ReqwestTaskClient};
use crawler_logging::{crawler_info, crawler_warn};

use commands::{parse_command, Command, HELP};
use config::{AppConfig, DEFAULT_CONFIG_FILENAME};

/// Manage crawl tasks on a remote fetcher service and inspect their responses.
#[derive(Debug, Parser)]
#[command(name = "crawler", version)]
pub struct Args {
    /// Path to the RON configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,
    /// Task collection endpoint; overrides the config file and environment.
    #[arg(long)]
    pub base_url: Option<String>,
    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn run_app(args: Args) -> anyhow::Result<()> {
    let mut config = AppConfig::load(&args.config)?;
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }

    logging::initialize(config.log_destination, config.level_filter());
    crawler_info!("Starting crawler against {}", config.base_url);

    let client = ReqwestTaskClient::new(config.client_settings())
        .with_context(|| format!("cannot use base url {:?}", config.base_url))?;
    let mut orchestrator = Orchestrator::new(Arc::new(client), config.interval_policy())
        .context("failed to start the network runtime")?;
    let updates = orchestrator.subscribe();

    let mut session = Session {
        orchestrator: &mut orchestrator,
        updates: &updates,
        config: &config,
    };
    session.run(io::stdin().lock(), io::stdout().lock())
}

struct Session<'a> {
    orchestrator: &'a mut Orchestrator,
    updates: &'a mpsc::Receiver<AppViewModel>,
    config: &'a AppConfig,
}

impl Session<'_> {
    fn run(&mut self, input: impl BufRead, mut out: impl Write) -> anyhow::Result<()> {
        writeln!(out, "{HELP}")?;
        self.orchestrator.initialize();
        self.settle_and_render(&mut out)?;

        for line in input.lines() {
            let line = line.context("failed to read command")?;
            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    writeln!(out, "{err}")?;
                    continue;
                }
            };

            let outcome = match command {
                Command::Quit => break,
                Command::Help => {
                    writeln!(out, "{HELP}")?;
                    continue;
                }
                Command::Show => {
                    write!(out, "{}", render::render(&self.orchestrator.view()))?;
                    continue;
                }
                Command::Reload => {
                    self.orchestrator.initialize();
                    Ok(())
                }
                Command::Add(draft) => self.orchestrator.create_task(draft),
                Command::Delete(task_id) => self.orchestrator.delete_task(task_id),
                Command::Select(task_id) => self.orchestrator.select_task(task_id),
            };
            if let Err(err) = outcome {
                writeln!(out, "Rejected: {err}")?;
                // Drain the snapshot that carries the same error.
                while self.updates.try_recv().is_ok() {}
                continue;
            }
            self.settle_and_render(&mut out)?;
        }

        crawler_info!("Exiting");
        self.orchestrator.shutdown();
        Ok(())
    }

    /// Waits for the command's network calls and prints the newest snapshot, if any.
    fn settle_and_render(&mut self, out: &mut impl Write) -> io::Result<()> {
        if !self.orchestrator.settle(self.config.settle_timeout()) {
            crawler_warn!("Gave up waiting for the service");
            writeln!(out, "Still waiting for the service; type `show` later.")?;
        }
        if let Some(view) = self.updates.try_iter().last() {
            write!(out, "{}", render::render(&view))?;
        }
        out.flush()
    }
}
