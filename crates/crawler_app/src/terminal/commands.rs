use crawler_core::{TaskDraft, TaskId};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  list                    reload the task list
  add <url> <interval>    create a task polled every <interval> seconds
  delete <id>             delete a task
  select <id>             show the latest responses of a task
  show                    print the current state
  help                    print this help
  quit                    exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reload,
    Add(TaskDraft),
    Delete(TaskId),
    Select(TaskId),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}; type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{0:?} is not a task id")]
    BadId(String),
}

/// Parses one input line. Blank lines yield `None`.
///
/// `add` forwards missing arguments as empty strings so the validator decides.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" | "refresh" => Command::Reload,
        "add" | "new" => match args.as_slice() {
            [] => Command::Add(TaskDraft::default()),
            [url] => Command::Add(TaskDraft::new(*url, "")),
            [url, interval] => Command::Add(TaskDraft::new(*url, *interval)),
            _ => return Err(CommandError::Usage("add <url> <interval>")),
        },
        "delete" | "rm" => Command::Delete(single_id(&args, "delete <id>")?),
        "select" | "open" => Command::Select(single_id(&args, "select <id>")?),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn single_id(args: &[&str], usage: &'static str) -> Result<TaskId, CommandError> {
    match args {
        [raw] => raw
            .parse()
            .map_err(|_| CommandError::BadId((*raw).to_string())),
        _ => Err(CommandError::Usage(usage)),
    }
}
