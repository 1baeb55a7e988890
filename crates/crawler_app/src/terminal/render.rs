use std::fmt::Write;

use chrono::DateTime;
use crawler_core::{AppViewModel, Response, Task};

const PREVIEW_CHARS: usize = 60;

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Tasks ({}):", view.tasks.len());
    if view.tasks.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for task in &view.tasks {
        let _ = writeln!(out, "  {}", format_task_row(task, view.selected_task));
    }

    match view.selected_task {
        Some(task_id) => {
            let _ = writeln!(out, "Responses for task #{task_id}:");
        }
        None => {
            let _ = writeln!(out, "Responses:");
        }
    }
    if view.responses.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for response in &view.responses {
        let _ = writeln!(out, "  {}", format_response_row(response));
    }

    if let Some(err) = &view.last_error {
        let _ = writeln!(out, "Error: {err}");
    }
    out
}

fn format_task_row(task: &Task, selected: Option<u64>) -> String {
    let marker = if selected == Some(task.id) { '>' } else { ' ' };
    format!(
        "{marker}[#{id}] {url} every {interval}s",
        id = task.id,
        url = task.url,
        interval = task.interval
    )
}

fn format_response_row(response: &Response) -> String {
    format!(
        "{at} ({duration:.3}s) {preview}",
        at = format_timestamp(response.created_at),
        duration = response.duration,
        preview = preview(&response.response)
    )
}

fn format_timestamp(unix_secs: i64) -> String {
    match DateTime::from_timestamp(unix_secs, 0) {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("@{unix_secs}"),
    }
}

/// First line-collapsed characters of a payload; empty payloads are marked.
fn preview(payload: &str) -> String {
    let collapsed = payload.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return "<empty>".to_string();
    }
    let mut chars = collapsed.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
