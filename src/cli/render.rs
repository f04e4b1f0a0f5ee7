//! Plain-text rendering of tasks.

use chrono::{DateTime, TimeZone, Utc};
use std::io::{self, Write};

use crate::task::{
    domain::{DueState, Task},
    services::StoreWarning,
};

pub(super) fn write_task<Tz: TimeZone>(
    out: &mut impl Write,
    task: &Task,
    now: &DateTime<Tz>,
) -> io::Result<()> {
    let progress = task.subtask_progress();
    write!(out, "{}  [{}] {}", task.id(), task.status(), task.title())?;
    if let Some(priority) = task.priority() {
        write!(out, "  priority: {priority}")?;
    }
    if let (Some(due_date), Some(state)) = (task.due_date(), task.due_state(now)) {
        write!(out, "  {}", due_label(due_date, &now.timezone(), state))?;
    }
    if progress.total > 0 {
        write!(
            out,
            "  ({} of {} subtasks done)",
            progress.completed, progress.total
        )?;
    }
    writeln!(out)?;
    writeln!(out, "    {}", task.description())?;
    for (position, subtask) in task.subtasks().iter().enumerate() {
        let mark = if subtask.is_completed() { 'x' } else { ' ' };
        writeln!(out, "    {}. [{mark}] {}", position + 1, subtask.text())?;
    }
    Ok(())
}

fn due_label<Tz: TimeZone>(due_date: DateTime<Utc>, zone: &Tz, state: DueState) -> String {
    let date = due_date.with_timezone(zone).date_naive().format("%Y-%m-%d");
    match state {
        DueState::Closed => format!("due {date}"),
        DueState::DueToday => format!("due today ({date})"),
        DueState::Overdue => format!("overdue since {date}"),
        DueState::Upcoming => format!("due {date}"),
    }
}

pub(super) fn write_suggestions(out: &mut impl Write, suggestions: &[String]) -> io::Result<()> {
    if suggestions.is_empty() {
        return writeln!(out, "No subtasks were suggested.");
    }
    writeln!(out, "Suggested subtasks:")?;
    for (position, text) in suggestions.iter().enumerate() {
        writeln!(out, "  {}. {text}", position + 1)?;
    }
    Ok(())
}

pub(super) fn write_warning(out: &mut impl Write, warning: Option<&StoreWarning>) -> io::Result<()> {
    match warning {
        Some(warning) => writeln!(
            out,
            "warning: {warning}; the change applies to this run only"
        ),
        None => Ok(()),
    }
}
