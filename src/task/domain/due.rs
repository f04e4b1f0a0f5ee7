//! Due-date classification relative to the current time.

use super::{Task, TaskStatus};
use chrono::{DateTime, TimeZone, Utc};

/// How a task's due date relates to the present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DueState {
    /// The task is completed; the due date is historical.
    Closed,
    /// The due date falls on the current calendar day in the observer's
    /// time zone.
    DueToday,
    /// The due date has passed without completion.
    Overdue,
    /// The due date lies in the future.
    Upcoming,
}

impl DueState {
    /// Classifies `due_date` for a task with `status` at instant `now`.
    ///
    /// "Today" is the calendar day of `now` in its own time zone, so pass
    /// a local time to get local-day semantics.
    #[must_use]
    pub fn classify<Tz: TimeZone>(
        due_date: DateTime<Utc>,
        status: TaskStatus,
        now: &DateTime<Tz>,
    ) -> Self {
        if status == TaskStatus::Completed {
            return Self::Closed;
        }
        if due_date.with_timezone(&now.timezone()).date_naive() == now.date_naive() {
            return Self::DueToday;
        }
        if due_date < now.with_timezone(&Utc) {
            Self::Overdue
        } else {
            Self::Upcoming
        }
    }
}

impl Task {
    /// Returns the due state at `now`, or `None` when no due date is set.
    #[must_use]
    pub fn due_state<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DueState> {
        self.due_date()
            .map(|due_date| DueState::classify(due_date, self.status(), now))
    }
}
