//! Shared fixtures for task unit tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::task::domain::{Task, TaskDraft, TaskPriority};

/// Clock that advances one minute on every reading.
#[derive(Debug)]
pub struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::starting_at(base_time())
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::minutes(tick)
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
        .single()
        .expect("valid base time")
}

pub fn draft(title: &str) -> TaskDraft {
    TaskDraft::new(title, format!("{title} description")).expect("valid draft")
}

/// Builds a task created `minutes` after the base time.
pub fn task_at(minutes: i64, draft: TaskDraft) -> Task {
    let clock = FixedClock(base_time() + Duration::minutes(minutes));
    Task::from_draft(draft, Vec::<String>::new(), &clock)
}

pub fn prioritized(minutes: i64, title: &str, priority: Option<TaskPriority>) -> Task {
    let base = draft(title);
    let with_priority = match priority {
        Some(level) => base.with_priority(level),
        None => base,
    };
    task_at(minutes, with_priority)
}

pub fn due(minutes: i64, title: &str, due_in_days: Option<i64>) -> Task {
    let base = draft(title);
    let with_due = match due_in_days {
        Some(days) => base.with_due_date(base_time() + Duration::days(days)),
        None => base,
    };
    task_at(minutes, with_due)
}
