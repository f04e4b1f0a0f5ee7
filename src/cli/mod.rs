//! Command-line interface for taskai.
//!
//! Each invocation opens the durable mirror, runs one lifecycle operation
//! and writes a plain-text report to the supplied writer.

mod adapter;
mod render;

pub use adapter::ConfiguredAdapter;

use camino::Utf8PathBuf;
use chrono::{Local, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use mockable::{Clock, DefaultClock};
use std::io::{self, Write};
use std::sync::Arc;
use thiserror::Error;

use crate::config::{AiProvider, Config, ConfigError};
use crate::task::{
    adapters::file::FileMirror,
    domain::{
        ParseTaskOrderingError, ParseTaskPriorityError, ParseTaskStatusError, SubtaskId, Task,
        TaskDomainError, TaskDraft, TaskId, TaskOrdering, TaskPriority, TaskStatus,
    },
    ports::{MirrorError, SuggestionAdapter, SuggestionError, SuggestionKind},
    services::{TaskLifecycleError, TaskLifecycleService, TaskStore},
};

/// Errors reported by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The storage directory could not be opened.
    #[error("failed to open task storage: {0}")]
    Storage(#[from] MirrorError),

    /// The suggestion adapter could not be constructed.
    #[error("failed to set up the suggestion service: {0}")]
    AdapterSetup(#[source] SuggestionError),

    /// Form input was rejected.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// A status argument was not recognised.
    #[error(transparent)]
    Status(#[from] ParseTaskStatusError),

    /// A priority argument was not recognised.
    #[error(transparent)]
    Priority(#[from] ParseTaskPriorityError),

    /// A sort argument was not recognised.
    #[error(transparent)]
    Ordering(#[from] ParseTaskOrderingError),

    /// A suggestion number was outside the offered list.
    #[error("suggestion {0} is not in the list")]
    NoSuchSuggestion(usize),

    /// The same suggestion number was given more than once.
    #[error("suggestion {0} is selected more than once")]
    DuplicateSuggestion(usize),

    /// No task matches the given identifier.
    #[error("no task matches '{0}'")]
    UnknownTask(String),

    /// More than one task matches the given identifier prefix.
    #[error("'{0}' matches more than one task; use a longer prefix")]
    AmbiguousTask(String),

    /// No subtask matches the given number or identifier.
    #[error("no subtask matches '{0}'")]
    UnknownSubtask(String),

    /// The suggestion service failed; the message is the one shown to users.
    #[error("{}", source.user_message(*kind))]
    Suggestion {
        /// Operation that failed.
        kind: SuggestionKind,
        /// Adapter error.
        #[source]
        source: SuggestionError,
    },

    /// A lifecycle operation failed.
    #[error(transparent)]
    Lifecycle(TaskLifecycleError),

    /// Writing the report failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    fn from_lifecycle(kind: SuggestionKind, err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Suggestion(source) => Self::Suggestion { kind, source },
            TaskLifecycleError::Domain(domain) => Self::Domain(domain),
            other => Self::Lifecycle(other),
        }
    }
}

/// taskai: a task list with AI-suggested subtasks.
#[derive(Parser, Debug)]
#[command(name = "taskai")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "TASKAI_CONFIG")]
    pub config: Option<Utf8PathBuf>,

    /// Do not contact the suggestion service
    #[arg(long, global = true)]
    pub offline: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a task, choosing from AI-suggested subtasks
    Add {
        /// Task title (at most 100 characters)
        #[arg(long)]
        title: String,

        /// Task description (at most 500 characters)
        #[arg(long)]
        description: String,

        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: Option<NaiveDate>,

        /// Priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// Suggestion numbers to keep, in order (repeatable)
        #[arg(long = "select", value_name = "N")]
        select: Vec<usize>,

        /// Keep every suggestion
        #[arg(long, conflicts_with = "select")]
        all: bool,
    },

    /// Show tasks in stored order
    List {
        /// Re-sort and save the list first, e.g. dueDate-asc or priority-desc
        #[arg(long)]
        sort: Option<String>,
    },

    /// Change a task's status
    Status {
        /// Task id or unique id prefix
        task: String,

        /// New status: todo, in-progress, completed
        status: String,
    },

    /// Flip a subtask between done and not done
    Toggle {
        /// Task id or unique id prefix
        task: String,

        /// Subtask number as listed, or subtask id prefix
        subtask: String,
    },

    /// Delete a task
    Delete {
        /// Task id or unique id prefix
        task: String,
    },

    /// Replace a task's subtasks with AI-generated detailed steps
    Steps {
        /// Task id or unique id prefix
        task: String,
    },
}

impl Cli {
    /// Runs the command against process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] when configuration, storage, input or the
    /// suggestion service fails.
    pub async fn run(self, out: &mut impl Write) -> Result<(), CliError> {
        self.run_with_env(out, |name| std::env::var(name).ok()).await
    }

    /// Runs the command, reading environment variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`Cli::run`].
    pub async fn run_with_env(
        self,
        out: &mut impl Write,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), CliError> {
        let mut config = Config::discover(self.config.as_deref())?.apply_env(&lookup)?;
        if self.offline {
            config.ai.provider = AiProvider::Offline;
        }
        let adapter = ConfiguredAdapter::from_config(&config, &lookup)?;
        let session = Session::open(&config, adapter, out)?;
        session.execute(self.command, out).await
    }
}

/// A lifecycle service over the on-disk mirror.
pub struct Session<A: SuggestionAdapter> {
    service: TaskLifecycleService<FileMirror, A, DefaultClock>,
    clock: DefaultClock,
}

impl<A: SuggestionAdapter> Session<A> {
    /// Opens the mirror named by `config` and loads the saved tasks.
    ///
    /// Unreadable saved data is reported to `out` and replaced by an empty
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] when no data directory is available,
    /// [`CliError::Storage`] when it cannot be opened and
    /// [`CliError::Output`] when the notice cannot be written.
    pub fn open(config: &Config, adapter: A, out: &mut impl Write) -> Result<Self, CliError> {
        let data_dir = config.data_dir()?;
        let mirror = FileMirror::open(&data_dir)?;
        tracing::debug!(dir = %data_dir, key = %config.storage.key, "opened task storage");
        let opened = TaskStore::open(mirror, config.storage.key.clone());
        render::write_warning(out, opened.warning.as_ref())?;
        let service = TaskLifecycleService::new(
            Arc::new(opened.value),
            Arc::new(adapter),
            Arc::new(DefaultClock),
        );
        Ok(Self {
            service,
            clock: DefaultClock,
        })
    }

    /// Runs one command and writes its report.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] for invalid input, unknown tasks and suggestion
    /// failures. Nothing is created or changed when an error is returned.
    pub async fn execute(&self, command: Command, out: &mut impl Write) -> Result<(), CliError> {
        match command {
            Command::Add {
                title,
                description,
                due,
                priority,
                select,
                all,
            } => {
                let draft = build_draft(title, description, due, priority.as_deref())?;
                self.add(&draft, &select, all, out).await
            }
            Command::List { sort } => self.list(sort.as_deref(), out),
            Command::Status { task, status } => {
                let task_id = self.resolve_task(&task)?;
                let target = TaskStatus::try_from(status.as_str())?;
                let outcome = self.service.update_status(task_id, target);
                render::write_warning(out, outcome.warning.as_ref())?;
                let updated = outcome.value.ok_or_else(|| CliError::UnknownTask(task))?;
                writeln!(out, "{} is now {}", updated.title(), updated.status())?;
                Ok(())
            }
            Command::Toggle { task, subtask } => {
                let task_id = self.resolve_task(&task)?;
                let subtask_id = self.resolve_subtask(task_id, &subtask)?;
                let outcome = self.service.toggle_subtask(task_id, subtask_id);
                render::write_warning(out, outcome.warning.as_ref())?;
                let updated = outcome
                    .value
                    .ok_or_else(|| CliError::UnknownSubtask(subtask))?;
                render::write_task(out, &updated, &self.clock.local())?;
                Ok(())
            }
            Command::Delete { task } => {
                let task_id = self.resolve_task(&task)?;
                let outcome = self.service.delete_task(task_id);
                render::write_warning(out, outcome.warning.as_ref())?;
                if outcome.value {
                    writeln!(out, "Deleted {task_id}")?;
                }
                Ok(())
            }
            Command::Steps { task } => {
                let task_id = self.resolve_task(&task)?;
                let outcome = self
                    .service
                    .request_detailed_steps(task_id)
                    .await
                    .map_err(|err| CliError::from_lifecycle(SuggestionKind::DetailedSteps, err))?;
                render::write_warning(out, outcome.warning.as_ref())?;
                render::write_task(out, &outcome.value, &self.clock.local())?;
                Ok(())
            }
        }
    }

    /// Returns the tasks in stored order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.service.tasks()
    }

    async fn add(
        &self,
        draft: &TaskDraft,
        select: &[usize],
        all: bool,
        out: &mut impl Write,
    ) -> Result<(), CliError> {
        let mut review = self
            .service
            .request_suggestions(draft)
            .await
            .map_err(|err| CliError::from_lifecycle(SuggestionKind::Subtasks, err))?;
        render::write_suggestions(out, review.suggestions())?;

        if all {
            review.select_all();
        }
        for &number in select {
            let index = number
                .checked_sub(1)
                .filter(|&index| index < review.suggestions().len())
                .ok_or(CliError::NoSuchSuggestion(number))?;
            if review.is_selected(index) {
                return Err(CliError::DuplicateSuggestion(number));
            }
            review.toggle(index);
        }

        let outcome = self.service.confirm_review(review);
        render::write_warning(out, outcome.warning.as_ref())?;
        writeln!(out, "Created task:")?;
        render::write_task(out, &outcome.value, &self.clock.local())?;
        Ok(())
    }

    fn list(&self, sort: Option<&str>, out: &mut impl Write) -> Result<(), CliError> {
        if let Some(raw) = sort {
            let ordering: TaskOrdering = raw.parse()?;
            let outcome = self.service.sort_tasks(ordering);
            render::write_warning(out, outcome.warning.as_ref())?;
            writeln!(out, "Sorted by {}", ordering.label())?;
        }
        let tasks = self.service.tasks();
        if tasks.is_empty() {
            writeln!(out, "No tasks yet.")?;
            return Ok(());
        }
        let now = self.clock.local();
        for task in &tasks {
            render::write_task(out, task, &now)?;
        }
        Ok(())
    }

    fn resolve_task(&self, raw: &str) -> Result<TaskId, CliError> {
        let needle = raw.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(CliError::UnknownTask(raw.to_owned()));
        }
        let matches: Vec<TaskId> = self
            .service
            .tasks()
            .iter()
            .map(Task::id)
            .filter(|id| id.to_string().starts_with(&needle))
            .collect();
        match matches.as_slice() {
            [only] => Ok(*only),
            [] => Err(CliError::UnknownTask(raw.to_owned())),
            _ => Err(CliError::AmbiguousTask(raw.to_owned())),
        }
    }

    fn resolve_subtask(&self, task_id: TaskId, raw: &str) -> Result<SubtaskId, CliError> {
        let task = self
            .service
            .find_task(task_id)
            .ok_or_else(|| CliError::UnknownTask(task_id.to_string()))?;
        let needle = raw.trim().to_ascii_lowercase();
        let by_number = needle
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| task.subtasks().get(index));
        let by_id = || {
            let mut candidates = task.subtasks().iter().filter(|subtask| {
                !needle.is_empty() && subtask.id().to_string().starts_with(&needle)
            });
            match (candidates.next(), candidates.next()) {
                (Some(only), None) => Some(only),
                _ => None,
            }
        };
        by_number
            .or_else(by_id)
            .map(|subtask| subtask.id())
            .ok_or_else(|| CliError::UnknownSubtask(raw.to_owned()))
    }
}

fn build_draft(
    title: String,
    description: String,
    due: Option<NaiveDate>,
    priority: Option<&str>,
) -> Result<TaskDraft, CliError> {
    let mut draft = TaskDraft::new(title, description)?;
    if let Some(date) = due {
        let midnight = date.and_time(NaiveTime::MIN);
        let due_date = midnight
            .and_local_timezone(Local)
            .earliest()
            .map_or_else(|| midnight.and_utc(), |local| local.with_timezone(&Utc));
        draft = draft.with_due_date(due_date);
    }
    if let Some(raw) = priority {
        draft = draft.with_priority(TaskPriority::try_from(raw)?);
    }
    Ok(draft)
}
