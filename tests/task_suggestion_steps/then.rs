//! Then steps for suggestion-driven task scenarios.

use super::world::SuggestionWorld;
use crate::test_helpers::split_list;
use rstest_bdd_macros::then;
use taskai::task::{
    domain::{Subtask, TaskStatus},
    services::{StoreWarning, TASKS_STORAGE_KEY, TaskLifecycleError, load},
};

#[then("the task list has {count:usize} tasks")]
fn task_count(world: &SuggestionWorld, count: usize) -> Result<(), eyre::Report> {
    let actual = world.service.tasks().len();
    eyre::ensure!(actual == count, "expected {count} tasks, found {actual}");
    Ok(())
}

fn newest_matches(
    world: &SuggestionWorld,
    status: &str,
    expected: &[String],
) -> Result<(), eyre::Report> {
    let expected_status = TaskStatus::try_from(status)
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.newest_task()?;
    eyre::ensure!(
        task.status() == expected_status,
        "expected status {expected_status}, found {}",
        task.status()
    );
    let texts: Vec<&str> = task.subtasks().iter().map(Subtask::text).collect();
    eyre::ensure!(texts == expected, "expected subtasks {expected:?}, found {texts:?}");
    Ok(())
}

#[then(r#"the newest task is "{status}" with subtasks "{subtasks}""#)]
fn newest_task_with_subtasks(
    world: &SuggestionWorld,
    status: String,
    subtasks: String,
) -> Result<(), eyre::Report> {
    newest_matches(world, &status, &split_list(&subtasks))
}

#[then(r#"the newest task is "{status}" with no subtasks"#)]
fn newest_task_without_subtasks(
    world: &SuggestionWorld,
    status: String,
) -> Result<(), eyre::Report> {
    newest_matches(world, &status, &[])
}

#[then("no subtask of the newest task is completed")]
fn no_subtask_completed(world: &SuggestionWorld) -> Result<(), eyre::Report> {
    let task = world.newest_task()?;
    eyre::ensure!(
        task.subtasks().iter().all(|subtask| !subtask.is_completed()),
        "expected fresh subtasks, found {:?}",
        task.subtasks()
    );
    Ok(())
}

#[then("the saved tasks match the task list")]
fn saved_tasks_match(world: &SuggestionWorld) -> Result<(), eyre::Report> {
    let saved = load(&world.mirror, TASKS_STORAGE_KEY);
    eyre::ensure!(saved.warning.is_none(), "saved tasks unreadable: {:?}", saved.warning);
    eyre::ensure!(
        saved.value == world.service.tasks(),
        "saved tasks differ from the in-memory list"
    );
    Ok(())
}

#[then(r#"the user is told "{message}""#)]
fn user_is_told(world: &SuggestionWorld, message: String) -> Result<(), eyre::Report> {
    let (kind, err) = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no error was reported"))?;
    let TaskLifecycleError::Suggestion(suggestion_error) = err else {
        return Err(eyre::eyre!("expected a suggestion error, got {err:?}"));
    };
    let shown = suggestion_error.user_message(*kind);
    eyre::ensure!(shown == message, "expected message {message:?}, got {shown:?}");
    Ok(())
}

#[then("a storage warning is reported")]
fn storage_warning_reported(world: &SuggestionWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world
            .warnings
            .iter()
            .any(|warning| matches!(warning, StoreWarning::Write(_))),
        "expected a write warning, found {:?}",
        world.warnings
    );
    Ok(())
}
