//! Given steps for task ordering scenarios.

use super::world::SortingWorld;
use crate::test_helpers::base_time;
use chrono::Duration;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskai::task::domain::{TaskDraft, TaskPriority, TaskStatus};

fn draft(title: &str) -> Result<TaskDraft, eyre::Report> {
    TaskDraft::new(title, format!("{title} details")).wrap_err("build draft")
}

#[given(r#"a task "{title}" with no priority"#)]
fn plain_task(world: &mut SortingWorld, title: String) -> Result<(), eyre::Report> {
    world.create(draft(&title)?);
    Ok(())
}

#[given(r#"a task "{title}" with priority "{priority}""#)]
fn prioritised_task(
    world: &mut SortingWorld,
    title: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let level = TaskPriority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    world.create(draft(&title)?.with_priority(level));
    Ok(())
}

#[given(r#"a task "{title}" due in {days:i64} days"#)]
fn dated_task(world: &mut SortingWorld, title: String, days: i64) -> Result<(), eyre::Report> {
    world.create(draft(&title)?.with_due_date(base_time() + Duration::days(days)));
    Ok(())
}

#[given(r#"the task "{title}" is marked "{status}""#)]
fn task_marked(world: &mut SortingWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let task = world.task_titled(&title)?;
    let outcome = world.service.update_status(task.id(), target);
    eyre::ensure!(outcome.value.is_some(), "status change did not apply");
    Ok(())
}
