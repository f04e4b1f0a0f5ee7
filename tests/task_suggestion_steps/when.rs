//! When steps for suggestion-driven task scenarios.

use super::world::SuggestionWorld;
use crate::test_helpers::run_async;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskai::task::{
    domain::{TaskDraft, TaskStatus},
    ports::SuggestionKind,
};

#[when(r#"a task titled "{title}" described as "{description}" is submitted"#)]
fn submit_task(
    world: &mut SuggestionWorld,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    let draft = TaskDraft::new(title, description).wrap_err("build draft")?;
    match run_async(world.service.request_suggestions(&draft)) {
        Ok(review) => world.review = Some(review),
        Err(err) => world.last_error = Some((SuggestionKind::Subtasks, err)),
    }
    Ok(())
}

#[when("suggestion {number:usize} is selected")]
fn select_suggestion(world: &mut SuggestionWorld, number: usize) -> Result<(), eyre::Report> {
    let review = world
        .review
        .as_mut()
        .ok_or_else(|| eyre::eyre!("no suggestions under review"))?;
    let index = number
        .checked_sub(1)
        .ok_or_else(|| eyre::eyre!("suggestions are numbered from 1"))?;
    eyre::ensure!(review.toggle(index), "suggestion {number} is not offered");
    Ok(())
}

#[when("the review is confirmed")]
fn confirm_review(world: &mut SuggestionWorld) -> Result<(), eyre::Report> {
    let review = world
        .review
        .take()
        .ok_or_else(|| eyre::eyre!("no suggestions under review"))?;
    let outcome = world.service.confirm_review(review);
    world.note(outcome.warning);
    Ok(())
}

#[when("the newest task's subtask {number:usize} is toggled")]
fn toggle_newest_subtask(world: &mut SuggestionWorld, number: usize) -> Result<(), eyre::Report> {
    let task = world.newest_task()?;
    let subtask = number
        .checked_sub(1)
        .and_then(|index| task.subtasks().get(index))
        .ok_or_else(|| eyre::eyre!("task has no subtask {number}"))?;
    let outcome = world.service.toggle_subtask(task.id(), subtask.id());
    eyre::ensure!(outcome.value.is_some(), "toggle did not apply");
    world.note(outcome.warning);
    Ok(())
}

#[when("detailed steps are requested for the newest task")]
fn request_detailed_steps(world: &mut SuggestionWorld) -> Result<(), eyre::Report> {
    let task = world.newest_task()?;
    match run_async(world.service.request_detailed_steps(task.id())) {
        Ok(outcome) => world.note(outcome.warning),
        Err(err) => world.last_error = Some((SuggestionKind::DetailedSteps, err)),
    }
    Ok(())
}

#[when(r#"the newest task's status is changed to "{status}""#)]
fn change_status(world: &mut SuggestionWorld, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let task = world.newest_task()?;
    let outcome = world.service.update_status(task.id(), target);
    eyre::ensure!(outcome.value.is_some(), "status change did not apply");
    world.note(outcome.warning);
    Ok(())
}

#[when("the newest task is deleted")]
fn delete_newest(world: &mut SuggestionWorld) -> Result<(), eyre::Report> {
    let task = world.newest_task()?;
    let outcome = world.service.delete_task(task.id());
    eyre::ensure!(outcome.value, "delete did not remove the task");
    world.note(outcome.warning);
    Ok(())
}
