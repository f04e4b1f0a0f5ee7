//! Given steps for suggestion-driven task scenarios.

use super::world::SuggestionWorld;
use crate::test_helpers::split_list;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskai::task::{
    domain::TaskDraft,
    ports::{DetailedSteps, SubtaskSuggestions, SuggestionError},
};

#[given(r#"the suggestion service offers "{subtasks}""#)]
fn service_offers(world: &mut SuggestionWorld, subtasks: String) {
    world.adapter.push_subtasks(Ok(SubtaskSuggestions {
        subtasks: split_list(&subtasks),
    }));
}

#[given("the suggestion service is unavailable")]
fn service_unavailable(world: &mut SuggestionWorld) {
    world.adapter.push_subtasks(Err(SuggestionError::Unavailable(
        "HTTP 503: service unavailable".to_owned(),
    )));
}

#[given(r#"the suggestion service proposes detailed steps "{steps}""#)]
fn service_proposes_steps(world: &mut SuggestionWorld, steps: String) {
    world.adapter.push_detailed_steps(Ok(DetailedSteps {
        detailed_steps: split_list(&steps),
    }));
}

#[given("the detailed steps service is unavailable")]
fn detailed_steps_unavailable(world: &mut SuggestionWorld) {
    world
        .adapter
        .push_detailed_steps(Err(SuggestionError::MalformedResponse(
            "response contained no candidate text".to_owned(),
        )));
}

#[given("the durable storage holds at most {quota:usize} bytes")]
fn storage_quota(world: &mut SuggestionWorld, quota: usize) -> Result<(), eyre::Report> {
    world
        .mirror
        .set_quota(Some(quota))
        .wrap_err("set mirror quota")
}

#[given(r#"a task titled "{title}" has been created with every suggestion"#)]
fn task_created_with_every_suggestion(
    world: &mut SuggestionWorld,
    title: String,
) -> Result<(), eyre::Report> {
    let description = format!("{title} this week");
    let draft = TaskDraft::new(title, description).wrap_err("build draft")?;
    let mut review = crate::test_helpers::run_async(world.service.request_suggestions(&draft))
        .wrap_err("request suggestions")?;
    review.select_all();
    let outcome = world.service.confirm_review(review);
    world.note(outcome.warning);
    Ok(())
}
