//! Then steps for task ordering scenarios.

use super::world::{SortingWorld, titles};
use crate::test_helpers::split_list;
use rstest_bdd_macros::then;
use taskai::task::services::{TASKS_STORAGE_KEY, load};

#[then(r#"the task order is "{order}""#)]
fn task_order(world: &SortingWorld, order: String) -> Result<(), eyre::Report> {
    let expected = split_list(&order);
    let actual = titles(&world.service.tasks());
    eyre::ensure!(actual == expected, "expected {expected:?}, found {actual:?}");
    Ok(())
}

#[then(r#"the saved order is "{order}""#)]
fn saved_order(world: &SortingWorld, order: String) -> Result<(), eyre::Report> {
    let expected = split_list(&order);
    let saved = load(&world.mirror, TASKS_STORAGE_KEY);
    let actual = titles(&saved.value);
    eyre::ensure!(actual == expected, "expected {expected:?}, found {actual:?}");
    Ok(())
}
