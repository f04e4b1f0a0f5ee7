//! When steps for task ordering scenarios.

use super::world::SortingWorld;
use rstest_bdd_macros::when;
use taskai::task::domain::TaskOrdering;

#[when(r#"the tasks are sorted by "{ordering}""#)]
fn sort_tasks(world: &mut SortingWorld, ordering: String) -> Result<(), eyre::Report> {
    let parsed: TaskOrdering = ordering
        .parse()
        .map_err(|err| eyre::eyre!("invalid ordering in scenario: {err}"))?;
    let outcome = world.service.sort_tasks(parsed);
    eyre::ensure!(
        outcome.warning.is_none(),
        "sorted order was not saved: {:?}",
        outcome.warning
    );
    Ok(())
}
