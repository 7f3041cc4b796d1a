//! Given steps for task tracking BDD scenarios.

use super::world::{TaskWorld, parse_day, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use task_tracker::task::services::TaskInput;

#[given("an empty task store")]
fn empty_task_store(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let existing = run_async(world.service()?.list(None, None)).wrap_err("list tasks")?;
    if !existing.is_empty() {
        return Err(eyre::eyre!("expected an empty store, found {} tasks", existing.len()));
    }
    Ok(())
}

#[given(r#"a task titled "{title}" due on "{due}""#)]
fn task_with_due_date(world: &mut TaskWorld, title: String, due: String) -> Result<(), eyre::Report> {
    let input = TaskInput::new(title).with_due_date(Some(parse_day(&due)?));
    let created = run_async(world.service()?.create(input)).wrap_err("create task")?;
    world.last_created_task = Some(created);
    Ok(())
}
