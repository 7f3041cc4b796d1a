//! When steps for task tracking BDD scenarios.

use super::world::{TaskWorld, parse_day, parse_status, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use task_tracker::task::{domain::TaskId, services::TaskInput};

/// Identifier no scenario ever creates.
const UNKNOWN_TASK: TaskId = TaskId::new(9_999);

#[when(r#"a task titled "{title}" due on "{due}" is created with status {status:u8}"#)]
fn create_task_with_status(
    world: &mut TaskWorld,
    title: String,
    due: String,
    status: u8,
) -> Result<(), eyre::Report> {
    let input = TaskInput::new(title)
        .with_status(parse_status(status)?)
        .with_due_date(Some(parse_day(&due)?));
    let created = run_async(world.service()?.create(input)).wrap_err("create task")?;
    world.last_created_task = Some(created);
    Ok(())
}

#[when(r#"tasks due on "{due}" are listed"#)]
fn list_tasks_due_on(world: &mut TaskWorld, due: String) -> Result<(), eyre::Report> {
    let listed =
        run_async(world.service()?.list(None, Some(parse_day(&due)?))).wrap_err("list tasks")?;
    world.last_listed = listed;
    Ok(())
}

#[when(r#"an unknown task is revised with title "{title}""#)]
fn revise_unknown_task(world: &mut TaskWorld, title: String) -> Result<(), eyre::Report> {
    run_async(world.service()?.update(UNKNOWN_TASK, TaskInput::new(title)))
        .wrap_err("revise unknown task")
}

#[when("an unknown task is deleted")]
fn delete_unknown_task(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    run_async(world.service()?.delete(UNKNOWN_TASK)).wrap_err("delete unknown task")
}

#[when("the task is revised to status {status:u8}")]
fn revise_status(world: &mut TaskWorld, status: u8) -> Result<(), eyre::Report> {
    let task = world.created_task()?.clone();
    let input = TaskInput::new(task.title().as_str())
        .with_description(task.description())
        .with_status(parse_status(status)?)
        .with_due_date(task.due_date());
    run_async(world.service()?.update(task.id(), input)).wrap_err("revise task status")
}
