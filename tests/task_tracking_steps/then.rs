//! Then steps for task tracking BDD scenarios.

use super::world::{TaskWorld, parse_day, parse_status, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use task_tracker::task::domain::Task;

fn listed_titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title().as_str()).collect()
}

#[then(r#"the created task has status {status:u8} and is due on "{due}""#)]
fn created_task_state(world: &TaskWorld, status: u8, due: String) -> Result<(), eyre::Report> {
    let task = world.created_task()?;
    let expected_status = parse_status(status)?;
    if task.status() != expected_status {
        return Err(eyre::eyre!(
            "expected status {expected_status:?}, found {:?}",
            task.status()
        ));
    }
    let expected_due = parse_day(&due)?;
    if task.due_date() != Some(expected_due) {
        return Err(eyre::eyre!(
            "expected due date {expected_due}, found {:?}",
            task.due_date()
        ));
    }
    Ok(())
}

#[then(r#"listing tasks with status {status:u8} includes "{title}""#)]
fn status_listing_includes(world: &TaskWorld, status: u8, title: String) -> Result<(), eyre::Report> {
    let listed = run_async(world.service()?.list(Some(parse_status(status)?), None))
        .wrap_err("list tasks by status")?;
    if !listed_titles(&listed).contains(&title.as_str()) {
        return Err(eyre::eyre!("expected {title} among {:?}", listed_titles(&listed)));
    }
    Ok(())
}

#[then(r#"listing tasks with status {status:u8} excludes "{title}""#)]
fn status_listing_excludes(world: &TaskWorld, status: u8, title: String) -> Result<(), eyre::Report> {
    let listed = run_async(world.service()?.list(Some(parse_status(status)?), None))
        .wrap_err("list tasks by status")?;
    if listed_titles(&listed).contains(&title.as_str()) {
        return Err(eyre::eyre!("did not expect {title} among {:?}", listed_titles(&listed)));
    }
    Ok(())
}

#[then(r#"exactly one task titled "{title}" is listed"#)]
fn exactly_one_listed(world: &TaskWorld, title: String) -> Result<(), eyre::Report> {
    let titles = listed_titles(&world.last_listed);
    if titles != [title.as_str()] {
        return Err(eyre::eyre!("expected only {title}, found {titles:?}"));
    }
    Ok(())
}

#[then(r#"listing all tasks returns only "{title}""#)]
fn all_tasks_listed(world: &TaskWorld, title: String) -> Result<(), eyre::Report> {
    let listed = run_async(world.service()?.list(None, None)).wrap_err("list tasks")?;
    let titles = listed_titles(&listed);
    if titles != [title.as_str()] {
        return Err(eyre::eyre!("expected only {title}, found {titles:?}"));
    }
    Ok(())
}

#[then("the stored task has status {status:u8}")]
fn stored_task_status(world: &TaskWorld, status: u8) -> Result<(), eyre::Report> {
    let id = world.created_task()?.id();
    let stored = run_async(world.service()?.get_by_id(id))
        .wrap_err("get task")?
        .ok_or_else(|| eyre::eyre!("task {id} missing from store"))?;
    let expected = parse_status(status)?;
    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected:?}, found {:?}",
            stored.status()
        ));
    }
    Ok(())
}
