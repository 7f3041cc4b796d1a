//! `PostgreSQL` table mapping for tasks.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::persistence::{
    adapters::postgres::PgEntity,
    ports::{RepositoryError, RepositoryResult},
};
use crate::task::domain::{
    PersistedTaskData, Task, TaskDraft, TaskFilter, TaskId, TaskStatus, TaskTitle,
};
use diesel::pg::PgConnection;
use diesel::prelude::*;

impl PgEntity for Task {
    fn insert(connection: &mut PgConnection, draft: &TaskDraft) -> RepositoryResult<Self> {
        let new_row = NewTaskRow {
            title: draft.title().as_str(),
            description: draft.description(),
            status: draft.status().as_str(),
            due_date: draft.due_date(),
        };

        let row = diesel::insert_into(tasks::table)
            .values(&new_row)
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)?;
        row_to_task(row)
    }

    fn update(connection: &mut PgConnection, entity: &Self) -> RepositoryResult<usize> {
        let affected = diesel::update(tasks::table.find(entity.id().value()))
            .set((
                tasks::title.eq(entity.title().as_str()),
                tasks::description.eq(entity.description()),
                tasks::status.eq(entity.status().as_str()),
                tasks::due_date.eq(entity.due_date()),
            ))
            .execute(connection)?;
        Ok(affected)
    }

    fn delete(connection: &mut PgConnection, id: TaskId) -> RepositoryResult<usize> {
        let affected = diesel::delete(tasks::table.find(id.value())).execute(connection)?;
        Ok(affected)
    }

    fn load(connection: &mut PgConnection, id: TaskId) -> RepositoryResult<Option<Self>> {
        let row = tasks::table
            .find(id.value())
            .select(TaskRow::as_select())
            .first::<TaskRow>(connection)
            .optional()?;
        row.map(row_to_task).transpose()
    }

    fn load_matching(
        connection: &mut PgConnection,
        filter: &TaskFilter,
    ) -> RepositoryResult<Vec<Self>> {
        let mut query = tasks::table
            .select(TaskRow::as_select())
            .order(tasks::id.asc())
            .into_boxed();
        if let Some(status) = filter.status() {
            query = query.filter(tasks::status.eq(status.as_str()));
        }
        if let Some(due_date) = filter.due_date() {
            query = query.filter(tasks::due_date.eq(due_date));
        }

        let rows = query.load::<TaskRow>(connection)?;
        rows.into_iter().map(row_to_task).collect()
    }
}

fn row_to_task(row: TaskRow) -> RepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description,
        status: persisted_status,
        due_date,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(RepositoryError::invalid_persisted_data)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(RepositoryError::invalid_persisted_data)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        title,
        description,
        status,
        due_date,
    }))
}
