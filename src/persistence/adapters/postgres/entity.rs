//! Table mapping contract for entities stored in `PostgreSQL`.

use crate::persistence::{
    Change, FlushOutcome,
    ports::{Entity, RepositoryResult},
};
use diesel::PgConnection;

/// SQL operations for one entity table.
///
/// Each entity supplies its own Diesel queries; [`super::PostgresRepository`]
/// and [`flush_changes`] stay generic over the entity type.
pub trait PgEntity: Entity {
    /// Inserts a row and returns it with its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::ports::RepositoryError`] on query failure.
    fn insert(connection: &mut PgConnection, draft: &Self::Draft) -> RepositoryResult<Self>;

    /// Replaces the stored values of the row identified by `entity.id()`.
    ///
    /// Returns the number of affected rows.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::ports::RepositoryError`] on query failure.
    fn update(connection: &mut PgConnection, entity: &Self) -> RepositoryResult<usize>;

    /// Deletes the row identified by `id`, returning the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::ports::RepositoryError`] on query failure.
    fn delete(connection: &mut PgConnection, id: Self::Id) -> RepositoryResult<usize>;

    /// Loads the row identified by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::ports::RepositoryError`] on query or
    /// decoding failure.
    fn load(connection: &mut PgConnection, id: Self::Id) -> RepositoryResult<Option<Self>>;

    /// Loads every row matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::ports::RepositoryError`] on query or
    /// decoding failure.
    fn load_matching(
        connection: &mut PgConnection,
        filter: &Self::Filter,
    ) -> RepositoryResult<Vec<Self>>;
}

/// Writes `changes` in staging order on `connection`.
///
/// Callers run this inside a transaction so the batch applies atomically.
///
/// # Errors
///
/// Returns the first query failure; the surrounding transaction is then
/// rolled back.
pub fn flush_changes<E: PgEntity>(
    connection: &mut PgConnection,
    changes: Vec<Change<E>>,
) -> RepositoryResult<FlushOutcome<E>> {
    let mut outcome = FlushOutcome::default();
    for change in changes {
        match change {
            Change::Insert { ticket, draft } => {
                let entity = E::insert(connection, &draft)?;
                outcome.inserted.push((ticket, entity));
                outcome.affected += 1;
            }
            Change::Update(entity) => outcome.affected += E::update(connection, &entity)?,
            Change::Delete(id) => outcome.affected += E::delete(connection, id)?,
        }
    }
    Ok(outcome)
}
