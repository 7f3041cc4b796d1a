//! Pending-change tracking shared by repository implementations.

use crate::persistence::ports::Entity;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Ticket for an insert queued with [`crate::persistence::ports::Repository::add`].
pub struct Staged<E> {
    ticket: u64,
    entity: PhantomData<fn() -> E>,
}

impl<E> Staged<E> {
    /// Creates a ticket. Only repository implementations mint tickets.
    #[must_use]
    pub const fn new(ticket: u64) -> Self {
        Self {
            ticket,
            entity: PhantomData,
        }
    }

    /// Returns the ticket number.
    #[must_use]
    pub const fn ticket(&self) -> u64 {
        self.ticket
    }
}

impl<E> fmt::Debug for Staged<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Staged").field(&self.ticket).finish()
    }
}

impl<E> PartialEq for Staged<E> {
    fn eq(&self, other: &Self) -> bool {
        self.ticket == other.ticket
    }
}

impl<E> Eq for Staged<E> {}

/// A single queued mutation.
#[derive(Debug, Clone)]
pub enum Change<E: Entity> {
    /// Insert a new row; storage assigns the identifier.
    Insert {
        /// Ticket handed out when the insert was staged.
        ticket: u64,
        /// Field values of the new row.
        draft: E::Draft,
    },
    /// Replace the stored field values of an existing row.
    Update(E),
    /// Remove the row with this identifier.
    Delete(E::Id),
}

/// Result of flushing a batch of changes to storage.
#[derive(Debug, Clone)]
pub struct FlushOutcome<E: Entity> {
    /// Number of rows inserted, updated, or deleted.
    pub affected: usize,
    /// Persisted entities keyed by their staging ticket.
    pub inserted: Vec<(u64, E)>,
}

impl<E: Entity> Default for FlushOutcome<E> {
    fn default() -> Self {
        Self {
            affected: 0,
            inserted: Vec::new(),
        }
    }
}

/// Ordered queue of uncommitted changes for one repository.
#[derive(Debug, Clone)]
pub struct ChangeSet<E: Entity> {
    changes: Vec<Change<E>>,
    next_ticket: u64,
    persisted: HashMap<u64, E>,
}

impl<E: Entity> Default for ChangeSet<E> {
    fn default() -> Self {
        Self {
            changes: Vec::new(),
            next_ticket: 0,
            persisted: HashMap::new(),
        }
    }
}

impl<E: Entity> ChangeSet<E> {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an insert and returns its ticket.
    pub fn stage_insert(&mut self, draft: E::Draft) -> Staged<E> {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.changes.push(Change::Insert { ticket, draft });
        Staged::new(ticket)
    }

    /// Queues an update.
    pub fn stage_update(&mut self, entity: E) {
        self.changes.push(Change::Update(entity));
    }

    /// Queues a delete.
    pub fn stage_delete(&mut self, id: E::Id) {
        self.changes.push(Change::Delete(id));
    }

    /// Returns the number of queued changes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns `true` when nothing is queued.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Removes and returns every queued change in staging order.
    pub fn drain(&mut self) -> Vec<Change<E>> {
        std::mem::take(&mut self.changes)
    }

    /// Records the entities persisted by a successful flush.
    pub fn settle(&mut self, inserted: Vec<(u64, E)>) {
        self.persisted.extend(inserted);
    }

    /// Resolves a staged insert to its persisted entity.
    pub fn take_persisted(&mut self, staged: &Staged<E>) -> Option<E> {
        self.persisted.remove(&staged.ticket())
    }
}
