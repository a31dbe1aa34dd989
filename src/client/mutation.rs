//! Optimistic delete with rollback.

use std::collections::{HashMap, HashSet};

use crate::client::aggregate::{AggregateView, RemovedEntry};
use crate::client::error::ClientError;
use crate::domain::entities::Bookmark;

/// Lifecycle of a delete for one id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    Pending,
    Committed,
    RolledBack,
}

/// Proof that a delete was started. Must be handed back to
/// [`DeleteCoordinator::finish`] with the server's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTicket {
    id: String,
    removed: Option<RemovedEntry>,
}

impl DeleteTicket {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the record was in the view when the delete started.
    pub fn was_in_view(&self) -> bool {
        self.removed.is_some()
    }
}

/// How a delete ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The server confirmed; the record stays removed.
    Committed { id: String },
    /// The server failed; the record was put back if it had been removed.
    RolledBack { id: String, error: ClientError },
}

/// Tracks deletes in flight.
///
/// At most one delete per id is pending. Deletes for different ids are
/// independent and may complete in any order.
///
/// Page data arriving while a delete is pending must pass through
/// [`screen`](Self::screen): copies of pending ids are held back here instead
/// of re-entering the view.
#[derive(Debug, Default)]
pub struct DeleteCoordinator {
    pending: HashSet<String>,
    finished: HashMap<String, DeleteState>,
    withheld: HashMap<String, Bookmark>,
}

impl DeleteCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `id` from the view and marks the delete pending.
    ///
    /// Returns `None` without touching the view if a delete for `id` is
    /// already pending. An id that is not in the view still gets a ticket so
    /// the server can answer for it.
    pub fn begin(&mut self, view: &mut AggregateView, id: &str) -> Option<DeleteTicket> {
        if self.pending.contains(id) {
            return None;
        }

        let removed = view.remove_optimistically(id);
        self.pending.insert(id.to_string());
        self.finished.remove(id);

        Some(DeleteTicket {
            id: id.to_string(),
            removed,
        })
    }

    /// Settles a delete: on success the removal stands, on failure the
    /// snapshot is restored.
    pub fn finish(
        &mut self,
        view: &mut AggregateView,
        ticket: DeleteTicket,
        result: Result<(), ClientError>,
    ) -> DeleteOutcome {
        let DeleteTicket { id, removed } = ticket;
        self.pending.remove(&id);

        let withheld = self.withheld.remove(&id);

        match result {
            Ok(()) => {
                view.remove_optimistically(&id);
                self.finished.insert(id.clone(), DeleteState::Committed);
                DeleteOutcome::Committed { id }
            }
            Err(error) => {
                // a copy served during the delete is fresher than the snapshot
                match (withheld, removed) {
                    (Some(record), removed) => view.restore(RemovedEntry {
                        record,
                        position: removed.map_or(0, |entry| entry.position),
                    }),
                    (None, Some(entry)) => view.restore(entry),
                    (None, None) => {}
                }
                self.finished.insert(id.clone(), DeleteState::RolledBack);
                DeleteOutcome::RolledBack { id, error }
            }
        }
    }

    /// Drops a ticket without touching the view or recording an outcome.
    pub fn abandon(&mut self, ticket: DeleteTicket) {
        self.pending.remove(&ticket.id);
        self.withheld.remove(&ticket.id);
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains(id)
    }

    /// Removes records whose delete is pending from incoming page data.
    ///
    /// The latest withheld copy of each is kept for a rollback.
    pub fn screen(&mut self, page: Vec<Bookmark>) -> Vec<Bookmark> {
        if self.pending.is_empty() {
            return page;
        }

        let mut passed = Vec::with_capacity(page.len());
        for record in page {
            if self.pending.contains(&record.id) {
                tracing::debug!(id = %record.id, "Holding back record with pending delete");
                self.withheld.insert(record.id.clone(), record);
            } else {
                passed.push(record);
            }
        }
        passed
    }

    pub fn state(&self, id: &str) -> DeleteState {
        if self.pending.contains(id) {
            return DeleteState::Pending;
        }
        self.finished.get(id).cloned().unwrap_or(DeleteState::Idle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
