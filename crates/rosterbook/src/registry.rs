//! The registry view-model.
//!
//! This module owns the ordered user collection, the draft fields, and the
//! edit marker, and implements the load / persist / submit / begin-edit /
//! delete state transitions. The registry holds its [`SlotStore`] directly
//! rather than reaching for ambient state, so it can be driven in tests
//! against an in-memory store.

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::Result;
use crate::record::{Draft, UserRecord};
use crate::store::SlotStore;

/// The result of a submit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new record was appended with this id.
    Added(i64),
    /// The record with this id had its fields replaced and edit mode ended.
    Updated(i64),
    /// One or more draft fields were empty; nothing changed.
    MissingFields,
}

/// The user registry: an ordered collection mirrored to persistent storage
/// on every change, plus the transient form state.
#[derive(Debug)]
pub struct Registry {
    store: SlotStore,
    users: Vec<UserRecord>,
    draft: Draft,
    editing: Option<i64>,
}

impl Registry {
    /// Open a registry backed by the given store, loading any persisted
    /// collection.
    ///
    /// A failed read (absent slot, unreadable database, unparseable JSON)
    /// is treated as "no prior data": the registry starts empty and the
    /// failure is only logged. This is a one-time load with no retry.
    #[must_use]
    pub fn open(store: SlotStore) -> Self {
        let users = match store.read_records() {
            Ok(Some(records)) => records,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not load persisted records, starting empty: {e}");
                Vec::new()
            }
        };

        Self {
            store,
            users,
            draft: Draft::default(),
            editing: None,
        }
    }

    /// The current collection, in insertion order.
    #[must_use]
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    /// The current draft fields.
    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Replace the draft fields.
    pub fn set_draft(&mut self, draft: Draft) {
        self.draft = draft;
    }

    /// The id of the record being edited, if any.
    #[must_use]
    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Copy the fields of the record with the given id into the drafts and
    /// enter edit mode for it.
    ///
    /// Returns `false` (and changes nothing) when no record has that id.
    /// The collection itself is never mutated by this operation.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        match self.get(id) {
            Some(record) => {
                self.draft = Draft::from_record(record);
                self.editing = Some(id);
                true
            }
            None => false,
        }
    }

    /// Apply the drafts: update the record being edited, or append a new one.
    ///
    /// If any draft field is empty, returns [`SubmitOutcome::MissingFields`]
    /// and performs no state change at all, drafts included. Otherwise the
    /// drafts are applied, cleared, edit mode ends, and the collection is
    /// persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the updated collection fails; the
    /// in-memory mutation has already happened in that case.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        if !self.draft.is_complete() {
            return Ok(SubmitOutcome::MissingFields);
        }

        let outcome = if let Some(id) = self.editing.take() {
            // Replace the payload fields in place; the id never changes.
            // If the store was modified externally and the id is gone, the
            // collection stays as-is but the form still exits edit mode.
            if let Some(record) = self.users.iter_mut().find(|u| u.id == id) {
                record.name = self.draft.name.clone();
                record.email = self.draft.email.clone();
                record.city = self.draft.city.clone();
                debug!("Updated record {id}");
            } else {
                warn!("Edited record {id} no longer exists, nothing to update");
            }
            SubmitOutcome::Updated(id)
        } else {
            let id = self.next_id();
            self.users.push(UserRecord::new(
                id,
                self.draft.name.clone(),
                self.draft.email.clone(),
                self.draft.city.clone(),
            ));
            debug!("Added record {id}");
            SubmitOutcome::Added(id)
        };

        self.draft.clear();
        self.persist()?;
        Ok(outcome)
    }

    /// Remove the record with the given id, if present.
    ///
    /// Returns `true` when a record was removed. Removing an absent id is
    /// an idempotent no-op that touches neither the collection nor the
    /// store. Confirmation prompts belong to the callers; by the time this
    /// runs the delete is decided.
    ///
    /// Deleting the record currently being edited also leaves edit mode and
    /// clears the drafts, so the form cannot keep a stale reference to a
    /// record that no longer exists.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the shrunk collection fails.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        if self.users.len() == before {
            return Ok(false);
        }

        if self.editing == Some(id) {
            self.editing = None;
            self.draft.clear();
        }

        debug!("Deleted record {id}");
        self.persist()?;
        Ok(true)
    }

    /// Write the full collection to the store.
    fn persist(&self) -> Result<()> {
        self.store.write_records(&self.users)
    }

    /// Generate a fresh unique id.
    ///
    /// Ids are wall-clock milliseconds, bumped past the highest existing id
    /// so that rapid sequential creation within the same millisecond still
    /// yields distinct, increasing ids.
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let highest = self.users.iter().map(|u| u.id).max().unwrap_or(0);
        now.max(highest + 1)
    }
}
