//! Core record types for rosterbook.
//!
//! This module defines the user record stored in the registry and the
//! draft fields the form holds before a submit.

use serde::{Deserialize, Serialize};

/// A single user entry in the registry.
///
/// The `id` is assigned once at creation and never changes; edits replace
/// the three payload fields in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique identifier, immutable after creation.
    pub id: i64,

    /// The user's display name.
    pub name: String,

    /// The user's email address.
    pub email: String,

    /// The user's city.
    pub city: String,
}

impl UserRecord {
    /// Create a new record with the given id and fields.
    #[must_use]
    pub fn new(id: i64, name: String, email: String, city: String) -> Self {
        Self {
            id,
            name,
            email,
            city,
        }
    }
}

/// The transient form values bound to the view before submission.
///
/// A draft is not a record: it has no id and carries no promise of
/// validity beyond what [`Draft::is_complete`] checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// Draft name field.
    pub name: String,
    /// Draft email field.
    pub email: String,
    /// Draft city field.
    pub city: String,
}

impl Draft {
    /// Create a draft from the three field values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            city: city.into(),
        }
    }

    /// Copy the payload fields of an existing record into a draft.
    #[must_use]
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            city: record.city.clone(),
        }
    }

    /// True when all three fields are non-empty.
    ///
    /// This is the only validation the registry performs.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.city.is_empty()
    }

    /// Reset all three fields to empty.
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.city.clear();
    }

    /// True when all three fields are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.city.is_empty()
    }
}
