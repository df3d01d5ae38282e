//! User domain model.
//!
//! # Responsibility
//! - Define the canonical user record persisted by both storage backends.
//! - Enforce field validation before any write reaches a store.
//!
//! # Invariants
//! - `id` is stable and never reused for another user.
//! - A persisted user always has non-empty `first_name` and `last_name`.
//! - A given store commits to exactly one identity strategy; the two
//!   `UserId` variants never mix within one store.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a persisted user record.
///
/// The two backends assign identity differently: the key-value store
/// generates a random UUID before insert, the relational store assigns a
/// monotonically increasing rowid at insert time. Serialized untagged so
/// the key-value payload carries the id as a plain string and the
/// relational id reads as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    /// Client-generated random key (key-value backend).
    Key(Uuid),
    /// Store-assigned monotonic integer (relational backend).
    Rowid(i64),
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(uuid) => write!(f, "{uuid}"),
            Self::Rowid(rowid) => write!(f, "{rowid}"),
        }
    }
}

/// Canonical persisted user record.
///
/// Records are created once and never updated or deleted; the persisted
/// shape is the flat `{id, first_name, last_name}` object shared by both
/// backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable record identity, assigned at creation per backend strategy.
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Checks the persisted-record invariants.
    ///
    /// Read paths call this so invalid stored state is rejected instead of
    /// masked.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        validate_names(&self.first_name, &self.last_name)
    }
}

/// Creation input for a user record, before identity is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
}

impl NewUser {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Rejects empty or whitespace-only name fields.
    ///
    /// Stored text keeps the caller's original spacing; only the emptiness
    /// check trims.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        validate_names(&self.first_name, &self.last_name)
    }
}

fn validate_names(first_name: &str, last_name: &str) -> Result<(), UserValidationError> {
    if first_name.trim().is_empty() {
        return Err(UserValidationError::EmptyFirstName);
    }
    if last_name.trim().is_empty() {
        return Err(UserValidationError::EmptyLastName);
    }
    Ok(())
}

/// Field-level validation failure for user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyFirstName,
    EmptyLastName,
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFirstName => write!(f, "first name must not be empty"),
            Self::EmptyLastName => write!(f, "last name must not be empty"),
        }
    }
}

impl Error for UserValidationError {}

#[cfg(test)]
mod tests {
    use super::{NewUser, User, UserId, UserValidationError};
    use uuid::Uuid;

    #[test]
    fn new_user_rejects_empty_and_whitespace_fields() {
        let missing_first = NewUser::new("", "Doe");
        assert_eq!(
            missing_first.validate(),
            Err(UserValidationError::EmptyFirstName)
        );

        let missing_last = NewUser::new("Jane", "   ");
        assert_eq!(
            missing_last.validate(),
            Err(UserValidationError::EmptyLastName)
        );

        assert_eq!(NewUser::new("Jane", "Doe").validate(), Ok(()));
    }

    #[test]
    fn user_serializes_with_flat_field_names() {
        let user = User {
            id: UserId::Key(Uuid::nil()),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json["id"],
            serde_json::Value::String(Uuid::nil().to_string())
        );
        assert_eq!(json["first_name"], "Ada");
        assert_eq!(json["last_name"], "Lovelace");
    }

    #[test]
    fn key_id_roundtrips_as_string() {
        let id = UserId::Key(Uuid::new_v4());
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.starts_with('"'));

        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn rowid_id_roundtrips_as_integer() {
        let id = UserId::Rowid(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");

        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
