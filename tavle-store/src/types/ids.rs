//! Identifier newtypes for board records.
//!
//! Identifiers are opaque strings. Locally generated ones are ULIDs, which
//! sort by creation time, but nothing here assumes that shape: ids assigned
//! by a remote backend pass through untouched.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

macro_rules! id_type {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh identifier.
            pub fn new() -> Self {
                Self(Ulid::new().to_string())
            }

            /// Wrap an identifier assigned elsewhere.
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

id_type! {
    /// Identifies a board.
    BoardId
}

id_type! {
    /// Identifies a list (column) on a board.
    ListId
}

id_type! {
    /// Identifies a task.
    TaskId
}

id_type! {
    /// Identifies a user.
    UserId
}

id_type! {
    /// Identifies an activity journal entry.
    ActivityId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_is_ulid_shaped() {
        let id = TaskId::new();
        assert_eq!(id.as_str().len(), 26);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ListId::new();
        let b = ListId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_foreign_id_round_trip() {
        let id = TaskId::from_string("task-from-backend");
        assert_eq!(id.as_str(), "task-from-backend");
        assert_eq!(id.to_string(), "task-from-backend");
        assert_eq!(TaskId::from("task-from-backend"), id);
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = BoardId::from("board-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"board-1\"");
        let back: BoardId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
