//! Session context: who is acting on the board.

use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// The acting user handed to a store at construction.
///
/// Mutations that require an actor check this up front and fail with
/// [`StoreError::AuthRequired`](crate::StoreError::AuthRequired) before any
/// backend call when nobody is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<UserId>,
}

impl Session {
    /// A session with no signed-in user.
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// A session acting as the given user.
    pub fn authenticated(user: impl Into<UserId>) -> Self {
        Self {
            user: Some(user.into()),
        }
    }

    /// The signed-in user, if any.
    pub fn user_id(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
