//! Store configuration.

use crate::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How `move_task` writes positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveSemantics {
    /// Write only the moved task (`list_id`, `position`, `updated_at`).
    /// Displaced tasks keep their stored positions, so values can collide
    /// or leave gaps after repeated moves; ordering stays deterministic
    /// through the query tie-break.
    #[default]
    MinimalWrite,
    /// Additionally rewrite displaced positions so the source and
    /// destination lists come out as contiguous 1-based sequences.
    Renumber,
}

/// Configuration for a board store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Position write policy for `move_task`.
    pub move_semantics: MoveSemantics,
    /// Deadline applied to every backend call.
    pub request_timeout: Duration,
    /// Retry policy for mutations. Loads are never retried; the next
    /// change event or explicit reload covers them.
    pub retry: RetryConfig,
    /// Capacity of the store's event feed.
    pub event_buffer: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            move_semantics: MoveSemantics::default(),
            request_timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
            event_buffer: 64,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_move_semantics(mut self, move_semantics: MoveSemantics) -> Self {
        self.move_semantics = move_semantics;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_event_buffer(mut self, event_buffer: usize) -> Self {
        self.event_buffer = event_buffer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.move_semantics, MoveSemantics::MinimalWrite);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.retry.max_retries, 2);
        assert_eq!(config.event_buffer, 64);
    }

    #[test]
    fn test_builders() {
        let config = StoreConfig::new()
            .with_move_semantics(MoveSemantics::Renumber)
            .with_request_timeout(Duration::from_secs(3));
        assert_eq!(config.move_semantics, MoveSemantics::Renumber);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_move_semantics_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&MoveSemantics::MinimalWrite).unwrap(),
            "\"minimal_write\""
        );
    }
}
