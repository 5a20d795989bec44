//! Append-only message ledger shared by the agents.
//!
//! Every cross-agent exchange is recorded here as a directed, timestamped
//! message. Entries are immutable once appended; retrieval preserves
//! insertion order.

use crate::error::LedgerError;
use crate::{new_entity_id, EntityId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

// ============================================================================
// MESSAGE
// ============================================================================

/// A directed message between two agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Message {
    /// Unique identifier for this message
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub id: EntityId,
    /// Sending agent identity
    pub sender: String,
    /// Receiving agent identity
    pub receiver: String,
    /// Message body
    pub content: String,
    /// When the message was recorded
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub timestamp: Timestamp,
}

// ============================================================================
// MESSAGE LEDGER
// ============================================================================

/// Append-only store of directed agent messages.
///
/// The original implementation kept an unsynchronized list; here concurrent
/// appends from parallel agents go through an explicit `RwLock`.
#[derive(Debug, Default)]
pub struct MessageLedger {
    messages: RwLock<Vec<Message>>,
}

impl MessageLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a timestamped message and return it. Prior entries are never
    /// mutated.
    pub fn record(
        &self,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Message, LedgerError> {
        let message = Message {
            id: new_entity_id(),
            sender: sender.into(),
            receiver: receiver.into(),
            content: content.into(),
            timestamp: Utc::now(),
        };

        let mut messages = self.messages.write().map_err(|_| LedgerError::LockPoisoned)?;
        messages.push(message.clone());
        Ok(message)
    }

    /// Retrieve messages matching the given filters, in insertion order.
    ///
    /// Filters combine with AND semantics; an omitted filter matches all.
    pub fn query(
        &self,
        sender: Option<&str>,
        receiver: Option<&str>,
    ) -> Result<Vec<Message>, LedgerError> {
        let messages = self.messages.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(messages
            .iter()
            .filter(|m| sender.is_none_or(|s| m.sender == s))
            .filter(|m| receiver.is_none_or(|r| m.receiver == r))
            .cloned()
            .collect())
    }

    /// Discard all entries. Only the owning process calls this, never an
    /// agent.
    pub fn clear(&self) -> Result<(), LedgerError> {
        let mut messages = self.messages.write().map_err(|_| LedgerError::LockPoisoned)?;
        messages.clear();
        Ok(())
    }

    /// Number of recorded messages.
    pub fn len(&self) -> Result<usize, LedgerError> {
        let messages = self.messages.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(messages.len())
    }

    /// Whether the ledger holds no messages.
    pub fn is_empty(&self) -> Result<bool, LedgerError> {
        Ok(self.len()? == 0)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_returns_message() {
        let ledger = MessageLedger::new();
        let message = ledger
            .record("Data Specialist", "Report Generator", "analysis text")
            .unwrap();

        assert_eq!(message.sender, "Data Specialist");
        assert_eq!(message.receiver, "Report Generator");
        assert_eq!(message.content, "analysis text");
        assert_eq!(ledger.len().unwrap(), 1);
    }

    #[test]
    fn test_query_preserves_insertion_order() {
        let ledger = MessageLedger::new();
        ledger.record("a", "b", "first").unwrap();
        ledger.record("a", "b", "second").unwrap();
        ledger.record("a", "b", "third").unwrap();

        let messages = ledger.query(None, None).unwrap();
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_query_filters_with_and_semantics() {
        let ledger = MessageLedger::new();
        ledger.record("a", "b", "1").unwrap();
        ledger.record("a", "c", "2").unwrap();
        ledger.record("b", "c", "3").unwrap();

        let from_a = ledger.query(Some("a"), None).unwrap();
        assert_eq!(from_a.len(), 2);

        let to_c = ledger.query(None, Some("c")).unwrap();
        assert_eq!(to_c.len(), 2);

        let a_to_c = ledger.query(Some("a"), Some("c")).unwrap();
        assert_eq!(a_to_c.len(), 1);
        assert_eq!(a_to_c[0].content, "2");
    }

    #[test]
    fn test_query_no_match_returns_empty() {
        let ledger = MessageLedger::new();
        ledger.record("a", "b", "1").unwrap();

        let result = ledger.query(Some("nobody"), None).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_clear_discards_all_entries() {
        let ledger = MessageLedger::new();
        ledger.record("a", "b", "1").unwrap();
        ledger.record("a", "b", "2").unwrap();

        ledger.clear().unwrap();
        assert!(ledger.is_empty().unwrap());
        assert!(ledger.query(None, None).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_appends() {
        use std::sync::Arc;
        use std::thread;

        let ledger = Arc::new(MessageLedger::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    for j in 0..50 {
                        ledger
                            .record(format!("agent-{}", i), "sink", format!("msg-{}", j))
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(ledger.len().unwrap(), 400);
    }
}
