use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single board entry. Timestamps are assigned by the store at append
/// time and serialized as ISO-8601 UTC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    /// Decimal rendering of the poster's pseudonymous u32 id.
    pub user: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// The full backing-file document: `{ "messages": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatLog {
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl ChatLog {
    /// Parses raw file contents, degrading to an empty log on any
    /// structural mismatch. A torn or corrupt backing file must never
    /// fail a read; the caller sees an empty board instead.
    pub fn parse_or_empty(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn next_id(&self) -> u64 {
        self.messages.iter().map(|m| m.id).max().unwrap_or(0) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_document() {
        let raw = r#"{"messages":[{"id":1,"user":"42","message":"hi","timestamp":"2026-08-29T10:00:00Z"}]}"#;
        let log = ChatLog::parse_or_empty(raw);
        assert_eq!(log.messages.len(), 1);
        assert_eq!(log.messages[0].id, 1);
        assert_eq!(log.messages[0].message, "hi");
    }

    #[test]
    fn test_parse_missing_messages_key_defaults_empty() {
        let log = ChatLog::parse_or_empty("{}");
        assert!(log.messages.is_empty());
    }

    #[test]
    fn test_parse_garbage_degrades_to_empty() {
        assert!(ChatLog::parse_or_empty("not json at all").messages.is_empty());
        assert!(ChatLog::parse_or_empty("[1,2,3]").messages.is_empty());
        assert!(ChatLog::parse_or_empty("").messages.is_empty());
        assert!(ChatLog::parse_or_empty(r#"{"messages": "nope"}"#)
            .messages
            .is_empty());
    }

    #[test]
    fn test_next_id_empty_log_starts_at_one() {
        assert_eq!(ChatLog::default().next_id(), 1);
    }

    #[test]
    fn test_next_id_is_max_plus_one() {
        let raw = r#"{"messages":[
            {"id":7,"user":"1","message":"a","timestamp":"2026-08-29T10:00:00Z"},
            {"id":3,"user":"1","message":"b","timestamp":"2026-08-29T10:00:01Z"}
        ]}"#;
        assert_eq!(ChatLog::parse_or_empty(raw).next_id(), 8);
    }
}
