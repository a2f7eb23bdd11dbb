use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryRole {
    User,
    Assistant,
}

/// One line of the chat transcript. Timestamps order display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub id: u64,
    pub role: EntryRole,
    pub content: String,
    pub created_at: DateTime<Local>,
}

/// Append-only log of the session's exchanges.
#[derive(Debug)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
    next_id: u64,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn push_user(&mut self, content: &str) -> &ConversationEntry {
        self.push(EntryRole::User, content)
    }

    pub fn push_assistant(&mut self, content: &str) -> &ConversationEntry {
        self.push(EntryRole::Assistant, content)
    }

    fn push(&mut self, role: EntryRole, content: &str) -> &ConversationEntry {
        let entry = ConversationEntry {
            id: self.next_id,
            role,
            content: content.to_string(),
            created_at: Local::now(),
        };
        self.next_id += 1;
        self.entries.push(entry);
        self.entries.last().expect("just pushed")
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_id = 1;
    }

    /// Restores a saved transcript, resuming ids past the highest loaded one.
    pub fn restore(&mut self, entries: Vec<ConversationEntry>) {
        self.next_id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        self.entries = entries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_appended_in_order_with_unique_ids() {
        let mut log = ConversationLog::new();
        log.push_user("hello");
        log.push_assistant("hi there");
        log.push_user("bye");

        let ids: Vec<u64> = log.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(log.entries()[0].role, EntryRole::User);
        assert_eq!(log.entries()[1].role, EntryRole::Assistant);
        assert_eq!(log.entries()[1].content, "hi there");
    }

    #[test]
    fn clear_resets_the_id_counter() {
        let mut log = ConversationLog::new();
        log.push_user("hello");
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.push_user("again").id, 1);
    }

    #[test]
    fn restore_resumes_ids_after_the_loaded_transcript() {
        let mut log = ConversationLog::new();
        log.push_user("one");
        log.push_assistant("two");

        let saved = serde_json::to_string(log.entries()).unwrap();
        let loaded: Vec<ConversationEntry> = serde_json::from_str(&saved).unwrap();

        let mut restored = ConversationLog::new();
        restored.restore(loaded);
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.push_user("three").id, 3);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let mut log = ConversationLog::new();
        log.push_assistant("hello");
        let json = serde_json::to_string(log.entries()).unwrap();
        assert!(json.contains("\"role\":\"assistant\""));
    }
}
