use chrono::Utc;
use serde::{ Serialize, Deserialize };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Which input surface most recently produced input. Echoed to the client so
/// the page keeps the matching tab focused after a redraw; nothing else
/// depends on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Text,
    File,
    Recording,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: Role,
    pub content: String,
    /// True for user entries that came out of the transcription endpoint
    /// rather than the keyboard.
    #[serde(default)]
    pub transcribed: bool,
    pub timestamp: i64,
}

impl ConversationEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            transcribed: false,
            timestamp: Utc::now().timestamp(),
        }
    }

    pub fn transcribed_user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            transcribed: true,
            timestamp: Utc::now().timestamp(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            transcribed: false,
            timestamp: Utc::now().timestamp(),
        }
    }
}

/// Append-only chat log for one session. Entries are never edited or removed;
/// the vector is private so `push` is the only mutator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    entries: Vec<ConversationEntry>,
}

impl Conversation {
    pub fn new(id: String) -> Self {
        Self { id, entries: Vec::new() }
    }

    pub fn push(&mut self, entry: ConversationEntry) {
        self.entries.push(entry);
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_grows_by_append_only() {
        let mut conv = Conversation::new("c1".to_string());
        assert!(conv.is_empty());

        conv.push(ConversationEntry::user("Hello"));
        conv.push(ConversationEntry::assistant("Bonjour"));

        assert_eq!(conv.len(), 2);
        assert_eq!(conv.entries()[0].role, Role::User);
        assert_eq!(conv.entries()[0].content, "Hello");
        assert_eq!(conv.entries()[1].role, Role::Assistant);
        assert_eq!(conv.entries()[1].content, "Bonjour");
    }

    #[test]
    fn earlier_entries_survive_later_appends() {
        let mut conv = Conversation::new("c2".to_string());
        conv.push(ConversationEntry::user("first"));
        let before = conv.entries()[0].content.clone();

        for i in 0..5 {
            conv.push(ConversationEntry::assistant(format!("reply {}", i)));
        }

        assert_eq!(conv.entries()[0].content, before);
        assert_eq!(conv.len(), 6);
    }

    #[test]
    fn transcribed_flag_marks_audio_entries() {
        let typed = ConversationEntry::user("typed");
        let spoken = ConversationEntry::transcribed_user("spoken");
        assert!(!typed.transcribed);
        assert!(spoken.transcribed);
        assert_eq!(spoken.role, Role::User);
    }
}
