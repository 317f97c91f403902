//! Per-conversation state: who the user is, how many lookups ran, and the
//! ordered transcript.

use crate::types::{Role, SessionStats, TranscriptEntry};

/// Mutable state of a single conversation.
///
/// Owned by exactly one `ResponseEngine`; never shared between conversations.
#[derive(Debug, Clone)]
pub struct SessionState {
    display_name: String,
    search_count: u32,
    transcript: Vec<TranscriptEntry>,
}

impl SessionState {
    pub fn new(default_user_name: impl Into<String>) -> Self {
        Self {
            display_name: default_user_name.into(),
            search_count: 0,
            transcript: Vec::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.display_name = name.into();
    }

    pub fn search_count(&self) -> u32 {
        self.search_count
    }

    /// Count one lookup attempt and return its 1-based ordinal.
    pub fn record_search(&mut self) -> u32 {
        self.search_count = self.search_count.saturating_add(1);
        self.search_count
    }

    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        self.transcript.push(TranscriptEntry::new(role, text));
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Drop the transcript and reset the search counter. The display name stays.
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.search_count = 0;
    }

    pub fn stats(&self, bot_name: &str) -> SessionStats {
        SessionStats {
            search_count: self.search_count,
            transcript_length: self.transcript.len(),
            bot_name: bot_name.to_string(),
            display_name: self.display_name.clone(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new("User")
    }
}
