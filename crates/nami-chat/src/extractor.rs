//! Search-term extraction.
//!
//! Turns a natural-language question into a lookup term, either from an
//! explicit lead-in ("tell me about X") or from a bare question-word
//! sentence ("who was napoleon?").

use regex::Regex;
use std::sync::LazyLock;

// =============================================================================
// Compiled patterns (compiled once, reused across calls)
// =============================================================================

/// Lead-in patterns, tried in order. Group 1 captures the topic.
static LEAD_IN_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:what is|who is|tell me about|search for|find information about|what do you know about)\s+(.+)",
        r"(?i)(?:can you tell me|do you know|i want to know about)\s+(.+)",
        r"(?i)(.+)\s+(?:on wikipedia|in wikipedia|from wikipedia)",
        r"(?i)(?:explain|describe|research)\s+(.+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid lead-in regex"))
    .collect()
});

static QUESTION_WORDS: &[&str] = &["what", "who", "when", "where", "how", "why"];

static STOP_WORDS: &[&str] = &[
    "what", "who", "when", "where", "how", "why", "is", "are", "was", "were", "the", "a", "an",
    "of", "in", "on", "at", "to", "for", "with", "by",
];

/// Characters trimmed from both ends of a candidate term.
const TERMINAL_PUNCTUATION: &[char] = &['?', '!', '.', ',', ';', ':'];

/// Maximum number of content words kept from a bare question.
const MAX_TOPIC_WORDS: usize = 4;

// =============================================================================
// Types
// =============================================================================

/// Which heuristic produced a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermOrigin {
    LeadIn,
    BareQuestion,
}

/// A non-empty search term ready for lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    pub term: String,
    pub origin: TermOrigin,
}

// =============================================================================
// QueryExtractor
// =============================================================================

/// Rule-based search-term extractor.
///
/// Every method expects input that is already lowercased and trimmed.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryExtractor;

impl QueryExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Try the lead-in patterns, then the bare-question heuristic.
    pub fn extract(&self, lowered: &str) -> Option<SearchTerm> {
        if let Some(term) = self.lead_in(lowered) {
            return Some(SearchTerm {
                term,
                origin: TermOrigin::LeadIn,
            });
        }
        self.bare_question(lowered).map(|term| SearchTerm {
            term,
            origin: TermOrigin::BareQuestion,
        })
    }

    /// Term captured by the first lead-in pattern whose capture survives
    /// punctuation stripping.
    ///
    /// A match that strips to nothing does not stop the scan. Later patterns
    /// still get their turn.
    pub fn lead_in(&self, lowered: &str) -> Option<String> {
        LEAD_IN_PATTERNS.iter().find_map(|re| {
            let captured = re.captures(lowered)?.get(1)?.as_str();
            let term = strip_terminal_punctuation(captured);
            (!term.is_empty()).then(|| term.to_string())
        })
    }

    /// Up to four content words from a sentence opening with a question word.
    ///
    /// Needs more than two words in total. The opening word is dropped
    /// unconditionally, then every stop word.
    pub fn bare_question(&self, lowered: &str) -> Option<String> {
        if !QUESTION_WORDS.iter().any(|q| lowered.starts_with(q)) {
            return None;
        }

        let words: Vec<&str> = lowered.split_whitespace().collect();
        if words.len() <= 2 {
            return None;
        }

        let topic: Vec<&str> = words[1..]
            .iter()
            .copied()
            .filter(|w| !STOP_WORDS.contains(w))
            .take(MAX_TOPIC_WORDS)
            .collect();
        if topic.is_empty() {
            return None;
        }

        let joined = topic.join(" ");
        let term = strip_terminal_punctuation(&joined);
        (!term.is_empty()).then(|| term.to_string())
    }
}

/// Trim whitespace and `?!.,;:` from both ends.
pub fn strip_terminal_punctuation(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || TERMINAL_PUNCTUATION.contains(&c))
}

// =============================================================================
// Tests
// =============================================================================
