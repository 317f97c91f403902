//! Reply composition.
//!
//! Renders intent templates against the live session and formats document
//! lookups into a single user-facing string.

use chrono::{DateTime, Local};

use nami_core::LookupResult;

/// Marker appended to a summary that was cut short.
pub const ELLIPSIS: &str = "...";

// =============================================================================
// ReplyContext
// =============================================================================

/// Values a template may interpolate, captured at reply time.
#[derive(Debug, Clone)]
pub struct ReplyContext<'a> {
    pub bot_name: &'a str,
    pub user_name: &'a str,
    pub search_count: u32,
    pub now: DateTime<Local>,
}

impl<'a> ReplyContext<'a> {
    pub fn new(bot_name: &'a str, user_name: &'a str, search_count: u32) -> Self {
        Self {
            bot_name,
            user_name,
            search_count,
            now: Local::now(),
        }
    }
}

/// Resolve `{placeholder}` tokens in `template`.
///
/// Unknown tokens are left as written.
pub fn render_template(template: &str, ctx: &ReplyContext<'_>) -> String {
    if !template.contains('{') {
        return template.to_string();
    }

    let mut out = template
        .replace("{bot}", ctx.bot_name)
        .replace("{user}", ctx.user_name)
        .replace("{search_count}", &ctx.search_count.to_string());

    let clock: [(&str, &str); 5] = [
        ("{time}", "%H:%M:%S"),
        ("{time_12h}", "%I:%M %p"),
        ("{date_long}", "%A, %B %d, %Y"),
        ("{date_numeric}", "%m/%d/%Y"),
        ("{date_short}", "%B %d, %Y"),
    ];
    for (token, fmt) in clock {
        if out.contains(token) {
            out = out.replace(token, &ctx.now.format(fmt).to_string());
        }
    }
    out
}

// =============================================================================
// ResponseGenerator
// =============================================================================

/// Formats lookup outcomes and fixed acknowledgements.
#[derive(Debug, Clone)]
pub struct ResponseGenerator {
    /// Summary length cap in characters.
    pub summary_max_chars: usize,
}

impl ResponseGenerator {
    pub fn new(summary_max_chars: usize) -> Self {
        Self { summary_max_chars }
    }

    /// Reply for a lookup of `term`, numbered as search `ordinal` of the session.
    pub fn compose_lookup(&self, term: &str, result: &LookupResult, ordinal: u32) -> String {
        match result {
            LookupResult::Found(doc) => format!(
                "**{}**\n\n{}\n\nRead full document: {}\n\nSearch #{} in this session",
                doc.title,
                truncate_summary(&doc.summary, self.summary_max_chars),
                doc.url,
                ordinal
            ),
            LookupResult::NotFound { .. } => format!(
                "I couldn't find any Wikipedia documents about '{}'. Try being more specific or check the spelling.",
                term
            ),
            LookupResult::SourceUnavailable => {
                "Sorry, Wikipedia is not available right now.".to_string()
            }
            LookupResult::SourceError { message } => format!(
                "Sorry, there was an error searching Wikipedia documents: {}",
                message
            ),
        }
    }

    /// Acknowledge a newly registered display name.
    pub fn name_ack(&self, name: &str) -> String {
        format!("Nice to meet you, {}! I'll remember your name.", name)
    }
}

/// First `max_chars` characters of `summary`, plus an ellipsis if anything was cut.
pub fn truncate_summary(summary: &str, max_chars: usize) -> String {
    match summary.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &summary[..cut], ELLIPSIS),
        None => summary.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================
