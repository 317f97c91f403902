//! Response engine: central coordinator wiring extraction, intents, the
//! document source, and session state.
//!
//! Every `respond` call appends one user entry and one bot entry and returns
//! the bot entry's text. Nothing inside can fail the call.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use nami_core::config::BotConfig;
use nami_core::text::title_case;
use nami_core::{DocumentSource, LookupResult};

use crate::error::ChatError;
use crate::extractor::{QueryExtractor, SearchTerm};
use crate::intents::{IntentMatcher, IntentTable};
use crate::picker::ReplyPicker;
use crate::response::{ReplyContext, ResponseGenerator};
use crate::session::SessionState;
use crate::types::{Role, SessionStats, TranscriptEntry};

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:my name is|i['’]m)\s+(\w+)").expect("Invalid name regex")
});

// =============================================================================
// Configuration
// =============================================================================

/// Engine settings, usually derived from the `[bot]` config section.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub bot_name: String,
    pub default_user_name: String,
    pub summary_max_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from(&BotConfig::default())
    }
}

impl From<&BotConfig> for EngineConfig {
    fn from(bot: &BotConfig) -> Self {
        Self {
            bot_name: bot.name.clone(),
            default_user_name: bot.default_user_name.clone(),
            summary_max_chars: bot.summary_max_chars,
        }
    }
}

// =============================================================================
// Routing
// =============================================================================

/// Where an utterance goes, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    RegisterName(String),
    Search(SearchTerm),
    Intent { index: usize, name: String },
    Fallback,
}

impl Route {
    pub fn label(&self) -> &'static str {
        match self {
            Route::RegisterName(_) => "register_name",
            Route::Search(_) => "search",
            Route::Intent { .. } => "intent",
            Route::Fallback => "fallback",
        }
    }
}

// =============================================================================
// ResponseEngine
// =============================================================================

/// One conversation's response engine.
pub struct ResponseEngine {
    config: EngineConfig,
    extractor: QueryExtractor,
    matcher: IntentMatcher,
    generator: ResponseGenerator,
    session: SessionState,
    source: Box<dyn DocumentSource>,
    picker: Box<dyn ReplyPicker>,
}

impl ResponseEngine {
    /// Build an engine over the standard intent table.
    pub fn new(
        config: EngineConfig,
        source: Box<dyn DocumentSource>,
        picker: Box<dyn ReplyPicker>,
    ) -> Result<Self, ChatError> {
        Self::with_table(config, IntentTable::standard()?, source, picker)
    }

    /// Build an engine over a custom intent table.
    pub fn with_table(
        config: EngineConfig,
        table: IntentTable,
        source: Box<dyn DocumentSource>,
        picker: Box<dyn ReplyPicker>,
    ) -> Result<Self, ChatError> {
        if config.bot_name.trim().is_empty() {
            return Err(ChatError::InvalidConfig("bot name is empty".into()));
        }
        if config.summary_max_chars == 0 {
            return Err(ChatError::InvalidConfig(
                "summary_max_chars must be greater than 0".into(),
            ));
        }

        debug!(
            bot = %config.bot_name,
            intents = table.len(),
            source = source.name(),
            "Response engine ready"
        );

        Ok(Self {
            generator: ResponseGenerator::new(config.summary_max_chars),
            session: SessionState::new(config.default_user_name.clone()),
            extractor: QueryExtractor::new(),
            matcher: IntentMatcher::new(table),
            config,
            source,
            picker,
        })
    }

    /// Produce the reply to one utterance and record both sides of the turn.
    pub fn respond(&mut self, raw: &str) -> String {
        self.session.push(Role::User, raw);

        let route = self.route(raw);
        debug!(route = route.label(), "Routing input");

        let reply = match route {
            Route::RegisterName(name) => {
                let reply = self.generator.name_ack(&name);
                info!(name = %name, "Display name registered");
                self.session.set_display_name(name);
                reply
            }
            Route::Search(term) => self.search(&term.term),
            Route::Intent { index, .. } => {
                let ctx = ReplyContext::new(
                    &self.config.bot_name,
                    self.session.display_name(),
                    self.session.search_count(),
                );
                self.matcher
                    .render(index, &ctx, self.picker.as_mut())
                    .unwrap_or_default()
            }
            Route::Fallback => {
                let ctx = ReplyContext::new(
                    &self.config.bot_name,
                    self.session.display_name(),
                    self.session.search_count(),
                );
                self.matcher.fallback(&ctx, self.picker.as_mut())
            }
        };

        self.session.push(Role::Bot, reply.clone());
        reply
    }

    /// Decide how `raw` would be handled, without touching state.
    pub fn route(&self, raw: &str) -> Route {
        let lowered = raw.trim().to_lowercase();

        if let Some(name) = NAME_RE
            .captures(&lowered)
            .and_then(|c| c.get(1))
            .map(|m| title_case(m.as_str()))
        {
            return Route::RegisterName(name);
        }

        if let Some(term) = self.extractor.extract(&lowered) {
            return Route::Search(term);
        }

        if let Some(index) = self.matcher.table().find(&lowered) {
            let name = self
                .matcher
                .table()
                .get(index)
                .map(|i| i.name.clone())
                .unwrap_or_default();
            return Route::Intent { index, name };
        }

        Route::Fallback
    }

    /// Reset transcript and search count. The display name survives.
    pub fn clear_history(&mut self) {
        self.session.clear();
        info!("Conversation history cleared");
    }

    pub fn stats(&self) -> SessionStats {
        self.session.stats(&self.config.bot_name)
    }

    pub fn history(&self) -> &[TranscriptEntry] {
        self.session.transcript()
    }

    pub fn display_name(&self) -> &str {
        self.session.display_name()
    }

    pub fn bot_name(&self) -> &str {
        &self.config.bot_name
    }

    pub fn search_count(&self) -> u32 {
        self.session.search_count()
    }

    // -- Private helpers --

    fn search(&mut self, term: &str) -> String {
        let ordinal = self.session.record_search();
        info!(term = %term, ordinal, source = self.source.name(), "Document lookup");

        let result = self.source.lookup(term);
        match &result {
            LookupResult::SourceError { message } => {
                warn!(term = %term, error = %message, "Document lookup failed")
            }
            other => debug!(term = %term, outcome = other.label(), "Document lookup finished"),
        }

        self.generator.compose_lookup(term, &result, ordinal)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::TermOrigin;
    use crate::intents::DEFAULT_FALLBACKS;
    use crate::picker::FixedPicker;
    use nami_core::{Document, UnavailableSource};

    struct EchoSource;

    impl DocumentSource for EchoSource {
        fn lookup(&self, term: &str) -> LookupResult {
            LookupResult::Found(Document {
                title: title_case(term),
                summary: format!("About {}.", term),
                url: format!("https://example/{}", term.replace(' ', "_")),
            })
        }
    }

    fn engine() -> ResponseEngine {
        ResponseEngine::new(
            EngineConfig::default(),
            Box::new(EchoSource),
            Box::new(FixedPicker(0)),
        )
        .unwrap()
    }

    // ---- Construction ----

    #[test]
    fn test_new_engine_defaults() {
        let e = engine();
        assert_eq!(e.bot_name(), "NamiBot");
        assert_eq!(e.display_name(), "User");
        assert_eq!(e.search_count(), 0);
        assert!(e.history().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            bot_name: "  ".into(),
            ..EngineConfig::default()
        };
        let result = ResponseEngine::new(config, Box::new(EchoSource), Box::new(FixedPicker(0)));
        assert!(matches!(result, Err(ChatError::InvalidConfig(_))));

        let config = EngineConfig {
            summary_max_chars: 0,
            ..EngineConfig::default()
        };
        let result = ResponseEngine::new(config, Box::new(EchoSource), Box::new(FixedPicker(0)));
        assert!(matches!(result, Err(ChatError::InvalidConfig(_))));
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<ResponseEngine>();
    }

    // ---- Routing ----

    #[test]
    fn test_route_name_registration() {
        assert_eq!(
            engine().route("My name is alice"),
            Route::RegisterName("Alice".into())
        );
        assert_eq!(
            engine().route("I'm BOB"),
            Route::RegisterName("Bob".into())
        );
    }

    #[test]
    fn test_route_name_beats_search() {
        assert_eq!(
            engine().route("What is my name is Bob"),
            Route::RegisterName("Bob".into())
        );
    }

    #[test]
    fn test_route_lead_in_search() {
        match engine().route("Tell me about Quantum Physics") {
            Route::Search(term) => {
                assert_eq!(term.term, "quantum physics");
                assert_eq!(term.origin, TermOrigin::LeadIn);
            }
            other => panic!("expected search, got {:?}", other),
        }
    }

    #[test]
    fn test_route_bare_question_search() {
        match engine().route("Who was Napoleon?") {
            Route::Search(term) => {
                assert_eq!(term.term, "napoleon");
                assert_eq!(term.origin, TermOrigin::BareQuestion);
            }
            other => panic!("expected search, got {:?}", other),
        }
    }

    #[test]
    fn test_route_search_shadows_question_word_intents() {
        // Both look like questions, so the search heuristics claim them first.
        assert!(matches!(engine().route("What is your name?"), Route::Search(_)));
        assert!(matches!(engine().route("How are you?"), Route::Search(_)));
    }

    #[test]
    fn test_route_intent() {
        assert_eq!(
            engine().route("Hello"),
            Route::Intent {
                index: 0,
                name: "greeting".into()
            }
        );
        assert!(matches!(
            engine().route("What time?"),
            Route::Intent { ref name, .. } if name == "time"
        ));
    }

    #[test]
    fn test_route_fallback() {
        assert_eq!(engine().route("xyz123"), Route::Fallback);
        assert_eq!(engine().route(""), Route::Fallback);
        assert_eq!(engine().route("   "), Route::Fallback);
    }

    // ---- respond ----

    #[test]
    fn test_respond_hello_first_template() {
        let mut e = engine();
        assert_eq!(
            e.respond("Hello"),
            "Hello! I'm NamiBot, your Wikipedia research assistant! What would you like to learn about today?"
        );
    }

    #[test]
    fn test_respond_appends_one_pair_per_call() {
        let mut e = engine();
        let inputs = ["Hello", "My name is Alice", "Tell me about rust", "xyz123", ""];
        for (i, input) in inputs.iter().enumerate() {
            let reply = e.respond(input);
            let history = e.history();
            assert_eq!(history.len(), (i + 1) * 2);
            assert_eq!(history[i * 2].role, Role::User);
            assert_eq!(history[i * 2].text, *input);
            assert_eq!(history[i * 2 + 1].role, Role::Bot);
            assert_eq!(history[i * 2 + 1].text, reply);
        }
    }

    #[test]
    fn test_respond_name_registration_sticky() {
        let mut e = engine();
        assert_eq!(
            e.respond("My name is Alice"),
            "Nice to meet you, Alice! I'll remember your name."
        );
        assert_eq!(e.display_name(), "Alice");
        let bye = e.respond("Goodbye");
        assert!(bye.contains("Alice"));
        assert!(!bye.contains("User"));
    }

    #[test]
    fn test_respond_search_increments_count() {
        let mut e = engine();
        let reply = e.respond("Tell me about rust");
        assert!(reply.contains("**Rust**"));
        assert!(reply.contains("Search #1 in this session"));
        e.respond("what is a compiler?");
        assert_eq!(e.search_count(), 2);
    }

    #[test]
    fn test_respond_unavailable_still_counts() {
        let mut e = ResponseEngine::new(
            EngineConfig::default(),
            Box::new(UnavailableSource),
            Box::new(FixedPicker(0)),
        )
        .unwrap();
        let reply = e.respond("tell me about tides");
        assert_eq!(reply, "Sorry, Wikipedia is not available right now.");
        assert_eq!(e.search_count(), 1);
    }

    #[test]
    fn test_respond_fallback_leaves_count() {
        let mut e = engine();
        let reply = e.respond("xyz123");
        assert!(DEFAULT_FALLBACKS.contains(&reply.as_str()));
        assert_eq!(e.search_count(), 0);
    }

    #[test]
    fn test_search_count_intent_reflects_live_count() {
        let mut e = engine();
        e.respond("tell me about rust");
        e.respond("tell me about go");
        assert_eq!(
            e.respond("search count"),
            "I've performed 2 Wikipedia searches so far in this session!"
        );
    }

    // ---- clear / stats ----

    #[test]
    fn test_clear_history() {
        let mut e = engine();
        e.respond("My name is Carol");
        e.respond("tell me about rust");
        e.clear_history();
        let stats = e.stats();
        assert_eq!(stats.search_count, 0);
        assert_eq!(stats.transcript_length, 0);
        assert_eq!(stats.display_name, "Carol");
        e.clear_history();
        assert_eq!(e.stats(), stats);
    }

    #[test]
    fn test_stats_fields() {
        let mut e = engine();
        e.respond("hello");
        let stats = e.stats();
        assert_eq!(stats.bot_name, "NamiBot");
        assert_eq!(stats.display_name, "User");
        assert_eq!(stats.transcript_length, 2);
        assert_eq!(stats.search_count, 0);
    }

    #[test]
    fn test_custom_bot_name_in_templates() {
        let config = EngineConfig {
            bot_name: "Nami".into(),
            ..EngineConfig::default()
        };
        let mut e =
            ResponseEngine::new(config, Box::new(EchoSource), Box::new(FixedPicker(1))).unwrap();
        assert_eq!(
            e.respond("hi"),
            "Hi there! I'm Nami. I can search Wikipedia documents for you!"
        );
    }
}
