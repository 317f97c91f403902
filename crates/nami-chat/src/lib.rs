//! Conversational core for NamiBot.
//!
//! Decides, for each utterance, between name registration, a document
//! lookup, a canned small-talk reply, or a clarification prompt, and keeps
//! the per-conversation transcript.

pub mod engine;
pub mod error;
pub mod extractor;
pub mod intents;
pub mod picker;
pub mod response;
pub mod session;
pub mod types;

pub use engine::{EngineConfig, ResponseEngine, Route};
pub use error::ChatError;
pub use extractor::{QueryExtractor, SearchTerm, TermOrigin};
pub use intents::{Intent, IntentDef, IntentMatcher, IntentTable};
pub use picker::{FixedPicker, RandomPicker, ReplyPicker};
pub use response::{ReplyContext, ResponseGenerator};
pub use session::SessionState;
pub use types::{Role, SessionStats, TranscriptEntry};
