//! Small-talk intents.
//!
//! An ordered table of word-boundary patterns, each with a handful of reply
//! templates. The first pattern that matches anywhere in the input wins.

use regex::Regex;

use crate::error::ChatError;
use crate::picker::{choose, ReplyPicker};
use crate::response::{render_template, ReplyContext};

/// Static description of one intent, compiled into an [`Intent`].
#[derive(Debug, Clone, Copy)]
pub struct IntentDef {
    pub name: &'static str,
    pub pattern: &'static str,
    pub templates: &'static [&'static str],
}

/// The built-in intents, in match order.
pub static STANDARD_INTENTS: &[IntentDef] = &[
    IntentDef {
        name: "greeting",
        pattern: r"\b(hi|hello|hey|greetings)\b",
        templates: &[
            "Hello! I'm {bot}, your Wikipedia research assistant! What would you like to learn about today?",
            "Hi there! I'm {bot}. I can search Wikipedia documents for you!",
            "Hello! I'm {bot}! Ask me anything and I'll find the information in Wikipedia documents!",
        ],
    },
    IntentDef {
        name: "wellbeing",
        pattern: r"\b(how are you|how do you do)\b",
        templates: &[
            "I'm doing great! Ready to search Wikipedia documents for you, {user}!",
            "I'm functioning perfectly! What topic would you like me to research?",
            "All systems operational! I'm ready to help you find information in Wikipedia documents!",
        ],
    },
    IntentDef {
        name: "identity",
        pattern: r"\b(what is your name|who are you)\b",
        templates: &[
            "My name is {bot}! I'm a Wikipedia document research assistant.",
            "I'm {bot}, your friendly Wikipedia document explorer.",
            "You can call me {bot}! I help people find information in Wikipedia documents.",
        ],
    },
    IntentDef {
        name: "farewell",
        pattern: r"\b(bye|goodbye|see you|exit|quit)\b",
        templates: &[
            "Goodbye! It was nice helping you research Wikipedia documents, {user}!",
            "See you later! Feel free to come back for more Wikipedia knowledge!",
            "Take care! Wikipedia documents are always here when you need information!",
        ],
    },
    IntentDef {
        name: "thanks",
        pattern: r"\b(thank you|thanks)\b",
        templates: &[
            "You're welcome! Wikipedia documents have so much knowledge to share.",
            "My pleasure! I love helping people discover information in Wikipedia documents.",
            "Glad I could help! Wikipedia is an amazing resource for learning.",
        ],
    },
    IntentDef {
        name: "time",
        pattern: r"\b(what time|current time)\b",
        templates: &[
            "The current time is {time}",
            "It's {time_12h} right now",
            "Current time: {time}",
        ],
    },
    IntentDef {
        name: "date",
        pattern: r"\b(what date|today|date)\b",
        templates: &[
            "Today is {date_long}",
            "The date is {date_numeric}",
            "Today: {date_short}",
        ],
    },
    IntentDef {
        name: "help",
        pattern: r"\b(help|what can you do)\b",
        templates: &[
            "I can search Wikipedia documents for any topic! Just ask me about anything - people, places, events, concepts, etc.",
            "I'm a Wikipedia document chatbot! Ask me about any topic and I'll find the information for you.",
            "I can help you learn about anything by searching Wikipedia documents. Just ask me a question!",
        ],
    },
    IntentDef {
        name: "wikipedia",
        pattern: r"\b(wikipedia|wiki)\b",
        templates: &[
            "Wikipedia is a free online encyclopedia with millions of documents! I can search it for you.",
            "Wikipedia is one of the largest knowledge bases in the world. What would you like to know?",
            "Wikipedia documents have information on almost everything! What topic interests you?",
        ],
    },
    IntentDef {
        name: "search_count",
        pattern: r"\b(search count|how many searches)\b",
        templates: &[
            "I've performed {search_count} Wikipedia searches so far in this session!",
            "Current search count: {search_count} Wikipedia document searches.",
            "I've searched Wikipedia documents {search_count} times for you!",
        ],
    },
];

/// Clarification prompts used when nothing else matches.
pub static DEFAULT_FALLBACKS: &[&str] = &[
    "I'm not sure I understand. Could you ask me about a specific topic to search in Wikipedia documents?",
    "Interesting! Let me search Wikipedia documents for that. Could you be more specific?",
    "I'm here to help you find information in Wikipedia documents. What would you like to learn about?",
    "That's an interesting question! Let me search Wikipedia documents for you. Could you rephrase it?",
    "I can search Wikipedia documents for almost anything! What topic would you like to explore?",
];

// =============================================================================
// IntentTable
// =============================================================================

/// A compiled intent.
#[derive(Debug, Clone)]
pub struct Intent {
    pub name: String,
    pub regex: Regex,
    pub templates: Vec<String>,
}

/// Ordered, immutable set of intents plus the fallback prompts.
#[derive(Debug, Clone)]
pub struct IntentTable {
    intents: Vec<Intent>,
    fallbacks: Vec<String>,
}

impl IntentTable {
    /// The built-in table.
    pub fn standard() -> Result<Self, ChatError> {
        Self::from_defs(STANDARD_INTENTS, DEFAULT_FALLBACKS)
    }

    /// Compile `defs` in order. Patterns are matched case-insensitively.
    pub fn from_defs(defs: &[IntentDef], fallbacks: &[&str]) -> Result<Self, ChatError> {
        let mut intents = Vec::with_capacity(defs.len());
        for def in defs {
            if def.templates.is_empty() {
                return Err(ChatError::EmptyTemplates(def.name.to_string()));
            }
            let regex =
                Regex::new(&format!("(?i){}", def.pattern)).map_err(|e| {
                    ChatError::InvalidPattern {
                        pattern: def.pattern.to_string(),
                        reason: e.to_string(),
                    }
                })?;
            intents.push(Intent {
                name: def.name.to_string(),
                regex,
                templates: def.templates.iter().map(|t| t.to_string()).collect(),
            });
        }

        if fallbacks.is_empty() {
            return Err(ChatError::EmptyTemplates("fallback".to_string()));
        }

        Ok(Self {
            intents,
            fallbacks: fallbacks.iter().map(|f| f.to_string()).collect(),
        })
    }

    /// Index of the first intent whose pattern occurs anywhere in `text`.
    pub fn find(&self, text: &str) -> Option<usize> {
        self.intents.iter().position(|i| i.regex.is_match(text))
    }

    pub fn get(&self, index: usize) -> Option<&Intent> {
        self.intents.get(index)
    }

    pub fn fallbacks(&self) -> &[String] {
        &self.fallbacks
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Intent> {
        self.intents.iter()
    }
}

// =============================================================================
// IntentMatcher
// =============================================================================

/// Picks and renders replies from an [`IntentTable`].
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    table: IntentTable,
}

impl IntentMatcher {
    pub fn new(table: IntentTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &IntentTable {
        &self.table
    }

    /// Render a randomly chosen template of the intent at `index`.
    pub fn render(
        &self,
        index: usize,
        ctx: &ReplyContext<'_>,
        picker: &mut dyn ReplyPicker,
    ) -> Option<String> {
        let intent = self.table.get(index)?;
        let template = choose(picker, &intent.templates)?;
        Some(render_template(template, ctx))
    }

    /// A clarification prompt.
    pub fn fallback(&self, ctx: &ReplyContext<'_>, picker: &mut dyn ReplyPicker) -> String {
        choose(picker, self.table.fallbacks())
            .map(|f| render_template(f, ctx))
            .unwrap_or_default()
    }
}

// =============================================================================
// Tests
// =============================================================================
