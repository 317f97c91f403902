//! Scripted demonstration conversation.
//!
//! Small talk first, then research commands, a run of encyclopedic
//! lookups, and finally edge cases. Ends with the transcript, the session
//! statistics, and a history reset.

use std::time::Duration;

use nami_chat::ResponseEngine;

use crate::console::{format_history, format_stats, respond_blocking};
use crate::AppResult;

pub const BASIC_CONVERSATION: &[&str] = &[
    "Hello",
    "What is your name?",
    "How are you?",
    "My name is Alice",
    "What time is it?",
    "Help",
    "Thank you",
    "Search count",
    "Goodbye",
];

pub const RESEARCH_COMMANDS: &[&str] = &[
    "Research quantum physics",
    "Search for information about space exploration",
    "Find documents about renewable energy",
    "Tell me about artificial intelligence",
    "What do you know about climate change?",
];

pub const DOCUMENT_SEARCHES: &[&str] = &[
    "What is artificial intelligence?",
    "Tell me about Albert Einstein",
    "Who is Marie Curie?",
    "Search for Python programming language",
    "What is quantum physics?",
    "Tell me about Leonardo da Vinci",
    "What is machine learning?",
    "Who is Isaac Newton?",
    "What is DNA?",
    "Tell me about the Great Wall of China",
    "What is blockchain technology?",
    "Who is Nikola Tesla?",
    "What is climate change?",
    "Tell me about the Renaissance",
    "What is virtual reality?",
];

pub fn edge_cases() -> Vec<String> {
    vec![
        String::new(),
        "   ".to_string(),
        "xyz123".to_string(),
        "a".repeat(1000),
        "What is this very specific topic that probably doesn't exist on Wikipedia?".to_string(),
    ]
}

/// Play every scripted section through `engine`, pausing `delay` after each
/// utterance that triggered a lookup.
pub async fn run_demo(mut engine: ResponseEngine, delay: Duration) -> AppResult<()> {
    let sections: [(&str, Vec<String>); 4] = [
        ("Basic conversation", to_owned(BASIC_CONVERSATION)),
        ("Research commands", to_owned(RESEARCH_COMMANDS)),
        ("Document searches", to_owned(DOCUMENT_SEARCHES)),
        ("Edge cases", edge_cases()),
    ];

    println!("NamiBot - Demo");
    println!("{}", "=".repeat(60));

    for (title, inputs) in sections {
        println!("\n{}", title);
        println!("{}", "=".repeat(40));

        for input in inputs {
            println!("Input: '{}'", input);
            let before = engine.search_count();
            let (returned, reply) = respond_blocking(engine, input).await?;
            engine = returned;
            println!("Response: {}", reply);
            println!("{}", "-".repeat(30));

            if engine.search_count() != before && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    println!("\n{}", format_history(engine.history()));
    println!("{}", format_stats(&engine.stats()));

    println!("\nClearing conversation history...");
    engine.clear_history();
    println!("Result: Conversation history and search count cleared!");
    println!(
        "History length after clearing: {}",
        engine.history().len()
    );

    tracing::info!("Demo finished");
    Ok(())
}

fn to_owned(inputs: &[&str]) -> Vec<String> {
    inputs.iter().map(|s| s.to_string()).collect()
}
