//! Interactive console adapter.
//!
//! A dedicated thread reads stdin line by line into a channel, and each
//! utterance is answered on the blocking pool, since a lookup may wait on
//! the network. Ctrl-C is watched both at the prompt and while a reply is
//! pending.

use std::future::Future;
use std::io::{BufRead, Write};

use tokio::sync::mpsc;

use nami_chat::{ResponseEngine, Role, SessionStats, TranscriptEntry};

use crate::AppResult;

/// Queries shown in the banner and by the `examples` command.
pub const EXAMPLE_QUERIES: &[&str] = &[
    "What is artificial intelligence?",
    "Tell me about Albert Einstein",
    "Search for Python programming language",
    "Who is Marie Curie?",
    "Research quantum physics",
];

/// Bot replies longer than this are shortened in the history listing.
const HISTORY_PREVIEW_CHARS: usize = 100;

/// Console inputs handled outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Quit,
    Stats,
    History,
    Clear,
    Examples,
    Say,
}

impl ConsoleCommand {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "quit" | "exit" | "bye" => ConsoleCommand::Quit,
            "stats" => ConsoleCommand::Stats,
            "history" => ConsoleCommand::History,
            "clear" => ConsoleCommand::Clear,
            "examples" => ConsoleCommand::Examples,
            _ => ConsoleCommand::Say,
        }
    }
}

/// Run `respond` on the blocking pool and hand the engine back.
pub async fn respond_blocking(
    mut engine: ResponseEngine,
    input: String,
) -> AppResult<(ResponseEngine, String)> {
    let result = tokio::task::spawn_blocking(move || {
        let reply = engine.respond(&input);
        (engine, reply)
    })
    .await?;
    Ok(result)
}

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatExit {
    /// Quit command or end of input.
    Finished,
    /// Ctrl-C. A reply may still be running on the blocking pool.
    Interrupted,
}

/// Interactive loop on the process's stdin. Ends on a quit command, EOF, or Ctrl-C.
pub async fn run_chat(engine: ResponseEngine) -> AppResult<ChatExit> {
    print_banner();
    let lines = spawn_line_reader()?;
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };
    run_session(engine, lines, interrupt).await
}

/// Forward stdin lines from a detached thread. The channel closes on EOF.
///
/// A blocking read on this thread never holds up process exit.
fn spawn_line_reader() -> std::io::Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel(1);
    std::thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read stdin");
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}

/// Conversation loop over `lines`, ended early when `interrupt` completes.
pub async fn run_session<F>(
    mut engine: ResponseEngine,
    mut lines: mpsc::Receiver<String>,
    interrupt: F,
) -> AppResult<ChatExit>
where
    F: Future<Output = ()>,
{
    tokio::pin!(interrupt);

    loop {
        print!("\n{}: ", engine.display_name());
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.recv() => line,
            _ = &mut interrupt => {
                print_goodbye(engine.bot_name());
                return Ok(ChatExit::Interrupted);
            }
        };
        let Some(line) = line else {
            print_goodbye(engine.bot_name());
            break;
        };

        let input = line.trim().to_string();
        if input.is_empty() {
            continue;
        }

        match ConsoleCommand::parse(&input) {
            ConsoleCommand::Stats => println!("\n{}", format_stats(&engine.stats())),
            ConsoleCommand::History => println!("\n{}", format_history(engine.history())),
            ConsoleCommand::Clear => {
                engine.clear_history();
                println!("\nConversation history and search count cleared!");
            }
            ConsoleCommand::Examples => println!("\n{}", format_examples()),
            command @ (ConsoleCommand::Quit | ConsoleCommand::Say) => {
                let bot_name = engine.bot_name().to_string();
                let (returned, reply) = tokio::select! {
                    result = respond_blocking(engine, input) => result?,
                    _ = &mut interrupt => {
                        print_goodbye(&bot_name);
                        return Ok(ChatExit::Interrupted);
                    }
                };
                engine = returned;
                println!("\n{}: {}", engine.bot_name(), reply);
                if command == ConsoleCommand::Quit {
                    break;
                }
            }
        }
    }

    tracing::debug!(searches = engine.search_count(), "Console session ended");
    Ok(ChatExit::Finished)
}

fn print_goodbye(bot_name: &str) {
    println!("\n\n{}: Goodbye! Thanks for using NamiBot!", bot_name);
}

fn print_banner() {
    let rule = "=".repeat(70);
    println!("{}", rule);
    println!("NamiBot - Wikipedia Document Assistant");
    println!("{}", rule);
    println!("I can search Wikipedia documents for information on any topic!");
    println!("{}", format_examples());
    println!("Type 'quit', 'exit', or 'bye' to end the conversation");
    println!("Type 'help' to see what I can do");
    println!("Type 'stats', 'history', 'clear', or 'examples' for session tools");
    println!("{}", rule);
}

pub fn format_examples() -> String {
    let mut out = String::from("Examples:");
    for query in EXAMPLE_QUERIES {
        out.push_str(&format!("\n  - '{}'", query));
    }
    out
}

pub fn format_stats(stats: &SessionStats) -> String {
    format!(
        "NamiBot Statistics:\n   Total searches: {}\n   Conversation length: {}\n   Bot name: {}\n   User name: {}",
        stats.search_count, stats.transcript_length, stats.bot_name, stats.display_name
    )
}

/// Transcript listing with `HH:MM:SS` stamps and shortened bot replies.
pub fn format_history(history: &[TranscriptEntry]) -> String {
    if history.is_empty() {
        return "No conversation history yet.".to_string();
    }

    let mut out = String::from("Conversation History:");
    for entry in history {
        let text = match entry.role {
            Role::User => entry.text.clone(),
            Role::Bot => preview(&entry.text),
        };
        let label = match entry.role {
            Role::User => "User",
            Role::Bot => "Bot",
        };
        out.push_str(&format!(
            "\n{}: {}\nTime: {}\n",
            label,
            text,
            entry.timestamp.format("%H:%M:%S")
        ));
    }
    out
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(HISTORY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
