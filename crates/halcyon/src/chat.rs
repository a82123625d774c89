// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `halcyon chat` command implementation.
//!
//! Launches an interactive REPL with colored prompt and readline history.
//! Replies travel over the duplex channel when it is up and over plain
//! request/response when it is not; the caller cannot tell the difference
//! beyond latency.

use colored::Colorize;
use halcyon_api::ApiClient;
use halcyon_api::types::ChatReply;
use halcyon_chat::{ChatEvent, ChatTransport, SendOutcome};
use halcyon_config::model::{ChatConfig, HalcyonConfig};
use halcyon_core::error::HalcyonError;
use halcyon_core::types::{Identity, Role};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::warn;

/// Runs the `halcyon chat` interactive REPL.
///
/// Preloads the stored transcript, connects the duplex channel, then reads
/// lines until `/quit`. A failed send never tears the session down; it is
/// logged and the prompt comes back.
pub async fn run_chat(config: &HalcyonConfig, identity: &Identity) -> Result<(), HalcyonError> {
    let api = ApiClient::new(&config.server)?;

    // Resume the conversation where the last session left off. An empty or
    // unreachable transcript is not an error, the session just starts blank.
    match api
        .chat()
        .history(&identity.user_id, config.chat.history_limit)
        .await
    {
        Ok(history) => {
            for entry in &history.history {
                match entry.role {
                    Role::User => println!("{} {}", "you>".green(), entry.text),
                    Role::Assistant => println!("{} {}", "halcyon>".cyan(), entry.text),
                }
            }
            if !history.history.is_empty() {
                println!();
            }
        }
        Err(e) => {
            warn!(error = %e, "chat history unavailable, starting with an empty transcript");
        }
    }

    let mut transport =
        ChatTransport::connect(&config.server, api.clone(), identity.user_id.clone()).await;

    // Set up readline editor.
    let mut rl = DefaultEditor::new()
        .map_err(|e| HalcyonError::Internal(format!("failed to initialize readline: {e}")))?;

    // Print welcome message.
    println!("{}", "halcyon chat".bold().green());
    println!("Type {} to exit.\n", "/quit".yellow());

    // REPL loop.
    let prompt = format!("{}> ", "you".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                match transport.send(trimmed).await {
                    Ok(SendOutcome::ViaFallback(reply)) => render_reply(&config.chat, &reply),
                    Ok(SendOutcome::ViaDuplex) => await_duplex_reply(&config.chat, &mut transport).await,
                    Err(e) => {
                        // The message is dropped, not retried. The prompt
                        // comes back with no transcript entry.
                        warn!(error = %e, "message send failed");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                break;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    transport.shutdown().await;
    println!("{}", "goodbye".dimmed());
    Ok(())
}

/// Clears the server-side transcript (`halcyon chat --clear`).
pub async fn run_clear(config: &HalcyonConfig, identity: &Identity) -> Result<(), HalcyonError> {
    let api = ApiClient::new(&config.server)?;
    match api.chat().clear_history(&identity.user_id).await {
        Ok(_) => println!("chat history cleared"),
        Err(e) => {
            warn!(error = %e, "failed to clear chat history");
        }
    }
    Ok(())
}

/// Blocks on the event stream until the reply to the just-sent message
/// arrives. Malformed frames are skipped; a closed channel ends the wait
/// and later sends go over plain request/response.
async fn await_duplex_reply(chat_config: &ChatConfig, transport: &mut ChatTransport) {
    loop {
        match transport.events().recv().await {
            Some(ChatEvent::Reply(reply)) => {
                render_reply(chat_config, &reply);
                break;
            }
            Some(ChatEvent::Malformed) => continue,
            Some(ChatEvent::Closed) | None => {
                println!("{}", "connection closed, continuing over http".dimmed());
                break;
            }
        }
    }
}

/// Prints an assistant reply with its mood annotation, crisis banner,
/// and coping suggestions.
fn render_reply(chat_config: &ChatConfig, reply: &ChatReply) {
    println!("{} {}", "halcyon>".cyan(), reply.response);
    if reply.crisis_detected {
        println!("{}", "⚠ Crisis support available".red().bold());
    }
    if let Some(annotation) = mood_annotation(reply) {
        println!("{}", annotation.dimmed());
    }
    if chat_config.show_suggestions && !reply.suggestions.is_empty() {
        for suggestion in &reply.suggestions {
            println!("{}", format!("  - {suggestion}").dimmed());
        }
    }
}

/// The `mood: sad (72%)` caption under a reply, when the backend detected
/// a mood in the message.
fn mood_annotation(reply: &ChatReply) -> Option<String> {
    let mood = reply.mood_detected.as_deref()?;
    Some(match reply.mood_intensity {
        Some(intensity) => format!("  mood: {mood} ({intensity}%)"),
        None => format!("  mood: {mood}"),
    })
}
