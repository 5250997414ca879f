//! Interactive chat application for conversing with a local Ollama model.
//!
//! This binary provides a REPL interface for chatting with models served by
//! a local Ollama server.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! ollama-chat
//!
//! # Specify a model
//! ollama-chat --model mistral
//!
//! # Talk to a server on another machine
//! ollama-chat --host gpu-box:11434
//!
//! # Disable colors (useful for piping output)
//! ollama-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/clear` - Clear conversation history
//! - `/model <name>` - Change the model
//! - `/models` - List available models
//! - `/history` - Show the conversation so far
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use ollama_chat::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, help_text,
    parse_command,
};
use ollama_chat::{Ollama, probe, remediation_message};

/// Main entry point for the ollama-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let (args, _) = ChatArgs::from_command_line_relaxed("ollama-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let mut renderer = PlainTextRenderer::with_color(config.use_color);

    let client = config.client()?;
    if let Err(err) = probe(&client).await {
        renderer.print_error(&remediation_message(&err));
        std::process::exit(1);
    }

    let mut session = ChatSession::start(client, config.model.clone()).await;
    if let Some(err) = session.catalog().failure() {
        renderer.print_error(&format!("Error fetching models: {err}"));
    }
    let mut rl = DefaultEditor::new()?;

    println!("Ollama Chat (model: {})", session.model());
    println!("Make sure Ollama is running on your system with `ollama serve`.");
    println!("Type /help for commands, /quit to exit\n");

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Clear => {
                            session.clear();
                            renderer.print_info("Conversation cleared.");
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Model(model_name) => match session.set_model(&model_name) {
                            Ok(()) => {
                                renderer.print_info(&format!("Model changed to: {}", model_name))
                            }
                            Err(err) => renderer.print_error(&format!(
                                "{err}; use /models to see what is available"
                            )),
                        },
                        ChatCommand::Models => {
                            print_models(&session);
                        }
                        ChatCommand::History => {
                            if session.turns().is_empty() {
                                renderer.print_info("No messages yet.");
                            } else {
                                renderer.print_transcript(session.turns());
                            }
                        }
                        ChatCommand::Stats => {
                            print_stats(&session);
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the model
                renderer.start_waiting();
                match session.send(line).await {
                    Some(turn) => renderer.print_turn(&turn),
                    None => renderer.finish_waiting(),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_models(session: &ChatSession<Ollama>) {
    let catalog = session.catalog();
    if catalog.is_empty() {
        println!("    No models installed; pull one with `ollama pull llama2`.");
        return;
    }
    println!("    Available models:");
    for model in catalog.identifiers() {
        let marker = if model == session.model() { "*" } else { " " };
        println!("      {marker} {model}");
    }
    if catalog.is_fallback() {
        println!("    (fallback list; the server could not be asked)");
    }
}

fn print_stats(session: &ChatSession<Ollama>) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Model: {}", stats.model);
    println!("      Messages: {}", stats.message_count);
    println!(
        "      Requests: {} ({} failed)",
        stats.total_requests, stats.failed_requests
    );
    println!(
        "      Catalog: {} models{}",
        stats.catalog_size,
        if stats.catalog_fallback {
            " (fallback)"
        } else {
            ""
        }
    );
    println!("      Catalog fetched: {}", stats.catalog_fetched_at);
    println!("      Server: {}", session.backend().base_url());
}
