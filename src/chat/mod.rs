//! Chat application module for interactive conversations with a local model.
//!
//! This module provides a REPL chat interface built on top of the
//! ollama-chat client library. It supports:
//!
//! - Full-context, request/response exchanges with the backend
//! - Error turns in place of failed replies, so the transcript never loses a turn
//! - Slash commands for session control
//! - Model selection from the catalog fetched at startup
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Core chat session management and backend interaction
//! - [`commands`]: Slash command parsing and handling
//! - [`render`]: Terminal output

mod commands;
mod config;
mod render;
mod session;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use render::{PlainTextRenderer, Renderer, format_turn};
pub use session::{ChatSession, SessionSnapshot, SessionState, SessionStats};
