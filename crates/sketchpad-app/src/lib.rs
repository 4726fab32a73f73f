//! Sketchpad Application
//!
//! A line-command shell around the editor: commands stand in for the menus and pointer,
//! terminal prompts stand in for the dialogs.

mod app;
mod commands;
mod prompter;

pub use app::{App, AppConfig};
pub use commands::{CommandError, HELP, UiAction, parse_command};
pub use prompter::TerminalPrompter;
