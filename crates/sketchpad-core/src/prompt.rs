//! User-facing dialogs the editor needs from its host.

use std::path::PathBuf;

/// Which file dialog to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDialog {
    /// Pick an existing drawing to open.
    Open,
    /// Pick where to save the drawing.
    Save,
    /// Pick where to write the XML export.
    Export,
}

impl FileDialog {
    pub fn title(self) -> &'static str {
        match self {
            FileDialog::Open => "Open",
            FileDialog::Save => "Save As",
            FileDialog::Export => "Export",
        }
    }
}

/// Host-provided dialogs.
///
/// Returning `false` or `None` means the user cancelled.
pub trait Prompter {
    /// Ask an OK/Cancel question.
    fn confirm(&mut self, title: &str, message: &str) -> bool;

    /// Ask for a line of text.
    fn ask_string(&mut self, title: &str, prompt: &str) -> Option<String>;

    /// Show an informational message.
    fn message(&mut self, text: &str);

    /// Ask for a file path.
    fn choose_file(&mut self, dialog: FileDialog) -> Option<PathBuf>;
}

/// Prompter that cancels everything and records messages. Useful for headless use.
#[derive(Debug, Clone, Default)]
pub struct SilentPrompter {
    pub messages: Vec<String>,
}

impl Prompter for SilentPrompter {
    fn confirm(&mut self, _title: &str, _message: &str) -> bool {
        false
    }

    fn ask_string(&mut self, _title: &str, _prompt: &str) -> Option<String> {
        None
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn choose_file(&mut self, _dialog: FileDialog) -> Option<PathBuf> {
        None
    }
}
