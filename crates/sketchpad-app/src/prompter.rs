//! Dialogs over a line-oriented terminal.

use sketchpad_core::{FileDialog, Prompter};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Prompter that asks questions on `output` and reads answers from `input`.
///
/// Commands and answers share the same input stream, so the shell reads its commands
/// through [`TerminalPrompter::read_line`].
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read the next line without its terminator. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Write one line of output.
    pub fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{text}") {
            log::warn!("Failed to write output: {e}");
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        if let Err(e) = write!(self.output, "{prompt} ").and_then(|_| self.output.flush()) {
            log::warn!("Failed to write prompt: {e}");
        }
        match self.read_line() {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Failed to read answer: {e}");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        self.ask(&format!("{title}: {message} [y/N]"))
            .map(|answer| matches!(answer.trim(), "y" | "Y" | "yes" | "ok"))
            .unwrap_or(false)
    }

    fn ask_string(&mut self, title: &str, prompt: &str) -> Option<String> {
        self.ask(&format!("{title}: {prompt}"))
            .filter(|answer| !answer.trim().is_empty())
    }

    fn message(&mut self, text: &str) {
        self.say(text);
    }

    fn choose_file(&mut self, dialog: FileDialog) -> Option<PathBuf> {
        self.ask(&format!("{} file path (blank to cancel):", dialog.title()))
            .map(|answer| answer.trim().to_string())
            .filter(|answer| !answer.is_empty())
            .map(PathBuf::from)
    }
}
