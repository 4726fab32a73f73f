//! The command loop.

use crate::commands::{HELP, UiAction, parse_command};
use crate::prompter::TerminalPrompter;
use sketchpad_core::storage::format_shape;
use sketchpad_core::{ConfigError, Editor, EditorConfig, Mode, PointerEvent, Prompter, ToolKind};
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Editor configuration file. Falls back to the platform default location.
    pub config_path: Option<PathBuf>,
    /// File registered as the save target at startup. It is not loaded.
    pub initial_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Sketchpad".to_string(),
            config_path: None,
            initial_file: None,
        }
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    editor: Editor,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::from_parts(AppConfig::default(), EditorConfig::default())
    }

    /// Create an application, loading the editor configuration it points at.
    pub fn with_config(config: AppConfig) -> Result<Self, ConfigError> {
        let editor_config = match config
            .config_path
            .clone()
            .or_else(EditorConfig::default_path)
        {
            Some(path) => EditorConfig::load_or_default(&path)?,
            None => EditorConfig::default(),
        };
        Ok(Self::from_parts(config, editor_config))
    }

    fn from_parts(config: AppConfig, editor_config: EditorConfig) -> Self {
        let mut editor = Editor::with_config(editor_config);
        if let Some(path) = &config.initial_file {
            log::info!("Current file: {}", path.display());
            editor.files_mut().set_current_file(Some(path.clone()));
        }
        Self { config, editor }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Read commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut TerminalPrompter<R, W>,
    ) -> io::Result<()> {
        prompter.say(&format!("{} (type 'help' for commands)", self.config.title));
        while let Some(line) = prompter.read_line()? {
            match parse_command(&line) {
                Ok(Some(action)) => {
                    if self.handle(action, prompter).is_break() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Rejected command '{line}': {e}");
                    prompter.say(&format!("error: {e}"));
                }
            }
        }
        if self.editor.is_dirty() {
            log::info!("Leaving with unsaved changes");
        }
        Ok(())
    }

    /// Apply one action.
    pub fn handle<R: BufRead, W: Write>(
        &mut self,
        action: UiAction,
        prompter: &mut TerminalPrompter<R, W>,
    ) -> ControlFlow<()> {
        match action {
            UiAction::SetTool(tool) => self.editor.set_tool(tool),
            UiAction::SetColor(color) => self.set_color(&color, prompter),
            UiAction::SetStyle(corner) => self.editor.set_style(corner),
            UiAction::SetMode(mode) => self.editor.set_mode(mode),
            UiAction::DrawPreset { tool, color } => {
                self.set_color(&color, prompter);
                self.editor.set_tool(Some(tool));
                self.editor.set_mode(Mode::Draw);
            }
            UiAction::DrawStyle(corner) => {
                self.editor.set_style(corner);
                self.editor.set_tool(Some(ToolKind::Rectangle));
                self.editor.set_mode(Mode::Draw);
            }
            UiAction::Pointer(event) => self.pointer(event, prompter),
            UiAction::Click { from, to } => {
                for event in PointerEvent::gesture(from, to) {
                    self.pointer(event, prompter);
                }
            }
            UiAction::Open => match self.editor.open_document(prompter) {
                Ok(true) => prompter.say(&format!("{} shapes loaded", self.editor.document().len())),
                Ok(false) => {}
                Err(e) => report(prompter, "Open failed", &e),
            },
            UiAction::Save => match self.editor.save_document(prompter) {
                Ok(Some(path)) => prompter.say(&format!("Saved to {}", path.display())),
                Ok(None) => {}
                Err(e) => report(prompter, "Save failed", &e),
            },
            UiAction::Export => match self.editor.export_xml(prompter) {
                Ok(Some(path)) => prompter.say(&format!("Exported to {}", path.display())),
                Ok(None) => {}
                Err(e) => report(prompter, "Export failed", &e),
            },
            UiAction::List => self.list(prompter),
            UiAction::Help => {
                for (usage, description) in HELP {
                    prompter.say(&format!("  {usage:<28} {description}"));
                }
            }
            UiAction::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn set_color<R: BufRead, W: Write>(&mut self, color: &str, prompter: &mut TerminalPrompter<R, W>) {
        if let Err(e) = self.editor.set_color(color) {
            prompter.message(&e.to_string());
        }
    }

    fn pointer<R: BufRead, W: Write>(
        &mut self,
        event: PointerEvent,
        prompter: &mut TerminalPrompter<R, W>,
    ) {
        let transition = self.editor.dispatch(event, prompter);
        log::debug!(
            "{event}: {} -> {}, {} effects",
            transition.from,
            transition.to,
            transition.effects.len()
        );
    }

    fn list<R: BufRead, W: Write>(&self, prompter: &mut TerminalPrompter<R, W>) {
        let editor = &self.editor;
        let tool = editor
            .tools()
            .current_tool
            .map_or("none", ToolKind::name);
        prompter.say(&format!(
            "mode {}, tool {}, color {}, style {}{}",
            editor.mode(),
            tool,
            editor.tools().current_color,
            editor.tools().current_corner,
            if editor.is_dirty() { " (modified)" } else { "" }
        ));
        for (index, shape) in editor.document().shapes_ordered().enumerate() {
            let marker = if editor.selection().contains(shape.id()) { "*" } else { " " };
            prompter.say(&format!("{marker}{index:>3} {}", format_shape(shape)));
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn report<R: BufRead, W: Write>(
    prompter: &mut TerminalPrompter<R, W>,
    what: &str,
    error: &dyn std::error::Error,
) {
    log::error!("{what}: {error}");
    prompter.message(&format!("{what}: {error}"));
}
