//! Line commands understood by the shell.

use sketchpad_core::{CanvasPoint, CornerStyle, Mode, PRESET_COLORS, PointerEvent, ToolKind};
use thiserror::Error;

/// Errors from parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    Usage {
        command: &'static str,
        expected: &'static str,
    },
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("{0}")]
    Invalid(String),
}

/// Action requested by one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Change the current tool (`None` disarms it).
    SetTool(Option<ToolKind>),
    /// Change the color for new shapes.
    SetColor(String),
    /// Change the corner style for new rectangles.
    SetStyle(CornerStyle),
    /// Switch interaction mode.
    SetMode(Mode),
    /// Menu preset: set color and tool, then enter draw mode.
    DrawPreset { tool: ToolKind, color: String },
    /// Menu preset: set rectangle style, then enter draw mode with the rectangle tool.
    DrawStyle(CornerStyle),
    /// A single pointer event.
    Pointer(PointerEvent),
    /// Press, drag and release.
    Click { from: CanvasPoint, to: CanvasPoint },
    /// Open a drawing.
    Open,
    /// Save the drawing.
    Save,
    /// Export the drawing as XML.
    Export,
    /// Print the document.
    List,
    /// Print the command summary.
    Help,
    /// Leave the shell.
    Quit,
}

/// Command summary printed by `help`.
pub const HELP: &[(&str, &str)] = &[
    ("tool line|rectangle|none", "Choose the drawing tool"),
    ("color NAME", "Color for new shapes"),
    ("style s|r", "Sharp or rounded rectangle corners"),
    ("mode MODE", "draw, edit, delete, move, copy, group, ungroup, idle"),
    ("draw line|rectangle COLOR", "Pick a preset color and tool, then start drawing"),
    ("draw rectangle-style s|r", "Pick a rectangle style and start drawing"),
    ("down|drag|up X Y", "Send one pointer event"),
    ("click X1 Y1 X2 Y2", "Press at X1 Y1, drag to X2 Y2 and release"),
    ("open", "Open a drawing"),
    ("save", "Save the drawing"),
    ("export", "Export the drawing as XML"),
    ("list", "Show the document"),
    ("quit", "Leave"),
];

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<UiAction>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    let args = &words[1..];

    let action = match words[0] {
        "tool" => match args {
            ["none"] => UiAction::SetTool(None),
            [name] => UiAction::SetTool(Some(name.parse().map_err(CommandError::Invalid)?)),
            _ => return Err(usage("tool", "a tool name")),
        },
        "color" => match args {
            [name] => UiAction::SetColor(name.to_string()),
            _ => return Err(usage("color", "one color name")),
        },
        "style" => match args {
            [code] => UiAction::SetStyle(style(code)?),
            _ => return Err(usage("style", "s or r")),
        },
        "mode" => match args {
            [name] => UiAction::SetMode(name.parse().map_err(CommandError::Invalid)?),
            _ => return Err(usage("mode", "a mode name")),
        },
        "draw" => match args {
            ["rectangle-style", code] => UiAction::DrawStyle(style(code)?),
            [tool, color] => UiAction::DrawPreset {
                tool: tool.parse().map_err(CommandError::Invalid)?,
                color: preset_color(color)?,
            },
            _ => return Err(usage("draw", "a tool and a color, or rectangle-style s|r")),
        },
        "down" => UiAction::Pointer(PointerEvent::Down(point(args, "down")?)),
        "drag" => UiAction::Pointer(PointerEvent::Drag(point(args, "drag")?)),
        "up" => UiAction::Pointer(PointerEvent::Up(point(args, "up")?)),
        "click" => match args {
            [x1, y1, x2, y2] => UiAction::Click {
                from: CanvasPoint::new(number(x1)?, number(y1)?),
                to: CanvasPoint::new(number(x2)?, number(y2)?),
            },
            _ => return Err(usage("click", "four coordinates")),
        },
        "open" => UiAction::Open,
        "save" => UiAction::Save,
        "export" => UiAction::Export,
        "list" | "ls" => UiAction::List,
        "help" | "?" => UiAction::Help,
        "quit" | "exit" => UiAction::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(action))
}

fn usage(command: &'static str, expected: &'static str) -> CommandError {
    CommandError::Usage { command, expected }
}

fn number(text: &str) -> Result<i32, CommandError> {
    text.parse()
        .map_err(|_| CommandError::InvalidNumber(text.to_string()))
}

fn point(args: &[&str], command: &'static str) -> Result<CanvasPoint, CommandError> {
    match args {
        [x, y] => Ok(CanvasPoint::new(number(x)?, number(y)?)),
        _ => Err(usage(command, "two coordinates")),
    }
}

fn preset_color(color: &str) -> Result<String, CommandError> {
    if PRESET_COLORS.contains(&color) {
        Ok(color.to_string())
    } else {
        Err(CommandError::Invalid(format!(
            "no preset for '{color}' (presets: {})",
            PRESET_COLORS.join(", ")
        )))
    }
}

fn style(code: &str) -> Result<CornerStyle, CommandError> {
    CornerStyle::from_code(code)
        .ok_or_else(|| CommandError::Invalid(format!("unknown style: {code}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pointer_commands() {
        assert_eq!(
            parse_command("down 10 20"),
            Ok(Some(UiAction::Pointer(PointerEvent::Down(CanvasPoint::new(10, 20)))))
        );
        assert_eq!(
            parse_command("  click 0 0 -5 40 "),
            Ok(Some(UiAction::Click {
                from: CanvasPoint::new(0, 0),
                to: CanvasPoint::new(-5, 40),
            }))
        );
        assert_eq!(
            parse_command("up 1"),
            Err(CommandError::Usage {
                command: "up",
                expected: "two coordinates"
            })
        );
        assert_eq!(
            parse_command("drag 1 x"),
            Err(CommandError::InvalidNumber("x".into()))
        );
    }

    #[test]
    fn test_parse_settings() {
        assert_eq!(
            parse_command("tool rectangle"),
            Ok(Some(UiAction::SetTool(Some(ToolKind::Rectangle))))
        );
        assert_eq!(parse_command("tool none"), Ok(Some(UiAction::SetTool(None))));
        assert_eq!(
            parse_command("style r"),
            Ok(Some(UiAction::SetStyle(CornerStyle::Rounded)))
        );
        assert_eq!(parse_command("mode ungroup"), Ok(Some(UiAction::SetMode(Mode::Ungroup))));
        assert!(matches!(parse_command("mode paint"), Err(CommandError::Invalid(_))));
    }

    #[test]
    fn test_parse_draw_presets() {
        assert_eq!(
            parse_command("draw line red"),
            Ok(Some(UiAction::DrawPreset {
                tool: ToolKind::Line,
                color: "red".into()
            }))
        );
        assert_eq!(
            parse_command("draw rectangle-style s"),
            Ok(Some(UiAction::DrawStyle(CornerStyle::Sharp)))
        );
        assert!(parse_command("draw").is_err());
        assert_eq!(
            parse_command("draw line purple"),
            Err(CommandError::Invalid(
                "no preset for 'purple' (presets: black, blue, green, red)".into()
            ))
        );
    }

    #[test]
    fn test_blank_and_unknown() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(parse_command("# note"), Ok(None));
        assert_eq!(parse_command("quit"), Ok(Some(UiAction::Quit)));
        assert_eq!(
            parse_command("undo"),
            Err(CommandError::Unknown("undo".into()))
        );
    }
}
