//! Drawing tools.

use crate::shapes::{CanvasPoint, CornerStyle, Line, Rectangle, Shape, ShapeId};
use std::fmt;
use std::str::FromStr;

/// Colors offered as one-click presets.
pub const PRESET_COLORS: [&str; 4] = ["black", "blue", "green", "red"];

/// Color used when nothing else has been chosen.
pub const DEFAULT_COLOR: &str = "black";

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Line,
    Rectangle,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Line => "line",
            ToolKind::Rectangle => "rectangle",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(ToolKind::Line),
            "rectangle" | "rect" => Ok(ToolKind::Rectangle),
            other => Err(format!("unknown tool: {other}")),
        }
    }
}

/// State of a drawing interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ToolState {
    /// Waiting for a drag to start.
    #[default]
    Idle,
    /// A shape is being drawn.
    Active {
        /// Where the drag started.
        start: CanvasPoint,
        /// Latest pointer position.
        current: CanvasPoint,
        /// Shape already placed in the document for this drag.
        preview: Option<ShapeId>,
    },
}

/// Manages the current tool, the style applied to new shapes, and the drawing state.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Tool used for the next drawing gesture.
    pub current_tool: Option<ToolKind>,
    /// Color applied to new shapes.
    pub current_color: String,
    /// Corner style applied to new rectangles.
    pub current_corner: CornerStyle,
    /// Current drawing state.
    pub state: ToolState,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: None,
            current_color: DEFAULT_COLOR.to_string(),
            current_corner: CornerStyle::default(),
            state: ToolState::Idle,
        }
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tool manager with the given defaults for new shapes.
    pub fn with_style(color: &str, corner: CornerStyle) -> Self {
        Self {
            current_color: color.to_string(),
            current_corner: corner,
            ..Self::default()
        }
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: Option<ToolKind>) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Begin a drawing interaction.
    pub fn begin(&mut self, point: CanvasPoint) {
        self.state = ToolState::Active {
            start: point,
            current: point,
            preview: None,
        };
    }

    /// Update the current interaction.
    pub fn update(&mut self, point: CanvasPoint) {
        if let ToolState::Active { current, .. } = &mut self.state {
            *current = point;
        }
    }

    /// Record the shape placed for the current interaction.
    pub fn set_preview(&mut self, id: ShapeId) {
        if let ToolState::Active { preview, .. } = &mut self.state {
            *preview = Some(id);
        }
    }

    /// Shape placed for the current interaction, if any.
    pub fn preview(&self) -> Option<ShapeId> {
        match &self.state {
            ToolState::Active { preview, .. } => *preview,
            ToolState::Idle => None,
        }
    }

    /// Start point of the current interaction.
    pub fn start(&self) -> Option<CanvasPoint> {
        match &self.state {
            ToolState::Active { start, .. } => Some(*start),
            ToolState::Idle => None,
        }
    }

    /// End the current interaction and reset the tool.
    ///
    /// Returns the shape drawn during the interaction, if one was placed.
    pub fn end(&mut self) -> Option<ShapeId> {
        let preview = self.preview();
        self.state = ToolState::Idle;
        self.current_tool = None;
        preview
    }

    /// Abandon the current interaction, keeping the tool.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Check if a drawing interaction is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active { .. })
    }

    /// Build a new shape for the current tool, or `None` when no tool is set.
    pub fn create_shape(&self, start: CanvasPoint, end: CanvasPoint) -> Option<Shape> {
        let color = self.current_color.clone();
        match self.current_tool? {
            ToolKind::Line => Some(Shape::Line(Line::new(start, end, color))),
            ToolKind::Rectangle => Some(Shape::Rectangle(Rectangle::new(
                start,
                end,
                color,
                self.current_corner,
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.current_tool, None);
        assert_eq!(tm.current_color, "black");

        tm.set_tool(Some(ToolKind::Rectangle));
        assert_eq!(tm.current_tool, Some(ToolKind::Rectangle));
    }

    #[test]
    fn test_tool_interaction() {
        let mut tm = ToolManager::new();
        tm.set_tool(Some(ToolKind::Line));

        tm.begin(CanvasPoint::new(0, 0));
        assert!(tm.is_active());
        tm.update(CanvasPoint::new(10, 10));
        assert_eq!(tm.preview(), None);

        let shape = tm.create_shape(CanvasPoint::new(0, 0), CanvasPoint::new(10, 10)).unwrap();
        tm.set_preview(shape.id());

        assert_eq!(tm.end(), Some(shape.id()));
        assert!(!tm.is_active());
        // Finishing a shape resets the tool.
        assert_eq!(tm.current_tool, None);
    }

    #[test]
    fn test_create_shape_uses_current_style() {
        let mut tm = ToolManager::with_style("red", CornerStyle::Rounded);
        tm.set_tool(Some(ToolKind::Rectangle));
        let shape = tm
            .create_shape(CanvasPoint::new(1, 2), CanvasPoint::new(3, 4))
            .unwrap();
        assert_eq!(shape.color(), "red");
        assert_eq!(shape.corner_style(), Some(CornerStyle::Rounded));
    }

    #[test]
    fn test_no_tool_no_shape() {
        let tm = ToolManager::new();
        assert!(tm.create_shape(CanvasPoint::new(0, 0), CanvasPoint::new(1, 1)).is_none());
    }

    #[test]
    fn test_tool_names() {
        assert_eq!("line".parse::<ToolKind>(), Ok(ToolKind::Line));
        assert_eq!("rectangle".parse::<ToolKind>(), Ok(ToolKind::Rectangle));
        assert!("ellipse".parse::<ToolKind>().is_err());
        assert_eq!(ToolKind::Rectangle.to_string(), "rectangle");
        assert!(PRESET_COLORS.contains(&DEFAULT_COLOR));
    }
}
