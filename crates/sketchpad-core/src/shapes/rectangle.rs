//! Rectangle shape.

use super::{CanvasPoint, GroupId, ShapeId, ShapeTrait};
use crate::surface::RenderHandle;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Corner treatment for rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CornerStyle {
    /// Square corners, drawn as a plain outline.
    #[default]
    Sharp,
    /// Rounded corners, drawn as a smoothed polygon.
    Rounded,
}

impl CornerStyle {
    /// Single-letter code used in files and prompts.
    pub fn code(self) -> &'static str {
        match self {
            CornerStyle::Sharp => "s",
            CornerStyle::Rounded => "r",
        }
    }

    /// Parse a style code (`s` or `r`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "s" => Some(CornerStyle::Sharp),
            "r" => Some(CornerStyle::Rounded),
            _ => None,
        }
    }
}

impl fmt::Display for CornerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An axis-aligned rectangle given by two opposite corners.
#[derive(Debug, Clone)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// First corner, as placed by the user.
    pub p1: CanvasPoint,
    /// Opposite corner.
    pub p2: CanvasPoint,
    /// Outline color name.
    pub color: String,
    /// Corner style.
    pub corner: CornerStyle,
    handle: Option<RenderHandle>,
    groups: Vec<GroupId>,
}

impl Rectangle {
    /// Default corner radius for rounded rectangles, in canvas units.
    pub const DEFAULT_CORNER_RADIUS: f64 = 20.0;

    /// Create a new rectangle. It has no render handle until drawn.
    pub fn new(p1: CanvasPoint, p2: CanvasPoint, color: String, corner: CornerStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            p1,
            p2,
            color,
            corner,
            handle: None,
            groups: Vec::new(),
        }
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn corners(&self) -> (CanvasPoint, CanvasPoint) {
        (self.p1, self.p2)
    }

    fn set_corners(&mut self, p1: CanvasPoint, p2: CanvasPoint) {
        self.p1 = p1;
        self.p2 = p2;
    }

    fn color(&self) -> &str {
        &self.color
    }

    fn set_color(&mut self, color: String) {
        self.color = color;
    }

    fn render_handle(&self) -> Option<RenderHandle> {
        self.handle
    }

    fn bind_render_handle(&mut self, handle: RenderHandle) -> Option<RenderHandle> {
        self.handle.replace(handle)
    }

    fn take_render_handle(&mut self) -> Option<RenderHandle> {
        self.handle.take()
    }

    fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    fn groups_mut(&mut self) -> &mut Vec<GroupId> {
        &mut self.groups
    }
}
