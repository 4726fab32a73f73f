//! Line shape.

use super::{CanvasPoint, GroupId, ShapeId, ShapeTrait};
use crate::surface::RenderHandle;
use uuid::Uuid;

/// A straight line segment.
#[derive(Debug, Clone)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: CanvasPoint,
    /// End point.
    pub end: CanvasPoint,
    /// Stroke color name.
    pub color: String,
    handle: Option<RenderHandle>,
    /// Group membership stack, outermost first.
    groups: Vec<GroupId>,
}

impl Line {
    /// Create a new line. It has no render handle until drawn.
    pub fn new(start: CanvasPoint, end: CanvasPoint, color: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            color,
            handle: None,
            groups: Vec::new(),
        }
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn corners(&self) -> (CanvasPoint, CanvasPoint) {
        (self.start, self.end)
    }

    fn set_corners(&mut self, p1: CanvasPoint, p2: CanvasPoint) {
        self.start = p1;
        self.end = p2;
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
