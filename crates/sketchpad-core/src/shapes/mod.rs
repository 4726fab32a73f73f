//! Shape definitions for the drawing canvas.

mod group;
mod line;
mod rectangle;

pub use group::{Group, GroupId};
pub use line::Line;
pub use rectangle::{CornerStyle, Rectangle};

use crate::surface::RenderHandle;
use kurbo::Point;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// A point on the canvas in integer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CanvasPoint {
    pub x: i32,
    pub y: i32,
}

impl CanvasPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return this point shifted by `(dx, dy)`, clamped to the coordinate range.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Midpoint with `other`, rounded towards zero.
    pub fn midpoint(self, other: CanvasPoint) -> Self {
        let mid = |a: i32, b: i32| ((i64::from(a) + i64::from(b)) / 2) as i32;
        Self::new(mid(self.x, other.x), mid(self.y, other.y))
    }

    /// Offset that carries this point onto `target`, clamped to the coordinate range.
    pub fn delta_to(self, target: CanvasPoint) -> (i32, i32) {
        let delta = |from: i32, to: i32| {
            (i64::from(to) - i64::from(from)).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
        };
        (delta(self.x, target.x), delta(self.y, target.y))
    }
}

impl From<CanvasPoint> for Point {
    fn from(p: CanvasPoint) -> Self {
        Point::new(f64::from(p.x), f64::from(p.y))
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// The two defining points: endpoints for lines, opposite corners for rectangles.
    fn corners(&self) -> (CanvasPoint, CanvasPoint);

    /// Replace the defining points.
    fn set_corners(&mut self, p1: CanvasPoint, p2: CanvasPoint);

    /// Named stroke color.
    fn color(&self) -> &str;

    /// Change the stroke color.
    fn set_color(&mut self, color: String);

    /// Handle of the render object currently drawing this shape.
    fn render_handle(&self) -> Option<RenderHandle>;

    /// Bind a new render handle, returning the one it replaces.
    fn bind_render_handle(&mut self, handle: RenderHandle) -> Option<RenderHandle>;

    /// Unbind and return the current render handle.
    fn take_render_handle(&mut self) -> Option<RenderHandle>;

    /// Group membership stack, outermost first.
    fn groups(&self) -> &[GroupId];

    /// Mutable group membership stack.
    fn groups_mut(&mut self) -> &mut Vec<GroupId>;
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Line(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
        }
    }

    /// Keyword used for this variant in the text format.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Line(_) => "line",
            Shape::Rectangle(_) => "rectangle",
        }
    }

    pub fn corners(&self) -> (CanvasPoint, CanvasPoint) {
        match self {
            Shape::Line(s) => s.corners(),
            Shape::Rectangle(s) => s.corners(),
        }
    }

    pub fn set_corners(&mut self, p1: CanvasPoint, p2: CanvasPoint) {
        match self {
            Shape::Line(s) => s.set_corners(p1, p2),
            Shape::Rectangle(s) => s.set_corners(p1, p2),
        }
    }

    pub fn color(&self) -> &str {
        match self {
            Shape::Line(s) => s.color(),
            Shape::Rectangle(s) => s.color(),
        }
    }

    pub fn set_color(&mut self, color: String) {
        match self {
            Shape::Line(s) => s.set_color(color),
            Shape::Rectangle(s) => s.set_color(color),
        }
    }

    pub fn render_handle(&self) -> Option<RenderHandle> {
        match self {
            Shape::Line(s) => s.render_handle(),
            Shape::Rectangle(s) => s.render_handle(),
        }
    }

    pub fn bind_render_handle(&mut self, handle: RenderHandle) -> Option<RenderHandle> {
        match self {
            Shape::Line(s) => s.bind_render_handle(handle),
            Shape::Rectangle(s) => s.bind_render_handle(handle),
        }
    }

    pub fn take_render_handle(&mut self) -> Option<RenderHandle> {
        match self {
            Shape::Line(s) => s.take_render_handle(),
            Shape::Rectangle(s) => s.take_render_handle(),
        }
    }

    pub fn groups(&self) -> &[GroupId] {
        match self {
            Shape::Line(s) => s.groups(),
            Shape::Rectangle(s) => s.groups(),
        }
    }

    pub fn groups_mut(&mut self) -> &mut Vec<GroupId> {
        match self {
            Shape::Line(s) => s.groups_mut(),
            Shape::Rectangle(s) => s.groups_mut(),
        }
    }

    /// Innermost (most recently pushed) group, if any.
    pub fn innermost_group(&self) -> Option<GroupId> {
        self.groups().last().copied()
    }

    /// Corner style for rectangles, `None` for lines.
    pub fn corner_style(&self) -> Option<CornerStyle> {
        match self {
            Shape::Rectangle(r) => Some(r.corner),
            Shape::Line(_) => None,
        }
    }

    /// Midpoint of the two defining points, rounded towards zero.
    pub fn center(&self) -> CanvasPoint {
        let (p1, p2) = self.corners();
        p1.midpoint(p2)
    }

    /// Shift both defining points.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        let (p1, p2) = self.corners();
        self.set_corners(p1.offset(dx, dy), p2.offset(dx, dy));
    }

    /// A fresh shape with the same color and style, shifted by `(dx, dy)`.
    ///
    /// The copy gets a new id, no render handle and no group membership.
    pub fn duplicate(&self, dx: i32, dy: i32) -> Shape {
        let (p1, p2) = self.corners();
        let (p1, p2) = (p1.offset(dx, dy), p2.offset(dx, dy));
        match self {
            Shape::Line(l) => Shape::Line(Line::new(p1, p2, l.color.clone())),
            Shape::Rectangle(r) => {
                Shape::Rectangle(Rectangle::new(p1, p2, r.color.clone(), r.corner))
            }
        }
    }

    /// Property annotation shown next to a highlighted shape.
    pub fn properties_text(&self) -> String {
        match self {
            Shape::Line(l) => format!("Color: {}", l.color),
            Shape::Rectangle(r) => format!("Color: {}\nStyle: {}", r.color, r.corner),
        }
    }

    /// Check if this shape is a rectangle.
    pub fn is_rectangle(&self) -> bool {
        matches!(self, Shape::Rectangle(_))
    }
}

/// Whether a color name can be stored in the whitespace-delimited text format.
pub fn is_valid_color(color: &str) -> bool {
    !color.is_empty() && !color.chars().any(char::is_whitespace)
}
