//! Render surface: an arena of drawable objects keyed by integer handles.
//!
//! Shapes hold a [`RenderHandle`] into this table; the surface never refers back to
//! shapes. Handles are issued from a monotonically increasing counter and are never
//! reused, so a stale handle can only miss, never alias another object.

use crate::geometry::{
    polygon_path, rounded_rect_corners, rounded_rect_points, segment_path, smooth_closed_path,
};
use crate::shapes::{CanvasPoint, CornerStyle, Shape};
use kurbo::{BezPath, Point, Rect, Shape as _};
use std::collections::BTreeMap;
use std::fmt;

/// Approximate glyph advance used to size text annotations.
const TEXT_CHAR_WIDTH: f64 = 7.0;
/// Approximate line height used to size text annotations.
const TEXT_LINE_HEIGHT: f64 = 14.0;

/// Identifier of an object on the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderHandle(pub u64);

impl fmt::Display for RenderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Geometry of a render object.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Straight segment.
    Line { start: Point, end: Point },
    /// Axis-aligned outline between two opposite corners.
    Rectangle { p1: Point, p2: Point },
    /// Closed polygon, optionally smoothed into a spline.
    Polygon { points: Vec<Point>, smooth: bool },
    /// Text anchored at its top-left corner.
    Text { anchor: Point, text: String },
}

/// A drawable object on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub primitive: Primitive,
    /// Stroke color (fill color for text).
    pub color: String,
    /// Stroke width.
    pub width: f64,
}

impl RenderItem {
    /// Build the render object that draws `shape`.
    pub fn for_shape(shape: &Shape, corner_radius: f64, width: f64) -> Self {
        let (p1, p2) = shape.corners();
        let (p1, p2) = (Point::from(p1), Point::from(p2));
        let primitive = match shape.corner_style() {
            None => Primitive::Line { start: p1, end: p2 },
            Some(CornerStyle::Sharp) => Primitive::Rectangle { p1, p2 },
            Some(CornerStyle::Rounded) => Primitive::Polygon {
                points: rounded_rect_points(p1, p2, corner_radius),
                smooth: true,
            },
        };
        Self {
            primitive,
            color: shape.color().to_string(),
            width,
        }
    }

    /// A text annotation.
    pub fn text(anchor: Point, text: String) -> Self {
        Self {
            primitive: Primitive::Text { anchor, text },
            color: "black".to_string(),
            width: 1.0,
        }
    }

    /// Outline path of the object (empty for text).
    pub fn outline(&self) -> BezPath {
        match &self.primitive {
            Primitive::Line { start, end } => segment_path(*start, *end),
            Primitive::Rectangle { p1, p2 } => {
                Rect::from_points(*p1, *p2).to_path(0.1)
            }
            Primitive::Polygon { points, smooth: true } => smooth_closed_path(points),
            Primitive::Polygon { points, smooth: false } => polygon_path(points),
            Primitive::Text { .. } => BezPath::new(),
        }
    }

    /// Bounding box including half the stroke width.
    pub fn bounding_box(&self) -> Rect {
        match &self.primitive {
            Primitive::Text { anchor, text } => {
                let columns = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
                let rows = text.lines().count().max(1);
                Rect::new(
                    anchor.x,
                    anchor.y,
                    anchor.x + columns as f64 * TEXT_CHAR_WIDTH,
                    anchor.y + rows as f64 * TEXT_LINE_HEIGHT,
                )
            }
            _ => {
                let pad = self.width / 2.0;
                self.outline().bounding_box().inflate(pad, pad)
            }
        }
    }

    /// The two defining points, read back from the drawn geometry.
    pub fn corners(&self) -> Option<(CanvasPoint, CanvasPoint)> {
        let (a, b) = match &self.primitive {
            Primitive::Line { start, end } => (*start, *end),
            Primitive::Rectangle { p1, p2 } => (*p1, *p2),
            Primitive::Polygon { points, .. } => rounded_rect_corners(points)?,
            Primitive::Text { .. } => return None,
        };
        Some((to_canvas(a), to_canvas(b)))
    }
}

fn to_canvas(p: Point) -> CanvasPoint {
    CanvasPoint::new(p.x.round() as i32, p.y.round() as i32)
}

/// Inclusive overlap test; degenerate (zero-area) boxes still overlap.
fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// The table of live render objects.
#[derive(Debug, Clone)]
pub struct RenderSurface {
    items: BTreeMap<RenderHandle, RenderItem>,
    next_handle: u64,
}

impl Default for RenderSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            next_handle: 1,
        }
    }

    /// Add an object and return its new handle.
    pub fn create(&mut self, item: RenderItem) -> RenderHandle {
        let handle = RenderHandle(self.next_handle);
        self.next_handle += 1;
        log::trace!("surface: create {handle}");
        self.items.insert(handle, item);
        handle
    }

    /// Remove an object. Returns it if the handle was live.
    pub fn delete(&mut self, handle: RenderHandle) -> Option<RenderItem> {
        log::trace!("surface: delete {handle}");
        self.items.remove(&handle)
    }

    /// Remove every object. Handles keep counting up.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, handle: RenderHandle) -> Option<&RenderItem> {
        self.items.get(&handle)
    }

    pub fn contains(&self, handle: RenderHandle) -> bool {
        self.items.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Change the stroke width of an object.
    pub fn set_width(&mut self, handle: RenderHandle, width: f64) -> bool {
        match self.items.get_mut(&handle) {
            Some(item) => {
                item.width = width;
                true
            }
            None => false,
        }
    }

    /// Change the stroke color of an object.
    pub fn set_color(&mut self, handle: RenderHandle, color: &str) -> bool {
        match self.items.get_mut(&handle) {
            Some(item) => {
                item.color = color.to_string();
                true
            }
            None => false,
        }
    }

    /// Bounding box of an object.
    pub fn bbox(&self, handle: RenderHandle) -> Option<Rect> {
        self.items.get(&handle).map(RenderItem::bounding_box)
    }

    /// Handles of every object whose bounding box overlaps `area`, in stacking order.
    pub fn find_overlapping(&self, area: Rect) -> Vec<RenderHandle> {
        let area = area.abs();
        self.items
            .iter()
            .filter(|(_, item)| overlaps(area, item.bounding_box()))
            .map(|(&handle, _)| handle)
            .collect()
    }
}
