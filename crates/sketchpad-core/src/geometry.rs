//! Outline geometry for rendered shapes.

use kurbo::{BezPath, Point};

/// Number of control points in a rounded rectangle outline.
pub const ROUNDED_RECT_POINTS: usize = 20;

/// Control points of a rounded rectangle, five per side, clockwise from the top edge.
///
/// Each straight run is bracketed by doubled points so that smoothing keeps the edges
/// straight and only bends at the corners. The last point is the `p1` corner itself and
/// index 9 is the `p2` corner, which lets the original corners be read back.
pub fn rounded_rect_points(p1: Point, p2: Point, radius: f64) -> Vec<Point> {
    let (x1, y1, x2, y2, r) = (p1.x, p1.y, p2.x, p2.y, radius);
    [
        (x1 + r, y1),
        (x1 + r, y1),
        (x2 - r, y1),
        (x2 - r, y1),
        (x2, y1),
        (x2, y1 + r),
        (x2, y1 + r),
        (x2, y2 - r),
        (x2, y2 - r),
        (x2, y2),
        (x2 - r, y2),
        (x2 - r, y2),
        (x1 + r, y2),
        (x1 + r, y2),
        (x1, y2),
        (x1, y2 - r),
        (x1, y2 - r),
        (x1, y1 + r),
        (x1, y1 + r),
        (x1, y1),
    ]
    .into_iter()
    .map(|(x, y)| Point::new(x, y))
    .collect()
}

/// Recover the two defining corners from [`rounded_rect_points`] output.
pub fn rounded_rect_corners(points: &[Point]) -> Option<(Point, Point)> {
    if points.len() != ROUNDED_RECT_POINTS {
        return None;
    }
    Some((points[ROUNDED_RECT_POINTS - 1], points[9]))
}

/// Midpoint of two points.
fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Closed quadratic B-spline through the midpoints of consecutive control points.
///
/// Control points act as spline attractors; a doubled point pins the curve to it.
pub fn smooth_closed_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let n = points.len();
    if n < 3 {
        return polygon_path(points);
    }

    path.move_to(midpoint(points[n - 1], points[0]));
    for i in 0..n {
        let next = points[(i + 1) % n];
        path.quad_to(points[i], midpoint(points[i], next));
    }
    path.close_path();
    path
}

/// Closed straight-edged polygon through the given points.
pub fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    if points.len() > 2 {
        path.close_path();
    }
    path
}

/// Open path for a single segment.
pub fn segment_path(a: Point, b: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(a);
    path.line_to(b);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape as _;

    #[test]
    fn test_rounded_rect_has_twenty_points() {
        let points = rounded_rect_points(Point::new(0.0, 0.0), Point::new(100.0, 60.0), 20.0);
        assert_eq!(points.len(), ROUNDED_RECT_POINTS);
        assert_eq!(points[0], Point::new(20.0, 0.0));
        assert_eq!(points[4], Point::new(100.0, 0.0));
        assert_eq!(points[14], Point::new(0.0, 60.0));
    }

    #[test]
    fn test_corners_recovered_from_points() {
        let p1 = Point::new(30.0, 40.0);
        let p2 = Point::new(-10.0, 5.0);
        let points = rounded_rect_points(p1, p2, 20.0);
        assert_eq!(rounded_rect_corners(&points), Some((p1, p2)));
        assert_eq!(rounded_rect_corners(&points[..4]), None);
    }

    #[test]
    fn test_smoothed_outline_stays_inside_rectangle() {
        let points = rounded_rect_points(Point::new(0.0, 0.0), Point::new(100.0, 100.0), 20.0);
        let bbox = smooth_closed_path(&points).bounding_box();
        assert!(bbox.x0 >= -1e-9 && bbox.y0 >= -1e-9);
        assert!(bbox.x1 <= 100.0 + 1e-9 && bbox.y1 <= 100.0 + 1e-9);
        // Straight edges are kept, so the outline still touches every side.
        assert!((bbox.x1 - 100.0).abs() < 1e-9);
        assert!((bbox.y0 - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_path_bounds() {
        let path = polygon_path(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
        ]);
        let bbox = path.bounding_box();
        assert_eq!((bbox.x1, bbox.y1), (10.0, 5.0));
        assert!(polygon_path(&[]).elements().is_empty());
    }
}
