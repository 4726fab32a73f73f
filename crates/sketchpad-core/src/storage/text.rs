//! Line-oriented text format.
//!
//! One shape per line, fields separated by single spaces:
//!
//! ```text
//! line x1 y1 x2 y2 color
//! rectangle x1 y1 x2 y2 color s|r
//! ```

use super::{StorageError, StorageResult};
use crate::shapes::{CanvasPoint, CornerStyle, Line, Rectangle, Shape, is_valid_color};

/// Format a single shape as one line of text, without the newline.
pub fn format_shape(shape: &Shape) -> String {
    let (p1, p2) = shape.corners();
    let mut line = format!(
        "{} {} {} {} {} {}",
        shape.kind_name(),
        p1.x,
        p1.y,
        p2.x,
        p2.y,
        shape.color()
    );
    if let Some(corner) = shape.corner_style() {
        line.push(' ');
        line.push_str(corner.code());
    }
    line
}

/// Write shapes in order, each followed by a newline.
pub fn write_text<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> String {
    let mut out = String::new();
    for shape in shapes {
        out.push_str(&format_shape(shape));
        out.push('\n');
    }
    out
}

/// Parse a whole file. Blank lines are skipped; any other bad line fails the parse.
pub fn parse_text(input: &str) -> StorageResult<Vec<Shape>> {
    let mut shapes = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        let shape = parse_line(raw).map_err(|reason| StorageError::MalformedLine {
            line: index + 1,
            reason,
        })?;
        shapes.push(shape);
    }
    Ok(shapes)
}

/// Parse one non-blank line into a shape.
pub fn parse_line(line: &str) -> Result<Shape, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let Some((&kind, rest)) = fields.split_first() else {
        return Err("empty line".to_string());
    };
    let expected = match kind {
        "line" => 5,
        "rectangle" => 6,
        other => return Err(format!("unknown shape kind '{other}'")),
    };
    if rest.len() != expected {
        return Err(format!(
            "{kind} needs {expected} fields, found {}",
            rest.len()
        ));
    }

    let coord = |i: usize| -> Result<i32, String> {
        rest[i]
            .parse::<i32>()
            .map_err(|_| format!("invalid coordinate '{}'", rest[i]))
    };
    let p1 = CanvasPoint::new(coord(0)?, coord(1)?);
    let p2 = CanvasPoint::new(coord(2)?, coord(3)?);
    let color = rest[4];
    if !is_valid_color(color) {
        return Err(format!("invalid color '{color}'"));
    }

    match kind {
        "line" => Ok(Shape::Line(Line::new(p1, p2, color.to_string()))),
        _ => {
            let corner = CornerStyle::from_code(rest[5])
                .ok_or_else(|| format!("invalid corner style '{}'", rest[5]))?;
            Ok(Shape::Rectangle(Rectangle::new(
                p1,
                p2,
                color.to_string(),
                corner,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_format() {
        let shapes = vec![
            Shape::Line(Line::new(
                CanvasPoint::new(10, 10),
                CanvasPoint::new(100, 100),
                "black".into(),
            )),
            Shape::Rectangle(Rectangle::new(
                CanvasPoint::new(0, 0),
                CanvasPoint::new(40, 40),
                "blue".into(),
                CornerStyle::Sharp,
            )),
        ];
        assert_eq!(
            write_text(&shapes),
            "line 10 10 100 100 black\nrectangle 0 0 40 40 blue s\n"
        );
    }

    #[test]
    fn test_round_trip_preserves_fields_and_order() {
        let input = "rectangle 5 6 70 80 red r\nline -3 4 20 -1 green\nrectangle 1 2 3 4 black s\n";
        let shapes = parse_text(input).unwrap();
        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[0].corner_style(), Some(CornerStyle::Rounded));
        assert_eq!(
            shapes[1].corners(),
            (CanvasPoint::new(-3, 4), CanvasPoint::new(20, -1))
        );
        assert_eq!(write_text(&shapes), input);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let shapes = parse_text("\nline 0 0 1 1 red\n   \n").unwrap();
        assert_eq!(shapes.len(), 1);
        assert!(parse_text("").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let err = parse_text("line 0 0 1 1 red\nrectangle 0 0 1 1 red x\n").unwrap_err();
        match err {
            StorageError::MalformedLine { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("corner style"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_line_rejects_bad_input() {
        assert!(parse_line("circle 0 0 1 1 red").is_err());
        assert!(parse_line("line 0 0 1 red").is_err());
        assert!(parse_line("line 0 0 1 1 red extra").is_err());
        assert!(parse_line("line 0 zero 1 1 red").is_err());
        assert!(parse_line("rectangle 0 0 1 1 red").is_err());
    }
}
