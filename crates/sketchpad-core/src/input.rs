//! Pointer input consumed by the editor.

use crate::shapes::CanvasPoint;
use std::fmt;

/// Pointer event for the primary button, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Button pressed.
    Down(CanvasPoint),
    /// Pointer moved with the button held.
    Drag(CanvasPoint),
    /// Button released.
    Up(CanvasPoint),
}

impl PointerEvent {
    /// The three events of a press-drag-release gesture from `from` to `to`.
    pub fn gesture(from: CanvasPoint, to: CanvasPoint) -> [PointerEvent; 3] {
        [
            PointerEvent::Down(from),
            PointerEvent::Drag(to),
            PointerEvent::Up(to),
        ]
    }
}

impl fmt::Display for PointerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, p) = match *self {
            PointerEvent::Down(p) => ("down", p),
            PointerEvent::Drag(p) => ("drag", p),
            PointerEvent::Up(p) => ("up", p),
        };
        write!(f, "{name}({}, {})", p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_sequence() {
        let events = PointerEvent::gesture(CanvasPoint::new(1, 2), CanvasPoint::new(3, 4));
        assert_eq!(events[0], PointerEvent::Down(CanvasPoint::new(1, 2)));
        assert_eq!(events[1], PointerEvent::Drag(CanvasPoint::new(3, 4)));
        assert!(matches!(events[2], PointerEvent::Up(_)));
        assert_eq!(events[2].to_string(), "up(3, 4)");
    }
}
