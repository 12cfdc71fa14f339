//! Pointer input for grid interaction.

use serde::{Deserialize, Serialize};

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    /// Finger down.
    Start,
    /// Finger dragging.
    Move,
    /// Finger up.
    End,
    /// Touch cancelled (e.g., palm rejection).
    Cancel,
}

/// A single touch point in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Touch identifier (for multi-touch).
    pub id: u32,
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
}

/// A touch event with zero or more touch points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Phase of this touch event.
    pub phase: TouchPhase,
    /// All current touch points.
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub fn new(phase: TouchPhase, touches: Vec<TouchPoint>) -> Self {
        Self { phase, touches }
    }

    /// Get the primary (first) touch point.
    #[must_use]
    pub fn primary_touch(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }
}

/// Mouse or touch input aimed at the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointerEvent {
    /// Mouse click at client coordinates.
    Mouse {
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
    },
    /// Touch input; only the primary touch is used.
    Touch(TouchEvent),
}

impl PointerEvent {
    /// Client-space position of the event, if it has one.
    ///
    /// A touch event without touch points has no position.
    #[must_use]
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::Mouse { x, y } => Some((*x, *y)),
            Self::Touch(touch) => touch.primary_touch().map(|t| (t.x, t.y)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_position() {
        let event = PointerEvent::Mouse { x: 3.0, y: 4.0 };
        assert_eq!(event.position(), Some((3.0, 4.0)));
    }

    #[test]
    fn test_touch_uses_primary_point() {
        let event = PointerEvent::Touch(TouchEvent::new(
            TouchPhase::Start,
            vec![
                TouchPoint { id: 0, x: 10.0, y: 20.0 },
                TouchPoint { id: 1, x: 99.0, y: 99.0 },
            ],
        ));
        assert_eq!(event.position(), Some((10.0, 20.0)));
    }

    #[test]
    fn test_empty_touch_has_no_position() {
        let event = PointerEvent::Touch(TouchEvent::new(TouchPhase::End, vec![]));
        assert_eq!(event.position(), None);
    }

    #[test]
    fn test_touch_serialization() {
        let event = PointerEvent::Touch(TouchEvent::new(
            TouchPhase::Start,
            vec![TouchPoint { id: 1, x: 1.5, y: 2.5 }],
        ));
        let json = serde_json::to_string(&event).expect("serialize");
        assert!(json.contains("\"type\":\"touch\""));
        assert!(json.contains("\"phase\":\"start\""));
        let back: PointerEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, event);
    }
}
