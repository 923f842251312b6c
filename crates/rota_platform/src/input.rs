//! Input event types for primary-pointer and wheel input
//!
//! Only the primary pointer's vertical position is carried; the wheel engine
//! does not normalize multi-touch or horizontal motion.

use slotmap::new_key_type;

new_key_type! {
    /// Identity of a rendered row element
    ///
    /// Issued by the wheel when rows are loaded. The host attaches the key to
    /// the element it draws for that row and reports it back as the event
    /// target, so hit-testing never needs to mutate foreign objects.
    pub struct ElementKey;
}

/// Where a pointer event originated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// Pointer buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Left mouse button or a touch contact
    #[default]
    Primary,
    /// Right mouse button
    Secondary,
    /// Middle mouse button (scroll wheel click)
    Middle,
    /// Other button with index
    Other(u16),
}

/// Input events delivered to a wheel
///
/// Times are milliseconds on the host's monotonic clock. Positions are page
/// coordinates in logical pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed over the wheel surface
    PointerDown {
        y: f32,
        button: PointerButton,
        source: PointerSource,
        time_ms: f64,
    },
    /// Pointer moved (only meaningful while pressed)
    PointerMoved { y: f32, time_ms: f64 },
    /// Pointer released; `target` is the row element under the pointer, if any
    PointerUp {
        y: f32,
        time_ms: f64,
        target: Option<ElementKey>,
    },
    /// Touch cancelled by the system
    PointerCancel { time_ms: f64 },
    /// Pointer left the wheel surface
    PointerLeft { time_ms: f64 },
    /// Discrete wheel tick over a row element
    Wheel {
        delta_y: f32,
        time_ms: f64,
        target: Option<ElementKey>,
    },
    /// The renderer finished the running transition
    TransitionEnd { time_ms: f64 },
}

impl InputEvent {
    /// Timestamp carried by the event
    pub fn time_ms(&self) -> f64 {
        match *self {
            InputEvent::PointerDown { time_ms, .. }
            | InputEvent::PointerMoved { time_ms, .. }
            | InputEvent::PointerUp { time_ms, .. }
            | InputEvent::PointerCancel { time_ms }
            | InputEvent::PointerLeft { time_ms }
            | InputEvent::Wheel { time_ms, .. }
            | InputEvent::TransitionEnd { time_ms } => time_ms,
        }
    }

    /// Whether this event ends an active drag
    pub fn ends_gesture(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerUp { .. }
                | InputEvent::PointerCancel { .. }
                | InputEvent::PointerLeft { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_time() {
        let down = InputEvent::PointerDown {
            y: 10.0,
            button: PointerButton::Primary,
            source: PointerSource::Touch,
            time_ms: 12.5,
        };
        assert_eq!(down.time_ms(), 12.5);
        assert_eq!(InputEvent::TransitionEnd { time_ms: 3.0 }.time_ms(), 3.0);
    }

    #[test]
    fn test_gesture_ending_events() {
        assert!(InputEvent::PointerCancel { time_ms: 0.0 }.ends_gesture());
        assert!(InputEvent::PointerLeft { time_ms: 0.0 }.ends_gesture());
        assert!(InputEvent::PointerUp {
            y: 0.0,
            time_ms: 0.0,
            target: None
        }
        .ends_gesture());
        assert!(!InputEvent::PointerMoved {
            y: 0.0,
            time_ms: 0.0
        }
        .ends_gesture());
    }
}
