//! Wheel interaction state machine
//!
//! ```text
//!            pointer down                 pointer down
//!   Idle ─────────────────► Dragging ◄─────────────── Transitioning
//!    ▲  ◄─────────────────     │                          ▲   │
//!    │       pointer up        │ pointer up               │   │
//!    │                         ▼                          │   │
//!    │                        Idle ── transition start ───┘   │
//!    └──────────────────── transition end ────────────────────┘
//! ```
//!
//! Drags and transitions never overlap: a press interrupts a transition, and
//! transitions cannot start while dragging.

/// Events driving [`WheelState`]
pub mod wheel_events {
    /// Primary pointer pressed over the wheel
    pub const POINTER_DOWN: u32 = 20000;
    /// Pointer released, cancelled or left the wheel
    pub const POINTER_UP: u32 = 20001;
    /// A scripted move began
    pub const TRANSITION_START: u32 = 20002;
    /// A scripted move completed
    pub const TRANSITION_END: u32 = 20003;
}

/// What currently owns the wheel's offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WheelState {
    /// Settled
    #[default]
    Idle,
    /// A pointer drag owns the offset
    Dragging,
    /// A scripted move owns the offset
    Transitioning,
}

impl WheelState {
    /// Handle an event and return the new state, or None if no transition
    pub fn on_event(&self, event: u32) -> Option<Self> {
        use wheel_events::*;

        match (self, event) {
            (WheelState::Idle, POINTER_DOWN) => Some(WheelState::Dragging),
            // Press interrupts an in-flight move
            (WheelState::Transitioning, POINTER_DOWN) => Some(WheelState::Dragging),
            (WheelState::Dragging, POINTER_UP) => Some(WheelState::Idle),
            (WheelState::Idle, TRANSITION_START) => Some(WheelState::Transitioning),
            (WheelState::Transitioning, TRANSITION_END) => Some(WheelState::Idle),
            _ => None,
        }
    }

    /// Returns true when nothing is moving the offset
    pub fn is_settled(&self) -> bool {
        matches!(self, WheelState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, WheelState::Dragging)
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self, WheelState::Transitioning)
    }
}
