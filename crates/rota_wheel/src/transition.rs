//! Transition controller
//!
//! Holds at most one in-flight scripted move. The renderer animates the list
//! from where it was to the session's target with the session's timing; the
//! controller can be asked for the interpolated offset at any moment, which
//! is how an interrupting gesture picks up from the on-screen position.
//!
//! Completion normally arrives from the renderer's transition-end signal. A
//! session whose end signal never arrives is considered stalled once its end
//! time plus the watchdog grace has passed.

use rota_animation::{Easing, Tween};

/// How far ahead of a session's end time an end signal is still accepted
pub const END_SIGNAL_TOLERANCE_MS: f64 = 16.0;

/// An in-flight animated move
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSession {
    tween: Tween<f32>,
}

impl TransitionSession {
    pub fn target(&self) -> f32 {
        *self.tween.to()
    }

    pub fn origin(&self) -> f32 {
        *self.tween.from()
    }

    pub fn duration_ms(&self) -> f64 {
        self.tween.duration_ms()
    }

    pub fn easing(&self) -> Easing {
        self.tween.easing()
    }

    pub fn end_time(&self) -> f64 {
        self.tween.end_time()
    }

    /// Transition style value, e.g. `400ms cubic-bezier(0.23, 1, 0.32, 1)`
    pub fn timing_css(&self) -> String {
        self.tween.timing_css()
    }
}

/// Owner of the (single) transition session
#[derive(Debug, Clone, Default)]
pub struct TransitionController {
    session: Option<TransitionSession>,
    watchdog_ms: f64,
}

impl TransitionController {
    pub fn new(watchdog_ms: f64) -> Self {
        Self {
            session: None,
            watchdog_ms,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&TransitionSession> {
        self.session.as_ref()
    }

    /// Begin a move, superseding any session in flight
    pub fn start(&mut self, from: f32, target: f32, duration_ms: f64, easing: Easing, now: f64) {
        if let Some(prev) = &self.session {
            tracing::debug!(
                "transition to {:.0} superseded by transition to {:.0}",
                prev.target(),
                target
            );
        }
        tracing::debug!(
            "transition start: {:.0} -> {:.0} over {:.0}ms ({})",
            from,
            target,
            duration_ms,
            easing
        );
        self.session = Some(TransitionSession {
            tween: Tween::new(from, target, duration_ms, easing, now),
        });
    }

    /// Offset currently shown by the renderer
    pub fn current_offset(&self, now: f64) -> Option<f32> {
        self.session.as_ref().map(|s| s.tween.value_at(now))
    }

    /// Stop the move where it is and return that (whole-pixel) offset
    pub fn interrupt(&mut self, now: f64) -> Option<f32> {
        let session = self.session.take()?;
        let frozen = session.tween.value_at(now).round();
        tracing::debug!(
            "transition to {:.0} interrupted at {:.0}",
            session.target(),
            frozen
        );
        Some(frozen)
    }

    /// End the move normally
    pub fn finish(&mut self) -> Option<TransitionSession> {
        self.session.take()
    }

    /// Drop any session without reporting
    pub fn cancel(&mut self) {
        self.session = None;
    }

    /// Whether an end signal at `now` is too early to belong to this session
    pub fn is_premature_end(&self, now: f64) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| now + END_SIGNAL_TOLERANCE_MS < s.end_time())
    }

    /// Whether the end signal is overdue
    pub fn is_stalled(&self, now: f64) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| now >= s.end_time() + self.watchdog_ms)
    }
}
