//! Gesture tracking
//!
//! A gesture session lives from pointer press to release. Moves are applied
//! one-to-one inside the row range and at a third of their distance past
//! either edge. The velocity window (`start_offset`, `start_time`) re-anchors
//! whenever it grows older than the momentum threshold, so a fling only
//! measures the final fast swipe of a long drag.

/// Damping applied to drag deltas past either edge
pub const RUBBER_BAND_DIVISOR: f32 = 3.0;

/// State of an active drag
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    /// Offset at the start of the velocity window
    pub start_offset: f32,
    /// Pointer position at press
    pub start_pointer_y: f32,
    /// Start of the velocity window (ms)
    pub start_time: f64,
    /// Pointer position at the previous sample
    pub last_pointer_y: f32,
}

/// Measurements taken at release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseSample {
    /// Offset at the start of the velocity window
    pub start_offset: f32,
    /// Length of the velocity window (ms)
    pub elapsed_ms: f64,
    /// Absolute offset change across the window
    pub distance: f32,
}

impl GestureSession {
    pub fn begin(offset: f32, pointer_y: f32, now: f64) -> Self {
        Self {
            start_offset: offset,
            start_pointer_y: pointer_y,
            start_time: now,
            last_pointer_y: pointer_y,
        }
    }

    /// Apply a pointer sample and return the new offset
    ///
    /// `lower_bound` is the offset of the last row; the upper bound is 0.
    pub fn track(
        &mut self,
        offset: f32,
        pointer_y: f32,
        now: f64,
        lower_bound: f32,
        window_ms: f64,
    ) -> f32 {
        let delta = pointer_y - self.last_pointer_y;
        self.last_pointer_y = pointer_y;

        let mut target = offset + delta;
        if target > 0.0 || target < lower_bound {
            target = offset + delta / RUBBER_BAND_DIVISOR;
        }
        let target = target.round();

        if now - self.start_time > window_ms {
            self.start_time = now;
            self.start_offset = target;
        }

        target
    }

    /// Measure the velocity window at release
    pub fn release(&self, offset: f32, now: f64) -> ReleaseSample {
        ReleaseSample {
            start_offset: self.start_offset,
            elapsed_ms: now - self.start_time,
            distance: (offset - self.start_offset).abs(),
        }
    }
}

/// What a release should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseAction {
    /// Quick, still release on a row: select that row
    Tap(usize),
    /// Released while overscrolled: bounce back into bounds
    BoundaryCorrection,
    /// Fast swipe: project momentum
    Fling,
    /// Anything else: snap to the nearest row
    Snap,
}

/// Thresholds that classify a release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleasePolicy {
    pub momentum_threshold_time: f64,
    pub momentum_threshold_distance: f32,
    pub tap_slop: f32,
}

impl ReleasePolicy {
    /// Pick the release action, in priority order
    ///
    /// `tap_row` is the row under the pointer at release, if any.
    pub fn classify(
        &self,
        sample: &ReleaseSample,
        tap_row: Option<usize>,
        out_of_bounds: bool,
    ) -> ReleaseAction {
        let quick = sample.elapsed_ms < self.momentum_threshold_time;

        if let Some(index) = tap_row {
            if quick && sample.distance <= self.tap_slop {
                return ReleaseAction::Tap(index);
            }
        }

        if out_of_bounds {
            return ReleaseAction::BoundaryCorrection;
        }

        if quick && sample.distance > self.momentum_threshold_distance {
            return ReleaseAction::Fling;
        }

        ReleaseAction::Snap
    }
}

impl Default for ReleasePolicy {
    fn default() -> Self {
        Self {
            momentum_threshold_time: 300.0,
            momentum_threshold_distance: 10.0,
            tap_slop: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOWER: f32 = -136.0;

    #[test]
    fn test_in_bounds_drag_is_linear() {
        let mut session = GestureSession::begin(-68.0, 200.0, 0.0);
        let offset = session.track(-68.0, 180.0, 16.0, LOWER, 300.0);
        assert_eq!(offset, -88.0);
        assert_eq!(session.last_pointer_y, 180.0);
    }

    #[test]
    fn test_drag_past_top_is_damped() {
        let mut session = GestureSession::begin(0.0, 100.0, 0.0);
        let offset = session.track(0.0, 130.0, 16.0, LOWER, 300.0);
        assert_eq!(offset, 10.0);
    }

    #[test]
    fn test_drag_past_bottom_is_damped() {
        let mut session = GestureSession::begin(LOWER, 100.0, 0.0);
        let offset = session.track(LOWER, 70.0, 16.0, LOWER, 300.0);
        assert_eq!(offset, LOWER - 10.0);
    }

    #[test]
    fn test_velocity_window_reanchors() {
        let mut session = GestureSession::begin(0.0, 300.0, 0.0);
        let offset = session.track(0.0, 250.0, 100.0, LOWER, 300.0);
        assert_eq!(session.start_time, 0.0);
        assert_eq!(session.start_offset, 0.0);

        let offset = session.track(offset, 240.0, 400.0, LOWER, 300.0);
        assert_eq!(offset, -60.0);
        assert_eq!(session.start_time, 400.0);
        assert_eq!(session.start_offset, -60.0);

        let sample = session.release(-80.0, 450.0);
        assert_eq!(sample.elapsed_ms, 50.0);
        assert_eq!(sample.distance, 20.0);
    }

    #[test]
    fn test_release_priority() {
        let policy = ReleasePolicy::default();
        let still = ReleaseSample {
            start_offset: 0.0,
            elapsed_ms: 80.0,
            distance: 2.0,
        };
        let swipe = ReleaseSample {
            start_offset: 0.0,
            elapsed_ms: 80.0,
            distance: 60.0,
        };
        let slow = ReleaseSample {
            start_offset: 0.0,
            elapsed_ms: 800.0,
            distance: 60.0,
        };

        assert_eq!(policy.classify(&still, Some(3), false), ReleaseAction::Tap(3));
        // Tap wins over boundary correction
        assert_eq!(policy.classify(&still, Some(0), true), ReleaseAction::Tap(0));
        assert_eq!(policy.classify(&still, None, false), ReleaseAction::Snap);
        assert_eq!(
            policy.classify(&swipe, Some(1), true),
            ReleaseAction::BoundaryCorrection
        );
        assert_eq!(policy.classify(&swipe, Some(1), false), ReleaseAction::Fling);
        assert_eq!(policy.classify(&slow, None, false), ReleaseAction::Snap);
    }

    #[test]
    fn test_tap_needs_quick_release() {
        let policy = ReleasePolicy::default();
        let long_press = ReleaseSample {
            start_offset: 0.0,
            elapsed_ms: 500.0,
            distance: 0.0,
        };
        assert_eq!(policy.classify(&long_press, Some(2), false), ReleaseAction::Snap);
    }
}
