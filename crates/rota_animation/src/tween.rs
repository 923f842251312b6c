//! Timed tweens
//!
//! A tween moves a value from `from` to `to` over a fixed duration with an
//! easing curve. Unlike springs, tweens carry no velocity: they are sampled
//! by wall-clock time, which lets a caller ask "where is the animation right
//! now" at any moment (for example when a new gesture interrupts it).
//!
//! Times are milliseconds on whatever monotonic clock the caller uses.

use crate::easing::Easing;
use crate::values::Interpolate;

/// A fixed-duration eased interpolation
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T: Interpolate = f32> {
    from: T,
    to: T,
    duration_ms: f64,
    easing: Easing,
    started_at: f64,
}

impl<T: Interpolate> Tween<T> {
    /// Create a tween starting at `started_at` (ms)
    pub fn new(from: T, to: T, duration_ms: f64, easing: Easing, started_at: f64) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            easing,
            started_at,
        }
    }

    pub fn from(&self) -> &T {
        &self.from
    }

    pub fn to(&self) -> &T {
        &self.to
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    /// Time at which the tween reaches its target
    pub fn end_time(&self) -> f64 {
        self.started_at + self.duration_ms
    }

    /// Linear time progress in `[0, 1]`
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Interpolated value at `now`
    pub fn value_at(&self, now: f64) -> T {
        let t = self.easing.apply(self.progress(now));
        self.from.lerp(&self.to, t)
    }

    /// Whether the tween has reached its end time
    pub fn is_complete(&self, now: f64) -> bool {
        now >= self.end_time()
    }

    /// CSS-style transition timing, e.g. `400ms cubic-bezier(0.23, 1, 0.32, 1)`
    pub fn timing_css(&self) -> String {
        format!("{}ms {}", self.duration_ms.round(), self.easing.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_tween_samples() {
        let tween = Tween::new(0.0f32, -100.0, 400.0, Easing::Linear, 1000.0);
        assert_eq!(tween.value_at(1000.0), 0.0);
        assert_eq!(tween.value_at(1200.0), -50.0);
        assert_eq!(tween.value_at(1400.0), -100.0);
        // Past the end the value holds at the target
        assert_eq!(tween.value_at(5000.0), -100.0);
        // Before the start it holds at the origin
        assert_eq!(tween.value_at(0.0), 0.0);
    }

    #[test]
    fn test_completion() {
        let tween = Tween::new(0.0f32, 10.0, 100.0, Easing::EaseOut, 0.0);
        assert!(!tween.is_complete(99.0));
        assert!(tween.is_complete(100.0));
        assert_eq!(tween.end_time(), 100.0);
    }

    #[test]
    fn test_zero_duration_is_immediately_done() {
        let tween = Tween::new(5.0f32, 7.0, 0.0, Easing::Linear, 50.0);
        assert_eq!(tween.progress(50.0), 1.0);
        assert_eq!(tween.value_at(50.0), 7.0);
        assert!(tween.is_complete(50.0));
    }

    #[test]
    fn test_eased_tween_runs_ahead_of_linear() {
        let tween = Tween::new(0.0f32, 100.0, 600.0, Easing::ease_out_quart(), 0.0);
        assert!(tween.value_at(150.0) > 25.0);
    }

    #[test]
    fn test_timing_css() {
        let tween = Tween::new(0.0f32, 1.0, 400.0, Easing::ease_out_quint(), 0.0);
        assert_eq!(tween.timing_css(), "400ms cubic-bezier(0.23, 1, 0.32, 1)");
    }
}
