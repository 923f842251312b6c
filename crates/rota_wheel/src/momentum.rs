//! Momentum projection
//!
//! Given the last fast stretch of a drag, projects where a fling comes to
//! rest under constant deceleration and how long it takes to get there.
//! Flings that would leave the row range are cut short to a capped overshoot
//! past the edge, which the bounce-back then pulls into bounds.

/// Default fling deceleration in px/ms²
pub const DEFAULT_DECELERATION: f32 = 0.0006;

/// Result of a momentum projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Momentum {
    /// Resting offset (rounded to whole pixels)
    pub destination: f32,
    /// Travel time in milliseconds
    pub duration: f64,
}

/// Projects flings for one wheel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumCalculator {
    /// px/ms²
    pub deceleration: f32,
    pub row_height: f32,
    /// Height of the visible wheel, scales the edge overshoot
    pub wheel_height: f32,
}

impl MomentumCalculator {
    pub fn new(deceleration: f32, row_height: f32, wheel_height: f32) -> Self {
        Self {
            deceleration,
            row_height,
            wheel_height,
        }
    }

    /// Project a fling
    ///
    /// `current` and `start` are the offsets at release and at the start of
    /// the velocity window, `elapsed_ms` the window length and `lower_bound`
    /// the offset of the last row.
    pub fn project(&self, current: f32, start: f32, elapsed_ms: f64, lower_bound: f32) -> Momentum {
        let distance = current - start;
        let elapsed = elapsed_ms.max(1.0) as f32;
        let speed = distance.abs() / elapsed;

        if speed <= 0.0 {
            return Momentum {
                destination: self.quantize(current).round(),
                duration: 0.0,
            };
        }

        let direction = if distance < 0.0 { -1.0 } else { 1.0 };
        let mut destination =
            current + (speed * speed) / (2.0 * self.deceleration) * direction;
        let mut duration = speed / self.deceleration;

        destination = self.quantize(destination);

        if destination < lower_bound {
            destination = lower_bound - self.overshoot(speed);
            duration = (destination - current).abs() / speed;
        } else if destination > 0.0 {
            destination = self.overshoot(speed);
            duration = (current.abs() + destination) / speed;
        }

        let momentum = Momentum {
            destination: destination.round(),
            duration: duration as f64,
        };

        tracing::debug!(
            "momentum: current={:.1} start={:.1} elapsed={:.0}ms speed={:.3}px/ms -> dest={:.0} in {:.0}ms",
            current,
            start,
            elapsed_ms,
            speed,
            momentum.destination,
            momentum.duration
        );

        momentum
    }

    /// Rubber-band overshoot past an edge, growing with release speed
    fn overshoot(&self, speed: f32) -> f32 {
        if self.wheel_height > 0.0 {
            self.wheel_height / 2.5 * (speed / 8.0)
        } else {
            0.0
        }
    }

    fn quantize(&self, offset: f32) -> f32 {
        (offset / self.row_height).round() * self.row_height
    }
}

impl Default for MomentumCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_DECELERATION, 34.0, 170.0)
    }
}
