//! Wheel configuration
//!
//! All options have defaults matching the classic iOS-style picker feel.
//! Times are milliseconds, distances are logical pixels.

use rota_animation::Easing;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WheelError};
use crate::momentum::DEFAULT_DECELERATION;

/// Easing curves for the three kinds of scripted movement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelEasings {
    /// Taps, simple snaps, in-bounds flings and wheel steps
    pub scroll: Easing,
    /// Flings whose destination lies past an edge
    pub scroll_bounce: Easing,
    /// Returning into bounds after overscroll
    pub bounce: Easing,
}

impl Default for WheelEasings {
    fn default() -> Self {
        Self {
            scroll: Easing::ease_out_quint(),
            scroll_bounce: Easing::ease_out_quad(),
            bounce: Easing::ease_out_quart(),
        }
    }
}

/// Configuration for a single wheel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Visible row count (forced odd so one row sits in the middle)
    pub rows: u32,
    /// Height of one row
    pub row_height: f32,
    /// Duration for taps, simple snaps and wheel steps
    pub adjust_time: f64,
    /// Duration for returning into bounds
    pub bounce_time: f64,
    /// Drags shorter than this may fling or tap; longer drags re-anchor velocity
    pub momentum_threshold_time: f64,
    /// Minimum release displacement for a fling
    pub momentum_threshold_distance: f32,
    /// Fling deceleration in px/ms²
    pub deceleration: f32,
    /// Maximum displacement for a release to count as a tap
    pub tap_slop: f32,
    /// Grace period after a transition's end time before it is force-completed
    pub transition_watchdog: f64,
    pub easings: WheelEasings,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            row_height: 34.0,
            adjust_time: 400.0,
            bounce_time: 600.0,
            momentum_threshold_time: 300.0,
            momentum_threshold_distance: 10.0,
            deceleration: DEFAULT_DECELERATION,
            tap_slop: 10.0,
            transition_watchdog: 100.0,
            easings: WheelEasings::default(),
        }
    }
}

impl WheelConfig {
    /// Parse, validate and normalize a TOML config
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: WheelConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config.normalized())
    }

    /// Set the visible row count
    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    /// Set the row height
    pub fn row_height(mut self, px: f32) -> Self {
        self.row_height = px;
        self
    }

    /// Set the tap/snap duration
    pub fn adjust_time(mut self, ms: f64) -> Self {
        self.adjust_time = ms;
        self
    }

    /// Set the bounce-back duration
    pub fn bounce_time(mut self, ms: f64) -> Self {
        self.bounce_time = ms;
        self
    }

    /// Set the momentum time window
    pub fn momentum_threshold_time(mut self, ms: f64) -> Self {
        self.momentum_threshold_time = ms;
        self
    }

    /// Set the minimum fling distance
    pub fn momentum_threshold_distance(mut self, px: f32) -> Self {
        self.momentum_threshold_distance = px;
        self
    }

    /// Set the fling deceleration
    pub fn deceleration(mut self, px_per_ms2: f32) -> Self {
        self.deceleration = px_per_ms2;
        self
    }

    /// Set the easing curves
    pub fn easings(mut self, easings: WheelEasings) -> Self {
        self.easings = easings;
        self
    }

    /// Force an odd visible row count
    pub fn normalized(mut self) -> Self {
        if self.rows % 2 == 0 {
            self.rows += 1;
        }
        self
    }

    /// Reject values that would break the physics
    pub fn validate(&self) -> Result<()> {
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(invalid("row_height", format!("must be > 0, got {}", self.row_height)));
        }
        if !(self.deceleration.is_finite() && self.deceleration > 0.0) {
            return Err(invalid(
                "deceleration",
                format!("must be > 0, got {}", self.deceleration),
            ));
        }
        for (option, value) in [
            ("adjust_time", self.adjust_time),
            ("bounce_time", self.bounce_time),
            ("momentum_threshold_time", self.momentum_threshold_time),
            ("transition_watchdog", self.transition_watchdog),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(option, format!("must be >= 0, got {}", value)));
            }
        }
        if self.momentum_threshold_distance < 0.0 || self.tap_slop < 0.0 {
            return Err(invalid(
                "momentum_threshold_distance",
                "distances must be >= 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Height of the visible wheel
    pub fn viewport_height(&self) -> f32 {
        self.row_height * self.rows as f32
    }

    /// Top margin that centers row 0 in the viewport
    pub fn list_margin_top(&self) -> f32 {
        self.row_height * (self.rows / 2) as f32
    }
}

fn invalid(option: &'static str, reason: String) -> WheelError {
    WheelError::InvalidOption { option, reason }
}
