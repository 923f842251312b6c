//! Wheel engine
//!
//! A single picker column: rows stacked vertically behind a fixed selection
//! band, dragged by the primary pointer, flung with momentum, and always
//! brought to rest centered on an enabled row.
//!
//! # Example
//!
//! ```rust
//! use rota_wheel::{Wheel, WheelConfig};
//!
//! let mut wheel = Wheel::new(WheelConfig::default(), ["Mon", "Tue", "Wed"], None)
//!     .on_select(|row, index| println!("selected {} at {}", row.text, index));
//!
//! wheel.set_value(&"Wed".into(), true, 0.0);
//! assert_eq!(wheel.selected_index(), Some(2));
//! assert_eq!(wheel.offset(), -68.0);
//! ```
//!
//! # Driving the engine
//!
//! The host forwards input with timestamps (`pointer_down`, `pointer_move`,
//! `pointer_up`, `wheel_step`, or everything through `handle_input`), applies
//! `render_info()` to its list element after each call, and reports the end of
//! each CSS-style transition through `on_transition_end`. Calling `tick`
//! from the frame loop completes transitions whose end signal never arrives.

use std::sync::Arc;

use rota_animation::Easing;
use rota_platform::{ElementKey, InputEvent, PointerButton, RenderCapabilities};

use crate::config::WheelConfig;
use crate::gesture::{GestureSession, ReleaseAction, ReleasePolicy};
use crate::momentum::MomentumCalculator;
use crate::position::PositionEngine;
use crate::row::{normalize_rows, Row, RowValue};
use crate::selection::SelectionNotifier;
use crate::snap;
use crate::state::{wheel_events, WheelState};
use crate::transition::TransitionController;

// ============================================================================
// Render Info
// ============================================================================

/// Everything a renderer needs to draw the wheel's list
#[derive(Debug, Clone, PartialEq)]
pub struct WheelRenderInfo {
    /// Logical offset (the destination while a transition runs)
    pub offset: f32,
    /// Style property carrying `transform`
    pub transform_property: &'static str,
    /// e.g. `translate3d(0,-102px,0)`
    pub transform: String,
    /// Style property carrying `transition`
    pub transition_property: &'static str,
    /// e.g. `400ms cubic-bezier(0.23, 1, 0.32, 1)`; None clears the style
    pub transition: Option<String>,
    pub selected_index: Option<usize>,
    /// Height of the visible wheel
    pub viewport_height: f32,
    /// Margin placing row 0 in the selection band
    pub list_margin_top: f32,
    pub is_animating: bool,
}

/// Per-row render data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemVisual<'a> {
    /// Key the renderer attaches to the row's element
    pub key: ElementKey,
    pub index: usize,
    pub row: &'a Row,
    pub selected: bool,
    pub disabled: bool,
}

// ============================================================================
// Wheel
// ============================================================================

/// Last wheel-step target, so rapid ticks over one row keep advancing
#[derive(Debug, Clone, Copy, Default)]
struct WheelStepAnchor {
    target: Option<usize>,
    index: usize,
    at: f64,
}

/// A single scrollable picker column
#[derive(Debug, Clone)]
pub struct Wheel {
    config: WheelConfig,
    caps: RenderCapabilities,
    rows: Vec<Row>,
    position: PositionEngine,
    gesture: Option<GestureSession>,
    transition: TransitionController,
    selection: SelectionNotifier,
    momentum: MomentumCalculator,
    state: WheelState,
    step_anchor: WheelStepAnchor,
}

impl Wheel {
    /// Create a wheel over `rows`, selecting `value` (or the first row)
    pub fn new<I, R>(config: WheelConfig, rows: I, value: Option<RowValue>) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Row>,
    {
        let config = match config.validate() {
            Ok(()) => config.normalized(),
            Err(err) => {
                tracing::warn!("{}; using default wheel config", err);
                WheelConfig::default()
            }
        };
        let mut wheel = Self {
            caps: RenderCapabilities::default(),
            rows: Vec::new(),
            position: PositionEngine::new(config.row_height),
            gesture: None,
            transition: TransitionController::new(config.transition_watchdog),
            selection: SelectionNotifier::default(),
            momentum: MomentumCalculator::new(
                config.deceleration,
                config.row_height,
                config.viewport_height(),
            ),
            state: WheelState::Idle,
            step_anchor: WheelStepAnchor::default(),
            config,
        };
        wheel.set_data(rows, value.as_ref());
        wheel
    }

    /// Use host-specific style names
    pub fn with_capabilities(mut self, caps: RenderCapabilities) -> Self {
        self.caps = caps;
        self
    }

    /// Register the selection-changed handler
    ///
    /// Called once per settle that lands on a different row; never during a
    /// drag or mid-transition.
    pub fn on_select<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Row, usize) + Send + Sync + 'static,
    {
        self.selection.set_callback(Arc::new(handler));
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn capabilities(&self) -> RenderCapabilities {
        self.caps
    }

    pub fn state(&self) -> WheelState {
        self.state
    }

    /// Logical offset (the destination while a transition runs)
    pub fn offset(&self) -> f32 {
        self.position.offset()
    }

    /// Offset currently shown on screen, interpolating any running transition
    pub fn animated_offset(&self, now: f64) -> f32 {
        self.transition
            .current_offset(now)
            .unwrap_or_else(|| self.position.offset())
    }

    /// Offset of the last row
    pub fn max_offset(&self) -> f32 {
        self.position.max_offset()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_active()
    }

    /// Whether a drag or transition currently owns the offset
    pub fn is_animating(&self) -> bool {
        self.is_dragging() || self.is_transitioning()
    }

    pub fn row_index_to_offset(&self, index: usize) -> f32 {
        self.position.row_index_to_offset(index)
    }

    pub fn offset_to_row_index(&self, offset: f32) -> usize {
        self.position.offset_to_row_index(offset)
    }

    /// Row index behind a rendered element
    pub fn item_index(&self, key: ElementKey) -> Option<usize> {
        self.position.item_index(key)
    }

    /// Rendered element key for a row
    pub fn item_key(&self, index: usize) -> Option<ElementKey> {
        self.position.item_key(index)
    }

    // =========================================================================
    // Data & Selection
    // =========================================================================

    pub fn data(&self) -> &[Row] {
        &self.rows
    }

    /// Replace all rows
    ///
    /// Cancels any drag or transition, issues fresh element keys and selects
    /// the row matching `value`, falling back to the first row (moved to the
    /// nearest enabled row either way). Does not notify.
    pub fn set_data<I, R>(&mut self, rows: I, value: Option<&RowValue>)
    where
        I: IntoIterator<Item = R>,
        R: Into<Row>,
    {
        self.gesture = None;
        self.transition.cancel();
        self.state = WheelState::Idle;
        self.step_anchor = WheelStepAnchor::default();

        self.rows = normalize_rows(rows);
        self.position.reset_rows(self.rows.len());

        let wanted = value.or_else(|| self.rows.first().map(|row| &row.value));
        let index = wanted
            .and_then(|v| self.rows.iter().position(|row| &row.value == v))
            .unwrap_or(0);
        let index = snap::nearest_enabled(&self.rows, index).unwrap_or(index);

        self.selection.reset(index);
        self.position
            .set_offset(self.position.row_index_to_offset(index));

        tracing::debug!(
            "wheel data replaced: {} rows, selected {} (offset {:.0}, bounds [{:.0}, 0])",
            self.rows.len(),
            index,
            self.position.offset(),
            self.position.max_offset()
        );
    }

    /// Index of the selected row (None when there are no rows)
    pub fn selected_index(&self) -> Option<usize> {
        if self.rows.is_empty() {
            None
        } else {
            Some(self.selection.selected())
        }
    }

    pub fn selected_item(&self) -> Option<&Row> {
        self.rows.get(self.selection.selected())
    }

    pub fn value(&self) -> Option<&RowValue> {
        self.selected_item().map(|row| &row.value)
    }

    /// Scroll to the first row holding `value`
    ///
    /// Returns the matched index, or None when no row matches, the matching
    /// row is disabled, or a drag is in progress. Nothing moves in those cases.
    pub fn set_value(&mut self, value: &RowValue, skip_animation: bool, now: f64) -> Option<usize> {
        if self.gesture.is_some() {
            tracing::debug!("set_value({}) ignored while dragging", value);
            return None;
        }

        let index = self.rows.iter().position(|row| &row.value == value)?;
        if self.rows[index].disabled {
            return None;
        }
        self.step_anchor = WheelStepAnchor::default();

        let duration = if skip_animation {
            0.0
        } else {
            self.config.adjust_time
        };
        let y = self.position.row_index_to_offset(index);
        self.scroll_to(y, duration, self.config.easings.scroll, now);
        Some(index)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Dispatch a platform input event; returns true if it was consumed
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerDown {
                y, button, time_ms, ..
            } => {
                if button != PointerButton::Primary {
                    return false;
                }
                self.pointer_down(y, time_ms)
            }
            InputEvent::PointerMoved { y, time_ms } => self.pointer_move(y, time_ms),
            InputEvent::PointerUp {
                time_ms, target, ..
            } => self.pointer_up(target, time_ms),
            InputEvent::PointerCancel { time_ms } | InputEvent::PointerLeft { time_ms } => {
                self.pointer_up(None, time_ms)
            }
            InputEvent::Wheel {
                delta_y,
                time_ms,
                target,
            } => self.wheel_step(delta_y, target, time_ms),
            InputEvent::TransitionEnd { time_ms } => self.on_transition_end(time_ms),
        }
    }

    /// Primary pointer pressed at page position `y`
    ///
    /// A running transition is stopped where it currently is on screen.
    pub fn pointer_down(&mut self, y: f32, now: f64) -> bool {
        if self.rows.is_empty() {
            return false;
        }

        if let Some(frozen) = self.transition.interrupt(now) {
            self.position.set_offset(frozen);
        }

        self.step_anchor = WheelStepAnchor::default();
        self.gesture = Some(GestureSession::begin(self.position.offset(), y, now));
        self.transition_state(wheel_events::POINTER_DOWN);
        true
    }

    /// Pointer moved to page position `y`
    pub fn pointer_move(&mut self, y: f32, now: f64) -> bool {
        let lower_bound = self.position.max_offset();
        let window = self.config.momentum_threshold_time;
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };

        let previous = self.position.offset();
        let offset = gesture.track(previous, y, now, lower_bound, window);
        self.position.set_offset(offset);

        tracing::trace!(
            "drag y={:.1} offset: {:.0} -> {:.0}, bounds=({:.0}, 0)",
            y,
            previous,
            offset,
            lower_bound
        );
        true
    }

    /// Pointer released (or cancelled) over `target`
    pub fn pointer_up(&mut self, target: Option<ElementKey>, now: f64) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        self.transition_state(wheel_events::POINTER_UP);

        let offset = self.position.offset();
        let sample = gesture.release(offset, now);
        let tap_row = target.and_then(|key| self.position.item_index(key));
        let action =
            self.release_policy()
                .classify(&sample, tap_row, self.position.is_out_of_bounds(offset));

        tracing::debug!(
            "release at {:.0}: {:?} (elapsed={:.0}ms, distance={:.1}px)",
            offset,
            action,
            sample.elapsed_ms,
            sample.distance
        );

        let easings = self.config.easings;
        match action {
            ReleaseAction::Tap(index) => {
                let y = self.position.row_index_to_offset(index);
                self.scroll_to(y, self.config.adjust_time, easings.scroll, now);
            }
            ReleaseAction::BoundaryCorrection => {
                self.reset_position(now);
            }
            ReleaseAction::Fling => {
                let momentum = self.momentum.project(
                    offset,
                    sample.start_offset,
                    sample.elapsed_ms,
                    self.position.max_offset(),
                );
                let easing = self.release_easing(momentum.destination);
                self.scroll_to(momentum.destination, momentum.duration, easing, now);
            }
            ReleaseAction::Snap => {
                let y = self.position.quantize(offset);
                let easing = self.release_easing(y);
                self.scroll_to(y, self.config.adjust_time, easing, now);
            }
        }
        true
    }

    /// Discrete wheel tick over `target`: move one row in the tick's direction
    pub fn wheel_step(&mut self, delta_y: f32, target: Option<ElementKey>, now: f64) -> bool {
        if self.rows.is_empty() || self.gesture.is_some() || delta_y == 0.0 {
            return false;
        }
        let Some(index) = target.and_then(|key| self.position.item_index(key)) else {
            return false;
        };

        // Rapid ticks that keep landing on the same element continue from the last step
        let recent = now - self.step_anchor.at <= self.config.adjust_time;
        let base = if recent && self.step_anchor.target == Some(index) {
            self.step_anchor.index
        } else {
            index
        };
        let last = self.rows.len() - 1;
        let next = if delta_y > 0.0 {
            (base + 1).min(last)
        } else {
            base.saturating_sub(1)
        };
        self.step_anchor = WheelStepAnchor {
            target: Some(index),
            index: next,
            at: now,
        };

        let y = self.position.row_index_to_offset(next);
        self.scroll_to(y, self.config.adjust_time, self.config.easings.scroll, now);
        true
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// The renderer finished the running transition
    ///
    /// Bounces back if the wheel came to rest out of bounds, otherwise settles.
    /// An end signal arriving well before the running transition's end time
    /// belongs to a superseded transition and is ignored.
    pub fn on_transition_end(&mut self, now: f64) -> bool {
        if self.transition.is_premature_end(now) {
            tracing::debug!(
                "ignoring transition end at {:.0}ms from a superseded transition",
                now
            );
            return false;
        }
        self.complete_transition(now)
    }

    /// Frame hook; returns true while still animating
    ///
    /// Completes a transition whose end signal is overdue.
    pub fn tick(&mut self, now: f64) -> bool {
        if self.transition.is_stalled(now) {
            tracing::warn!(
                "transition end signal overdue at {:.0}ms, completing transition",
                now
            );
            self.complete_transition(now);
        }
        self.is_animating()
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn render_info(&self) -> WheelRenderInfo {
        WheelRenderInfo {
            offset: self.position.offset(),
            transform_property: self.caps.transform_property(),
            transform: self.caps.translate_y(self.position.offset()),
            transition_property: self.caps.transition_property(),
            transition: self.transition.session().map(|s| s.timing_css()),
            selected_index: self.selected_index(),
            viewport_height: self.config.viewport_height(),
            list_margin_top: self.config.list_margin_top(),
            is_animating: self.is_animating(),
        }
    }

    pub fn items(&self) -> impl Iterator<Item = ItemVisual<'_>> + '_ {
        let selected = self.selected_index();
        self.rows
            .iter()
            .enumerate()
            .zip(self.position.keys())
            .map(move |((index, row), &key)| ItemVisual {
                key,
                index,
                row,
                selected: selected == Some(index),
                disabled: row.disabled,
            })
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Bounce back if the wheel came to rest out of bounds, otherwise settle
    fn complete_transition(&mut self, now: f64) -> bool {
        if self.transition.finish().is_none() {
            return false;
        }
        self.transition_state(wheel_events::TRANSITION_END);

        if !self.reset_position(now) {
            self.scroll_finish();
        }
        true
    }

    fn transition_state(&mut self, event: u32) {
        if let Some(new_state) = self.state.on_event(event) {
            tracing::trace!("wheel state {:?} -> {:?}", self.state, new_state);
            self.state = new_state;
        }
    }

    fn release_policy(&self) -> ReleasePolicy {
        ReleasePolicy {
            momentum_threshold_time: self.config.momentum_threshold_time,
            momentum_threshold_distance: self.config.momentum_threshold_distance,
            tap_slop: self.config.tap_slop,
        }
    }

    fn release_easing(&self, destination: f32) -> Easing {
        if self.position.is_out_of_bounds(destination) {
            self.config.easings.scroll_bounce
        } else {
            self.config.easings.scroll
        }
    }

    /// Move to `y` (snapped to an enabled row) over `duration` ms
    fn scroll_to(&mut self, y: f32, duration: f64, easing: Easing, now: f64) {
        if self.gesture.is_some() {
            tracing::trace!("scroll_to({:.0}) ignored while dragging", y);
            return;
        }
        if self.rows.is_empty() {
            return;
        }

        let current = self.position.offset();
        if y == current {
            // Already there, or already heading there
            if !self.transition.is_active() {
                self.scroll_finish();
            }
            return;
        }

        // Instant moves have no transition end to bounce from
        let y = if duration > 0.0 {
            y
        } else {
            self.position.clamp(y)
        };
        let target = snap::closest_selectable_offset(&self.position, &self.rows, y);
        let from = self.transition.current_offset(now).unwrap_or(current);
        self.position.set_offset(target);

        if duration > 0.0 && from != target {
            self.transition.start(from, target, duration, easing, now);
            self.transition_state(wheel_events::TRANSITION_START);
        } else {
            if self.transition.is_active() {
                self.transition.cancel();
                self.transition_state(wheel_events::TRANSITION_END);
            }
            self.scroll_finish();
        }
    }

    /// Bounce back into bounds; returns false if already in bounds
    fn reset_position(&mut self, now: f64) -> bool {
        let y = self.position.offset();
        let clamped = self.position.clamp(y);
        if clamped == y {
            return false;
        }
        self.scroll_to(
            clamped,
            self.config.bounce_time,
            self.config.easings.bounce,
            now,
        );
        true
    }

    /// Report the row the wheel has come to rest on
    fn scroll_finish(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let index = self
            .position
            .offset_to_row_index(self.position.offset())
            .min(self.rows.len() - 1);
        self.selection.settle(index, &self.rows);
    }
}
