//! Replay scripts
//!
//! A replay script describes one wheel and a timeline of inputs:
//!
//! ```toml
//! rows = ["Mon", "Tue", { value = "wed", text = "Wednesday", disabled = true }, "Thu"]
//! value = "Tue"
//!
//! [wheel]
//! rows = 5
//! row_height = 34
//!
//! [[events]]
//! kind = "down"
//! y = 300
//! t = 0
//!
//! [[events]]
//! kind = "up"
//! row = 3
//! t = 80
//! ```
//!
//! Rows are addressed by index; the replayer resolves them to the element
//! keys the wheel issued.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rota_platform::{InputEvent, PointerButton, PointerSource, RenderCapabilities, VendorPrefix};
use rota_wheel::{Row, RowValue, Wheel, WheelConfig, WheelState};
use serde::{Deserialize, Serialize};

/// A parsed replay script
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub wheel: WheelConfig,
    pub rows: Vec<Row>,
    #[serde(default)]
    pub value: Option<RowValue>,
    /// Style properties the simulated host supports; empty means standard names
    #[serde(default)]
    pub supports: Vec<String>,
    /// Force a vendor prefix instead of detecting one from `supports`
    #[serde(default)]
    pub prefix: Option<VendorPrefix>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

/// One timeline entry; `t` is milliseconds
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptEvent {
    Down {
        y: f32,
        t: f64,
        /// DOM-style button index (0 = primary)
        #[serde(default)]
        button: u16,
        #[serde(default)]
        touch: bool,
    },
    Move {
        y: f32,
        t: f64,
    },
    Up {
        t: f64,
        #[serde(default)]
        y: f32,
        /// Row under the pointer at release
        #[serde(default)]
        row: Option<usize>,
    },
    Cancel {
        t: f64,
    },
    Leave {
        t: f64,
    },
    Wheel {
        delta_y: f32,
        row: usize,
        t: f64,
    },
    TransitionEnd {
        t: f64,
    },
    Tick {
        t: f64,
    },
    SetValue {
        value: RowValue,
        t: f64,
        #[serde(default)]
        instant: bool,
    },
    SetData {
        rows: Vec<Row>,
        #[serde(default)]
        value: Option<RowValue>,
        #[serde(default)]
        t: f64,
    },
}

impl ScriptEvent {
    pub fn time_ms(&self) -> f64 {
        match *self {
            ScriptEvent::Down { t, .. }
            | ScriptEvent::Move { t, .. }
            | ScriptEvent::Up { t, .. }
            | ScriptEvent::Cancel { t }
            | ScriptEvent::Leave { t }
            | ScriptEvent::Wheel { t, .. }
            | ScriptEvent::TransitionEnd { t }
            | ScriptEvent::Tick { t }
            | ScriptEvent::SetValue { t, .. }
            | ScriptEvent::SetData { t, .. } => t,
        }
    }
}

/// A selection-changed notification observed during replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionRecord {
    pub t: f64,
    pub index: usize,
    pub value: RowValue,
    pub text: String,
}

/// Wheel state once the timeline is exhausted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalState {
    pub offset: f32,
    pub index: Option<usize>,
    pub value: Option<RowValue>,
    pub state: String,
    pub prefix: VendorPrefix,
    pub transform: String,
    pub transition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub selections: Vec<SelectionRecord>,
    #[serde(rename = "final")]
    pub final_state: FinalState,
}

impl ReplayScript {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load script {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let script: ReplayScript = toml::from_str(s).context("Failed to parse replay script")?;
        script.wheel.validate()?;
        Ok(script)
    }

    /// Play the timeline against a fresh wheel
    pub fn replay(&self) -> Result<ReplayReport> {
        let caps = match self.prefix {
            Some(prefix) => RenderCapabilities::new(prefix),
            None if self.supports.is_empty() => RenderCapabilities::default(),
            None => RenderCapabilities::detect(self.supports.iter().map(String::as_str))?,
        };

        let fired: Arc<Mutex<Vec<(usize, Row)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let mut wheel = Wheel::new(self.wheel.clone(), self.rows.clone(), self.value.clone())
            .with_capabilities(caps)
            .on_select(move |row, index| {
                if let Ok(mut fired) = sink.lock() {
                    fired.push((index, row.clone()));
                }
            });

        tracing::debug!(
            "replaying {} events over {} rows ({})",
            self.events.len(),
            wheel.data().len(),
            caps.prefix()
        );

        let mut selections = Vec::new();
        for event in &self.events {
            let t = event.time_ms();
            if !apply(&mut wheel, event) {
                tracing::debug!("t={}ms {:?} had no effect", t, event);
            }

            let drained: Vec<(usize, Row)> = match fired.lock() {
                Ok(mut fired) => fired.drain(..).collect(),
                Err(_) => anyhow::bail!("selection log poisoned"),
            };
            selections.extend(drained.into_iter().map(|(index, row)| SelectionRecord {
                t,
                index,
                value: row.value,
                text: row.text,
            }));
        }

        let info = wheel.render_info();
        Ok(ReplayReport {
            selections,
            final_state: FinalState {
                offset: info.offset,
                index: info.selected_index,
                value: wheel.value().cloned(),
                state: state_name(wheel.state()).to_string(),
                prefix: caps.prefix(),
                transform: info.transform,
                transition: info.transition,
            },
        })
    }
}

fn apply(wheel: &mut Wheel, event: &ScriptEvent) -> bool {
    match event {
        &ScriptEvent::Down {
            y,
            t,
            button,
            touch,
        } => wheel.handle_input(&InputEvent::PointerDown {
            y,
            button: pointer_button(button),
            source: if touch {
                PointerSource::Touch
            } else {
                PointerSource::Mouse
            },
            time_ms: t,
        }),
        &ScriptEvent::Move { y, t } => wheel.handle_input(&InputEvent::PointerMoved { y, time_ms: t }),
        &ScriptEvent::Up { t, y, row } => {
            let target = row.and_then(|index| wheel.item_key(index));
            wheel.handle_input(&InputEvent::PointerUp {
                y,
                time_ms: t,
                target,
            })
        }
        &ScriptEvent::Cancel { t } => wheel.handle_input(&InputEvent::PointerCancel { time_ms: t }),
        &ScriptEvent::Leave { t } => wheel.handle_input(&InputEvent::PointerLeft { time_ms: t }),
        &ScriptEvent::Wheel { delta_y, row, t } => {
            let target = wheel.item_key(row);
            wheel.handle_input(&InputEvent::Wheel {
                delta_y,
                time_ms: t,
                target,
            })
        }
        &ScriptEvent::TransitionEnd { t } => {
            wheel.handle_input(&InputEvent::TransitionEnd { time_ms: t })
        }
        &ScriptEvent::Tick { t } => {
            wheel.tick(t);
            true
        }
        ScriptEvent::SetValue { value, t, instant } => {
            wheel.set_value(value, *instant, *t).is_some()
        }
        ScriptEvent::SetData { rows, value, .. } => {
            wheel.set_data(rows.iter().cloned(), value.as_ref());
            true
        }
    }
}

/// Map a DOM `MouseEvent.button` index
fn pointer_button(index: u16) -> PointerButton {
    match index {
        0 => PointerButton::Primary,
        1 => PointerButton::Middle,
        2 => PointerButton::Secondary,
        n => PointerButton::Other(n),
    }
}

fn state_name(state: WheelState) -> &'static str {
    match state {
        WheelState::Idle => "idle",
        WheelState::Dragging => "dragging",
        WheelState::Transitioning => "transitioning",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAP_SCRIPT: &str = r#"
rows = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]

[[events]]
kind = "down"
y = 200
t = 0

[[events]]
kind = "up"
row = 3
t = 100

[[events]]
kind = "transition_end"
t = 500
"#;

    #[test]
    fn test_parse_defaults() {
        let script = ReplayScript::from_toml_str(TAP_SCRIPT).unwrap();
        assert_eq!(script.wheel, WheelConfig::default());
        assert_eq!(script.rows.len(), 10);
        assert_eq!(script.value, None);
        assert_eq!(script.events.len(), 3);
        assert_eq!(
            script.events[1],
            ScriptEvent::Up {
                t: 100.0,
                y: 0.0,
                row: Some(3)
            }
        );
    }

    #[test]
    fn test_replay_tap() {
        let report = ReplayScript::from_toml_str(TAP_SCRIPT)
            .unwrap()
            .replay()
            .unwrap();

        assert_eq!(
            report.selections,
            vec![SelectionRecord {
                t: 500.0,
                index: 3,
                value: RowValue::Int(3),
                text: "3".to_string(),
            }]
        );
        assert_eq!(report.final_state.offset, -102.0);
        assert_eq!(report.final_state.state, "idle");
        assert_eq!(report.final_state.transform, "translate3d(0,-102px,0)");
        assert_eq!(report.final_state.transition, None);
    }

    #[test]
    fn test_mixed_rows_and_set_value() {
        let script = ReplayScript::from_toml_str(
            r#"
rows = ["Mon", { value = "tue", text = "Tuesday", disabled = true }, "Wed"]
value = "Wed"

[[events]]
kind = "set_value"
value = "tue"
t = 0

[[events]]
kind = "set_value"
value = "Mon"
instant = true
t = 10
"#,
        )
        .unwrap();
        assert_eq!(script.rows[1].text, "Tuesday");

        let report = script.replay().unwrap();
        assert_eq!(report.selections.len(), 1);
        assert_eq!(report.selections[0].index, 0);
        assert_eq!(report.selections[0].t, 10.0);
        assert_eq!(report.final_state.value, Some(RowValue::from("Mon")));
    }

    #[test]
    fn test_wheel_config_and_capabilities() {
        let script = ReplayScript::from_toml_str(
            r#"
rows = [1, 2, 3]
supports = ["WebkitTransform"]

[wheel]
rows = 4
row_height = 40

[[events]]
kind = "wheel"
delta_y = 100
row = 0
t = 0

[[events]]
kind = "tick"
t = 1000
"#,
        )
        .unwrap();
        assert_eq!(script.wheel.row_height, 40.0);

        let report = script.replay().unwrap();
        assert_eq!(report.final_state.offset, -40.0);
        assert_eq!(report.final_state.index, Some(1));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = ReplayScript::from_toml_str("rows = [1]\n[wheel]\nrow_height = 0\n").unwrap_err();
        assert!(format!("{:#}", err).contains("row_height"));
    }

    #[test]
    fn test_unsupported_host_fails_replay() {
        let script =
            ReplayScript::from_toml_str("rows = [1]\nsupports = [\"zoom\"]\n").unwrap();
        assert!(script.replay().is_err());
    }

    #[test]
    fn test_secondary_button_does_not_drag() {
        let script = ReplayScript::from_toml_str(
            r#"
rows = [0, 1, 2, 3]

[[events]]
kind = "down"
y = 200
t = 0
button = 2

[[events]]
kind = "move"
y = 100
t = 50
"#,
        )
        .unwrap();
        let report = script.replay().unwrap();
        assert_eq!(report.final_state.offset, 0.0);
        assert_eq!(report.final_state.state, "idle");
    }

    #[test]
    fn test_report_json_shape() {
        let report = ReplayScript::from_toml_str(TAP_SCRIPT)
            .unwrap()
            .replay()
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["final"]["index"], 3);
        assert_eq!(json["selections"][0]["value"], 3);
        assert_eq!(json["final"]["prefix"], "standard");
    }

    #[test]
    fn test_forced_prefix_overrides_detection() {
        let script = ReplayScript::from_toml_str(
            r#"
rows = [1, 2, 3]
prefix = "webkit"
supports = ["transform"]

[[events]]
kind = "set_value"
value = 2
t = 0
"#,
        )
        .unwrap();
        assert_eq!(script.prefix, Some(VendorPrefix::Webkit));

        let report = script.replay().unwrap();
        assert_eq!(report.final_state.prefix, VendorPrefix::Webkit);
        assert_eq!(report.final_state.state, "transitioning");
        assert_eq!(report.final_state.offset, -34.0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["final"]["prefix"], "webkit");
    }

    #[test]
    fn test_unknown_prefix_is_rejected() {
        assert!(ReplayScript::from_toml_str("rows = [1]\nprefix = \"khtml\"\n").is_err());
    }
}
