//! Rota Wheel Engine
//!
//! An inertial, row-snapping picker column in the style of the iOS date
//! picker. The engine owns no rendering: it consumes timestamped input and
//! produces the transform and transition the host applies to its list.
//!
//! # Features
//!
//! - **Direct manipulation**: 1:1 drag inside the rows, damped rubber band past the edges
//! - **Momentum**: fast releases project a decelerating fling onto a row boundary
//! - **Snapping**: the wheel always comes to rest centered on an enabled row
//! - **Tap & wheel-step selection**: tap a row or scroll one row per wheel tick
//! - **Selection events**: a callback fires once per settle that changes the row
//!
//! # Example
//!
//! ```rust
//! use rota_wheel::{Row, Wheel, WheelConfig};
//!
//! let rows = vec![Row::plain("Jan"), Row::plain("Feb").disabled(), Row::plain("Mar")];
//! let mut wheel = Wheel::new(WheelConfig::default(), rows, None);
//!
//! // Disabled rows cannot be selected
//! assert_eq!(wheel.set_value(&"Feb".into(), true, 0.0), None);
//! assert_eq!(wheel.set_value(&"Mar".into(), true, 0.0), Some(2));
//! assert_eq!(wheel.value().map(|v| v.to_string()), Some("Mar".to_string()));
//! ```

pub mod config;
pub mod error;
pub mod gesture;
pub mod momentum;
pub mod position;
pub mod row;
pub mod selection;
pub mod snap;
pub mod state;
pub mod transition;
pub mod wheel;


pub use config::{WheelConfig, WheelEasings};
pub use error::{Result, WheelError};
pub use gesture::{GestureSession, ReleaseAction, ReleasePolicy, ReleaseSample};
pub use momentum::{Momentum, MomentumCalculator, DEFAULT_DECELERATION};
pub use position::PositionEngine;
pub use row::{Row, RowValue};
pub use selection::SelectCallback;
pub use state::WheelState;
pub use transition::{TransitionController, TransitionSession, END_SIGNAL_TOLERANCE_MS};
pub use wheel::{ItemVisual, Wheel, WheelRenderInfo};

// Re-export the types hosts need to drive a wheel
pub use rota_animation::Easing;
pub use rota_platform::{ElementKey, InputEvent, PointerButton, PointerSource, RenderCapabilities};
