//! Rota Platform Abstraction
//!
//! Types shared between a host UI layer and the wheel engine:
//!
//! - **Input**: primary-pointer, wheel-step and transition-end events
//! - **Elements**: stable keys identifying rendered row elements for hit-testing
//! - **Render capabilities**: the transform/transition property names and the
//!   transition-end event name the host renderer understands, detected once
//!   at startup

pub mod error;
pub mod input;
pub mod style;

pub use error::{PlatformError, Result};
pub use input::{ElementKey, InputEvent, PointerButton, PointerSource};
pub use style::{RenderCapabilities, VendorPrefix};
