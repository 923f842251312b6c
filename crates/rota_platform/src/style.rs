//! Render capabilities
//!
//! Hosts differ in the names they use for the transform and transition style
//! properties and for the event that signals a finished transition. The
//! capabilities are detected once at startup and handed to each wheel, which
//! uses them to describe its rendered state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlatformError, Result};

/// Style-property vendor prefix
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorPrefix {
    #[default]
    Standard,
    Webkit,
    Moz,
    Ms,
    O,
}

impl VendorPrefix {
    /// Detection order: unprefixed first
    pub const ALL: [VendorPrefix; 5] = [
        VendorPrefix::Standard,
        VendorPrefix::Webkit,
        VendorPrefix::Moz,
        VendorPrefix::Ms,
        VendorPrefix::O,
    ];

    pub fn transform_property(&self) -> &'static str {
        match self {
            VendorPrefix::Standard => "transform",
            VendorPrefix::Webkit => "WebkitTransform",
            VendorPrefix::Moz => "MozTransform",
            VendorPrefix::Ms => "msTransform",
            VendorPrefix::O => "OTransform",
        }
    }

    pub fn transition_property(&self) -> &'static str {
        match self {
            VendorPrefix::Standard => "transition",
            VendorPrefix::Webkit => "WebkitTransition",
            VendorPrefix::Moz => "MozTransition",
            VendorPrefix::Ms => "msTransition",
            VendorPrefix::O => "OTransition",
        }
    }

    pub fn transition_end_event(&self) -> &'static str {
        match self {
            VendorPrefix::Standard => "transitionend",
            VendorPrefix::Webkit => "webkitTransitionEnd",
            VendorPrefix::Moz => "transitionEnd",
            VendorPrefix::Ms => "MSTransitionEnd",
            VendorPrefix::O => "oTransitionEnd",
        }
    }
}

impl FromStr for VendorPrefix {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "" | "standard" | "none" => Ok(VendorPrefix::Standard),
            "webkit" => Ok(VendorPrefix::Webkit),
            "moz" => Ok(VendorPrefix::Moz),
            "ms" => Ok(VendorPrefix::Ms),
            "o" => Ok(VendorPrefix::O),
            _ => Err(PlatformError::UnknownPrefix(s.to_string())),
        }
    }
}

impl fmt::Display for VendorPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VendorPrefix::Standard => "standard",
            VendorPrefix::Webkit => "webkit",
            VendorPrefix::Moz => "moz",
            VendorPrefix::Ms => "ms",
            VendorPrefix::O => "o",
        };
        f.write_str(name)
    }
}

/// Style names a host renderer understands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RenderCapabilities {
    prefix: VendorPrefix,
}

impl RenderCapabilities {
    pub fn new(prefix: VendorPrefix) -> Self {
        Self { prefix }
    }

    /// Pick the first vendor whose transform property the host supports
    pub fn detect<'a, I>(supported: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let supported: Vec<&str> = supported.into_iter().collect();
        VendorPrefix::ALL
            .into_iter()
            .find(|prefix| supported.contains(&prefix.transform_property()))
            .map(Self::new)
            .ok_or_else(|| {
                PlatformError::Unsupported(format!(
                    "no transform property among {:?}",
                    supported
                ))
            })
    }

    pub fn prefix(&self) -> VendorPrefix {
        self.prefix
    }

    pub fn transform_property(&self) -> &'static str {
        self.prefix.transform_property()
    }

    pub fn transition_property(&self) -> &'static str {
        self.prefix.transition_property()
    }

    pub fn transition_end_event(&self) -> &'static str {
        self.prefix.transition_end_event()
    }

    /// Vertical translation value for the transform property
    pub fn translate_y(&self, offset: f32) -> String {
        // Avoid rendering "-0px"
        let offset = if offset == 0.0 { 0.0 } else { offset };
        format!("translate3d(0,{}px,0)", offset)
    }
}
