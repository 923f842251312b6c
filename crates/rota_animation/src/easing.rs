//! Easing functions
//!
//! Named curves plus CSS-style `cubic-bezier(x1, y1, x2, y2)` timing functions.
//! Every curve maps normalized time `t` in `[0, 1]` to normalized progress.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when an easing string cannot be parsed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EasingParseError {
    /// Name is not a known curve
    #[error("unknown easing curve: {0}")]
    UnknownCurve(String),

    /// `cubic-bezier(...)` with the wrong arity or non-numeric arguments
    #[error("malformed cubic-bezier: {0}")]
    MalformedBezier(String),

    /// Control point x outside `[0, 1]` (the curve would not be a function of time)
    #[error("cubic-bezier x control points must lie in [0, 1], got {0} and {1}")]
    BezierOutOfRange(f32, f32),
}

/// Easing functions for timed animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// CSS cubic-bezier with control points `(x1, y1)` and `(x2, y2)`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// easeOutQuint, used for regular scrolling
    pub const fn ease_out_quint() -> Self {
        Easing::CubicBezier(0.23, 1.0, 0.32, 1.0)
    }

    /// easeOutQuad, used when a fling runs past an edge
    pub const fn ease_out_quad() -> Self {
        Easing::CubicBezier(0.25, 0.46, 0.45, 0.94)
    }

    /// easeOutQuart, used for bouncing back into bounds
    pub const fn ease_out_quart() -> Self {
        Easing::CubicBezier(0.165, 0.84, 0.44, 1.0)
    }

    /// Apply easing to a value
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => {
                if t <= 0.0 {
                    return 0.0;
                }
                if t >= 1.0 {
                    return 1.0;
                }
                let s = solve_curve_x(t, x1, x2);
                bezier_sample(y1, y2, s)
            }
        }
    }

    /// CSS timing-function representation
    pub fn to_css(&self) -> String {
        match *self {
            Easing::Linear => "linear".to_string(),
            Easing::EaseIn => "ease-in".to_string(),
            Easing::EaseOut => "ease-out".to_string(),
            Easing::EaseInOut => "ease-in-out".to_string(),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                format!("cubic-bezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
        }
    }
}

// ============================================================================
// Cubic Bezier Solver
// ============================================================================

// Polynomial form of a 1D bezier with endpoints fixed at 0 and 1:
// B(s) = ((a*s + b)*s + c)*s
fn bezier_coefficients(p1: f32, p2: f32) -> (f32, f32, f32) {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (a, b, c)
}

fn bezier_sample(p1: f32, p2: f32, s: f32) -> f32 {
    let (a, b, c) = bezier_coefficients(p1, p2);
    ((a * s + b) * s + c) * s
}

fn bezier_slope(p1: f32, p2: f32, s: f32) -> f32 {
    let (a, b, c) = bezier_coefficients(p1, p2);
    (3.0 * a * s + 2.0 * b) * s + c
}

/// Find the curve parameter whose x coordinate equals `x`
fn solve_curve_x(x: f32, x1: f32, x2: f32) -> f32 {
    const EPSILON: f32 = 1e-6;

    // Newton-Raphson converges in a few steps for well-behaved curves
    let mut s = x;
    for _ in 0..8 {
        let err = bezier_sample(x1, x2, s) - x;
        if err.abs() < EPSILON {
            return s;
        }
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < EPSILON {
            break;
        }
        s -= err / slope;
    }

    // Flat regions: fall back to bisection
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    s = x;
    for _ in 0..32 {
        let value = bezier_sample(x1, x2, s);
        if (value - x).abs() < EPSILON {
            break;
        }
        if x > value {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    s
}

// ============================================================================
// Parsing
// ============================================================================

impl FromStr for Easing {
    type Err = EasingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "linear" => return Ok(Easing::Linear),
            "ease-in" => return Ok(Easing::EaseIn),
            "ease-out" => return Ok(Easing::EaseOut),
            "ease-in-out" => return Ok(Easing::EaseInOut),
            "ease-out-quint" => return Ok(Easing::ease_out_quint()),
            "ease-out-quad" => return Ok(Easing::ease_out_quad()),
            "ease-out-quart" => return Ok(Easing::ease_out_quart()),
            _ => {}
        }

        let args = s
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| EasingParseError::UnknownCurve(s.to_string()))?;

        let points = args
            .split(',')
            .map(|p| p.trim().parse::<f32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| EasingParseError::MalformedBezier(s.to_string()))?;

        let &[x1, y1, x2, y2] = points.as_slice() else {
            return Err(EasingParseError::MalformedBezier(s.to_string()));
        };

        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(EasingParseError::BezierOutOfRange(x1, x2));
        }

        Ok(Easing::CubicBezier(x1, y1, x2, y2))
    }
}

impl TryFrom<String> for Easing {
    type Error = EasingParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.to_css()
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::ease_out_quint(),
            Easing::ease_out_quad(),
            Easing::ease_out_quart(),
        ] {
            assert!(easing.apply(0.0).abs() < 1e-4, "{easing} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-4, "{easing} at 1");
        }
    }

    #[test]
    fn test_ease_out_curves_lead_linear() {
        // Ease-out curves cover most of the distance early
        for easing in [
            Easing::ease_out_quint(),
            Easing::ease_out_quad(),
            Easing::ease_out_quart(),
        ] {
            assert!(easing.apply(0.25) > 0.25);
            assert!(easing.apply(0.5) > 0.5);
        }
    }

    #[test]
    fn test_bezier_matches_linear_diagonal() {
        let linear_bezier = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((linear_bezier.apply(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn test_bezier_monotonic() {
        let easing = Easing::ease_out_quint();
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = easing.apply(i as f32 / 100.0);
            assert!(v >= prev - 1e-5);
            prev = v;
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_css_output() {
        assert_eq!(Easing::Linear.to_css(), "linear");
        assert_eq!(
            Easing::ease_out_quint().to_css(),
            "cubic-bezier(0.23, 1, 0.32, 1)"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("ease-out".parse::<Easing>().unwrap(), Easing::EaseOut);
        assert_eq!(
            "ease-out-quart".parse::<Easing>().unwrap(),
            Easing::ease_out_quart()
        );
        assert_eq!(
            "cubic-bezier(0.25, 0.46, 0.45, 0.94)"
                .parse::<Easing>()
                .unwrap(),
            Easing::ease_out_quad()
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "bouncy".parse::<Easing>(),
            Err(EasingParseError::UnknownCurve(_))
        ));
        assert!(matches!(
            "cubic-bezier(0.1, 0.2)".parse::<Easing>(),
            Err(EasingParseError::MalformedBezier(_))
        ));
        assert!(matches!(
            "cubic-bezier(1.5, 0, 0.5, 1)".parse::<Easing>(),
            Err(EasingParseError::BezierOutOfRange(_, _))
        ));
    }

    #[test]
    fn test_css_round_trips_through_serde() {
        let json = serde_json::to_string(&Easing::ease_out_quint()).unwrap();
        assert_eq!(json, "\"cubic-bezier(0.23, 1, 0.32, 1)\"");
        let back: Easing = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Easing::ease_out_quint());
    }
}
