//! Animatable value types
//!
//! Tweens are generic over anything that can be linearly interpolated. Offsets
//! are `f32`; `f64` covers timeline values.

/// Values a tween can interpolate
pub trait Interpolate: Clone {
    /// Blend from `self` toward `other`; `t` of 0.0 gives `self`, 1.0 gives `other`
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for f64 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t as f64
    }
}
