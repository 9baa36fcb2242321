use super::constants::{
    PARALLAX_DIRECT_PX, PARALLAX_MEDIA_SCALE, PARALLAX_SETTLE_EPSILON, PARALLAX_SMOOTHING,
    PARALLAX_SMOOTH_PX, VIGNETTE_CENTER_X_PCT, VIGNETTE_CENTER_Y_PCT, VIGNETTE_TRAVEL_PCT,
};
use super::theme::Theme;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxTuning {
    pub direct_px: f32,
    pub smooth_px: f32,
    pub smoothing: f32,
    pub settle_epsilon: f32,
}

impl Default for ParallaxTuning {
    fn default() -> Self {
        Self {
            direct_px: PARALLAX_DIRECT_PX,
            smooth_px: PARALLAX_SMOOTH_PX,
            smoothing: PARALLAX_SMOOTHING,
            settle_epsilon: PARALLAX_SETTLE_EPSILON,
        }
    }
}

/// Offset in px that moves media against the pointer. Centre input is zero.
#[inline]
pub fn counter_offset(unit: Vec2, px_per_unit: f32) -> Vec2 {
    -(unit - Vec2::splat(0.5)) * px_per_unit
}

/// Exponential follower driven once per animation frame.
#[derive(Clone, Copy, Debug)]
pub struct Smoother {
    current: Vec2,
    target: Vec2,
    factor: f32,
}

impl Smoother {
    pub fn new(factor: f32) -> Self {
        Self {
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            factor: factor.clamp(0.0, 1.0),
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn step(&mut self) -> Vec2 {
        self.current += (self.target - self.current) * self.factor;
        self.current
    }

    pub fn is_settled(&self, epsilon: f32) -> bool {
        (self.target - self.current).abs().max_element() <= epsilon
    }
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(PARALLAX_SMOOTHING)
    }
}

pub fn media_transform(offset: Vec2) -> String {
    format!(
        "scale({}) translate({:.2}px, {:.2}px)",
        PARALLAX_MEDIA_SCALE, offset.x, offset.y
    )
}

/// Vignette centre in percent of the viewer box.
pub fn vignette_center(unit: Option<Vec2>, parallax: bool) -> Vec2 {
    let base = Vec2::new(VIGNETTE_CENTER_X_PCT, VIGNETTE_CENTER_Y_PCT);
    match unit {
        Some(u) if parallax => base + (u - Vec2::splat(0.5)) * VIGNETTE_TRAVEL_PCT,
        _ => base,
    }
}

pub fn vignette_background(center: Vec2, theme: Theme) -> String {
    let (mid, edge) = match theme {
        Theme::Light => ("rgba(250,250,249,0.4)", "#fafaf9"),
        Theme::Dark => ("rgba(0,0,0,0.4)", "black"),
    };
    format!(
        "radial-gradient(circle at {:.2}% {:.2}%, transparent 78%, {} 92%, {} 100%)",
        center.x, center.y, mid, edge
    )
}
