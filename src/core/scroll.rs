use super::constants::{
    CARD_SCALE_K, MOBILE_BREAKPOINT_PX, MOBILE_SCROLL_RANGE_FRACTION, MOBILE_ZOOM_MAX,
    NARROW_VIEWPORT_PX,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTuning {
    pub card_scale_k: f32,
    pub narrow_viewport_px: f64,
    pub mobile_zoom_max: f32,
    pub mobile_scroll_range_fraction: f64,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            card_scale_k: CARD_SCALE_K,
            narrow_viewport_px: NARROW_VIEWPORT_PX,
            mobile_zoom_max: MOBILE_ZOOM_MAX,
            mobile_scroll_range_fraction: MOBILE_SCROLL_RANGE_FRACTION,
        }
    }
}

#[inline]
pub fn is_mobile_width(viewport_width: f64) -> bool {
    viewport_width < MOBILE_BREAKPOINT_PX
}

/// Signed distance of a card centre from the viewport centre, in half-heights.
#[inline]
pub fn normalized_center_distance(card_center_y: f64, viewport_height: f64) -> f64 {
    let half = viewport_height * 0.5;
    if half <= 0.0 || !card_center_y.is_finite() {
        return 1.0;
    }
    ((card_center_y - half) / half).clamp(-1.0, 1.0)
}

/// Zoom for a gallery card; biggest at the viewport centre, 1 at the edges.
pub fn card_scale(
    card_top: f64,
    card_height: f64,
    viewport_width: f64,
    viewport_height: f64,
    tuning: &ScrollTuning,
) -> f32 {
    if viewport_width < tuning.narrow_viewport_px {
        return 1.0;
    }
    let center = card_top + card_height * 0.5;
    let d = normalized_center_distance(center, viewport_height);
    let k = tuning.card_scale_k;
    (1.0 + (1.0 - d.abs() as f32) * k).clamp(1.0, 1.0 + k)
}

/// Zoom of the mobile viewer pane as the info panel scrolls over it.
pub fn mobile_zoom_scale(scroll_top: f64, viewport_height: f64, tuning: &ScrollTuning) -> f32 {
    let range = viewport_height * tuning.mobile_scroll_range_fraction;
    if range <= 0.0 {
        return 1.0;
    }
    let progress = (scroll_top.max(0.0) / range).min(1.0) as f32;
    1.0 + progress * tuning.mobile_zoom_max
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailLayout {
    /// Fixed two-pane desktop layout; the adapter leaves it untouched.
    Desktop,
    /// Single scrollable column with the zooming viewer pane on top.
    Mobile,
}

impl DetailLayout {
    pub fn for_width(viewport_width: f64) -> Self {
        if is_mobile_width(viewport_width) {
            DetailLayout::Mobile
        } else {
            DetailLayout::Desktop
        }
    }
}

pub fn scale_transform(scale: f32) -> String {
    format!("scale({:.4})", scale)
}
