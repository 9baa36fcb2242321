// Host-side tests for scroll-reactive card scaling and the mobile zoom.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod scroll {
        include!("../src/core/scroll.rs");
    }
}

use crate::core::constants::CARD_SCALE_K;
use crate::core::scroll::*;

const VW: f64 = 1280.0;
const VH: f64 = 800.0;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn card_at_viewport_centre_gets_full_scale() {
    let t = ScrollTuning::default();
    // centre = 300 + 100 = 400 = VH / 2
    let s = card_scale(300.0, 200.0, VW, VH, &t);
    assert!(close(s, 1.0 + CARD_SCALE_K), "got {}", s);
}

#[test]
fn card_at_viewport_edge_is_unscaled() {
    let t = ScrollTuning::default();
    assert!(close(card_scale(-100.0, 200.0, VW, VH, &t), 1.0));
    assert!(close(card_scale(700.0, 200.0, VW, VH, &t), 1.0));
}

#[test]
fn card_off_screen_is_unscaled() {
    let t = ScrollTuning::default();
    assert!(close(card_scale(5000.0, 200.0, VW, VH, &t), 1.0));
    assert!(close(card_scale(-5000.0, 200.0, VW, VH, &t), 1.0));
}

#[test]
fn card_scale_is_linear_in_distance() {
    let t = ScrollTuning::default();
    // centre at 200 → d = -0.5
    let s = card_scale(100.0, 200.0, VW, VH, &t);
    assert!(close(s, 1.0 + 0.5 * CARD_SCALE_K), "got {}", s);
}

#[test]
fn card_scale_is_bounded_everywhere() {
    let t = ScrollTuning::default();
    let mut top = -2000.0;
    while top < 3000.0 {
        let s = card_scale(top, 240.0, VW, VH, &t);
        assert!(s >= 1.0 && s <= 1.0 + CARD_SCALE_K + 1e-6, "top {} -> {}", top, s);
        top += 37.5;
    }
}

#[test]
fn card_scale_is_symmetric_around_centre() {
    let t = ScrollTuning::default();
    let above = card_scale(400.0 - 100.0 - 150.0, 200.0, VW, VH, &t);
    let below = card_scale(400.0 - 100.0 + 150.0, 200.0, VW, VH, &t);
    assert!(close(above, below));
}

#[test]
fn narrow_viewport_pins_scale_to_one() {
    let t = ScrollTuning::default();
    assert!(close(card_scale(300.0, 200.0, 639.0, VH, &t), 1.0));
    assert!(card_scale(300.0, 200.0, 640.0, VH, &t) > 1.0);
}

#[test]
fn card_scale_is_idempotent() {
    let t = ScrollTuning::default();
    let a = card_scale(123.0, 200.0, VW, VH, &t);
    let b = card_scale(123.0, 200.0, VW, VH, &t);
    assert_eq!(a, b);
}

#[test]
fn degenerate_viewport_height_is_unscaled() {
    let t = ScrollTuning::default();
    assert!(close(card_scale(0.0, 0.0, VW, 0.0, &t), 1.0));
    assert_eq!(normalized_center_distance(f64::NAN, VH), 1.0);
}

#[test]
fn tuning_overrides_scale_factor() {
    let t = ScrollTuning {
        card_scale_k: 0.3,
        ..ScrollTuning::default()
    };
    assert!(close(card_scale(300.0, 200.0, VW, VH, &t), 1.3));
}

#[test]
fn mobile_zoom_starts_at_one() {
    let t = ScrollTuning::default();
    assert!(close(mobile_zoom_scale(0.0, VH, &t), 1.0));
    assert!(close(mobile_zoom_scale(-50.0, VH, &t), 1.0));
}

#[test]
fn mobile_zoom_reaches_max_at_half_viewport() {
    let t = ScrollTuning::default();
    assert!(close(mobile_zoom_scale(400.0, VH, &t), 1.12));
    assert!(close(mobile_zoom_scale(4000.0, VH, &t), 1.12));
    assert!(close(mobile_zoom_scale(200.0, VH, &t), 1.06));
}

#[test]
fn mobile_zoom_is_monotonic() {
    let t = ScrollTuning::default();
    let mut prev = 0.0;
    for step in 0..50 {
        let s = mobile_zoom_scale(step as f64 * 10.0, VH, &t);
        assert!(s >= prev);
        prev = s;
    }
}

#[test]
fn layout_switches_at_mobile_breakpoint() {
    assert_eq!(DetailLayout::for_width(767.9), DetailLayout::Mobile);
    assert_eq!(DetailLayout::for_width(768.0), DetailLayout::Desktop);
    assert!(is_mobile_width(375.0));
}

#[test]
fn scale_transform_formats_four_decimals() {
    assert_eq!(scale_transform(1.15), "scale(1.1500)");
    assert_eq!(scale_transform(1.0), "scale(1.0000)");
}
