// Host-side tests for parallax offsets, smoothing and the vignette.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod theme {
        include!("../src/core/theme.rs");
    }
    pub mod parallax {
        include!("../src/core/parallax.rs");
    }
}

use crate::core::parallax::*;
use crate::core::theme::Theme;
use glam::Vec2;

fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).abs().max_element() < 1e-4
}

#[test]
fn centre_input_has_no_offset() {
    assert!(approx(counter_offset(Vec2::splat(0.5), 8.0), Vec2::ZERO));
}

#[test]
fn offset_moves_against_the_pointer() {
    let o = counter_offset(Vec2::new(1.0, 0.0), 8.0);
    assert!(approx(o, Vec2::new(-4.0, 4.0)));
}

#[test]
fn smoother_converges_to_target() {
    let mut s = Smoother::new(0.08);
    s.set_target(Vec2::new(4.0, -4.0));
    for _ in 0..200 {
        s.step();
    }
    assert!(approx(s.current(), Vec2::new(4.0, -4.0)));
    assert!(s.is_settled(0.01));
}

#[test]
fn smoother_moves_a_fixed_fraction_per_frame() {
    let mut s = Smoother::new(0.08);
    s.set_target(Vec2::new(10.0, 0.0));
    let first = s.step();
    assert!(approx(first, Vec2::new(0.8, 0.0)));
    let second = s.step();
    assert!(approx(second, Vec2::new(0.8 + 9.2 * 0.08, 0.0)));
    assert!(!s.is_settled(0.01));
}

#[test]
fn smoother_factor_is_clamped() {
    let mut s = Smoother::new(3.0);
    s.set_target(Vec2::ONE);
    assert!(approx(s.step(), Vec2::ONE));
}

#[test]
fn default_tuning_uses_constants() {
    let t = ParallaxTuning::default();
    assert_eq!(t.direct_px, 5.0);
    assert_eq!(t.smooth_px, 8.0);
    assert_eq!(t.smoothing, 0.08);
}

#[test]
fn media_transform_overscans_and_translates() {
    assert_eq!(
        media_transform(Vec2::new(-4.0, 2.5)),
        "scale(1.1) translate(-4.00px, 2.50px)"
    );
}

#[test]
fn vignette_rests_at_default_centre() {
    assert!(approx(vignette_center(None, true), Vec2::new(50.0, 60.0)));
    assert!(approx(
        vignette_center(Some(Vec2::new(1.0, 1.0)), false),
        Vec2::new(50.0, 60.0)
    ));
}

#[test]
fn vignette_follows_input_when_parallax_is_on() {
    let c = vignette_center(Some(Vec2::new(1.0, 0.0)), true);
    assert!(approx(c, Vec2::new(52.5, 57.5)));
}

#[test]
fn vignette_colour_follows_theme() {
    let c = Vec2::new(50.0, 60.0);
    let light = vignette_background(c, Theme::Light);
    let dark = vignette_background(c, Theme::Dark);
    assert!(light.starts_with("radial-gradient(circle at 50.00% 60.00%"));
    assert!(light.contains("#fafaf9"));
    assert!(dark.contains("black"));
    assert_ne!(light, dark);
}
