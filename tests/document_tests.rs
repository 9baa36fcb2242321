// Host-side tests for plan document URLs, paging and zoom-pan.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod theme {
        include!("../src/core/theme.rs");
    }
    pub mod scroll {
        include!("../src/core/scroll.rs");
    }
    pub mod model {
        include!("../src/core/model.rs");
    }
    pub mod viewer {
        include!("../src/core/viewer.rs");
    }
    pub mod document {
        include!("../src/core/document.rs");
    }
}

use crate::core::document::*;
use crate::core::model::{Plan, PlanType};
use glam::Vec2;

fn pdf(page: Option<u32>) -> Plan {
    Plan {
        kind: PlanType::Pdf,
        src: "/plans/portfolio.pdf".into(),
        label: None,
        page,
        page_count: None,
    }
}

#[test]
fn pdf_src_is_absolute_with_page_fragment() {
    let plan = pdf(Some(7));
    let cursor = PageCursor::new(plan.page_index().unwrap());
    assert_eq!(
        document_src(&plan, "https://site.test", Some(cursor)),
        "https://site.test/plans/portfolio.pdf#page=7"
    );
    assert_eq!(
        document_src(&plan, "https://site.test", None),
        "https://site.test/plans/portfolio.pdf#page=1"
    );
}

#[test]
fn svg_src_has_no_fragment() {
    let plan = Plan {
        kind: PlanType::Svg,
        src: "/plans/site.svg".into(),
        label: None,
        page: None,
        page_count: None,
    };
    assert_eq!(document_src(&plan, "https://site.test", None), "https://site.test/plans/site.svg");
    assert_eq!(mime_type(PlanType::Svg), "image/svg+xml");
    assert_eq!(mime_type(PlanType::Pdf), "application/pdf");
}

#[test]
fn page_cursor_is_one_based() {
    let mut c = PageCursor::new(0);
    assert_eq!(c.page(), 1);
    assert!(!c.can_go_back());
    assert!(!c.prev());
    assert_eq!(c.page(), 1);
    c.next();
    c.next();
    assert_eq!(c.page(), 3);
    assert!(c.prev());
    assert_eq!(c.label(), "Page 2");
}

#[test]
fn zoom_keeps_anchor_fixed() {
    let mut z = ZoomPan::new(0.5, 8.0);
    let anchor = Vec2::new(200.0, 100.0);
    z.zoom_at(2.0, anchor);
    assert_eq!(z.scale(), 2.0);
    // Content point under the anchor before and after zooming is the same.
    let content = (anchor - z.offset()) / z.scale();
    assert!((content - anchor).abs().max_element() < 1e-3);
}

#[test]
fn zoom_is_clamped() {
    let mut z = ZoomPan::new(0.5, 8.0);
    for _ in 0..100 {
        z.zoom_at(1.5, Vec2::ZERO);
    }
    assert_eq!(z.scale(), 8.0);
    for _ in 0..100 {
        z.zoom_at(0.5, Vec2::ZERO);
    }
    assert_eq!(z.scale(), 0.5);
    z.zoom_at(0.0, Vec2::ZERO);
    z.zoom_at(f32::NAN, Vec2::ZERO);
    assert_eq!(z.scale(), 0.5);
}

#[test]
fn pan_and_reset() {
    let mut z = ZoomPan::new(0.5, 8.0);
    z.pan(Vec2::new(10.0, -5.0));
    z.pan(Vec2::new(f32::INFINITY, 0.0));
    assert_eq!(z.offset(), Vec2::new(10.0, -5.0));
    assert_eq!(z.transform(), "translate(10.00px, -5.00px) scale(1.0000)");
    z.reset();
    assert_eq!(z.offset(), Vec2::ZERO);
    assert_eq!(z.scale(), 1.0);
}

#[test]
fn wheel_up_zooms_in() {
    assert!(wheel_factor(-120.0, 0.1) > 1.0);
    assert!(wheel_factor(120.0, 0.1) < 1.0);
    assert_eq!(wheel_factor(0.0, 0.1), 1.0);
    let round_trip = wheel_factor(-1.0, 0.1) * wheel_factor(1.0, 0.1);
    assert!((round_trip - 1.0).abs() < 1e-6);
}

#[test]
fn page_cursor_stops_at_the_last_known_page() {
    let mut c = PageCursor::new(11).with_last(Some(12));
    assert!(c.can_go_forward());
    assert!(c.next());
    assert_eq!(c.page(), 12);
    assert!(!c.next());
    assert_eq!(c.page(), 12);
    assert_eq!(c.label(), "Page 12 of 12");

    // An out-of-range start is pulled back inside the document.
    let c = PageCursor::new(57).with_last(Some(3));
    assert_eq!(c.page(), 3);
}

#[test]
fn single_page_documents_have_no_navigation() {
    assert!(!PageCursor::new(1).with_last(Some(1)).has_navigation());
    assert!(PageCursor::new(1).with_last(Some(2)).has_navigation());
    assert!(PageCursor::new(1).has_navigation());
}

#[test]
fn one_pointer_pans() {
    let mut t = PinchTracker::default();
    assert!(t.down(7, Vec2::new(10.0, 10.0)));
    assert_eq!(t.moved(7, Vec2::new(14.0, 7.0)), Some(Gesture::Pan(Vec2::new(4.0, -3.0))));
    // Pointers that never went down are ignored.
    assert_eq!(t.moved(8, Vec2::new(0.0, 0.0)), None);
}

#[test]
fn two_pointers_pinch_about_their_midpoint() {
    let mut t = PinchTracker::default();
    t.down(1, Vec2::new(100.0, 100.0));
    t.down(2, Vec2::new(200.0, 100.0));
    match t.moved(2, Vec2::new(300.0, 100.0)) {
        Some(Gesture::Pinch { factor, anchor, pan }) => {
            assert!((factor - 2.0).abs() < 1e-6);
            assert_eq!(anchor, Vec2::new(200.0, 100.0));
            assert_eq!(pan, Vec2::new(50.0, 0.0));
        }
        other => panic!("expected a pinch, got {:?}", other),
    }

    let mut view = ZoomPan::new(0.5, 8.0);
    t.moved(1, Vec2::new(0.0, 100.0)).unwrap().apply(&mut view);
    assert!(view.scale() > 1.0);
}

#[test]
fn pinch_is_limited_to_two_pointers() {
    let mut t = PinchTracker::default();
    assert!(t.down(1, Vec2::ZERO));
    assert!(t.down(2, Vec2::new(50.0, 0.0)));
    assert!(!t.down(3, Vec2::new(80.0, 0.0)));
    assert_eq!(t.active(), 2);
    assert_eq!(t.moved(3, Vec2::new(90.0, 0.0)), None);

    // Lifting one finger falls back to panning with the other.
    t.up(1);
    assert_eq!(t.active(), 1);
    assert_eq!(t.moved(2, Vec2::new(60.0, 0.0)), Some(Gesture::Pan(Vec2::new(10.0, 0.0))));
}

#[test]
fn coincident_pointers_do_not_zoom() {
    let mut t = PinchTracker::default();
    t.down(1, Vec2::new(40.0, 40.0));
    t.down(2, Vec2::new(40.0, 40.0));
    match t.moved(2, Vec2::new(90.0, 40.0)) {
        Some(Gesture::Pinch { factor, .. }) => assert_eq!(factor, 1.0),
        other => panic!("expected a pinch, got {:?}", other),
    }
}
