// Host-side tests for the modal transition state machine and scroll lock.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod modal {
        include!("../src/core/modal.rs");
    }
}

use crate::core::modal::*;

fn origin() -> Rect {
    Rect {
        top: 420.0,
        left: 80.0,
        width: 240.0,
        height: 180.0,
    }
}

fn opened() -> ModalMachine {
    let mut m = ModalMachine::default();
    m.open(Some(origin()));
    m.frame();
    m.frame();
    m
}

#[test]
fn open_mounts_in_closed_geometry() {
    let mut m = ModalMachine::default();
    assert_eq!(m.open(Some(origin())), ModalEffect::Mount);
    assert_eq!(m.phase(), ModalPhase::Opening);
    let g = m.geometry();
    assert_eq!(g.top, "420px");
    assert_eq!(g.left, "80px");
    assert_eq!(g.width, "240px");
    assert_eq!(g.height, "180px");
    assert_eq!(g.transform.as_deref(), Some("perspective(1200px) rotateX(60deg)"));
    assert!(!m.content_visible());
}

#[test]
fn open_geometry_waits_two_frames() {
    let mut m = ModalMachine::default();
    m.open(Some(origin()));
    assert_eq!(m.frame(), ModalEffect::AwaitFrame);
    assert_eq!(m.phase(), ModalPhase::Opening);
    assert_eq!(m.frame(), ModalEffect::ApplyOpen);
    assert_eq!(m.phase(), ModalPhase::Open);
    assert_eq!(m.geometry(), ModalGeometry::full_viewport());
    assert!(m.content_visible());
}

#[test]
fn stray_frames_are_ignored() {
    let mut m = opened();
    assert_eq!(m.frame(), ModalEffect::None);
    let mut closed = ModalMachine::default();
    assert_eq!(closed.frame(), ModalEffect::None);
}

#[test]
fn opening_twice_is_a_no_op() {
    let mut m = opened();
    assert_eq!(m.open(None), ModalEffect::None);
    assert_eq!(m.origin(), Some(origin()));
}

#[test]
fn close_reverses_to_origin_then_unmounts() {
    let mut m = opened();
    assert_eq!(m.request_close(), ModalEffect::BeginClose);
    assert_eq!(m.phase(), ModalPhase::Closing);
    assert_eq!(m.geometry(), ModalGeometry::from_origin(Some(origin())));
    assert!(!m.content_visible());
    assert_eq!(m.close_elapsed(), ModalEffect::Unmount);
    assert_eq!(m.phase(), ModalPhase::Closed);
    assert_eq!(m.origin(), None);
}

#[test]
fn close_requests_are_idempotent() {
    let mut m = opened();
    assert_eq!(m.request_close(), ModalEffect::BeginClose);
    assert_eq!(m.request_close(), ModalEffect::None);
    assert_eq!(m.close_elapsed(), ModalEffect::Unmount);
    assert_eq!(m.close_elapsed(), ModalEffect::None);
    assert_eq!(m.request_close(), ModalEffect::None);
}

#[test]
fn close_while_opening_skips_the_open_state() {
    let mut m = ModalMachine::default();
    m.open(Some(origin()));
    assert_eq!(m.request_close(), ModalEffect::BeginClose);
    // The pending frame lands after the close began.
    assert_eq!(m.frame(), ModalEffect::None);
    assert_eq!(m.close_elapsed(), ModalEffect::Unmount);
}

#[test]
fn reopens_after_close() {
    let mut m = opened();
    m.request_close();
    m.close_elapsed();
    assert_eq!(m.open(None), ModalEffect::Mount);
}

#[test]
fn missing_origin_grows_from_viewport_centre() {
    let g = ModalGeometry::from_origin(None);
    assert_eq!(g.top, "50%");
    assert_eq!(g.left, "50%");
    assert_eq!(g.width, "0px");
    assert_eq!(g.height, "0px");
    assert_eq!(g.transform, None);
    assert_eq!(g.opacity, 0.0);
}

#[test]
fn full_viewport_geometry_is_flat() {
    let g = ModalGeometry::full_viewport();
    assert_eq!(g.top, "0px");
    assert_eq!(g.width, "100%");
    assert_eq!(g.height, "100vh");
    assert_eq!(g.transform.as_deref(), Some("perspective(1200px) rotateX(0deg)"));
    assert_eq!(g.opacity, 1.0);
}

#[test]
fn transitions_use_modal_timing() {
    let t = ModalTiming::default();
    assert_eq!(frame_transition(&t), "all 500ms cubic-bezier(0.16, 1, 0.3, 1)");
    assert_eq!(content_transition(&t, true), "opacity 300ms ease 200ms");
    assert_eq!(content_transition(&t, false), "opacity 300ms ease 0ms");
}

#[test]
fn custom_timing_is_carried_through() {
    let t = ModalTiming {
        defer_frames: 3,
        ..ModalTiming::default()
    };
    let mut m = ModalMachine::new(t);
    m.open(None);
    assert_eq!(m.frame(), ModalEffect::AwaitFrame);
    assert_eq!(m.frame(), ModalEffect::AwaitFrame);
    assert_eq!(m.frame(), ModalEffect::ApplyOpen);
    assert_eq!(m.timing(), t);
}

#[test]
fn escape_maps_to_close() {
    assert_eq!(command_for_key("Escape"), Some(ModalCommand::Close));
    assert_eq!(command_for_key("Esc"), Some(ModalCommand::Close));
    assert_eq!(command_for_key("Enter"), None);
    assert_eq!(command_for_key("e"), None);
}

#[test]
fn scroll_lock_is_released_by_the_last_holder() {
    let mut lock = ScrollLockCount::default();
    assert!(lock.acquire(), "first holder disables scrolling");
    assert!(!lock.acquire());
    assert!(!lock.release());
    assert!(lock.release(), "last holder restores scrolling");
    assert_eq!(lock.holders(), 0);
}

#[test]
fn releasing_an_unheld_lock_is_a_no_op() {
    let mut lock = ScrollLockCount::default();
    assert!(!lock.release());
    assert_eq!(lock.holders(), 0);
    assert!(lock.acquire());
}

#[test]
fn open_close_cycle_restores_scroll_exactly_once() {
    let mut m = ModalMachine::default();
    let mut lock = ScrollLockCount::default();
    let mut restores = 0;

    if m.open(Some(origin())) == ModalEffect::Mount {
        lock.acquire();
    }
    m.frame();
    m.frame();
    // Escape and the close button both fire.
    for _ in 0..2 {
        m.request_close();
    }
    for _ in 0..2 {
        if m.close_elapsed() == ModalEffect::Unmount && lock.release() {
            restores += 1;
        }
    }
    // Teardown on drop after the close already ran.
    if lock.release() {
        restores += 1;
    }
    assert_eq!(restores, 1);
    assert_eq!(lock.holders(), 0);
}

#[test]
fn unmount_is_reported_once_and_ends_the_mounted_span() {
    let mut m = ModalMachine::default();
    // Listener sets registered on Mount, released on Unmount.
    let mut live_listener_sets = 0;
    let apply = |effect: ModalEffect, live: &mut i32| match effect {
        ModalEffect::Mount => *live += 1,
        ModalEffect::Unmount => *live -= 1,
        _ => {}
    };

    for _ in 0..3 {
        apply(m.open(Some(origin())), &mut live_listener_sets);
        assert!(m.is_mounted());
        apply(m.frame(), &mut live_listener_sets);
        apply(m.request_close(), &mut live_listener_sets);
        apply(m.frame(), &mut live_listener_sets);
        apply(m.close_elapsed(), &mut live_listener_sets);
        assert!(!m.is_mounted());
        assert_eq!(live_listener_sets, 0);

        // Late Escape presses, stray frames and timers after unmount.
        assert_eq!(m.request_close(), ModalEffect::None);
        assert_eq!(m.frame(), ModalEffect::None);
        assert_eq!(m.close_elapsed(), ModalEffect::None);
    }
}
