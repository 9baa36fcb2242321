use gloo::render::{request_animation_frame, AnimationFrame};
use std::cell::RefCell;
use std::rc::Rc;

type Tick = Rc<RefCell<dyn FnMut(f64)>>;
type Slot = Rc<RefCell<Option<AnimationFrame>>>;

/// Continuously rescheduled animation-frame callback.
///
/// The pending frame is cancelled when the loop is dropped, so the tick never
/// runs against a torn-down component.
pub struct FrameLoop {
    slot: Slot,
}

impl FrameLoop {
    pub fn start(tick: impl FnMut(f64) + 'static) -> Self {
        let slot: Slot = Rc::new(RefCell::new(None));
        let tick: Tick = Rc::new(RefCell::new(tick));
        schedule(&slot, &tick);
        Self { slot }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.slot.borrow_mut().take();
    }
}

fn schedule(slot: &Slot, tick: &Tick) {
    let weak_slot = Rc::downgrade(slot);
    let next_tick = tick.clone();
    let handle = request_animation_frame(move |ts| {
        let Some(slot) = weak_slot.upgrade() else {
            return;
        };
        // This frame's handle is spent.
        slot.borrow_mut().take();
        (next_tick.borrow_mut())(ts);
        schedule(&slot, &next_tick);
    });
    *slot.borrow_mut() = Some(handle);
}

/// Run `f` after `frames` animation frames have passed.
pub struct DeferredFrames {
    slot: Slot,
}

impl DeferredFrames {
    pub fn after(frames: u8, f: impl FnOnce() + 'static) -> Self {
        let slot: Slot = Rc::new(RefCell::new(None));
        defer(&slot, frames.max(1), Box::new(f));
        Self { slot }
    }
}

impl Drop for DeferredFrames {
    fn drop(&mut self) {
        self.slot.borrow_mut().take();
    }
}

fn defer(slot: &Slot, remaining: u8, f: Box<dyn FnOnce()>) {
    let weak_slot = Rc::downgrade(slot);
    let handle = request_animation_frame(move |_| {
        let Some(slot) = weak_slot.upgrade() else {
            return;
        };
        slot.borrow_mut().take();
        if remaining <= 1 {
            f();
        } else {
            defer(&slot, remaining - 1, f);
        }
    });
    *slot.borrow_mut() = Some(handle);
}
