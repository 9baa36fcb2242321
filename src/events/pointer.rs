use super::permission::MotionGate;
use crate::core::pointer::{PointerSampler, Sample};
use crate::dom;
use crate::input;
use gloo::events::EventListener;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys as web;

type Subscriber = Rc<dyn Fn(Sample)>;

struct FeedInner {
    sampler: RefCell<PointerSampler>,
    subscribers: RefCell<Vec<(u32, Subscriber)>>,
    next_id: Cell<u32>,
    gate: MotionGate,
    listeners: RefCell<Vec<EventListener>>,
}

impl FeedInner {
    fn publish(&self, sample: Sample) {
        // Snapshot so subscribers may (un)subscribe while being notified.
        let subscribers: Vec<Subscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, s)| s.clone())
            .collect();
        for s in subscribers {
            s(sample);
        }
    }
}

/// Page-wide pointer, touch and tilt input, normalized once and fanned out to
/// every viewer that wants it.
#[derive(Clone)]
pub struct PointerFeed {
    inner: Rc<FeedInner>,
}

impl PointerFeed {
    pub fn install(window: &web::Window, gate: MotionGate) -> Self {
        let inner = Rc::new(FeedInner {
            sampler: RefCell::new(PointerSampler::default()),
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            gate,
            listeners: RefCell::new(Vec::new()),
        });

        let mut listeners = Vec::with_capacity(3);

        let weak = Rc::downgrade(&inner);
        listeners.push(EventListener::new(window, "mousemove", move |ev| {
            let (Some(inner), Some(ev)) = (weak.upgrade(), ev.dyn_ref::<web::MouseEvent>()) else {
                return;
            };
            let (cx, cy) = input::mouse_client(ev);
            let (w, h) = dom::viewport_size();
            let sample = inner.sampler.borrow_mut().record_pointer(cx, cy, w, h);
            inner.publish(sample);
        }));

        // Passive by default in gloo, so page scrolling is never blocked.
        let weak = Rc::downgrade(&inner);
        listeners.push(EventListener::new(window, "touchmove", move |ev| {
            let (Some(inner), Some(ev)) = (weak.upgrade(), ev.dyn_ref::<web::TouchEvent>()) else {
                return;
            };
            let Some((cx, cy)) = input::first_touch_client(ev) else {
                return;
            };
            let (w, h) = dom::viewport_size();
            let sample = inner.sampler.borrow_mut().record_pointer(cx, cy, w, h);
            inner.publish(sample);
        }));

        let weak = Rc::downgrade(&inner);
        listeners.push(EventListener::new(window, "deviceorientation", move |ev| {
            let (Some(inner), Some(ev)) =
                (weak.upgrade(), ev.dyn_ref::<web::DeviceOrientationEvent>())
            else {
                return;
            };
            let (gamma, beta) = input::orientation_angles(ev);
            let capability = inner.gate.capability();
            let recorded = inner.sampler.borrow_mut().record_tilt(capability, gamma, beta);
            if let Some(sample) = recorded {
                inner.publish(sample);
            }
        }));

        *inner.listeners.borrow_mut() = listeners;
        Self { inner }
    }

    pub fn latest(&self) -> Sample {
        self.inner.sampler.borrow().latest()
    }

    pub fn has_input(&self) -> bool {
        self.inner.sampler.borrow().has_input()
    }

    /// Register `f` for every new sample. The registration ends when the
    /// returned [`Subscription`] is dropped.
    pub fn subscribe(&self, f: impl Fn(Sample) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id.wrapping_add(1));
        self.inner.subscribers.borrow_mut().push((id, Rc::new(f)));
        Subscription {
            feed: Rc::downgrade(&self.inner),
            id,
        }
    }
}

#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    feed: Weak<FeedInner>,
    id: u32,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(feed) = self.feed.upgrade() {
            feed.subscribers.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}
