use crate::core::modal::{
    content_transition, frame_transition, ModalEffect, ModalGeometry, ModalMachine, ModalTiming,
    Rect,
};
use crate::dom::{self, ScrollLockGuard};
use crate::events;
use crate::frame::DeferredFrames;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_sys as web;

struct ModalInner {
    machine: RefCell<ModalMachine>,
    backdrop: web::HtmlElement,
    frame: web::HtmlElement,
    content: web::HtmlElement,
    listeners: RefCell<Vec<EventListener>>,
    pending_frames: RefCell<Option<DeferredFrames>>,
    close_timer: RefCell<Option<Timeout>>,
    scroll_lock: RefCell<Option<ScrollLockGuard>>,
    on_unmount: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl ModalInner {
    fn apply_geometry(&self) {
        let machine = self.machine.borrow();
        let g: ModalGeometry = machine.geometry();
        let timing = machine.timing();
        let f = &self.frame;
        dom::set_style(f, "top", &g.top);
        dom::set_style(f, "left", &g.left);
        dom::set_style(f, "width", &g.width);
        dom::set_style(f, "height", &g.height);
        dom::set_style(f, "border-radius", &g.border_radius);
        match &g.transform {
            Some(t) => dom::set_style(f, "transform", t),
            None => dom::clear_style(f, "transform"),
        }
        dom::set_opacity(f, g.opacity);

        let visible = machine.content_visible();
        dom::set_style(&self.content, "transition", &content_transition(&timing, visible));
        dom::set_opacity(&self.content, if visible { 1.0 } else { 0.0 });
        dom::set_opacity(&self.backdrop, if visible { 1.0 } else { 0.0 });
    }

    fn run(self: &Rc<Self>, effect: ModalEffect) {
        match effect {
            ModalEffect::Mount => {
                self.apply_geometry();
                *self.scroll_lock.borrow_mut() = Some(ScrollLockGuard::acquire());
                self.schedule_frame();
            }
            ModalEffect::AwaitFrame => self.schedule_frame(),
            ModalEffect::ApplyOpen => {
                self.pending_frames.borrow_mut().take();
                self.apply_geometry();
                log::debug!("[modal] open");
            }
            ModalEffect::BeginClose => {
                self.pending_frames.borrow_mut().take();
                self.apply_geometry();
                let ms = self.machine.borrow().timing().transition_ms;
                let weak = Rc::downgrade(self);
                let timer = Timeout::new(ms, move || {
                    if let Some(inner) = weak.upgrade() {
                        let effect = inner.machine.borrow_mut().close_elapsed();
                        inner.run(effect);
                    }
                });
                *self.close_timer.borrow_mut() = Some(timer);
            }
            // Only ever reached from the close timer, never from one of the
            // listeners released here.
            ModalEffect::Unmount => {
                self.teardown();
                self.listeners.borrow_mut().clear();
                self.close_timer.borrow_mut().take();
                let on_unmount = self.on_unmount.borrow_mut().take();
                if let Some(f) = on_unmount {
                    f();
                }
                log::debug!("[modal] closed");
            }
            ModalEffect::None => {}
        }
    }

    /// The closed geometry has to be committed before the open one is
    /// applied, or the transition never runs.
    fn schedule_frame(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let deferred = DeferredFrames::after(1, move || {
            if let Some(inner) = weak.upgrade() {
                let effect = inner.machine.borrow_mut().frame();
                inner.run(effect);
            }
        });
        *self.pending_frames.borrow_mut() = Some(deferred);
    }

    fn request_close(self: &Rc<Self>) {
        let effect = self.machine.borrow_mut().request_close();
        self.run(effect);
    }

    /// Idempotent: DOM removal and scroll-lock release happen once at most.
    fn teardown(&self) {
        self.backdrop.remove();
        self.frame.remove();
        if let Some(lock) = self.scroll_lock.borrow_mut().take() {
            lock.release();
        }
    }
}

impl Drop for ModalInner {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Weak handle used by modal content to ask for a close.
#[derive(Clone)]
pub struct ModalCloser(Weak<ModalInner>);

impl ModalCloser {
    pub fn close(&self) {
        if let Some(inner) = self.0.upgrade() {
            inner.request_close();
        }
    }
}

/// Body built for a modal, plus the listeners it needs kept alive.
pub struct ModalBody {
    pub element: web::HtmlElement,
    pub listeners: Vec<EventListener>,
}

/// Full-screen overlay that grows out of the element that opened it.
pub struct Modal {
    inner: Rc<ModalInner>,
}

impl Modal {
    pub fn open(
        document: &web::Document,
        label: &str,
        origin: Option<Rect>,
        build: impl FnOnce(&web::Document, ModalCloser) -> anyhow::Result<ModalBody>,
        on_unmount: impl FnOnce() + 'static,
    ) -> anyhow::Result<Self> {
        let body = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no <body>"))?;
        let timing = ModalTiming::default();

        let backdrop = dom::create(document, "div", "modal-backdrop")?;
        dom::set_style(&backdrop, "position", "fixed");
        dom::set_style(&backdrop, "inset", "0");
        dom::set_style(&backdrop, "z-index", "49");
        dom::set_style(&backdrop, "background", "rgba(0,0,0,0.4)");
        dom::set_style(&backdrop, "transition", &format!("opacity {}ms ease", timing.transition_ms));
        dom::set_opacity(&backdrop, 0.0);

        let frame = dom::create(document, "div", "modal-frame")?;
        dom::set_attr(&frame, "role", "dialog");
        dom::set_attr(&frame, "aria-modal", "true");
        dom::set_attr(&frame, "aria-label", label);
        dom::set_style(&frame, "position", "fixed");
        dom::set_style(&frame, "z-index", "50");
        dom::set_style(&frame, "overflow", "hidden");
        dom::set_style(&frame, "background-color", "#f5f5f0");
        dom::set_style(&frame, "transform-origin", "center bottom");
        dom::set_style(&frame, "transition", &frame_transition(&timing));

        let content = dom::create(document, "div", "modal-content")?;
        dom::set_style(&content, "position", "relative");
        dom::set_style(&content, "width", "100%");
        dom::set_style(&content, "height", "100%");

        let close = dom::create(document, "button", "modal-close")?;
        dom::set_attr(&close, "type", "button");
        dom::set_attr(&close, "aria-label", "Close");
        close.set_text_content(Some("×"));
        dom::append(&content, &close)?;
        dom::append(&frame, &content)?;

        let inner = Rc::new(ModalInner {
            machine: RefCell::new(ModalMachine::new(timing)),
            backdrop,
            frame,
            content,
            listeners: RefCell::new(Vec::new()),
            pending_frames: RefCell::new(None),
            close_timer: RefCell::new(None),
            scroll_lock: RefCell::new(None),
            on_unmount: RefCell::new(Some(Box::new(on_unmount))),
        });

        let built = build(document, ModalCloser(Rc::downgrade(&inner)))?;
        dom::append(&inner.content, &built.element)?;

        {
            let mut listeners = inner.listeners.borrow_mut();
            listeners.extend(built.listeners);

            let weak = Rc::downgrade(&inner);
            listeners.push(dom::add_click_listener(&close, move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.request_close();
                }
            }));
            let weak = Rc::downgrade(&inner);
            listeners.push(dom::add_click_listener(&inner.backdrop, move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.request_close();
                }
            }));
            let weak = Rc::downgrade(&inner);
            listeners.push(events::on_modal_command(document, move |_cmd| {
                if let Some(inner) = weak.upgrade() {
                    inner.request_close();
                }
            }));
        }

        dom::append(&body, &inner.backdrop)?;
        dom::append(&body, &inner.frame)?;

        let effect = inner.machine.borrow_mut().open(origin);
        inner.run(effect);

        Ok(Self { inner })
    }

    /// Still on screen, including while the close transition runs.
    pub fn is_mounted(&self) -> bool {
        self.inner.machine.borrow().is_mounted()
    }
}
