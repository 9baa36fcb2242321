use crate::constants::{
    DOCUMENT_ERROR_LABEL, PLAN_CARD_HOVER_TRANSFORM, PLAN_CARD_REST_TRANSFORM, PLAN_MAX_SCALE,
    PLAN_MIN_SCALE, PLAN_WHEEL_STEP,
};
use crate::core::document::{
    document_src, mime_type, wheel_factor, PageCursor, PinchTracker, ZoomPan,
};
use crate::core::{Plan, PlanType};
use crate::dom;
use crate::overlay::{Modal, ModalBody, ModalCloser};
use glam::Vec2;
use gloo::events::{EventListener, EventListenerOptions};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

struct PlanCard {
    _listeners: Vec<EventListener>,
    _modal: Rc<RefCell<Option<Modal>>>,
}

/// Row of tilted plan sheets; each opens its document in a modal.
pub struct PlanCards {
    cards: Vec<PlanCard>,
}

impl PlanCards {
    pub fn mount(
        document: &web::Document,
        parent: &web::Element,
        plans: &[Plan],
        origin: &str,
    ) -> anyhow::Result<Self> {
        let row = dom::create(document, "div", "plan-cards")?;
        dom::append(parent, &row)?;

        let mut cards = Vec::with_capacity(plans.len());
        for (i, plan) in plans.iter().enumerate() {
            let card = dom::create(document, "button", "plan-card")?;
            dom::set_attr(&card, "type", "button");
            dom::set_attr(&card, "data-key", &plan.key(i));
            dom::set_attr(&card, "aria-label", plan.display_label());

            let sheet = dom::create(document, "div", "plan-card__sheet")?;
            dom::set_style(&sheet, "transform", PLAN_CARD_REST_TRANSFORM);
            dom::set_style(&sheet, "transform-origin", "center bottom");
            dom::set_style(&sheet, "transition", "transform 300ms ease-out");
            dom::append(&card, &sheet)?;
            dom::append_text(document, &card, "span", "plan-card__label", plan.display_label())?;
            dom::append(&row, &card)?;

            let slot: Rc<RefCell<Option<Modal>>> = Rc::new(RefCell::new(None));
            let mut listeners = Vec::with_capacity(3);

            let s = sheet.clone();
            listeners.push(EventListener::new(&card, "mouseenter", move |_| {
                dom::set_style(&s, "transform", PLAN_CARD_HOVER_TRANSFORM);
            }));
            let s = sheet.clone();
            listeners.push(EventListener::new(&card, "mouseleave", move |_| {
                dom::set_style(&s, "transform", PLAN_CARD_REST_TRANSFORM);
            }));

            let doc = document.clone();
            let plan = plan.clone();
            let origin = origin.to_string();
            let modal_slot = slot.clone();
            listeners.push(dom::add_click_listener(&card, move |_| {
                if modal_slot.borrow().as_ref().is_some_and(|m| m.is_mounted()) {
                    return;
                }
                // Back to the resting tilt, which the closed modal mirrors.
                dom::set_style(&sheet, "transform", PLAN_CARD_REST_TRANSFORM);
                let rect = dom::bounding_rect(&sheet);
                let plan = plan.clone();
                let origin = origin.clone();
                let released = Rc::downgrade(&modal_slot);
                let opened = Modal::open(
                    &doc,
                    plan.display_label(),
                    Some(rect),
                    move |d, closer| plan_body(d, &plan, &origin, closer),
                    move || {
                        if let Some(slot) = released.upgrade() {
                            slot.borrow_mut().take();
                        }
                    },
                );
                match opened {
                    Ok(modal) => {
                        *modal_slot.borrow_mut() = Some(modal);
                    }
                    Err(e) => log::error!("[plans] failed to open plan: {:?}", e),
                }
            }));

            cards.push(PlanCard {
                _listeners: listeners,
                _modal: slot,
            });
        }

        log::debug!("[plans] mounted {} plan cards", cards.len());
        Ok(Self { cards })
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

fn document_object(document: &web::Document, plan: &Plan, src: &str) -> anyhow::Result<web::HtmlElement> {
    let object = dom::create(document, "object", "plan-document")?;
    dom::set_attr(&object, "type", mime_type(plan.kind));
    dom::set_attr(&object, "data", src);
    dom::set_attr(&object, "aria-label", plan.display_label());
    dom::set_style(&object, "width", "100%");
    dom::set_style(&object, "height", "100%");
    Ok(object)
}

/// Client coordinates relative to the view's top-left corner.
fn view_point(view: &web::HtmlElement, client_x: i32, client_y: i32) -> Vec2 {
    let r = dom::bounding_rect(view);
    Vec2::new((client_x as f64 - r.left) as f32, (client_y as f64 - r.top) as f32)
}

fn set_enabled(button: &web::HtmlElement, enabled: bool) {
    if enabled {
        _ = button.remove_attribute("disabled");
    } else {
        dom::set_attr(button, "disabled", "");
    }
}

/// Replace the view with an error message and a Close button.
fn error_listener(
    document: &web::Document,
    object: &web::HtmlElement,
    view: &web::HtmlElement,
    closer: ModalCloser,
    src: String,
) -> EventListener {
    let doc = document.clone();
    let view = view.clone();
    let close_listener: Rc<RefCell<Option<EventListener>>> = Rc::new(RefCell::new(None));
    EventListener::new(object, "error", move |_| {
        log::warn!("[plans] failed to load {}", src);
        view.set_inner_html("");
        let Ok(message) = dom::create(&doc, "div", "plan-error") else {
            return;
        };
        _ = dom::append_text(&doc, &message, "p", "plan-error__text", DOCUMENT_ERROR_LABEL);
        if let Ok(button) = dom::append_text(&doc, &message, "button", "plan-error__close", "Close") {
            dom::set_attr(&button, "type", "button");
            let closer = closer.clone();
            *close_listener.borrow_mut() = Some(dom::add_click_listener(&button, move |_| closer.close()));
        }
        _ = dom::append(&view, &message);
    })
}

fn plan_body(
    document: &web::Document,
    plan: &Plan,
    origin: &str,
    closer: ModalCloser,
) -> anyhow::Result<ModalBody> {
    match plan.kind {
        PlanType::Pdf => pdf_body(document, plan, origin, closer),
        PlanType::Svg => svg_body(document, plan, origin, closer),
    }
}

fn pdf_body(
    document: &web::Document,
    plan: &Plan,
    origin: &str,
    closer: ModalCloser,
) -> anyhow::Result<ModalBody> {
    let view = dom::create(document, "div", "plan-view plan-view--pdf")?;
    let cursor = Rc::new(Cell::new(
        PageCursor::new(plan.page_index().unwrap_or(1)).with_last(plan.page_count),
    ));
    let src = document_src(plan, origin, Some(cursor.get()));

    let stage = dom::create(document, "div", "plan-view__stage")?;
    let object = document_object(document, plan, &src)?;
    dom::append(&stage, &object)?;
    dom::append(&view, &stage)?;

    let nav = dom::create(document, "nav", "plan-view__pages")?;
    let prev = dom::append_text(document, &nav, "button", "plan-view__prev", "Previous")?;
    let label = dom::append_text(document, &nav, "span", "plan-view__page", &cursor.get().label())?;
    let next = dom::append_text(document, &nav, "button", "plan-view__next", "Next")?;
    dom::set_attr(&prev, "type", "button");
    dom::set_attr(&next, "type", "button");
    set_enabled(&prev, cursor.get().can_go_back());
    set_enabled(&next, cursor.get().can_go_forward());
    if cursor.get().has_navigation() {
        dom::append(&view, &nav)?;
    }

    let show_page = {
        let plan = plan.clone();
        let origin = origin.to_string();
        let object = object.clone();
        let label = label.clone();
        let (prev, next) = (prev.clone(), next.clone());
        Rc::new(move |c: PageCursor| {
            dom::set_attr(&object, "data", &document_src(&plan, &origin, Some(c)));
            label.set_text_content(Some(&c.label()));
            set_enabled(&prev, c.can_go_back());
            set_enabled(&next, c.can_go_forward());
        })
    };

    let mut listeners = Vec::with_capacity(3);
    {
        let cursor = cursor.clone();
        let show_page = show_page.clone();
        listeners.push(dom::add_click_listener(&prev, move |_| {
            let mut c = cursor.get();
            if c.prev() {
                cursor.set(c);
                show_page(c);
            }
        }));
    }
    {
        let cursor = cursor.clone();
        listeners.push(dom::add_click_listener(&next, move |_| {
            let mut c = cursor.get();
            if c.next() {
                cursor.set(c);
                show_page(c);
            }
        }));
    }
    listeners.push(error_listener(document, &object, &view, closer, src));

    Ok(ModalBody {
        element: view,
        listeners,
    })
}

fn svg_body(
    document: &web::Document,
    plan: &Plan,
    origin: &str,
    closer: ModalCloser,
) -> anyhow::Result<ModalBody> {
    let view = dom::create(document, "div", "plan-view plan-view--svg")?;
    dom::set_style(&view, "overflow", "hidden");
    dom::set_style(&view, "touch-action", "none");
    dom::set_style(&view, "cursor", "grab");

    let stage = dom::create(document, "div", "plan-view__stage")?;
    dom::set_style(&stage, "transform-origin", "0 0");
    dom::set_style(&stage, "width", "100%");
    dom::set_style(&stage, "height", "100%");
    let src = document_src(plan, origin, None);
    let object = document_object(document, plan, &src)?;
    // Gestures go to the viewport, not the embedded document.
    dom::set_style(&object, "pointer-events", "none");
    dom::append(&stage, &object)?;
    dom::append(&view, &stage)?;

    let zoom = Rc::new(Cell::new(ZoomPan::new(PLAN_MIN_SCALE, PLAN_MAX_SCALE)));
    let pointers = Rc::new(RefCell::new(PinchTracker::default()));
    let apply = {
        let stage = stage.clone();
        move |z: ZoomPan| dom::set_style(&stage, "transform", &z.transform())
    };
    apply(zoom.get());

    let mut listeners = Vec::with_capacity(7);
    {
        let (zoom, view_el, apply) = (zoom.clone(), view.clone(), apply.clone());
        let opts = EventListenerOptions::enable_prevent_default();
        listeners.push(EventListener::new_with_options(&view, "wheel", opts, move |ev| {
            let Some(ev) = ev.dyn_ref::<web::WheelEvent>() else {
                return;
            };
            ev.prevent_default();
            let anchor = view_point(&view_el, ev.client_x(), ev.client_y());
            let mut z = zoom.get();
            z.zoom_at(wheel_factor(ev.delta_y(), PLAN_WHEEL_STEP), anchor);
            zoom.set(z);
            apply(z);
        }));
    }
    {
        let (pointers, view_el) = (pointers.clone(), view.clone());
        listeners.push(EventListener::new(&view, "pointerdown", move |ev| {
            let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            let at = view_point(&view_el, ev.client_x(), ev.client_y());
            if pointers.borrow_mut().down(ev.pointer_id(), at) {
                _ = view_el.set_pointer_capture(ev.pointer_id());
            }
        }));
    }
    {
        let (zoom, pointers, view_el, apply) = (zoom.clone(), pointers.clone(), view.clone(), apply.clone());
        listeners.push(EventListener::new(&view, "pointermove", move |ev| {
            let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            let at = view_point(&view_el, ev.client_x(), ev.client_y());
            let Some(gesture) = pointers.borrow_mut().moved(ev.pointer_id(), at) else {
                return;
            };
            let mut z = zoom.get();
            gesture.apply(&mut z);
            zoom.set(z);
            apply(z);
        }));
    }
    for end in ["pointerup", "pointercancel"] {
        let pointers = pointers.clone();
        listeners.push(EventListener::new(&view, end, move |ev| {
            if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
                pointers.borrow_mut().up(ev.pointer_id());
            }
        }));
    }
    {
        let zoom = zoom.clone();
        listeners.push(EventListener::new(&view, "dblclick", move |_| {
            let mut z = zoom.get();
            z.reset();
            zoom.set(z);
            apply(z);
        }));
    }
    listeners.push(error_listener(document, &object, &view, closer, src));

    Ok(ModalBody {
        element: view,
        listeners,
    })
}
