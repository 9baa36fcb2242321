use crate::constants::SCROLL_LOCK_OVERFLOW;
use crate::core::modal::{Rect, ScrollLockCount};
use anyhow::anyhow;
use gloo::events::EventListener;
use std::cell::{Cell, RefCell};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Viewport size in CSS px; zero when there is no window.
pub fn viewport_size() -> (f64, f64) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

pub fn location_origin() -> String {
    web::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

pub fn create(document: &web::Document, tag: &str, class: &str) -> anyhow::Result<web::HtmlElement> {
    create_as::<web::HtmlElement>(document, tag, class)
}

pub fn create_as<T: JsCast>(document: &web::Document, tag: &str, class: &str) -> anyhow::Result<T> {
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow!("create <{}>: {:?}", tag, e))?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    el.dyn_into::<T>()
        .map_err(|e| anyhow!("<{}> has unexpected type: {:?}", tag, e))
}

/// Create a child element holding `text` and append it to `parent`.
pub fn append_text(
    document: &web::Document,
    parent: &web::Element,
    tag: &str,
    class: &str,
    text: &str,
) -> anyhow::Result<web::HtmlElement> {
    let el = create(document, tag, class)?;
    el.set_text_content(Some(text));
    append(parent, &el)?;
    Ok(el)
}

pub fn append(parent: &web::Element, child: &web::Element) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow!("append_child: {:?}", e))
}

#[inline]
pub fn set_attr(el: &web::Element, name: &str, value: &str) {
    _ = el.set_attribute(name, value);
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

#[inline]
pub fn clear_style(el: &web::HtmlElement, property: &str) {
    _ = el.style().remove_property(property);
}

pub fn set_opacity(el: &web::HtmlElement, opacity: f32) {
    set_style(el, "opacity", &format!("{}", opacity));
}

pub fn bounding_rect(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect {
        top: r.top(),
        left: r.left(),
        width: r.width(),
        height: r.height(),
    }
}

#[inline]
pub fn add_click_listener(
    target: &web::EventTarget,
    mut handler: impl FnMut(&web::Event) + 'static,
) -> EventListener {
    EventListener::new(target, "click", move |ev| handler(ev))
}

thread_local! {
    static SCROLL_LOCK: RefCell<ScrollLockCount> = RefCell::new(ScrollLockCount::default());
}

/// Holder of the document-wide "no background scroll" state.
///
/// The lock is shared by every modal-like component. Each guard releases its
/// hold at most once, either explicitly or when dropped.
pub struct ScrollLockGuard {
    released: Cell<bool>,
}

impl ScrollLockGuard {
    pub fn acquire() -> Self {
        let first = SCROLL_LOCK.with(|c| c.borrow_mut().acquire());
        if first {
            apply_body_overflow(Some(SCROLL_LOCK_OVERFLOW));
        }
        Self {
            released: Cell::new(false),
        }
    }

    pub fn release(&self) {
        if self.released.replace(true) {
            return;
        }
        let last = SCROLL_LOCK.with(|c| c.borrow_mut().release());
        if last {
            apply_body_overflow(None);
        }
    }
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.release();
    }
}

fn apply_body_overflow(value: Option<&str>) {
    let Some(body) = window_document().and_then(|d| d.body()) else {
        return;
    };
    match value {
        Some(v) => set_style(&body, "overflow", v),
        None => clear_style(&body, "overflow"),
    }
    log::debug!("[scroll-lock] body overflow = {:?}", value);
}
