use crate::core::scroll::{mobile_zoom_scale, scale_transform, DetailLayout, ScrollTuning};
use crate::core::MOBILE_VIEWER_MIN_HEIGHT_VH;
use crate::dom;
use gloo::events::EventListener;
use std::cell::Cell;
use std::rc::Rc;
use web_sys as web;

/// One inline property the adapter overrides on mobile, with the value the
/// page authored for it.
struct Override {
    el: web::HtmlElement,
    property: &'static str,
    mobile: String,
    authored: String,
}

impl Override {
    fn new(el: &web::HtmlElement, property: &'static str, mobile: impl Into<String>) -> Self {
        let authored = el.style().get_property_value(property).unwrap_or_default();
        Self {
            el: el.clone(),
            property,
            mobile: mobile.into(),
            authored,
        }
    }

    fn apply(&self, layout: DetailLayout) {
        match layout {
            DetailLayout::Mobile => dom::set_style(&self.el, self.property, &self.mobile),
            DetailLayout::Desktop if self.authored.is_empty() => dom::clear_style(&self.el, self.property),
            DetailLayout::Desktop => dom::set_style(&self.el, self.property, &self.authored),
        }
    }
}

struct AdapterInner {
    scroller: web::HtmlElement,
    zoom_target: web::HtmlElement,
    overrides: Vec<Override>,
    layout: Cell<Option<DetailLayout>>,
    tuning: ScrollTuning,
}

impl AdapterInner {
    fn relayout(&self) {
        let (vw, _) = dom::viewport_size();
        let layout = DetailLayout::for_width(vw);
        if self.layout.replace(Some(layout)) == Some(layout) {
            return;
        }
        for o in &self.overrides {
            o.apply(layout);
        }
        log::debug!("[mobile] layout {:?}", layout);
        self.rezoom();
    }

    fn rezoom(&self) {
        if self.layout.get() != Some(DetailLayout::Mobile) {
            return;
        }
        let (_, vh) = dom::viewport_size();
        let scale = mobile_zoom_scale(self.scroller.scroll_top() as f64, vh, &self.tuning);
        dom::set_style(&self.zoom_target, "transform", &scale_transform(scale));
    }
}

/// Reflows the detail page into one scrollable column below the mobile
/// breakpoint, zooming the viewer as the panel scrolls over it. Above it the
/// page's own layout is restored untouched.
pub struct MobileScrollAdapter {
    inner: Rc<AdapterInner>,
    _listeners: [EventListener; 2],
}

impl MobileScrollAdapter {
    pub fn attach(
        window: &web::Window,
        scroller: web::HtmlElement,
        viewer_pane: web::HtmlElement,
        zoom_target: web::HtmlElement,
        panel: web::HtmlElement,
    ) -> Self {
        let overrides = vec![
            Override::new(&scroller, "display", "block"),
            Override::new(&scroller, "height", "100vh"),
            Override::new(&scroller, "overflow-y", "auto"),
            Override::new(&scroller, "overscroll-behavior", "none"),
            Override::new(&viewer_pane, "position", "relative"),
            Override::new(&viewer_pane, "width", "100%"),
            Override::new(&viewer_pane, "height", "auto"),
            Override::new(&viewer_pane, "min-height", format!("{}vh", MOBILE_VIEWER_MIN_HEIGHT_VH)),
            Override::new(&viewer_pane, "overflow", "hidden"),
            Override::new(&zoom_target, "transform", scale_transform(1.0)),
            Override::new(&zoom_target, "transform-origin", "center top"),
            Override::new(&panel, "position", "relative"),
            Override::new(&panel, "width", "100%"),
            Override::new(&panel, "height", "auto"),
            Override::new(&panel, "overflow-y", "visible"),
        ];
        let inner = Rc::new(AdapterInner {
            scroller,
            zoom_target,
            overrides,
            layout: Cell::new(None),
            tuning: ScrollTuning::default(),
        });
        inner.relayout();

        let on_resize = {
            let inner = inner.clone();
            EventListener::new(window, "resize", move |_| inner.relayout())
        };
        let on_scroll = {
            let target = inner.scroller.clone();
            let inner = inner.clone();
            EventListener::new(&target, "scroll", move |_| inner.rezoom())
        };
        Self {
            inner,
            _listeners: [on_resize, on_scroll],
        }
    }

    pub fn layout(&self) -> Option<DetailLayout> {
        self.inner.layout.get()
    }
}
