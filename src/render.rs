use crate::core::viewer::{FallbackMedia, MediaKind};
use crate::dom;
use gloo::events::EventListener;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Decorative gradient shown when a viewer has nothing else to show.
pub fn gradient_placeholder(document: &web::Document, compact: bool) -> anyhow::Result<web::HtmlElement> {
    let el = dom::create(document, "div", "viewer-gradient")?;
    dom::set_attr(&el, "aria-hidden", "true");
    dom::set_style(&el, "position", "absolute");
    dom::set_style(&el, "inset", "0");
    dom::set_style(
        &el,
        "background",
        "linear-gradient(135deg, #e7e5e4 0%, #d6d3d1 45%, #a8a29e 100%)",
    );
    if !compact {
        dom::set_style(&el, "min-height", "100%");
    }
    Ok(el)
}

/// Neutral box with a centered label.
pub fn text_placeholder(document: &web::Document, label: &str) -> anyhow::Result<web::HtmlElement> {
    let el = dom::create(document, "div", "media-placeholder")?;
    dom::set_style(&el, "position", "absolute");
    dom::set_style(&el, "inset", "0");
    dom::set_style(&el, "display", "flex");
    dom::set_style(&el, "align-items", "center");
    dom::set_style(&el, "justify-content", "center");
    dom::set_style(&el, "background", "#e7e5e4");
    dom::set_style(&el, "color", "#78716c");
    el.set_text_content(Some(label));
    Ok(el)
}

fn media_element(document: &web::Document, media: &FallbackMedia, alt: &str) -> anyhow::Result<web::HtmlElement> {
    let el: web::HtmlElement = match media.kind {
        MediaKind::Image => {
            let img: web::HtmlImageElement = dom::create_as(document, "img", "viewer-media")?;
            img.set_src(&media.url);
            img.set_alt(alt);
            dom::set_attr(&img, "loading", "lazy");
            img.unchecked_into()
        }
        MediaKind::Video => {
            let video: web::HtmlVideoElement = dom::create_as(document, "video", "viewer-media")?;
            video.set_src(&media.url);
            video.set_autoplay(true);
            video.set_loop(true);
            video.set_muted(true);
            dom::set_attr(&video, "playsinline", "");
            video.unchecked_into()
        }
    };
    dom::set_style(&el, "width", "100%");
    dom::set_style(&el, "height", "100%");
    dom::set_style(&el, "object-fit", "cover");
    dom::set_style(&el, "will-change", "transform");
    Ok(el)
}

/// Image or video that swaps itself for a text placeholder when it fails to
/// load.
pub struct GuardedMedia {
    pub wrapper: web::HtmlElement,
    pub media: web::HtmlElement,
    _on_error: EventListener,
}

impl GuardedMedia {
    pub fn new(
        document: &web::Document,
        media: &FallbackMedia,
        alt: &str,
        placeholder_label: &'static str,
    ) -> anyhow::Result<Self> {
        let wrapper = dom::create(document, "div", "viewer-media-frame")?;
        dom::set_style(&wrapper, "position", "absolute");
        dom::set_style(&wrapper, "inset", "0");
        dom::set_style(&wrapper, "overflow", "hidden");
        let el = media_element(document, media, alt)?;
        dom::append(&wrapper, &el)?;

        let url: Rc<str> = media.url.as_str().into();
        let doc = document.clone();
        let frame = wrapper.clone();
        let on_error = EventListener::new(&el, "error", move |_| {
            log::warn!("[media] failed to load {}", url);
            frame.set_inner_html("");
            if let Ok(placeholder) = text_placeholder(&doc, placeholder_label) {
                _ = dom::append(&frame, &placeholder);
            }
        });

        Ok(Self {
            wrapper,
            media: el,
            _on_error: on_error,
        })
    }
}

/// Photo that degrades to a labelled placeholder, both when the URL is
/// missing and when it fails to load.
pub enum Photo {
    Loaded(GuardedMedia),
    Missing(web::HtmlElement),
}

impl Photo {
    pub fn new(document: &web::Document, url: Option<&str>, alt: &str, label: &'static str) -> anyhow::Result<Self> {
        match url {
            Some(url) => Ok(Photo::Loaded(GuardedMedia::new(
                document,
                &FallbackMedia::new(url),
                alt,
                label,
            )?)),
            None => Ok(Photo::Missing(text_placeholder(document, label)?)),
        }
    }

    pub fn element(&self) -> &web::HtmlElement {
        match self {
            Photo::Loaded(m) => &m.wrapper,
            Photo::Missing(el) => el,
        }
    }
}

/// Absolutely-positioned vignette overlay; its background is set per sample.
pub fn vignette(document: &web::Document) -> anyhow::Result<web::HtmlElement> {
    let el = dom::create(document, "div", "viewer-vignette")?;
    dom::set_attr(&el, "aria-hidden", "true");
    dom::set_style(&el, "position", "absolute");
    dom::set_style(&el, "inset", "0");
    dom::set_style(&el, "pointer-events", "none");
    Ok(el)
}

pub fn section_heading(
    document: &web::Document,
    parent: &web::Element,
    text: &str,
) -> anyhow::Result<web::HtmlElement> {
    dom::append_text(document, parent, "h2", "section-heading", text)
}
