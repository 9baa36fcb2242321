use crate::constants::{
    DIRECT_PARALLAX_TRANSITION, LOADING_SCENE_LABEL, MEDIA_UNAVAILABLE_LABEL, SPLAT_IFRAME_ALLOW,
    SPLAT_IFRAME_TITLE,
};
use crate::core::parallax::{
    counter_offset, media_transform, vignette_background, vignette_center, ParallaxTuning,
    Smoother,
};
use crate::core::pointer::Sample;
use crate::core::protocol::{InboundMessage, OutboundMessage};
use crate::core::viewer::{
    absolute_url, crossfade_transition, embed_url, fallback_shown, layer_opacity, progress_label,
    FallbackMedia, LoadTracker, Presentation, ZoomOverrides,
};
use crate::core::Theme;
use crate::dom;
use crate::events::{PointerFeed, Subscription};
use crate::frame::FrameLoop;
use crate::render::{self, GuardedMedia};
use glam::Vec2;
use gloo::events::EventListener;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[derive(Clone, Debug, Default)]
pub struct ViewerProps {
    pub splat_url: Option<String>,
    pub fallback_url: Option<String>,
    pub alt: String,
    /// Card-sized viewer: direct parallax, no vignette, no splat.
    pub compact: bool,
    pub parallax: bool,
    pub zoom: ZoomOverrides,
}

/// How pointer motion reaches the fallback media.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParallaxMode {
    Off,
    /// Transform set per input event, eased by a short CSS transition.
    Direct,
    /// Offset followed by a per-frame exponential smoother.
    Smoothed,
}

struct SplatLayers {
    iframe: web::HtmlIFrameElement,
    fallback: web::HtmlElement,
    label: Option<web::HtmlElement>,
    target_origin: String,
}

struct HostInner {
    root: web::HtmlElement,
    theme: Theme,
    mode: ParallaxMode,
    tuning: ParallaxTuning,
    media: Option<GuardedMedia>,
    splat: Option<SplatLayers>,
    vignette: Option<web::HtmlElement>,
    tracker: RefCell<LoadTracker>,
    /// Pointer position reported from inside the iframe; wins until the next
    /// host-side sample.
    iframe_pointer: Cell<Option<Vec2>>,
    smoother: RefCell<Smoother>,
    listeners: RefCell<Vec<EventListener>>,
    subscription: RefCell<Option<Subscription>>,
    frame_loop: RefCell<Option<FrameLoop>>,
}

impl Drop for HostInner {
    fn drop(&mut self) {
        self.root.remove();
    }
}

impl HostInner {
    fn on_sample(&self, sample: Sample) {
        self.iframe_pointer.set(None);
        let unit = sample.unit();

        if let Some(splat) = &self.splat {
            post_pointer(splat, sample.signed());
        }

        if let Some(media) = &self.media {
            match self.mode {
                ParallaxMode::Direct => {
                    let offset = counter_offset(unit, self.tuning.direct_px);
                    dom::set_style(&media.media, "transform", &media_transform(offset));
                }
                ParallaxMode::Smoothed if self.frame_loop.borrow().is_some() => {
                    let target = counter_offset(unit, self.tuning.smooth_px);
                    self.smoother.borrow_mut().set_target(target);
                }
                ParallaxMode::Smoothed | ParallaxMode::Off => {}
            }
        }

        self.update_vignette(Some(unit));
    }

    fn on_frame(&self) {
        let Some(media) = &self.media else {
            return;
        };
        let mut smoother = self.smoother.borrow_mut();
        if smoother.is_settled(self.tuning.settle_epsilon) {
            return;
        }
        let offset = smoother.step();
        dom::set_style(&media.media, "transform", &media_transform(offset));
    }

    fn update_vignette(&self, unit: Option<Vec2>) {
        let Some(vignette) = &self.vignette else {
            return;
        };
        let unit = self.iframe_pointer.get().or(unit);
        let center = vignette_center(unit, self.mode != ParallaxMode::Off);
        dom::set_style(vignette, "background", &vignette_background(center, self.theme));
    }

    fn on_message(&self, msg: InboundMessage) {
        let Some(splat) = &self.splat else {
            return;
        };
        match msg {
            InboundMessage::SplatLoaded => {
                if !self.tracker.borrow_mut().mark_loaded() {
                    log::debug!("[viewer] duplicate splat_loaded ignored");
                    return;
                }
                let state = self.tracker.borrow().state();
                let (fallback, iframe) = layer_opacity(state);
                dom::set_opacity(&splat.fallback, fallback);
                dom::set_opacity(&splat.iframe, iframe);
                dom::set_style(&splat.fallback, "pointer-events", "none");
                if let Some(label) = &splat.label {
                    label.set_text_content(Some(&progress_label(state)));
                }
                if !fallback_shown(state) && self.frame_loop.borrow_mut().take().is_some() {
                    log::debug!("[viewer] fallback hidden, parallax loop stopped");
                }
                log::info!(
                    "[viewer] splat loaded: {}",
                    self.tracker.borrow().source().unwrap_or_default()
                );
            }
            InboundMessage::SplatProgress { progress } => {
                let advanced = self.tracker.borrow_mut().progress(progress);
                if advanced.is_some() {
                    if let Some(label) = &splat.label {
                        let state = self.tracker.borrow().state();
                        label.set_text_content(Some(&progress_label(state)));
                    }
                }
            }
            InboundMessage::IframeMouseMove { x, y } => {
                self.iframe_pointer.set(Some(Vec2::new(x, y)));
                self.update_vignette(None);
            }
            InboundMessage::Unknown => {}
        }
    }
}

fn post_pointer(splat: &SplatLayers, signed: Vec2) {
    let Some(target) = splat.iframe.content_window() else {
        return;
    };
    let payload = OutboundMessage::mouse_move(signed).encode();
    let Ok(value) = js_sys::JSON::parse(&payload) else {
        return;
    };
    _ = target.post_message(&value, &splat.target_origin);
}

/// Decode a `message` event's payload, whatever shape the sender used.
fn decode_message(data: &JsValue) -> Option<InboundMessage> {
    let json = if let Some(s) = data.as_string() {
        s
    } else {
        js_sys::JSON::stringify(data).ok()?.as_string()?
    };
    InboundMessage::decode(&json)
}

/// One visual pane: splat iframe with a cross-faded fallback, plain media, or
/// the gradient placeholder.
pub struct ViewerHost {
    _inner: Rc<HostInner>,
}

impl ViewerHost {
    pub fn mount(
        document: &web::Document,
        container: &web::Element,
        props: &ViewerProps,
        feed: &PointerFeed,
        theme: Theme,
    ) -> anyhow::Result<Self> {
        let presentation = Presentation::choose(props.splat_url.as_deref(), props.fallback_url.as_deref());
        let class = if props.compact {
            "viewer-host viewer-host--compact"
        } else {
            "viewer-host"
        };
        let root = dom::create(document, "div", class)?;
        dom::set_style(&root, "position", "absolute");
        dom::set_style(&root, "inset", "0");
        dom::set_style(&root, "overflow", "hidden");

        let mode = match (props.parallax, props.compact) {
            (false, _) => ParallaxMode::Off,
            (true, true) => ParallaxMode::Direct,
            (true, false) => ParallaxMode::Smoothed,
        };

        let mut media = None;
        let mut splat = None;
        let mut source = None;

        match &presentation {
            Presentation::Gradient => {
                dom::append(&root, &render::gradient_placeholder(document, props.compact)?)?;
            }
            Presentation::Media(m) => {
                let guarded = GuardedMedia::new(document, m, &props.alt, MEDIA_UNAVAILABLE_LABEL)?;
                dom::append(&root, &guarded.wrapper)?;
                media = Some(guarded);
            }
            Presentation::Splat { url, fallback } => {
                let origin = dom::location_origin();
                let (layers, fallback_media) =
                    mount_splat(document, &root, url, fallback.as_ref(), props, &origin, theme)?;
                source = Some(absolute_url(url, &origin));
                media = fallback_media;
                splat = Some(layers);
            }
        }

        let vignette = if props.compact {
            None
        } else {
            let v = render::vignette(document)?;
            dom::set_style(&v, "background", &vignette_background(vignette_center(None, false), theme));
            dom::append(&root, &v)?;
            Some(v)
        };

        if mode == ParallaxMode::Direct {
            if let Some(m) = &media {
                dom::set_style(&m.media, "transition", DIRECT_PARALLAX_TRANSITION);
            }
        }
        if let Some(m) = &media {
            if mode != ParallaxMode::Off {
                dom::set_style(&m.media, "transform", &media_transform(Vec2::ZERO));
            }
        }

        dom::append(container, &root)?;

        let tuning = ParallaxTuning::default();
        let inner = Rc::new(HostInner {
            root,
            theme,
            mode,
            tuning,
            media,
            splat,
            vignette,
            tracker: RefCell::new(LoadTracker::default()),
            iframe_pointer: Cell::new(None),
            smoother: RefCell::new(Smoother::new(tuning.smoothing)),
            listeners: RefCell::new(Vec::new()),
            subscription: RefCell::new(None),
            frame_loop: RefCell::new(None),
        });

        if let Some(source) = source {
            inner.tracker.borrow_mut().begin(&source);
            wire_messages(&inner)?;
        }

        let wants_input = mode != ParallaxMode::Off || inner.splat.is_some() || inner.vignette.is_some();
        if wants_input && !matches!(presentation, Presentation::Gradient) {
            let weak = Rc::downgrade(&inner);
            let sub = feed.subscribe(move |sample| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_sample(sample);
                }
            });
            *inner.subscription.borrow_mut() = Some(sub);
            if feed.has_input() {
                inner.on_sample(feed.latest());
            }
        }

        if mode == ParallaxMode::Smoothed && inner.media.is_some() {
            let weak: Weak<HostInner> = Rc::downgrade(&inner);
            let frames = FrameLoop::start(move |_ts| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_frame();
                }
            });
            *inner.frame_loop.borrow_mut() = Some(frames);
        }

        log::debug!(
            "[viewer] mounted {} ({:?})",
            match presentation {
                Presentation::Splat { .. } => "splat",
                Presentation::Media(_) => "media",
                Presentation::Gradient => "gradient",
            },
            mode
        );

        Ok(Self { _inner: inner })
    }
}

fn mount_splat(
    document: &web::Document,
    root: &web::HtmlElement,
    url: &str,
    fallback: Option<&FallbackMedia>,
    props: &ViewerProps,
    origin: &str,
    theme: Theme,
) -> anyhow::Result<(SplatLayers, Option<GuardedMedia>)> {
    let layer = dom::create(document, "div", "viewer-fallback")?;
    dom::set_style(&layer, "position", "absolute");
    dom::set_style(&layer, "inset", "0");
    dom::set_style(&layer, "transition", &crossfade_transition());
    dom::set_opacity(&layer, 1.0);

    let mut media = None;
    let mut label = None;
    match fallback {
        Some(m) => {
            let guarded = GuardedMedia::new(document, m, &props.alt, MEDIA_UNAVAILABLE_LABEL)?;
            dom::append(&layer, &guarded.wrapper)?;
            media = Some(guarded);
        }
        None => {
            let placeholder = render::text_placeholder(document, LOADING_SCENE_LABEL)?;
            dom::append(&layer, &placeholder)?;
            label = Some(placeholder);
        }
    }

    let iframe: web::HtmlIFrameElement = dom::create_as(document, "iframe", "viewer-splat")?;
    let (width, _) = dom::viewport_size();
    iframe.set_src(&embed_url(url, origin, props.zoom.select(width), theme));
    iframe.set_title(SPLAT_IFRAME_TITLE);
    dom::set_attr(&iframe, "allow", SPLAT_IFRAME_ALLOW);
    dom::set_style(&iframe, "position", "absolute");
    dom::set_style(&iframe, "inset", "0");
    dom::set_style(&iframe, "width", "100%");
    dom::set_style(&iframe, "height", "100%");
    dom::set_style(&iframe, "border", "0");
    dom::set_style(&iframe, "transition", &crossfade_transition());
    dom::set_opacity(&iframe, 0.0);

    dom::append(root, &iframe)?;
    dom::append(root, &layer)?;

    let target_origin = if origin.is_empty() || origin == "null" {
        "*".to_string()
    } else {
        origin.to_string()
    };

    Ok((
        SplatLayers {
            iframe,
            fallback: layer,
            label,
            target_origin,
        },
        media,
    ))
}

fn wire_messages(inner: &Rc<HostInner>) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let weak = Rc::downgrade(inner);
    let listener = EventListener::new(&window, "message", move |ev| {
        let (Some(inner), Some(ev)) = (weak.upgrade(), ev.dyn_ref::<web::MessageEvent>()) else {
            return;
        };
        let Some(splat) = &inner.splat else {
            return;
        };
        // Only this host's iframe may drive it.
        let from_ours = match (ev.source(), splat.iframe.content_window()) {
            (Some(source), Some(ours)) => js_sys::Object::is(&source, &ours),
            _ => false,
        };
        if !from_ours {
            return;
        }
        if let Some(msg) = decode_message(&ev.data()) {
            inner.on_message(msg);
        }
    });
    inner.listeners.borrow_mut().push(listener);
    Ok(())
}

/// `<link rel="preload">` for a splat file, removed again with the page.
pub struct SplatPreload {
    link: web::Element,
}

impl SplatPreload {
    pub fn insert(document: &web::Document, url: &str) -> anyhow::Result<Self> {
        let head = document.head().ok_or_else(|| anyhow::anyhow!("no <head>"))?;
        let link = document
            .create_element("link")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        dom::set_attr(&link, "rel", "preload");
        dom::set_attr(&link, "href", url);
        dom::set_attr(&link, "as", "fetch");
        dom::set_attr(&link, "crossorigin", "anonymous");
        dom::append(&head, &link)?;
        Ok(Self { link })
    }
}

impl Drop for SplatPreload {
    fn drop(&mut self) {
        self.link.remove();
    }
}
