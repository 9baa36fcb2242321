use crate::constants::{CARD_SCALE_TRANSITION, PROJECTS_ANCHOR_ID};
use crate::core::scroll::{card_scale, scale_transform, ScrollTuning};
use crate::core::{Catalog, Profile, Project, Theme};
use crate::dom;
use crate::events::PointerFeed;
use crate::viewer::{ViewerHost, ViewerProps};
use gloo::events::EventListener;
use std::rc::Rc;
use web_sys as web;

struct ScalerInner {
    cards: Vec<web::HtmlElement>,
    tuning: ScrollTuning,
}

impl ScalerInner {
    fn rescale(&self) {
        let (vw, vh) = dom::viewport_size();
        for card in &self.cards {
            let r = dom::bounding_rect(card);
            let scale = card_scale(r.top, r.height, vw, vh, &self.tuning);
            dom::set_style(card, "transform", &scale_transform(scale));
        }
    }
}

/// Scales each card by its distance from the viewport centre.
///
/// One passive scroll listener and one resize listener serve every card.
pub struct ScrollScaler {
    inner: Rc<ScalerInner>,
    _listeners: [EventListener; 2],
}

impl ScrollScaler {
    pub fn attach(window: &web::Window, cards: Vec<web::HtmlElement>, tuning: ScrollTuning) -> Self {
        for card in &cards {
            dom::set_style(card, "transition", CARD_SCALE_TRANSITION);
            dom::set_style(card, "will-change", "transform");
        }
        let inner = Rc::new(ScalerInner { cards, tuning });
        inner.rescale();

        let on_scroll = {
            let inner = inner.clone();
            EventListener::new(window, "scroll", move |_| inner.rescale())
        };
        let on_resize = {
            let inner = inner.clone();
            EventListener::new(window, "resize", move |_| inner.rescale())
        };
        Self {
            inner,
            _listeners: [on_scroll, on_resize],
        }
    }

    pub fn card_count(&self) -> usize {
        self.inner.cards.len()
    }
}

struct GalleryCard {
    _viewer: ViewerHost,
}

fn mount_card(
    document: &web::Document,
    grid: &web::Element,
    project: &Project,
    feed: &PointerFeed,
    theme: Theme,
) -> anyhow::Result<(web::HtmlElement, GalleryCard)> {
    let card = dom::create(document, "a", "project-card")?;
    dom::set_attr(&card, "href", &project.href());
    dom::set_attr(&card, "aria-label", &format!("View project: {}", project.title));

    let media = dom::create(document, "div", "project-card__media")?;
    dom::set_style(&media, "position", "relative");
    dom::set_style(&media, "overflow", "hidden");
    dom::set_style(&media, "aspect-ratio", "4 / 3");
    dom::append(&card, &media)?;

    // Cards never load splats; those wait for the detail page.
    let props = ViewerProps {
        splat_url: None,
        fallback_url: project.fallback().map(str::to_string),
        alt: project.title.clone(),
        compact: true,
        parallax: true,
        ..ViewerProps::default()
    };
    let viewer = ViewerHost::mount(document, &media, &props, feed, theme)?;

    let caption = dom::create(document, "div", "project-card__caption")?;
    dom::append_text(document, &caption, "h3", "project-card__title", &project.title)?;
    if !project.location.trim().is_empty() {
        dom::append_text(document, &caption, "p", "project-card__location", &project.location)?;
    }
    dom::append(&card, &caption)?;
    dom::append(grid, &card)?;

    Ok((card, GalleryCard { _viewer: viewer }))
}

fn mount_hero(document: &web::Document, parent: &web::Element, profile: &Profile) -> anyhow::Result<()> {
    let hero = dom::create(document, "header", "profile-hero")?;
    dom::append_text(document, &hero, "h1", "profile-hero__name", &profile.name)?;
    if !profile.tagline.is_empty() {
        dom::append_text(document, &hero, "p", "profile-hero__tagline", &profile.tagline)?;
    }
    let links = dom::create(document, "nav", "profile-hero__links")?;
    let about = dom::append_text(document, &links, "a", "profile-hero__link", "About")?;
    dom::set_attr(&about, "href", "/about");
    let work = dom::append_text(document, &links, "a", "profile-hero__link", "Projects")?;
    dom::set_attr(&work, "href", &format!("#{}", PROJECTS_ANCHOR_ID));
    dom::append(&hero, &links)?;
    dom::append(parent, &hero)
}

/// Landing page: profile hero and the scroll-scaled project grid.
pub struct GalleryPage {
    _cards: Vec<GalleryCard>,
    _scaler: ScrollScaler,
}

impl GalleryPage {
    pub fn mount(
        document: &web::Document,
        root: &web::Element,
        catalog: &Catalog,
        profile: &Profile,
        feed: &PointerFeed,
        theme: Theme,
    ) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        mount_hero(document, root, profile)?;

        let section = dom::create(document, "section", "project-grid")?;
        section.set_id(PROJECTS_ANCHOR_ID);
        dom::append(root, &section)?;

        let mut elements = Vec::with_capacity(catalog.all().len());
        let mut cards = Vec::with_capacity(catalog.all().len());
        for project in catalog.all() {
            let (el, card) = mount_card(document, &section, project, feed, theme)?;
            elements.push(el);
            cards.push(card);
        }

        let footer = dom::create(document, "footer", "site-footer")?;
        dom::append_text(document, &footer, "p", "site-footer__name", &profile.name)?;
        dom::append(root, &footer)?;

        let scaler = ScrollScaler::attach(&window, elements, ScrollTuning::default());
        log::info!("[gallery] {} project cards", scaler.card_count());

        Ok(Self {
            _cards: cards,
            _scaler: scaler,
        })
    }
}
