use crate::constants::{DETAIL_BASE_ZOOM, DETAIL_DESKTOP_ZOOM, PHOTO_PLACEHOLDER_LABEL};
use crate::core::viewer::ZoomOverrides;
use crate::core::{Profile, Project, Theme, CERTIFICATIONS_TITLE};
use crate::dom;
use crate::events::PointerFeed;
use crate::mobile::MobileScrollAdapter;
use crate::plans::PlanCards;
use crate::render::{self, Photo};
use crate::viewer::{SplatPreload, ViewerHost, ViewerProps};
use web_sys as web;

/// Detail page for one project.
pub struct ProjectPage {
    _preload: Option<SplatPreload>,
    _viewer: ViewerHost,
    _plans: Option<PlanCards>,
    _adapter: MobileScrollAdapter,
}

impl ProjectPage {
    pub fn mount(
        document: &web::Document,
        root: &web::Element,
        project: &Project,
        feed: &PointerFeed,
        theme: Theme,
    ) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        document.set_title(&project.title);

        let preload = match project.splat() {
            Some(url) if url.starts_with('/') => Some(SplatPreload::insert(document, url)?),
            _ => None,
        };

        // Desktop: viewer pane on the left, narrative panel scrolling on the right.
        let scroller = dom::create(document, "div", "project-detail")?;
        dom::set_style(&scroller, "display", "flex");
        dom::append(root, &scroller)?;

        let pane = dom::create(document, "div", "project-detail__viewer")?;
        dom::set_style(&pane, "position", "sticky");
        dom::set_style(&pane, "top", "0");
        dom::set_style(&pane, "width", "50%");
        dom::set_style(&pane, "height", "100vh");
        let zoom_target = dom::create(document, "div", "project-detail__zoom")?;
        dom::set_style(&zoom_target, "position", "absolute");
        dom::set_style(&zoom_target, "inset", "0");
        dom::append(&pane, &zoom_target)?;
        dom::append(&scroller, &pane)?;

        let back = dom::append_text(document, &pane, "a", "project-detail__back", "← Index")?;
        dom::set_attr(&back, "href", "/");

        let props = ViewerProps {
            splat_url: project.splat().map(str::to_string),
            fallback_url: project.fallback().map(str::to_string),
            alt: project.title.clone(),
            compact: false,
            parallax: true,
            zoom: ZoomOverrides {
                base: Some(DETAIL_BASE_ZOOM),
                mobile: None,
                desktop: Some(DETAIL_DESKTOP_ZOOM),
            },
        };
        let viewer = ViewerHost::mount(document, &zoom_target, &props, feed, theme)?;

        let panel = dom::create(document, "article", "project-detail__panel")?;
        dom::set_style(&panel, "width", "50%");
        dom::append_text(document, &panel, "h1", "project-detail__title", &project.title)?;
        if !project.location.trim().is_empty() {
            dom::append_text(document, &panel, "p", "project-detail__location", &project.location)?;
        }
        for paragraph in project.paragraphs() {
            dom::append_text(document, &panel, "p", "project-detail__text", paragraph)?;
        }
        let plans = if project.plans.is_empty() {
            None
        } else {
            render::section_heading(document, &panel, "Plans")?;
            let origin = dom::location_origin();
            let cards = PlanCards::mount(document, &panel, &project.plans, &origin)?;
            log::debug!("[project] {} plans", cards.count());
            Some(cards)
        };
        dom::append(&scroller, &panel)?;

        let adapter = MobileScrollAdapter::attach(&window, scroller, pane, zoom_target, panel);
        log::info!("[project] {} ({:?} layout)", project.slug, adapter.layout());

        Ok(Self {
            _preload: preload,
            _viewer: viewer,
            _plans: plans,
            _adapter: adapter,
        })
    }
}

enum AboutVisual {
    Viewer(ViewerHost),
    Photo(Photo),
}

/// Profile page: photo (or splat), bio, accolades, certifications.
pub struct AboutPage {
    _visual: AboutVisual,
}

impl AboutPage {
    pub fn mount(
        document: &web::Document,
        root: &web::Element,
        profile: &Profile,
        feed: &PointerFeed,
        theme: Theme,
    ) -> anyhow::Result<Self> {
        document.set_title(&format!("About | {}", profile.name));
        let page = dom::create(document, "div", "about")?;
        dom::append(root, &page)?;

        let figure = dom::create(document, "div", "about__visual")?;
        dom::set_style(&figure, "position", "relative");
        dom::set_style(&figure, "aspect-ratio", "3 / 4");
        dom::set_style(&figure, "overflow", "hidden");
        dom::append(&page, &figure)?;

        let visual = match profile.splat() {
            Some(url) => {
                let props = ViewerProps {
                    splat_url: Some(url.to_string()),
                    fallback_url: profile.photo().map(str::to_string),
                    alt: profile.name.clone(),
                    parallax: true,
                    ..ViewerProps::default()
                };
                AboutVisual::Viewer(ViewerHost::mount(document, &figure, &props, feed, theme)?)
            }
            None => {
                let photo = Photo::new(document, profile.photo(), &profile.name, PHOTO_PLACEHOLDER_LABEL)?;
                dom::append(&figure, photo.element())?;
                AboutVisual::Photo(photo)
            }
        };

        let panel = dom::create(document, "article", "about__panel")?;
        dom::append_text(document, &panel, "h1", "about__name", &profile.name)?;
        let locations = profile.locations_line();
        if !locations.is_empty() {
            dom::append_text(document, &panel, "p", "about__locations", &locations)?;
        }
        for paragraph in crate::core::paragraphs(&profile.bio) {
            dom::append_text(document, &panel, "p", "about__bio", paragraph)?;
        }
        for accolade in profile.accolades_excluding_certifications() {
            let section = dom::create(document, "section", "about__accolade")?;
            render::section_heading(document, &section, &accolade.title)?;
            let list = dom::create(document, "ul", "about__items")?;
            for item in &accolade.items {
                dom::append_text(document, &list, "li", "", item)?;
            }
            dom::append(&section, &list)?;
            dom::append(&panel, &section)?;
        }

        let contact = dom::create(document, "section", "about__contact")?;
        render::section_heading(document, &contact, "Contact")?;
        let email = dom::append_text(document, &contact, "a", "about__email", &profile.contact.email)?;
        dom::set_attr(&email, "href", &format!("mailto:{}", profile.contact.email));
        if let Some(phone) = crate::core::non_empty(profile.contact.phone.as_deref()) {
            let tel = dom::append_text(document, &contact, "a", "about__phone", phone)?;
            dom::set_attr(&tel, "href", &format!("tel:{}", phone.replace(' ', "")));
        }
        dom::append(&panel, &contact)?;
        dom::append(&page, &panel)?;

        if let Some(certs) = profile.certifications() {
            let strip = dom::create(document, "section", "about__certifications")?;
            render::section_heading(document, &strip, CERTIFICATIONS_TITLE)?;
            for item in &certs.items {
                dom::append_text(document, &strip, "span", "about__certification", item)?;
            }
            dom::append(&page, &strip)?;
        }

        log::info!(
            "[about] mounted ({})",
            match &visual {
                AboutVisual::Viewer(_) => "splat",
                AboutVisual::Photo(_) => "photo",
            }
        );
        Ok(Self { _visual: visual })
    }
}

pub fn mount_not_found(document: &web::Document, root: &web::Element, path: &str) -> anyhow::Result<()> {
    document.set_title("Not found");
    let page = dom::create(document, "div", "not-found")?;
    dom::append_text(document, &page, "h1", "not-found__title", "Project not found")?;
    let back = dom::append_text(document, &page, "a", "not-found__back", "Back to index")?;
    dom::set_attr(&back, "href", "/");
    dom::append(root, &page)?;
    log::warn!("[router] no page for {}", path);
    Ok(())
}
