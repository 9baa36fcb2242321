#![cfg(target_arch = "wasm32")]
use crate::core::theme::THEME_STORAGE_KEY;
use crate::core::{Catalog, Profile, Route, Theme, PROFILE_JSON, PROJECTS_JSON};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod gallery;
mod input;
mod mobile;
mod overlay;
mod pages;
mod plans;
mod render;
mod viewer;

enum Page {
    Gallery(gallery::GalleryPage),
    Project(pages::ProjectPage),
    About(pages::AboutPage),
    NotFound,
}

/// Everything alive for the current page; dropping it tears the page down.
struct App {
    _page: Page,
    _feed: events::PointerFeed,
    _gate: events::MotionGate,
    _permission: Option<events::MotionPermissionRequest>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static PAGE_EVENTS: RefCell<Vec<gloo::events::EventListener>> = const { RefCell::new(Vec::new()) };
}

fn log_level(window: &web::Window) -> log::Level {
    let search = window.location().search().unwrap_or_default();
    if search.contains("debug") {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}

fn resolve_theme(window: &web::Window) -> Theme {
    let stored = window
        .local_storage()
        .ok()
        .flatten()
        .and_then(|s| s.get_item(THEME_STORAGE_KEY).ok().flatten());
    let prefers_dark = window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false);
    Theme::resolve(stored.as_deref(), prefers_dark)
}

fn apply_theme(document: &web::Document, theme: Theme) {
    if let Some(root) = document.document_element() {
        _ = root.set_attribute("data-theme", theme.as_str());
        let classes = root.class_list();
        match theme {
            Theme::Dark => {
                _ = classes.add_1("dark");
            }
            Theme::Light => {
                _ = classes.remove_1("dark");
            }
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let level = web::window().map(|w| log_level(&w)).unwrap_or(log::Level::Info);
    console_log::init_with_level(level).ok();
    log::info!("portfolio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let catalog = Catalog::from_json(PROJECTS_JSON)?;
    let profile = Profile::from_json(PROFILE_JSON)?;
    for p in catalog.missing_media() {
        log::debug!("[catalog] {} renders the gradient placeholder", p.slug);
    }

    let theme = resolve_theme(&window);
    apply_theme(&document, theme);

    let root: web::Element = match document.get_element_by_id(constants::APP_ROOT_ID) {
        Some(el) => el,
        None => document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no <body>"))?
            .into(),
    };

    let (gate, permission) = events::permission::install(&document);
    if permission.as_ref().is_some_and(|p| p.is_waiting()) {
        log::debug!("[motion] waiting for a gesture to request orientation access");
    }
    let feed = events::PointerFeed::install(&window, gate.clone());

    let path = window.location().pathname().unwrap_or_else(|_| "/".into());
    let route = Route::parse(&path);
    log::info!("[router] {} -> {:?}", path, route);

    let page = match route {
        Route::Gallery => Page::Gallery(gallery::GalleryPage::mount(
            &document, &root, &catalog, &profile, &feed, theme,
        )?),
        Route::About => Page::About(pages::AboutPage::mount(&document, &root, &profile, &feed, theme)?),
        Route::Project(slug) => match catalog.by_slug(&slug) {
            Some(project) => {
                Page::Project(pages::ProjectPage::mount(&document, &root, project, &feed, theme)?)
            }
            None => {
                pages::mount_not_found(&document, &root, &path)?;
                Page::NotFound
            }
        },
        Route::NotFound => {
            pages::mount_not_found(&document, &root, &path)?;
            Page::NotFound
        }
    };

    APP.with(|app| {
        *app.borrow_mut() = Some(App {
            _page: page,
            _feed: feed,
            _gate: gate,
            _permission: permission,
        })
    });

    // Leaving the page drops every listener, frame loop, timer and lock.
    let on_pagehide = gloo::events::EventListener::new(&window, "pagehide", |_| {
        if let Some(app) = APP.with(|app| app.borrow_mut().take()) {
            drop(app);
            log::debug!("[app] torn down");
        }
    });
    // A page restored from the back/forward cache has nothing mounted.
    let on_pageshow = gloo::events::EventListener::new(&window, "pageshow", |ev| {
        let persisted = js_sys::Reflect::get(ev, &JsValue::from_str("persisted"))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if persisted {
            if let Some(w) = web::window() {
                _ = w.location().reload();
            }
        }
    });
    PAGE_EVENTS.with(|slot| *slot.borrow_mut() = vec![on_pagehide, on_pageshow]);
    Ok(())
}
