// Host-side tests for viewer presentation choice, embed URLs and load tracking.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod theme {
        include!("../src/core/theme.rs");
    }
    pub mod scroll {
        include!("../src/core/scroll.rs");
    }
    pub mod model {
        include!("../src/core/model.rs");
    }
    pub mod viewer {
        include!("../src/core/viewer.rs");
    }
}

use crate::core::model::Catalog;
use crate::core::theme::Theme;
use crate::core::viewer::*;

#[test]
fn nothing_to_show_falls_back_to_gradient() {
    assert_eq!(Presentation::choose(None, None), Presentation::Gradient);
    assert_eq!(Presentation::choose(Some("  "), Some("")), Presentation::Gradient);
}

#[test]
fn fallback_media_without_splat_is_shown_directly() {
    let p = Presentation::choose(None, Some("/img/barn.jpg"));
    assert_eq!(
        p,
        Presentation::Media(FallbackMedia {
            url: "/img/barn.jpg".into(),
            kind: MediaKind::Image,
        })
    );
}

#[test]
fn splat_keeps_fallback_for_the_crossfade() {
    let p = Presentation::choose(Some("/splat/a.splat"), Some("/video/a.mp4"));
    match p {
        Presentation::Splat { url, fallback } => {
            assert_eq!(url, "/splat/a.splat");
            assert_eq!(fallback.map(|f| f.kind), Some(MediaKind::Video));
        }
        other => panic!("expected splat, got {:?}", other),
    }
}

#[test]
fn media_kind_follows_extension() {
    assert_eq!(MediaKind::from_url("/a/B.MP4?x=1"), MediaKind::Video);
    assert_eq!(MediaKind::from_url("/clip.webm"), MediaKind::Video);
    assert_eq!(MediaKind::from_url("/clip.mov#t=2"), MediaKind::Video);
    assert_eq!(MediaKind::from_url("/img.jpg#mp4"), MediaKind::Image);
    assert_eq!(MediaKind::from_url("/photo.webp"), MediaKind::Image);
}

#[test]
fn bundled_catalog_never_renders_blank() {
    let catalog = Catalog::from_json(include_str!("../data/projects.json")).unwrap();

    let barn = catalog.by_slug("barn").unwrap();
    assert_eq!(
        Presentation::choose(barn.splat(), barn.fallback()),
        Presentation::Media(FallbackMedia::new("/img/barn.jpg"))
    );

    let pavilion = catalog.by_slug("field-pavilion").unwrap();
    assert_eq!(
        Presentation::choose(pavilion.splat(), pavilion.fallback()),
        Presentation::Gradient
    );

    let monitor = catalog.by_slug("monitor-barn").unwrap();
    assert!(matches!(
        Presentation::choose(monitor.splat(), monitor.fallback()),
        Presentation::Splat { .. }
    ));
}

#[test]
fn zoom_prefers_viewport_specific_override() {
    let z = ZoomOverrides {
        base: Some(0.0),
        mobile: None,
        desktop: Some(-5.0),
    };
    assert_eq!(z.select(1280.0), Some(-5.0));
    assert_eq!(z.select(500.0), Some(0.0));
}

#[test]
fn zoom_is_omitted_without_overrides() {
    assert_eq!(ZoomOverrides::default().select(1280.0), None);
    let z = ZoomOverrides {
        base: None,
        mobile: Some(f32::NAN),
        desktop: None,
    };
    assert_eq!(z.select(500.0), None);
}

#[test]
fn relative_urls_are_made_absolute() {
    assert_eq!(absolute_url("/s.splat", "https://x.test"), "https://x.test/s.splat");
    assert_eq!(absolute_url("/s.splat", "https://x.test/"), "https://x.test/s.splat");
    assert_eq!(absolute_url("https://cdn.test/s.splat", "https://x.test"), "https://cdn.test/s.splat");
    assert_eq!(absolute_url("//cdn.test/s.splat", "https://x.test"), "//cdn.test/s.splat");
}

#[test]
fn embed_url_carries_source_zoom_and_theme() {
    let url = embed_url("/splats/barn.splat", "https://site.test", Some(-5.0), Theme::Dark);
    assert_eq!(
        url,
        "/splat-viewer.html?url=https%3A%2F%2Fsite.test%2Fsplats%2Fbarn.splat&zoom=-5&theme=dark"
    );
}

#[test]
fn embed_url_omits_zoom_when_unset() {
    let url = embed_url("/a.splat", "https://site.test", None, Theme::Light);
    assert_eq!(url, "/splat-viewer.html?url=https%3A%2F%2Fsite.test%2Fa.splat&theme=light");
}

#[test]
fn embed_url_escapes_query_characters() {
    let url = embed_url("https://cdn.test/a b.splat?v=2&x=1", "", Some(0.0), Theme::Light);
    assert!(url.contains("url=https%3A%2F%2Fcdn.test%2Fa%20b.splat%3Fv%3D2%26x%3D1&zoom=0&"));
}

#[test]
fn tracker_resets_only_for_a_new_source() {
    let mut t = LoadTracker::default();
    assert_eq!(t.state(), LoadState::NotStarted);
    assert!(t.begin("a"));
    assert_eq!(t.state(), LoadState::Loading(0));
    assert!(t.progress(40.0).is_some());
    assert!(!t.begin("a"));
    assert_eq!(t.state(), LoadState::Loading(40));
    assert!(t.begin("b"));
    assert_eq!(t.state(), LoadState::Loading(0));
}

#[test]
fn progress_only_moves_forward() {
    let mut t = LoadTracker::default();
    t.begin("a");
    assert_eq!(t.progress(0.0), None);
    assert_eq!(t.progress(40.4), Some(40));
    assert_eq!(t.progress(30.0), None);
    assert_eq!(t.progress(40.2), None);
    assert_eq!(t.progress(f64::NAN), None);
    assert_eq!(t.progress(250.0), Some(100));
}

#[test]
fn loaded_fires_once_per_source() {
    let mut t = LoadTracker::default();
    assert!(!t.mark_loaded(), "nothing tracked yet");
    t.begin("a");
    assert!(t.mark_loaded());
    assert!(!t.mark_loaded());
    assert_eq!(t.state(), LoadState::Loaded);
    assert_eq!(t.progress(50.0), None);

    t.begin("b");
    assert!(t.mark_loaded());
}

#[test]
fn layers_crossfade_on_load() {
    assert_eq!(layer_opacity(LoadState::NotStarted), (1.0, 0.0));
    assert_eq!(layer_opacity(LoadState::Loading(90)), (1.0, 0.0));
    assert_eq!(layer_opacity(LoadState::Loaded), (0.0, 1.0));
    assert_eq!(crossfade_transition(), "opacity 700ms ease-out");
}

#[test]
fn fallback_stops_animating_once_the_splat_is_in() {
    let mut t = LoadTracker::default();
    t.begin("https://site.test/splats/barn.splat");
    assert!(fallback_shown(t.state()));
    t.progress(60.0);
    assert!(fallback_shown(t.state()));
    t.mark_loaded();
    assert!(!fallback_shown(t.state()));
    // A repeated splat_loaded keeps it hidden.
    t.mark_loaded();
    assert!(!fallback_shown(t.state()));
}

#[test]
fn progress_label_tracks_state() {
    assert_eq!(progress_label(LoadState::Loading(0)), "Loading 3D scene…");
    assert_eq!(progress_label(LoadState::Loading(42)), "Loading 3D scene… 42%");
    assert_eq!(progress_label(LoadState::Loaded), "");
}
