use super::constants::{SPLAT_CROSSFADE_MS, SPLAT_VIEWER_PATH};
use super::scroll::is_mobile_width;
use super::theme::Theme;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

// Same unreserved set URLSearchParams leaves alone.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'*');

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn from_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url).to_ascii_lowercase();
        if [".mp4", ".webm", ".mov"].iter().any(|ext| path.ends_with(ext)) {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackMedia {
    pub url: String,
    pub kind: MediaKind,
}

impl FallbackMedia {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            kind: MediaKind::from_url(url),
        }
    }
}

/// What a viewer host puts on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Presentation {
    Splat {
        url: String,
        fallback: Option<FallbackMedia>,
    },
    Media(FallbackMedia),
    /// Terminal fallback: decorative gradient, never an empty pane.
    Gradient,
}

impl Presentation {
    pub fn choose(splat_url: Option<&str>, fallback_url: Option<&str>) -> Self {
        let splat = splat_url.map(str::trim).filter(|s| !s.is_empty());
        let fallback = fallback_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(FallbackMedia::new);
        match (splat, fallback) {
            (Some(url), fallback) => Presentation::Splat {
                url: url.to_string(),
                fallback,
            },
            (None, Some(media)) => Presentation::Media(media),
            (None, None) => Presentation::Gradient,
        }
    }
}

/// Initial camera distance overrides for the embedded renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ZoomOverrides {
    pub base: Option<f32>,
    pub mobile: Option<f32>,
    pub desktop: Option<f32>,
}

impl ZoomOverrides {
    pub fn select(&self, viewport_width: f64) -> Option<f32> {
        let specific = if is_mobile_width(viewport_width) {
            self.mobile
        } else {
            self.desktop
        };
        specific.or(self.base).filter(|z| z.is_finite())
    }
}

pub fn absolute_url(url: &str, origin: &str) -> String {
    if url.starts_with('/') && !url.starts_with("//") {
        format!("{}{}", origin.trim_end_matches('/'), url)
    } else {
        url.to_string()
    }
}

/// `/splat-viewer.html?url=..&zoom=..&theme=..`
pub fn embed_url(splat_url: &str, origin: &str, zoom: Option<f32>, theme: Theme) -> String {
    let absolute = absolute_url(splat_url, origin);
    let mut out = format!(
        "{}?url={}",
        SPLAT_VIEWER_PATH,
        utf8_percent_encode(&absolute, QUERY_VALUE)
    );
    if let Some(z) = zoom {
        out.push_str(&format!("&zoom={}", z));
    }
    out.push_str("&theme=");
    out.push_str(theme.as_str());
    out
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    NotStarted,
    Loading(u8),
    Loaded,
}

/// Forward-only load progress for one embedded source.
#[derive(Clone, Debug, Default)]
pub struct LoadTracker {
    source: Option<String>,
    state: LoadState,
}

impl LoadTracker {
    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Start tracking `source`. Returns true when this reset the state, which
    /// only happens when the source differs from the one already tracked.
    pub fn begin(&mut self, source: &str) -> bool {
        if self.source.as_deref() == Some(source) {
            return false;
        }
        self.source = Some(source.to_string());
        self.state = LoadState::Loading(0);
        true
    }

    /// Record progress telemetry. Returns the new percentage when it moved
    /// forward; regressions and zero reports are ignored.
    pub fn progress(&mut self, percent: f64) -> Option<u8> {
        let LoadState::Loading(current) = self.state else {
            return None;
        };
        if !(percent > 0.0) {
            return None;
        }
        let next = percent.round().clamp(0.0, 100.0) as u8;
        if next <= current {
            return None;
        }
        self.state = LoadState::Loading(next);
        Some(next)
    }

    /// Returns true exactly once per source, on the transition into `Loaded`.
    pub fn mark_loaded(&mut self) -> bool {
        if self.source.is_none() || self.state == LoadState::Loaded {
            return false;
        }
        self.state = LoadState::Loaded;
        true
    }
}

/// (fallback, splat) layer opacity for a load state.
pub fn layer_opacity(state: LoadState) -> (f32, f32) {
    match state {
        LoadState::Loaded => (0.0, 1.0),
        LoadState::NotStarted | LoadState::Loading(_) => (1.0, 0.0),
    }
}

/// Whether the fallback layer is still on screen and worth animating.
pub fn fallback_shown(state: LoadState) -> bool {
    layer_opacity(state).0 > 0.0
}

pub fn crossfade_transition() -> String {
    format!("opacity {}ms ease-out", SPLAT_CROSSFADE_MS)
}

pub fn progress_label(state: LoadState) -> String {
    match state {
        LoadState::Loading(p) if p > 0 => format!("Loading 3D scene… {}%", p),
        LoadState::Loaded => String::new(),
        _ => "Loading 3D scene…".to_string(),
    }
}
