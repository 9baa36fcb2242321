// Layout, motion and handshake tuning shared by the web frontend.
// Tuned by eye against the live site.

// Breakpoints (CSS px)
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0; // below this the detail page becomes one column
pub const NARROW_VIEWPORT_PX: f64 = 640.0; // below this card scaling is pinned to 1

// Scroll-reactive card scaling
pub const CARD_SCALE_K: f32 = 0.15; // max extra scale at viewport centre

// Mobile detail-page scroll zoom
pub const MOBILE_ZOOM_MAX: f32 = 0.12;
pub const MOBILE_SCROLL_RANGE_FRACTION: f64 = 0.5; // of viewport height
pub const MOBILE_VIEWER_MIN_HEIGHT_VH: u32 = 75;

// Parallax
pub const PARALLAX_DIRECT_PX: f32 = 5.0; // offset per unit for CSS-eased parallax
pub const PARALLAX_SMOOTH_PX: f32 = 8.0; // offset per unit for the frame-smoothed loop
pub const PARALLAX_SMOOTHING: f32 = 0.08; // fraction of the remaining distance per frame
pub const PARALLAX_SETTLE_EPSILON: f32 = 0.01;
pub const PARALLAX_MEDIA_SCALE: f32 = 1.1; // overscan so offsets never reveal edges

// Device orientation
pub const TILT_RANGE_DEG: f64 = 30.0;
pub const TILT_NEUTRAL_BETA_DEG: f64 = 45.0; // typical phone holding angle

// Vignette
pub const VIGNETTE_CENTER_X_PCT: f32 = 50.0;
pub const VIGNETTE_CENTER_Y_PCT: f32 = 60.0;
pub const VIGNETTE_TRAVEL_PCT: f32 = 5.0;

// Viewer handshake
pub const SPLAT_CROSSFADE_MS: u32 = 700;
pub const SPLAT_VIEWER_PATH: &str = "/splat-viewer.html";

// Modal
pub const MODAL_TRANSITION_MS: u32 = 500;
pub const MODAL_CONTENT_DELAY_MS: u32 = 200;
pub const MODAL_CONTENT_FADE_MS: u32 = 300;
pub const MODAL_PERSPECTIVE_PX: f32 = 1200.0;
pub const MODAL_CLOSED_TILT_DEG: f32 = 60.0;
pub const MODAL_OPEN_DEFER_FRAMES: u8 = 2;
