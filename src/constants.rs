// DOM hooks and presentation constants for the web runtime.

// Mount points
pub const APP_ROOT_ID: &str = "app";
pub const PROJECTS_ANCHOR_ID: &str = "projects";

// Labels
pub const LOADING_SCENE_LABEL: &str = "Loading 3D scene…";
pub const MEDIA_UNAVAILABLE_LABEL: &str = "Media unavailable";
pub const PHOTO_PLACEHOLDER_LABEL: &str = "Photo";
pub const DOCUMENT_ERROR_LABEL: &str = "Failed to load document";
pub const SPLAT_IFRAME_TITLE: &str = "3D Gaussian Splat Viewer";
pub const SPLAT_IFRAME_ALLOW: &str = "accelerometer; gyroscope";

// Detail page zoom defaults for the embedded renderer
pub const DETAIL_BASE_ZOOM: f32 = 0.0;
pub const DETAIL_DESKTOP_ZOOM: f32 = -5.0;

// Plan document zoom-pan
pub const PLAN_MIN_SCALE: f32 = 0.5;
pub const PLAN_MAX_SCALE: f32 = 8.0;
pub const PLAN_WHEEL_STEP: f32 = 0.1;

// Card hover flourish
pub const PLAN_CARD_REST_TRANSFORM: &str = "perspective(1200px) rotateX(60deg)";
pub const PLAN_CARD_HOVER_TRANSFORM: &str =
    "perspective(1200px) rotateX(0deg) scale(1.1) translateY(-30px)";

// Transitions
pub const CARD_SCALE_TRANSITION: &str = "transform 150ms ease-out";
pub const DIRECT_PARALLAX_TRANSITION: &str = "transform 0.1s ease-out";
pub const SCROLL_LOCK_OVERFLOW: &str = "hidden";
