use super::constants::{
    MODAL_CLOSED_TILT_DEG, MODAL_CONTENT_DELAY_MS, MODAL_CONTENT_FADE_MS,
    MODAL_OPEN_DEFER_FRAMES, MODAL_PERSPECTIVE_PX, MODAL_TRANSITION_MS,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModalTiming {
    pub transition_ms: u32,
    pub content_delay_ms: u32,
    pub content_fade_ms: u32,
    pub defer_frames: u8,
}

impl Default for ModalTiming {
    fn default() -> Self {
        Self {
            transition_ms: MODAL_TRANSITION_MS,
            content_delay_ms: MODAL_CONTENT_DELAY_MS,
            content_fade_ms: MODAL_CONTENT_FADE_MS,
            defer_frames: MODAL_OPEN_DEFER_FRAMES,
        }
    }
}

/// Viewport-relative rectangle captured from `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// What the caller must do after feeding the machine an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalEffect {
    /// Mount in the closed geometry and schedule the deferred frames.
    Mount,
    /// Schedule one more animation frame before opening.
    AwaitFrame,
    /// Switch to the open geometry; transitions run from here.
    ApplyOpen,
    /// Fade content and return to the origin geometry, then wait out the
    /// transition before unmounting.
    BeginClose,
    /// Remove the modal and release its resources.
    Unmount,
    None,
}

#[derive(Clone, Debug, Default)]
pub struct ModalMachine {
    phase: ModalPhase,
    origin: Option<Rect>,
    frames_left: u8,
    timing: ModalTiming,
}

impl ModalMachine {
    pub fn new(timing: ModalTiming) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn origin(&self) -> Option<Rect> {
        self.origin
    }

    pub fn timing(&self) -> ModalTiming {
        self.timing
    }

    pub fn open(&mut self, origin: Option<Rect>) -> ModalEffect {
        if self.phase != ModalPhase::Closed {
            return ModalEffect::None;
        }
        self.phase = ModalPhase::Opening;
        self.origin = origin;
        self.frames_left = self.timing.defer_frames.max(1);
        ModalEffect::Mount
    }

    /// An animation frame scheduled while opening has fired.
    pub fn frame(&mut self) -> ModalEffect {
        if self.phase != ModalPhase::Opening {
            return ModalEffect::None;
        }
        self.frames_left = self.frames_left.saturating_sub(1);
        if self.frames_left > 0 {
            return ModalEffect::AwaitFrame;
        }
        self.phase = ModalPhase::Open;
        ModalEffect::ApplyOpen
    }

    /// Escape, the close button and the backdrop all land here.
    pub fn request_close(&mut self) -> ModalEffect {
        match self.phase {
            ModalPhase::Opening | ModalPhase::Open => {
                self.phase = ModalPhase::Closing;
                ModalEffect::BeginClose
            }
            ModalPhase::Closing | ModalPhase::Closed => ModalEffect::None,
        }
    }

    /// The close transition has run for its full duration.
    pub fn close_elapsed(&mut self) -> ModalEffect {
        if self.phase != ModalPhase::Closing {
            return ModalEffect::None;
        }
        self.phase = ModalPhase::Closed;
        self.origin = None;
        ModalEffect::Unmount
    }

    pub fn geometry(&self) -> ModalGeometry {
        match self.phase {
            ModalPhase::Open => ModalGeometry::full_viewport(),
            ModalPhase::Closed | ModalPhase::Opening | ModalPhase::Closing => {
                ModalGeometry::from_origin(self.origin)
            }
        }
    }

    /// True from `open` until `Unmount` has been reported; the DOM, the
    /// scroll lock and every listener belong to the modal only in between.
    pub fn is_mounted(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    pub fn content_visible(&self) -> bool {
        self.phase == ModalPhase::Open
    }
}

/// Inline style for the modal frame in a given phase.
#[derive(Clone, Debug, PartialEq)]
pub struct ModalGeometry {
    pub top: String,
    pub left: String,
    pub width: String,
    pub height: String,
    pub border_radius: String,
    pub transform: Option<String>,
    pub opacity: f32,
}

impl ModalGeometry {
    pub fn full_viewport() -> Self {
        Self {
            top: "0px".into(),
            left: "0px".into(),
            width: "100%".into(),
            height: "100vh".into(),
            border_radius: "0".into(),
            transform: Some(tilt_transform(0.0)),
            opacity: 1.0,
        }
    }

    pub fn from_origin(origin: Option<Rect>) -> Self {
        match origin {
            Some(r) => Self {
                top: format!("{}px", r.top),
                left: format!("{}px", r.left),
                width: format!("{}px", r.width),
                height: format!("{}px", r.height),
                border_radius: "0.125rem".into(),
                transform: Some(tilt_transform(MODAL_CLOSED_TILT_DEG)),
                opacity: 1.0,
            },
            None => Self {
                top: "50%".into(),
                left: "50%".into(),
                width: "0px".into(),
                height: "0px".into(),
                border_radius: "0".into(),
                transform: None,
                opacity: 0.0,
            },
        }
    }
}

pub fn tilt_transform(deg: f32) -> String {
    format!("perspective({}px) rotateX({}deg)", MODAL_PERSPECTIVE_PX, deg)
}

pub fn frame_transition(timing: &ModalTiming) -> String {
    format!(
        "all {}ms cubic-bezier(0.16, 1, 0.3, 1)",
        timing.transition_ms
    )
}

/// Content fades in after the geometry has visibly started moving, and out
/// immediately on close.
pub fn content_transition(timing: &ModalTiming, visible: bool) -> String {
    let delay = if visible { timing.content_delay_ms } else { 0 };
    format!("opacity {}ms ease {}ms", timing.content_fade_ms, delay)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalCommand {
    Close,
}

pub fn command_for_key(key: &str) -> Option<ModalCommand> {
    match key {
        "Escape" | "Esc" => Some(ModalCommand::Close),
        _ => None,
    }
}

/// Reference count behind the document-wide scroll lock.
///
/// `acquire` reports whether scrolling must be disabled now (first holder);
/// `release` reports whether it must be restored (last holder).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollLockCount {
    holders: u32,
}

impl ScrollLockCount {
    pub fn holders(&self) -> u32 {
        self.holders
    }

    pub fn acquire(&mut self) -> bool {
        self.holders += 1;
        self.holders == 1
    }

    pub fn release(&mut self) -> bool {
        if self.holders == 0 {
            return false;
        }
        self.holders -= 1;
        self.holders == 0
    }
}
