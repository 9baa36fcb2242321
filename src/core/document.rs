use super::model::{Plan, PlanType};
use super::viewer::absolute_url;
use glam::Vec2;

/// 1-based page position inside a PDF plan, bounded by the page count when
/// the plan data knows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
    last: Option<u32>,
}

impl PageCursor {
    pub fn new(page: u32) -> Self {
        Self {
            page: page.max(1),
            last: None,
        }
    }

    pub fn with_last(self, last: Option<u32>) -> Self {
        let last = last.map(|n| n.max(1));
        Self {
            page: match last {
                Some(n) => self.page.min(n),
                None => self.page,
            },
            last,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn last(&self) -> Option<u32> {
        self.last
    }

    pub fn can_go_back(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_forward(&self) -> bool {
        self.last.map_or(true, |n| self.page < n)
    }

    /// Single-page documents get no navigation.
    pub fn has_navigation(&self) -> bool {
        self.last.map_or(true, |n| n > 1)
    }

    pub fn prev(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn next(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.page = self.page.saturating_add(1);
        true
    }

    pub fn label(&self) -> String {
        match self.last {
            Some(n) => format!("Page {} of {}", self.page, n),
            None => format!("Page {}", self.page),
        }
    }
}

/// `data` URL for the embedded document, with the page fragment for PDFs.
pub fn document_src(plan: &Plan, origin: &str, cursor: Option<PageCursor>) -> String {
    let absolute = absolute_url(&plan.src, origin);
    match (plan.kind, cursor) {
        (PlanType::Pdf, Some(c)) => format!("{}#page={}", absolute, c.page()),
        (PlanType::Pdf, None) => format!("{}#page=1", absolute),
        (PlanType::Svg, _) => absolute,
    }
}

pub fn mime_type(kind: PlanType) -> &'static str {
    match kind {
        PlanType::Pdf => "application/pdf",
        PlanType::Svg => "image/svg+xml",
    }
}

/// Wheel zoom and drag pan for a vector drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomPan {
    scale: f32,
    offset: Vec2,
    min_scale: f32,
    max_scale: f32,
}

impl ZoomPan {
    pub fn new(min_scale: f32, max_scale: f32) -> Self {
        let min_scale = min_scale.max(f32::EPSILON);
        Self {
            scale: 1.0_f32.clamp(min_scale, max_scale.max(min_scale)),
            offset: Vec2::ZERO,
            min_scale,
            max_scale: max_scale.max(min_scale),
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Zoom by `factor` keeping the content point under `anchor` fixed.
    /// `anchor` is relative to the transform origin (top-left).
    pub fn zoom_at(&mut self, factor: f32, anchor: Vec2) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let next = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        let applied = next / self.scale;
        self.offset = anchor - (anchor - self.offset) * applied;
        self.scale = next;
    }

    pub fn pan(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.offset += delta;
        }
    }

    pub fn reset(&mut self) {
        self.scale = 1.0_f32.clamp(self.min_scale, self.max_scale);
        self.offset = Vec2::ZERO;
    }

    pub fn transform(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) scale({:.4})",
            self.offset.x, self.offset.y, self.scale
        )
    }
}

/// Multiplicative zoom for one wheel notch; scrolling up zooms in.
pub fn wheel_factor(delta_y: f64, step: f32) -> f32 {
    if delta_y < 0.0 {
        1.0 + step
    } else if delta_y > 0.0 {
        1.0 / (1.0 + step)
    } else {
        1.0
    }
}

/// What a move of one of the tracked pointers means for the view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    Pan(Vec2),
    /// Two-finger pinch: zoom by `factor` about `anchor` after panning by
    /// the midpoint's travel.
    Pinch { factor: f32, anchor: Vec2, pan: Vec2 },
}

impl Gesture {
    pub fn apply(self, view: &mut ZoomPan) {
        match self {
            Gesture::Pan(delta) => view.pan(delta),
            Gesture::Pinch { factor, anchor, pan } => {
                view.pan(pan);
                view.zoom_at(factor, anchor);
            }
        }
    }
}

/// Up to two active pointers (mouse, pen or touch) over a zoom-pan view.
/// Positions are in the view's own coordinates.
#[derive(Clone, Debug, Default)]
pub struct PinchTracker {
    pointers: Vec<(i32, Vec2)>,
}

impl PinchTracker {
    const MIN_SPAN: f32 = 1.0;

    pub fn active(&self) -> usize {
        self.pointers.len()
    }

    /// Returns false when two pointers are already tracked.
    pub fn down(&mut self, id: i32, at: Vec2) -> bool {
        if let Some(p) = self.pointers.iter_mut().find(|(pid, _)| *pid == id) {
            p.1 = at;
            return true;
        }
        if self.pointers.len() >= 2 {
            return false;
        }
        self.pointers.push((id, at));
        true
    }

    pub fn moved(&mut self, id: i32, at: Vec2) -> Option<Gesture> {
        if !at.is_finite() {
            return None;
        }
        let index = self.pointers.iter().position(|(pid, _)| *pid == id)?;
        let before = self.pointers[index].1;
        match self.pointers.len() {
            1 => {
                self.pointers[index].1 = at;
                Some(Gesture::Pan(at - before))
            }
            _ => {
                let other = self.pointers[1 - index].1;
                self.pointers[index].1 = at;
                let old_span = before.distance(other);
                let new_span = at.distance(other);
                let old_mid = (before + other) * 0.5;
                let new_mid = (at + other) * 0.5;
                let factor = if old_span < Self::MIN_SPAN || new_span < Self::MIN_SPAN {
                    1.0
                } else {
                    new_span / old_span
                };
                Some(Gesture::Pinch {
                    factor,
                    anchor: new_mid,
                    pan: new_mid - old_mid,
                })
            }
        }
    }

    pub fn up(&mut self, id: i32) {
        self.pointers.retain(|(pid, _)| *pid != id);
    }
}
