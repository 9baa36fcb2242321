use super::constants::{TILT_NEUTRAL_BETA_DEG, TILT_RANGE_DEG};
use glam::Vec2;

/// Latest input position, tagged by where it came from.
///
/// Pointer and touch samples are stored in unit space ([0,1] per axis, origin
/// top-left). Tilt samples are stored signed ([-1,1], 0 = neutral hold).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sample {
    Pointer(Vec2),
    Tilt(Vec2),
}

impl Default for Sample {
    fn default() -> Self {
        Sample::Pointer(Vec2::splat(0.5))
    }
}

impl Sample {
    /// Position in [0,1]².
    pub fn unit(&self) -> Vec2 {
        match *self {
            Sample::Pointer(p) => p,
            Sample::Tilt(t) => (t + Vec2::ONE) * 0.5,
        }
    }

    /// Position in [-1,1]², as posted to the embedded renderer.
    pub fn signed(&self) -> Vec2 {
        match *self {
            Sample::Pointer(p) => to_signed(p),
            Sample::Tilt(t) => t,
        }
    }
}

#[inline]
pub fn to_signed(unit: Vec2) -> Vec2 {
    unit * 2.0 - Vec2::ONE
}

/// Normalize client coordinates against the viewport size.
#[inline]
pub fn normalize_client(client_x: f64, client_y: f64, width: f64, height: f64) -> Vec2 {
    if width > 0.0 && height > 0.0 {
        let u = (client_x / width).clamp(0.0, 1.0) as f32;
        let v = (client_y / height).clamp(0.0, 1.0) as f32;
        Vec2::new(u, v)
    } else {
        Vec2::splat(0.5)
    }
}

/// Map device orientation angles (degrees) to a signed tilt vector.
///
/// Returns `None` when the device reports no angles (desktop browsers fire
/// `deviceorientation` with null fields).
#[inline]
pub fn tilt_vector(gamma: Option<f64>, beta: Option<f64>) -> Option<Vec2> {
    let gamma = gamma.filter(|g| g.is_finite())?;
    let beta = beta.filter(|b| b.is_finite())?;
    let x = (gamma / TILT_RANGE_DEG).clamp(-1.0, 1.0) as f32;
    let y = ((beta - TILT_NEUTRAL_BETA_DEG) / TILT_RANGE_DEG).clamp(-1.0, 1.0) as f32;
    Some(Vec2::new(x, y))
}

/// Proof that device-orientation input may be used.
///
/// Only obtainable from [`MotionPermission::capability`], so code holding one
/// cannot have skipped the permission prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotionCapability {
    _private: (),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionPermission {
    /// The platform delivers orientation events without asking.
    NotRequired,
    /// Waiting for the first user gesture to trigger the prompt.
    Pending,
    Granted,
    Denied,
}

impl MotionPermission {
    pub fn capability(&self) -> Option<MotionCapability> {
        match self {
            MotionPermission::NotRequired | MotionPermission::Granted => {
                Some(MotionCapability { _private: () })
            }
            MotionPermission::Pending | MotionPermission::Denied => None,
        }
    }

    /// Apply the answer from `DeviceOrientationEvent.requestPermission()`.
    /// Only a pending request can be resolved.
    pub fn resolve(&mut self, answer: Option<&str>) {
        if *self != MotionPermission::Pending {
            return;
        }
        *self = match answer {
            Some("granted") => MotionPermission::Granted,
            _ => MotionPermission::Denied,
        };
    }
}

/// Last-write-wins store for pointer, touch and tilt input.
#[derive(Clone, Debug, Default)]
pub struct PointerSampler {
    latest: Sample,
    seen_input: bool,
}

impl PointerSampler {
    pub fn latest(&self) -> Sample {
        self.latest
    }

    pub fn has_input(&self) -> bool {
        self.seen_input
    }

    pub fn record_pointer(&mut self, client_x: f64, client_y: f64, width: f64, height: f64) -> Sample {
        self.latest = Sample::Pointer(normalize_client(client_x, client_y, width, height));
        self.seen_input = true;
        self.latest
    }

    /// Tilt is accepted only with a capability; otherwise the event is dropped
    /// and the previous sample stays current.
    pub fn record_tilt(
        &mut self,
        capability: Option<MotionCapability>,
        gamma: Option<f64>,
        beta: Option<f64>,
    ) -> Option<Sample> {
        capability?;
        let tilt = tilt_vector(gamma, beta)?;
        self.latest = Sample::Tilt(tilt);
        self.seen_input = true;
        Some(self.latest)
    }
}
