use serde::{Deserialize, Serialize};

/// Messages the embedded splat renderer posts to the host page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    SplatLoaded,
    SplatProgress {
        progress: f64,
    },
    /// Pointer position derived from interaction inside the iframe, in [0,1].
    IframeMouseMove {
        x: f32,
        y: f32,
    },
    #[serde(other)]
    Unknown,
}

/// Messages the host posts into the embedded renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Pointer position in [-1,1].
    MouseMove { x: f32, y: f32 },
}

impl InboundMessage {
    /// Decode a JSON-serialized message.
    ///
    /// Anything that is not one of the known shapes yields `None`: other
    /// scripts on the page share the `message` channel, so foreign payloads
    /// are expected and not errors.
    pub fn decode(json: &str) -> Option<Self> {
        let msg: InboundMessage = serde_json::from_str(json).ok()?;
        match msg {
            InboundMessage::Unknown => None,
            InboundMessage::SplatProgress { progress } if !progress.is_finite() => None,
            InboundMessage::IframeMouseMove { x, y } if !(x.is_finite() && y.is_finite()) => None,
            InboundMessage::SplatProgress { progress } => Some(InboundMessage::SplatProgress {
                progress: progress.clamp(0.0, 100.0),
            }),
            InboundMessage::IframeMouseMove { x, y } => Some(InboundMessage::IframeMouseMove {
                x: x.clamp(0.0, 1.0),
                y: y.clamp(0.0, 1.0),
            }),
            other => Some(other),
        }
    }
}

impl OutboundMessage {
    pub fn mouse_move(signed: glam::Vec2) -> Self {
        OutboundMessage::MouseMove {
            x: signed.x.clamp(-1.0, 1.0),
            y: signed.y.clamp(-1.0, 1.0),
        }
    }

    pub fn encode(&self) -> String {
        // Flat struct variant; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
