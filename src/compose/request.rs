use crate::{
    foundation::color::Color, frame::compositor::BackgroundMode, matrix::model::EcLevel,
    render::modules::StyleConfig,
};

/// Monotonically increasing identifier ordering requests for
/// last-request-wins delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct RequestToken(pub u64);

/// Frame selection and decoration options for one request.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FrameOptions {
    /// Catalog frame id; unknown ids fall back to `simple`.
    pub frame_id: String,
    /// Frame paint color; `None` uses the descriptor default.
    #[serde(default)]
    pub color: Option<Color>,
    /// Optional label text (truncated to fit at render time).
    #[serde(default)]
    pub text: Option<String>,
    /// Canvas background treatment.
    #[serde(default)]
    pub background: BackgroundMode,
}

/// One desired output of the composition pipeline.
///
/// Requests are immutable once built; a new selection produces a new request
/// with a fresh token.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CompositionRequest {
    /// Payload to encode, 1..=2953 characters.
    pub data: String,
    /// Error-correction level handed to the encoder.
    pub ec_level: EcLevel,
    /// Module render styling.
    pub style: StyleConfig,
    /// QR render side length in pixels.
    pub size_px: u32,
    /// Optional decorative frame.
    #[serde(default)]
    pub frame: Option<FrameOptions>,
    /// Ordering token issued by the composer.
    pub token: RequestToken,
}

#[cfg(test)]
#[path = "../../tests/unit/compose/request.rs"]
mod tests;
