use std::sync::OnceLock;

use crate::{foundation::color::Color, frame::recipe::PathCmd};

/// Decorative frame family, each a fixed shape vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameFamily {
    /// Plain rounded-rectangle outline.
    Simple,
    /// Large corner-radius outline.
    Rounded,
    /// Rectangle with a triangular flap at the top.
    Envelope,
    /// Rectangle with a concave arc cut at the bottom.
    Scooter,
    /// Extra-large corner-radius outline.
    Bubble,
    /// Rectangle with a ribbon cross and a knot.
    Gift,
    /// Filled body with a protruding handle; gradient fill, baked label.
    Bag,
    /// Artwork-decorated frames.
    Abstract,
}

/// Percentage-based bounding box (0..=100 per axis) for QR placement within
/// the frame box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PercentRect {
    /// Left edge, percent of width.
    pub x: f64,
    /// Top edge, percent of height.
    pub y: f64,
    /// Width, percent.
    pub w: f64,
    /// Height, percent.
    pub h: f64,
}

/// One catalog entry: metadata plus the data-driven shape recipe.
///
/// `shape` is filled with the frame paint, `cutout` is erased from that fill
/// (producing outlines and cuts), `overlay` is painted on top. The `bag`
/// family carries no recipe; its body/handle/label treatment is the one
/// procedural special case.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FrameDescriptor {
    /// Stable catalog identifier.
    pub id: String,
    /// Shape family.
    pub family: FrameFamily,
    /// Display grouping.
    pub category: String,
    /// Optional decorative artwork fetched from `frames/<filename>`.
    #[serde(default)]
    pub asset_ref: Option<String>,
    /// Whether the frame paint follows the request's frame color.
    pub supports_color_change: bool,
    /// Paint used when the request supplies no (valid) frame color.
    #[serde(default)]
    pub default_color: Option<Color>,
    /// QR placement within the frame box.
    pub qr_position: PercentRect,
    /// Filled outline shape.
    #[serde(default)]
    pub shape: Vec<PathCmd>,
    /// Regions erased from the filled shape.
    #[serde(default)]
    pub cutout: Vec<PathCmd>,
    /// Decorations painted over the outline.
    #[serde(default)]
    pub overlay: Vec<PathCmd>,
}

static CATALOG: OnceLock<Vec<FrameDescriptor>> = OnceLock::new();

/// The fixed frame catalog, parsed once from embedded data.
pub fn catalog() -> &'static [FrameDescriptor] {
    CATALOG
        .get_or_init(|| {
            serde_json::from_str(include_str!("catalog.json"))
                .expect("embedded frame catalog must parse")
        })
        .as_slice()
}

/// Look up a frame by id; unknown ids fall back to the `simple` recipe.
pub fn descriptor(id: &str) -> &'static FrameDescriptor {
    let entries = catalog();
    if let Some(found) = entries.iter().find(|d| d.id == id) {
        return found;
    }

    tracing::warn!(id, "unknown frame id, falling back to 'simple'");
    entries
        .iter()
        .find(|d| d.family == FrameFamily::Simple)
        .unwrap_or(&entries[0])
}

#[cfg(test)]
#[path = "../../tests/unit/frame/catalog.rs"]
mod tests;
