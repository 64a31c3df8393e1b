use rayon::prelude::*;

use crate::{
    assets::decode::Artwork,
    foundation::{color::Color, error::QuirlResult, math::mul_div255_u8, raster::Raster},
};

/// Which tint implementation a caller wants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TintIntent {
    /// Exported/final artifacts. Always the exact composite tint.
    Export,
    /// Ephemeral live previews. May use the cheap approximation.
    Preview,
}

/// Recolors alpha artwork to a target color while preserving its shape.
pub trait TintFilter: Send + Sync {
    /// Produce a recolored raster from `artwork`.
    fn tint(&self, artwork: &Artwork, target: Color) -> QuirlResult<Raster>;
}

/// Select the implementation for a caller's intent.
///
/// The two implementations are never silently mixed: exports always get
/// [`CompositeTint`], previews may trade fidelity for cost with
/// [`PreviewTint`].
pub fn filter_for_intent(intent: TintIntent) -> &'static dyn TintFilter {
    match intent {
        TintIntent::Export => &CompositeTint,
        TintIntent::Preview => &PreviewTint,
    }
}

/// Exact paint-over-opaque-only tint.
///
/// Every output pixel is the target color premultiplied by the source alpha;
/// transparent pixels stay transparent. Integer math end-to-end, so repeated
/// calls with identical inputs are pixel-identical. This is the only
/// implementation used for artifacts returned to callers.
pub struct CompositeTint;

impl TintFilter for CompositeTint {
    fn tint(&self, artwork: &Artwork, target: Color) -> QuirlResult<Raster> {
        let mut data = artwork.rgba8_premul.as_ref().clone();
        data.par_chunks_exact_mut(4).for_each(|px| {
            let a = u16::from(px[3]);
            px[0] = mul_div255_u8(u16::from(target.r), a);
            px[1] = mul_div255_u8(u16::from(target.g), a);
            px[2] = mul_div255_u8(u16::from(target.b), a);
        });
        Raster::from_premul_rgba8(artwork.width, artwork.height, data)
    }
}

/// Approximate channel-scaling tint for live previews.
///
/// Scales the artwork's existing channels toward the target instead of
/// replacing them, approximating a hue/brightness filter chain. Cheap and
/// good enough for a throwaway preview; NOT pixel-faithful to
/// [`CompositeTint`] and never used for exported artifacts.
pub struct PreviewTint;

impl TintFilter for PreviewTint {
    fn tint(&self, artwork: &Artwork, target: Color) -> QuirlResult<Raster> {
        let mut data = artwork.rgba8_premul.as_ref().clone();
        data.par_chunks_exact_mut(4).for_each(|px| {
            // Luma of the source pixel modulates the target, keeping shading.
            let luma =
                (299 * u32::from(px[0]) + 587 * u32::from(px[1]) + 114 * u32::from(px[2])) / 1000;
            let a = u16::from(px[3]);
            let shade = |c: u8| -> u8 {
                let scaled = (u32::from(c) * (luma + 160).min(255)) / 255;
                mul_div255_u8(scaled.min(255) as u16, a)
            };
            px[0] = shade(target.r);
            px[1] = shade(target.g);
            px[2] = shade(target.b);
        });
        Raster::from_premul_rgba8(artwork.width, artwork.height, data)
    }
}

/// Like [`CompositeTint`], but the target color is interpolated per row from
/// `top` to `bottom`. Used for the bag frame body's gradient fill.
pub fn tint_vertical_gradient(artwork: &Artwork, top: Color, bottom: Color) -> QuirlResult<Raster> {
    let mut data = artwork.rgba8_premul.as_ref().clone();
    let h = artwork.height.max(1);
    let row_bytes = artwork.width as usize * 4;

    data.par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            let t = if h == 1 {
                0.0
            } else {
                y as f32 / (h - 1) as f32
            };
            let target = Color::lerp(top, bottom, t);
            for px in row.chunks_exact_mut(4) {
                let a = u16::from(px[3]);
                px[0] = mul_div255_u8(u16::from(target.r), a);
                px[1] = mul_div255_u8(u16::from(target.g), a);
                px[2] = mul_div255_u8(u16::from(target.b), a);
            }
        });

    Raster::from_premul_rgba8(artwork.width, artwork.height, data)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/tint.rs"]
mod tests;
