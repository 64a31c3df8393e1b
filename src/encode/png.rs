use std::{io::Cursor, sync::Arc};

use anyhow::Context;

use crate::foundation::{
    error::{QuirlError, QuirlResult},
    raster::Raster,
};

/// The final composition artifact.
///
/// Both views are produced by one [`encode_raster`] call: `rgba8` (straight
/// alpha) backs live previews, `png` backs downloads and uploads, so the
/// preview and the exported file are pixel-identical by construction.
#[derive(Clone, Debug)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight (non-premultiplied) RGBA8 pixels.
    pub rgba8: Arc<Vec<u8>>,
    /// PNG-encoded bytes with alpha.
    pub png: Arc<Vec<u8>>,
}

/// Serialize a premultiplied raster to the portable output artifact.
///
/// Deterministic and synchronous: a materialized buffer always encodes to
/// the same bytes.
pub fn encode_raster(raster: &Raster) -> QuirlResult<RasterImage> {
    let rgba8 = raster.to_straight_rgba8();
    let img = image::RgbaImage::from_raw(raster.width(), raster.height(), rgba8.clone())
        .ok_or_else(|| QuirlError::invalid_input("raster byte length mismatch"))?;

    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .context("encode composition to png")?;

    Ok(RasterImage {
        width: raster.width(),
        height: raster.height(),
        rgba8: Arc::new(rgba8),
        png: Arc::new(png),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
