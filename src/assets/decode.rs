use std::sync::Arc;

use anyhow::Context;

use crate::foundation::{
    error::{QuirlError, QuirlResult},
    raster::premultiply_rgba8_in_place,
};

/// Decoded frame artwork in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct Artwork {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode artwork bytes by file extension: SVG is parsed and rendered at its
/// native size, anything else goes through the raster codecs.
pub fn decode_artwork(path_hint: &str, bytes: &[u8]) -> QuirlResult<Artwork> {
    if path_hint.rsplit('.').next().is_some_and(|ext| ext.eq_ignore_ascii_case("svg")) {
        rasterize_svg(bytes)
    } else {
        decode_raster_image(bytes)
    }
}

/// Decode encoded raster bytes and convert to premultiplied RGBA8.
pub fn decode_raster_image(bytes: &[u8]) -> QuirlResult<Artwork> {
    let dyn_img = image::load_from_memory(bytes).context("decode artwork from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(Artwork {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse SVG artwork and render it at its native size.
pub fn rasterize_svg(bytes: &[u8]) -> QuirlResult<Artwork> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg artwork")?;

    let size = tree.size();
    let width = size.width().ceil() as u32;
    let height = size.height().ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| QuirlError::asset_load("svg artwork has a degenerate size"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    // tiny-skia pixmaps are already premultiplied RGBA8.
    Ok(Artwork {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.data().to_vec()),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
