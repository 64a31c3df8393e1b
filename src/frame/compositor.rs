use kurbo::Shape;

use crate::{
    assets::decode::Artwork,
    effects::tint::{TintFilter, tint_vertical_gradient},
    foundation::{color::Color, error::QuirlResult, raster::Raster},
    frame::{
        catalog::FrameDescriptor,
        catalog::FrameFamily,
        layout::{self, FrameLayout, PADDING},
        recipe::{PathCmd, build_path},
        text::{LabelBrush, TextLayoutEngine, draw_label},
    },
    render::surface::Surface,
};

/// How the area behind the frame is filled.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum BackgroundMode {
    /// No fill; the canvas stays transparent outside the frame.
    Transparent,
    /// Opaque solid fill.
    Solid {
        /// Fill color.
        color: Color,
    },
    /// Vertical linear gradient.
    Gradient {
        /// Top color.
        top: Color,
        /// Bottom color.
        bottom: Color,
    },
}

impl Default for BackgroundMode {
    fn default() -> Self {
        Self::Solid {
            color: Color::WHITE,
        }
    }
}

/// Result of composing a frame around a QR render.
#[derive(Clone, Debug)]
pub struct ComposedFrame {
    /// The composed canvas.
    pub raster: Raster,
    /// True when some decoration was skipped (missing label font, absent
    /// artwork) and the output is a best-effort rendition.
    pub degraded: bool,
}

/// Font size used for label text.
const LABEL_FONT_SIZE: f32 = 16.0;
/// Vertical padding inside the label button, px.
const BUTTON_PAD_Y: f64 = 4.0;
/// Horizontal padding inside the label button, px.
const BUTTON_PAD_X: f64 = 12.0;

/// Lay out and draw a decorative frame around `qr`.
///
/// The caller resolves the descriptor, loads artwork, and validates colors
/// up front; composition itself is synchronous and deterministic.
pub fn compose_frame(
    qr: &Raster,
    desc: &FrameDescriptor,
    frame_color: Color,
    text: Option<&str>,
    background: &BackgroundMode,
    artwork: Option<&Artwork>,
    tint: &dyn TintFilter,
    label_font: Option<&[u8]>,
) -> QuirlResult<ComposedFrame> {
    let layout = layout::layout(qr.width(), desc.family, text.is_some());
    let mut canvas = Raster::new(layout.canvas_width, layout.canvas_height)?;
    let mut degraded = false;

    match background {
        BackgroundMode::Transparent => {}
        BackgroundMode::Solid { color } => canvas.fill_solid(*color),
        BackgroundMode::Gradient { top, bottom } => canvas.fill_vertical_gradient(*top, *bottom),
    }

    let paint = if desc.supports_color_change {
        frame_color
    } else {
        desc.default_color.unwrap_or(Color::BLACK)
    };

    if desc.family == FrameFamily::Bag {
        draw_bag(&mut canvas, &layout, paint, text, label_font, &mut degraded)?;
    } else if !desc.shape.is_empty() {
        draw_recipe(&mut canvas, &layout, desc, paint)?;
    }

    if let Some(artwork) = artwork {
        let decorated = if desc.supports_color_change {
            tint.tint(artwork, paint)?
        } else {
            Raster::from_premul_rgba8(
                artwork.width,
                artwork.height,
                artwork.rgba8_premul.as_ref().clone(),
            )?
        };
        let mut surface = Surface::new(layout.canvas_width, layout.canvas_height)?;
        surface.draw_image_scaled(&decorated, layout.frame_box)?;
        canvas.blit_over(&surface.finish()?, 0, 0);
    }

    let qr_box = layout::qr_box(layout.frame_box, desc.qr_position);
    let qr_x = (qr_box.x0 + (qr_box.width() - f64::from(qr.width())) * 0.5).round() as i64;
    let qr_y = (qr_box.y0 + (qr_box.height() - f64::from(qr.height())) * 0.5).round() as i64;
    canvas.blit_over(qr, qr_x, qr_y);

    if let (Some(text), Some(band)) = (text, layout.label_band) {
        match label_font {
            Some(font) => {
                canvas = draw_button_label(canvas, &layout, band, text, paint, font)?;
            }
            None => {
                tracing::warn!(frame = %desc.id, "no label font available, skipping label");
                degraded = true;
            }
        }
    }

    Ok(ComposedFrame {
        raster: canvas,
        degraded,
    })
}

/// Paint a recipe-driven frame: fill `shape`, knock out `cutout`, then paint
/// `overlay` on top. All three command lists live in the catalog data.
fn draw_recipe(
    canvas: &mut Raster,
    layout: &FrameLayout,
    desc: &FrameDescriptor,
    paint: Color,
) -> QuirlResult<()> {
    let mut shape_layer = rasterize_recipe(layout, &desc.shape, paint)?;

    if !desc.cutout.is_empty() {
        let mask = rasterize_recipe(layout, &desc.cutout, Color::WHITE)?;
        shape_layer.erase(&mask);
    }

    canvas.blit_over(&shape_layer, 0, 0);

    if !desc.overlay.is_empty() {
        let overlay = rasterize_recipe(layout, &desc.overlay, paint)?;
        canvas.blit_over(&overlay, 0, 0);
    }
    Ok(())
}

/// Rasterize a command list (in frame-box space) onto a transparent canvas.
fn rasterize_recipe(
    layout: &FrameLayout,
    recipe: &[PathCmd],
    paint: Color,
) -> QuirlResult<Raster> {
    let mut path = build_path(recipe, layout.frame_box.width(), layout.frame_box.height());
    path.apply_affine(kurbo::Affine::translate((
        layout.frame_box.x0,
        layout.frame_box.y0,
    )));

    let mut surface = Surface::new(layout.canvas_width, layout.canvas_height)?;
    surface.fill_path(&path, paint);
    surface.finish()
}

/// The one procedural family: a filled body with a protruding handle, a
/// vertical gradient for depth, and the label baked onto the body.
fn draw_bag(
    canvas: &mut Raster,
    layout: &FrameLayout,
    paint: Color,
    text: Option<&str>,
    label_font: Option<&[u8]>,
    degraded: &mut bool,
) -> QuirlResult<()> {
    let body = layout.frame_box;
    let handle = layout
        .handle_band
        .unwrap_or_else(|| kurbo::Rect::new(0.0, 0.0, body.width(), 0.0));

    let mut shape = kurbo::BezPath::new();
    shape.extend(kurbo::RoundedRect::from_rect(body, body.width() * 0.06).to_path(0.025));

    // Handle loop: a rounded ring reaching down into the body top.
    let handle_w = body.width() * 0.42;
    let hx0 = body.x0 + (body.width() - handle_w) * 0.5;
    let outer = kurbo::Rect::new(hx0, handle.y0, hx0 + handle_w, handle.y1 + body.width() * 0.08);
    shape.extend(kurbo::RoundedRect::from_rect(outer, handle.height() * 0.5).to_path(0.025));

    let mut surface = Surface::new(layout.canvas_width, layout.canvas_height)?;
    surface.fill_path(&shape, Color::WHITE);
    let mut bag_layer = surface.finish()?;

    let thickness = handle.height() * 0.35;
    let inner = kurbo::Rect::new(
        outer.x0 + thickness,
        outer.y0 + thickness,
        outer.x1 - thickness,
        handle.y1,
    );
    let mut hole = Surface::new(layout.canvas_width, layout.canvas_height)?;
    hole.fill_path(
        &kurbo::RoundedRect::from_rect(inner, inner.height() * 0.5).to_path(0.025),
        Color::WHITE,
    );
    bag_layer.erase(&hole.finish()?);

    let shaped = Artwork {
        width: bag_layer.width(),
        height: bag_layer.height(),
        rgba8_premul: std::sync::Arc::new(bag_layer.data().to_vec()),
    };
    let gradient = tint_vertical_gradient(&shaped, paint.lighten(0.25), paint.darken(0.15))?;
    canvas.blit_over(&gradient, 0, 0);

    let Some(text) = text else {
        return Ok(());
    };
    let Some(font) = label_font else {
        tracing::warn!("no label font available, skipping baked bag label");
        *degraded = true;
        return Ok(());
    };

    // Baked label: contrasting text on the lower body, no separate button.
    let mut engine = TextLayoutEngine::new();
    let max_width = body.width() - 2.0 * f64::from(PADDING);
    let label = engine.layout_fitted(
        text,
        font,
        LABEL_FONT_SIZE,
        LabelBrush::from(paint.contrasting()),
        max_width,
    )?;

    let origin = kurbo::Point::new(
        body.x0 + (body.width() - label.width) * 0.5,
        body.y1 - f64::from(PADDING) * 0.5 - label.height * 0.5,
    );
    let mut surface = Surface::new(layout.canvas_width, layout.canvas_height)?;
    draw_label(&mut surface, &label, font, origin);
    canvas.blit_over(&surface.finish()?, 0, 0);
    Ok(())
}

/// Rounded button with centered text, below the QR in the label band.
fn draw_button_label(
    mut canvas: Raster,
    layout: &FrameLayout,
    band: kurbo::Rect,
    text: &str,
    paint: Color,
    font: &[u8],
) -> QuirlResult<Raster> {
    let mut engine = TextLayoutEngine::new();
    let max_width = band.width() - 2.0 * f64::from(PADDING) - 2.0 * BUTTON_PAD_X;
    let label = engine.layout_fitted(
        text,
        font,
        LABEL_FONT_SIZE,
        LabelBrush::from(paint.contrasting()),
        max_width,
    )?;

    let button_w = label.width + 2.0 * BUTTON_PAD_X;
    let button_h = (label.height + 2.0 * BUTTON_PAD_Y).min(band.height());
    let bx0 = band.x0 + (band.width() - button_w) * 0.5;
    let by0 = band.y0 + (band.height() - button_h) * 0.5;
    let button = kurbo::Rect::new(bx0, by0, bx0 + button_w, by0 + button_h);

    let mut surface = Surface::new(layout.canvas_width, layout.canvas_height)?;
    surface.fill_path(
        &kurbo::RoundedRect::from_rect(button, button_h * 0.5).to_path(0.025),
        paint,
    );

    let origin = kurbo::Point::new(
        button.x0 + (button.width() - label.width) * 0.5,
        button.y0 + (button.height() - label.height) * 0.5,
    );
    draw_label(&mut surface, &label, font, origin);
    canvas.blit_over(&surface.finish()?, 0, 0);
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/frame/compositor.rs"]
mod tests;
