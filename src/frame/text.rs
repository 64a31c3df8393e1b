use crate::{
    foundation::{
        color::Color,
        error::{QuirlError, QuirlResult},
    },
    render::surface::Surface,
};

/// RGBA8 brush color carried through Parley label layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LabelBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Color> for LabelBrush {
    fn from(value: Color) -> Self {
        Self {
            r: value.r,
            g: value.g,
            b: value.b,
            a: 255,
        }
    }
}

/// A measured, possibly truncated, single-line label layout.
pub(crate) struct LabelLayout {
    pub layout: parley::Layout<LabelBrush>,
    /// Widest line advance, px.
    pub width: f64,
    /// Total line height, px.
    pub height: f64,
    /// Whether the text was truncated to fit.
    pub truncated: bool,
}

impl std::fmt::Debug for LabelLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelLayout")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("truncated", &self.truncated)
            .finish_non_exhaustive()
    }
}

/// Stateful helper building Parley label layouts from raw font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<LabelBrush>,
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape `text` at `size_px`, truncating with an ellipsis once the
    /// advance exceeds `max_width` (labels are one line, never wrapped).
    pub(crate) fn layout_fitted(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        brush: LabelBrush,
        max_width: f64,
    ) -> QuirlResult<LabelLayout> {
        let layout = self.layout_line(text, font_bytes, size_px, brush)?;
        let (width, height) = measure(&layout);
        if width <= max_width {
            return Ok(LabelLayout {
                layout,
                width,
                height,
                truncated: false,
            });
        }

        let mut kept: Vec<char> = text.chars().collect();
        while kept.pop().is_some() {
            let candidate: String = kept.iter().collect::<String>() + "…";
            let layout = self.layout_line(&candidate, font_bytes, size_px, brush)?;
            let (width, height) = measure(&layout);
            if width <= max_width || kept.is_empty() {
                return Ok(LabelLayout {
                    layout,
                    width,
                    height,
                    truncated: true,
                });
            }
        }

        Err(QuirlError::invalid_input("label text could not be laid out"))
    }

    fn layout_line(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        brush: LabelBrush,
    ) -> QuirlResult<parley::Layout<LabelBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(QuirlError::invalid_input("label size_px must be finite and > 0"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            QuirlError::asset_load("no font families registered from label font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| QuirlError::asset_load("registered label font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<LabelBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Widest line advance and summed line height of a layout, px.
pub(crate) fn measure(layout: &parley::Layout<LabelBrush>) -> (f64, f64) {
    let mut w = 0.0f64;
    let mut h = 0.0f64;
    for line in layout.lines() {
        let m = line.metrics();
        w = w.max(f64::from(m.advance));
        h += f64::from(m.ascent + m.descent + m.leading);
    }
    (w, h)
}

/// Fill a label's glyph runs into `surface` with its top-left at `origin`.
pub(crate) fn draw_label(
    surface: &mut Surface,
    label: &LabelLayout,
    font_bytes: &[u8],
    origin: kurbo::Point,
) {
    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
        0,
    );

    let ctx = surface.ctx();
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));

    for line in label.layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));

            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
}

#[cfg(test)]
#[path = "../../tests/unit/frame/text.rs"]
mod tests;
