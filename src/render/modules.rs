use kurbo::Shape;

use crate::{
    foundation::{
        color::Color,
        error::{QuirlError, QuirlResult},
        raster::Raster,
    },
    matrix::model::ModuleMatrix,
    render::surface::Surface,
};

/// Per-module shape painted for dark cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// Full-cell square.
    #[default]
    Square,
    /// Circle, radius 0.40 of the cell.
    Dots,
    /// Square with corner radius 0.20 of the cell.
    Rounded,
    /// Circle, radius 0.45 of the cell.
    Circle,
}

/// Finder-pattern corner treatment.
///
/// Applied only to the three 7×7 finder blocks, located by matrix
/// coordinates; the rest of the render is untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerStyle {
    /// Leave the finder blocks exactly as the pattern painted them.
    #[default]
    Square,
    /// Concentric rounded redraw, corner radius 0.25 of the block.
    Rounded,
    /// Concentric rounded redraw, corner radius 0.45 of the block.
    ExtraRounded,
}

impl CornerStyle {
    fn radius_factor(self) -> Option<f64> {
        match self {
            CornerStyle::Square => None,
            CornerStyle::Rounded => Some(0.25),
            CornerStyle::ExtraRounded => Some(0.45),
        }
    }
}

/// Visual configuration for the module render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StyleConfig {
    /// Dark-module shape.
    pub pattern: Pattern,
    /// Finder-block corner treatment.
    pub corner_style: CornerStyle,
    /// Dark-module color.
    pub foreground: Color,
    /// Light-module / backdrop color.
    pub background: Color,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            pattern: Pattern::Square,
            corner_style: CornerStyle::Square,
            foreground: Color::BLACK,
            background: Color::WHITE,
        }
    }
}

impl StyleConfig {
    /// Build a config from user-supplied hex strings, recovering malformed
    /// colors to the documented defaults.
    pub fn with_colors(
        pattern: Pattern,
        corner_style: CornerStyle,
        foreground: &str,
        background: &str,
    ) -> Self {
        Self {
            pattern,
            corner_style,
            foreground: Color::validate(foreground, Color::BLACK),
            background: Color::validate(background, Color::WHITE),
        }
    }
}

/// Rasterize `matrix` into a `size_px` × `size_px` premultiplied surface.
///
/// Deterministic: identical inputs yield identical buffers.
pub fn render_modules(
    matrix: &ModuleMatrix,
    style: &StyleConfig,
    size_px: u32,
) -> QuirlResult<Raster> {
    if size_px == 0 {
        return Err(QuirlError::invalid_input("render size must be > 0"));
    }

    let n = matrix.side();
    let mut surface = Surface::new(size_px, size_px)?;
    let size = f64::from(size_px);
    surface.fill_rect(kurbo::Rect::new(0.0, 0.0, size, size), style.background);

    let cell = size / n as f64;
    let mut dark = kurbo::BezPath::new();
    for y in 0..n {
        for x in 0..n {
            if !matrix.module(x, y) {
                continue;
            }
            dark.extend(module_shape(style.pattern, x, y, cell));
        }
    }
    surface.fill_path(&dark, style.foreground);

    if let Some(radius_factor) = style.corner_style.radius_factor() {
        redraw_finders(&mut surface, matrix, style, cell, radius_factor);
    }

    surface.finish()
}

fn module_shape(pattern: Pattern, x: usize, y: usize, cell: f64) -> kurbo::BezPath {
    let x0 = x as f64 * cell;
    let y0 = y as f64 * cell;
    let rect = kurbo::Rect::new(x0, y0, x0 + cell, y0 + cell);
    let center = kurbo::Point::new(x0 + cell * 0.5, y0 + cell * 0.5);

    match pattern {
        Pattern::Square => rect.to_path(0.1),
        Pattern::Dots => kurbo::Circle::new(center, cell * 0.40).to_path(0.025),
        Pattern::Rounded => kurbo::RoundedRect::from_rect(rect, cell * 0.20).to_path(0.025),
        Pattern::Circle => kurbo::Circle::new(center, cell * 0.45).to_path(0.025),
    }
}

/// Clear each finder block and redraw it as concentric rounded shapes:
/// a dark 7-block outline ring, a light 5-block gap, a dark 3-block core.
fn redraw_finders(
    surface: &mut Surface,
    matrix: &ModuleMatrix,
    style: &StyleConfig,
    cell: f64,
    radius_factor: f64,
) {
    for region in matrix.finder_regions() {
        let x0 = region.x as f64 * cell;
        let y0 = region.y as f64 * cell;
        let block = region.side as f64 * cell;

        surface.fill_rect(
            kurbo::Rect::new(x0, y0, x0 + block, y0 + block),
            style.background,
        );

        let ring = |inset_modules: f64| -> kurbo::Rect {
            let inset = inset_modules * cell;
            kurbo::Rect::new(x0 + inset, y0 + inset, x0 + block - inset, y0 + block - inset)
        };

        let rounded = |rect: kurbo::Rect| -> kurbo::BezPath {
            let radius = rect.width() * radius_factor;
            kurbo::RoundedRect::from_rect(rect, radius).to_path(0.025)
        };

        surface.fill_path(&rounded(ring(0.0)), style.foreground);
        surface.fill_path(&rounded(ring(1.0)), style.background);
        surface.fill_path(&rounded(ring(2.0)), style.foreground);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/modules.rs"]
mod tests;
