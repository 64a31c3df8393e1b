use crate::foundation::{
    color::Color,
    error::{QuirlError, QuirlResult},
    raster::Raster,
};

/// A CPU draw target: a `vello_cpu` render context over a premultiplied
/// pixmap, read back into a [`Raster`] when finished.
///
/// Vector content (module shapes, frame recipes, glyph runs) is painted
/// through the context onto a transparent target; callers blend the finished
/// raster into their canvas with [`Raster::blit_over`].
pub(crate) struct Surface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl Surface {
    pub(crate) fn new(width: u32, height: u32) -> QuirlResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| QuirlError::invalid_input("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| QuirlError::invalid_input("surface height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(QuirlError::invalid_input("surface dimensions must be > 0"));
        }

        Ok(Self {
            width: width_u16,
            height: height_u16,
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
        })
    }

    pub(crate) fn ctx(&mut self) -> &mut vello_cpu::RenderContext {
        &mut self.ctx
    }

    /// Fill a path in a solid color at full opacity.
    pub(crate) fn fill_path(&mut self, path: &kurbo::BezPath, color: Color) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint_color(color, 255));
        let cpu_path = bezpath_to_cpu(path);
        self.ctx.fill_path(&cpu_path);
    }

    /// Fill an axis-aligned rect in a solid color at full opacity.
    pub(crate) fn fill_rect(&mut self, rect: kurbo::Rect, color: Color) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint_color(color, 255));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Flush pending draws and read the target back as a [`Raster`].
    pub(crate) fn finish(mut self) -> QuirlResult<Raster> {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        Raster::from_premul_rgba8(
            u32::from(self.width),
            u32::from(self.height),
            self.pixmap.data_as_u8_slice().to_vec(),
        )
    }

    /// Draw an image paint scaled into `dst` (used for artwork overlays; the
    /// QR render itself is never resampled and goes through
    /// [`Raster::blit_over`] instead).
    pub(crate) fn draw_image_scaled(
        &mut self,
        src: &Raster,
        dst: kurbo::Rect,
    ) -> QuirlResult<()> {
        let paint = image_paint(src)?;
        let sx = dst.width() / f64::from(src.width());
        let sy = dst.height() / f64::from(src.height());
        let transform = vello_cpu::kurbo::Affine::translate((dst.x0, dst.y0))
            * vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy);

        self.ctx.set_transform(transform);
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(src.width()),
            f64::from(src.height()),
        ));
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

fn image_paint(src: &Raster) -> QuirlResult<vello_cpu::Image> {
    let w: u16 = src
        .width()
        .try_into()
        .map_err(|_| QuirlError::invalid_input("image width exceeds u16"))?;
    let h: u16 = src
        .height()
        .try_into()
        .map_err(|_| QuirlError::invalid_input("image height exceeds u16"))?;

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(src.width() as usize * src.height() as usize);
    for px in src.data().chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(
            vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities),
        )),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

pub(crate) fn paint_color(color: Color, alpha: u8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, alpha)
}

pub(crate) fn rect_to_cpu(r: kurbo::Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub(crate) fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
