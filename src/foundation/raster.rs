use crate::foundation::{
    color::Color,
    error::{QuirlError, QuirlResult},
    math::{lerp_u8, mul_div255_u8},
};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// A width × height premultiplied RGBA8 pixel buffer.
///
/// Every surface the engine mutates is a `Raster`; renderers and the frame
/// compositor hand these around until the output encoder unpremultiplies for
/// serialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Allocate a fully transparent surface.
    pub fn new(width: u32, height: u32) -> QuirlResult<Self> {
        if width == 0 || height == 0 {
            return Err(QuirlError::invalid_input("raster dimensions must be > 0"));
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        })
    }

    /// Wrap an existing premultiplied RGBA8 buffer.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> QuirlResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(QuirlError::invalid_input(
                "raster byte length does not match dimensions",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel bytes, row-major premultiplied RGBA8.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable pixel bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Pixel at (x, y). Out-of-bounds reads return transparent.
    pub fn pixel(&self, x: u32, y: u32) -> PremulRgba8 {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Flood the surface with an opaque color.
    pub fn fill_solid(&mut self, color: Color) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }

    /// Flood the surface with a vertical linear gradient from `top` to
    /// `bottom`, interpolated per row.
    pub fn fill_vertical_gradient(&mut self, top: Color, bottom: Color) {
        let h = self.height.max(1);
        let row_bytes = self.width as usize * 4;
        for (y, row) in self.data.chunks_exact_mut(row_bytes).enumerate() {
            let t = if h == 1 {
                0u16
            } else {
                ((y as u32 * 255) / (h - 1)) as u16
            };
            let px = [
                lerp_u8(top.r, bottom.r, t),
                lerp_u8(top.g, bottom.g, t),
                lerp_u8(top.b, bottom.b, t),
                255,
            ];
            for out in row.chunks_exact_mut(4) {
                out.copy_from_slice(&px);
            }
        }
    }

    /// Blend `src` over this surface with its top-left corner at (x, y).
    ///
    /// Source pixels falling outside the destination are dropped; the source
    /// is never resampled.
    pub fn blit_over(&mut self, src: &Raster, x: i64, y: i64) {
        for sy in 0..src.height {
            let dy = y + i64::from(sy);
            if dy < 0 || dy >= i64::from(self.height) {
                continue;
            }
            for sx in 0..src.width {
                let dx = x + i64::from(sx);
                if dx < 0 || dx >= i64::from(self.width) {
                    continue;
                }
                let s = src.pixel(sx, sy);
                if s[3] == 0 {
                    continue;
                }
                let di = (dy as usize * self.width as usize + dx as usize) * 4;
                let d = [
                    self.data[di],
                    self.data[di + 1],
                    self.data[di + 2],
                    self.data[di + 3],
                ];
                self.data[di..di + 4].copy_from_slice(&over(d, s));
            }
        }
    }

    /// Knock out this surface wherever `mask` is opaque (destination-out):
    /// each pixel is scaled by the inverse of the mask alpha.
    pub fn erase(&mut self, mask: &Raster) {
        let w = self.width.min(mask.width);
        let h = self.height.min(mask.height);
        for y in 0..h {
            for x in 0..w {
                let inv = 255u16 - u16::from(mask.pixel(x, y)[3]);
                let i = (y as usize * self.width as usize + x as usize) * 4;
                for c in 0..4 {
                    self.data[i + c] = mul_div255_u8(u16::from(self.data[i + c]), inv);
                }
            }
        }
    }

    /// Convert to straight (non-premultiplied) RGBA8 bytes.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            if a == 0 {
                px[0] = 0;
                px[1] = 0;
                px[2] = 0;
                continue;
            }
            if a == 255 {
                continue;
            }
            let a32 = u32::from(a);
            for c in px.iter_mut().take(3) {
                *c = ((u32::from(*c) * 255 + a32 / 2) / a32).min(255) as u8;
            }
        }
        out
    }
}

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Premultiply a straight RGBA8 buffer in place.
pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = mul_div255_u8(u16::from(px[0]), a);
        px[1] = mul_div255_u8(u16::from(px[1]), a);
        px[2] = mul_div255_u8(u16::from(px[2]), a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/raster.rs"]
mod tests;
