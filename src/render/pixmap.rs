use std::sync::Arc;

use crate::foundation::core::{PixelPoint, PixelRect, PixelSize};
use crate::foundation::error::{ThemeFrameError, ThemeFrameResult};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Premultiplied RGBA8 raster, row-major, tightly packed.
///
/// The pixel storage is shared: cloning a `Pixmap` is cheap and mutation copies on write. A 0×0
/// pixmap is the "empty buffer" returned by queries that have nothing to show.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Arc<Vec<u8>>,
}

impl Pixmap {
    /// Allocate a fully transparent pixmap.
    pub fn new(size: PixelSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: Arc::new(vec![0u8; size.area().saturating_mul(4)]),
        }
    }

    /// Allocate a pixmap filled with one premultiplied color.
    pub fn solid(size: PixelSize, color: PremulRgba8) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: Arc::new(color.repeat(size.area())),
        }
    }

    /// Wrap premultiplied RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> ThemeFrameResult<Self> {
        let expected = PixelSize::new(width, height)
            .area()
            .checked_mul(4)
            .ok_or_else(|| ThemeFrameError::validation("pixmap size overflow"))?;
        if data.len() != expected {
            return Err(ThemeFrameError::validation(format!(
                "pixmap expects {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data: Arc::new(data),
        })
    }

    /// Wrap straight-alpha RGBA8 bytes, premultiplying them.
    pub fn from_straight_rgba8(
        width: u32,
        height: u32,
        mut data: Vec<u8>,
    ) -> ThemeFrameResult<Self> {
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul_rgba8(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions.
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    /// Return `true` for the empty buffer (either dimension zero).
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Premultiplied pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read one pixel; `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    fn bounds(&self) -> PixelRect {
        PixelRect::from_size(self.size())
    }

    fn data_mut(&mut self) -> &mut [u8] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Copy `src` to `at`, replacing destination pixels (no blending). Clipped to bounds.
    pub fn draw_source(&mut self, src: &Pixmap, at: PixelPoint) {
        let placed = PixelRect::new(
            at.x,
            at.y,
            crate::foundation::core::clamp_i32(src.width),
            crate::foundation::core::clamp_i32(src.height),
        );
        let clip = placed.intersect(self.bounds());
        if clip.is_empty() {
            return;
        }

        let row_bytes = (clip.width as usize) * 4;
        let sx = (clip.x - at.x) as u32;
        let dst_w = self.width;
        let dst = self.data_mut();
        for y in clip.y..clip.bottom() {
            let sy = (y - at.y) as u32;
            let s = src.index(sx, sy);
            let d = ((y as usize) * (dst_w as usize) + (clip.x as usize)) * 4;
            dst[d..d + row_bytes].copy_from_slice(&src.data[s..s + row_bytes]);
        }
    }

    /// Fill `rect` by repeating `tile` from the rect origin, replacing destination pixels.
    pub fn draw_source_tiled(&mut self, tile: &Pixmap, rect: PixelRect) {
        if tile.is_empty() {
            return;
        }
        let clip = rect.intersect(self.bounds());
        if clip.is_empty() {
            return;
        }

        let tw = tile.width as i32;
        let th = tile.height as i32;
        let dst_w = self.width as usize;
        let dst = self.data_mut();
        for y in clip.y..clip.bottom() {
            let ty = (y - rect.y).rem_euclid(th) as u32;
            let mut x = clip.x;
            while x < clip.right() {
                let tx = (x - rect.x).rem_euclid(tw);
                let run = (tw - tx).min(clip.right() - x) as usize;
                let s = tile.index(tx as u32, ty);
                let d = ((y as usize) * dst_w + (x as usize)) * 4;
                dst[d..d + run * 4].copy_from_slice(&tile.data[s..s + run * 4]);
                x += run as i32;
            }
        }
    }

    /// Blend `src` over this pixmap at `at` (Porter-Duff source-over). Clipped to bounds.
    pub fn draw_over(&mut self, src: &Pixmap, at: PixelPoint) {
        let placed = PixelRect::new(
            at.x,
            at.y,
            crate::foundation::core::clamp_i32(src.width),
            crate::foundation::core::clamp_i32(src.height),
        );
        let clip = placed.intersect(self.bounds());
        if clip.is_empty() {
            return;
        }

        let dst_w = self.width as usize;
        let dst = self.data_mut();
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                let s = src.index((x - at.x) as u32, (y - at.y) as u32);
                let d = ((y as usize) * dst_w + (x as usize)) * 4;
                let sp = [src.data[s], src.data[s + 1], src.data[s + 2], src.data[s + 3]];
                let dp = [dst[d], dst[d + 1], dst[d + 2], dst[d + 3]];
                dst[d..d + 4].copy_from_slice(&over(dp, sp));
            }
        }
    }

    /// Scale every pixel by the alpha of `mask` at the same coordinates.
    ///
    /// This is destination-in when called on the frame and source-in when called on a layer
    /// about to be blended. Pixels outside `mask` bounds become transparent.
    pub fn apply_alpha_mask(&mut self, mask: &Pixmap) {
        let w = self.width;
        let h = self.height;
        let dst = self.data_mut();
        for y in 0..h {
            for x in 0..w {
                let ma = mask.pixel(x, y).map(|p| p[3]).unwrap_or(0);
                if ma == 255 {
                    continue;
                }
                let d = ((y as usize) * (w as usize) + (x as usize)) * 4;
                for c in &mut dst[d..d + 4] {
                    *c = mul_div255(u16::from(*c), u16::from(ma));
                }
            }
        }
    }

    /// Straight-alpha copy of the pixel bytes, suitable for PNG export.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.as_ref().clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    /// Convert to a straight-alpha `image` buffer.
    pub fn to_rgba_image(&self) -> ThemeFrameResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| ThemeFrameError::validation("pixmap does not fit an rgba image"))
    }

    /// Resample to `size` with a triangle filter. Premultiplied data is filtered directly so
    /// transparent pixels do not bleed color.
    pub fn scaled(&self, size: PixelSize) -> Pixmap {
        if size == self.size() {
            return self.clone();
        }
        if size.is_empty() || self.is_empty() {
            return Pixmap::new(size);
        }
        let Some(src) =
            image::RgbaImage::from_raw(self.width, self.height, self.data.as_ref().clone())
        else {
            return Pixmap::new(size);
        };
        let out = image::imageops::resize(
            &src,
            size.width,
            size.height,
            image::imageops::FilterType::Triangle,
        );
        Self {
            width: size.width,
            height: size.height,
            data: Arc::new(out.into_raw()),
        }
    }
}

/// Porter-Duff source-over for premultiplied pixels.
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
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = mul_div255(u16::from(px[0]), a);
        px[1] = mul_div255(u16::from(px[1]), a);
        px[2] = mul_div255(u16::from(px[2]), a);
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pixmap.rs"]
mod tests;
