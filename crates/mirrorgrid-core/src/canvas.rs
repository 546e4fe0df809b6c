//! Drawing surfaces.
//!
//! The sketch only ever paints rectangles and never reads pixels back, so
//! [`Canvas`] is a single fill operation. [`PixelBuffer`] is the in-memory
//! implementation shared by the window backend and PNG export.

use crate::geom::{Point, Range};
use crate::style::Color;

/// A 2D surface that can fill rectangles.
pub trait Canvas {
    /// Surface size in pixels.
    fn size(&self) -> Point;

    /// Paint `rect` with `color`, blending over existing content when the
    /// colour is translucent. Parts outside the surface are clipped.
    fn fill_rect(&mut self, rect: Range, color: Color);
}

const OPAQUE_BLACK: u32 = 0xFF000000;

/// A CPU pixel buffer of packed `0xAARRGGBB` values, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// A buffer filled with opaque black. Negative sizes are clamped to 0.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0) as usize;
        let height = height.max(0) as usize;
        Self {
            width,
            height,
            pixels: vec![OPAQUE_BLACK; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw `0xAARRGGBB` pixels.
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Colour at `p`, or `None` outside the buffer.
    pub fn pixel(&self, p: Point) -> Option<Color> {
        if p.x < 0 || p.y < 0 || p.x as usize >= self.width || p.y as usize >= self.height {
            return None;
        }
        Some(Color::from_argb(self.pixels[p.y as usize * self.width + p.x as usize]))
    }

    /// Pixels as tightly packed RGBA bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for &argb in &self.pixels {
            let c = Color::from_argb(argb);
            out.extend_from_slice(&[c.r(), c.g(), c.b(), c.a()]);
        }
        out
    }

    fn bounds(&self) -> Range {
        Range::new(0, 0, self.width as i32, self.height as i32)
    }
}

impl Canvas for PixelBuffer {
    fn size(&self) -> Point {
        Point::new(self.width as i32, self.height as i32)
    }

    fn fill_rect(&mut self, rect: Range, color: Color) {
        let clip = rect.intersect(self.bounds());
        if clip.is_empty() || color.a() == 0 {
            return;
        }
        let opaque = color.is_opaque();
        let src = color.to_argb();
        for y in clip.min.y..clip.max.y {
            let row = y as usize * self.width;
            let span = &mut self.pixels[row + clip.min.x as usize..row + clip.max.x as usize];
            if opaque {
                span.fill(src);
            } else {
                for px in span.iter_mut() {
                    *px = blend(*px, color);
                }
            }
        }
    }
}

/// Source-over blend of `src` onto the packed pixel `dst`.
fn blend(dst: u32, src: Color) -> u32 {
    let d = Color::from_argb(dst);
    let a = src.a() as u32;
    let inv_a = 255 - a;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv_a + 127) / 255) as u8;
    let out_a = (a + (d.a() as u32 * inv_a + 127) / 255).min(255) as u8;
    Color::from_rgba(mix(src.r(), d.r()), mix(src.g(), d.g()), mix(src.b(), d.b()), out_a).to_argb()
}
