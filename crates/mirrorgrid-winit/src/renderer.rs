//! Presents the sketch canvas inside a (possibly larger) window surface.
//!
//! The canvas is centred; the rest of the window is filled with a border
//! colour.

use mirrorgrid_core::{PixelBuffer, Point, Range};

const BORDER: u32 = 0xFF202020;

/// Where the canvas lands in a `win_w × win_h` window.
pub(crate) fn canvas_origin(canvas: &PixelBuffer, win_w: usize, win_h: usize) -> Point {
    let x = win_w.saturating_sub(canvas.width()) / 2;
    let y = win_h.saturating_sub(canvas.height()) / 2;
    Point::new(x as i32, y as i32)
}

/// Window-space rectangle occupied by the canvas.
pub(crate) fn canvas_range(canvas: &PixelBuffer, win_w: usize, win_h: usize) -> Range {
    Range::sized(
        canvas_origin(canvas, win_w, win_h),
        canvas.width() as i32,
        canvas.height() as i32,
    )
}

/// Copy the canvas into a softbuffer-style `0x00RRGGBB` surface buffer.
pub(crate) fn blit_to_buffer(canvas: &PixelBuffer, buf: &mut [u32], buf_width: usize, buf_height: usize) {
    let src_w = canvas.width();
    let src_h = canvas.height();
    let origin = canvas_origin(canvas, buf_width, buf_height);
    let (ox, oy) = (origin.x as usize, origin.y as usize);
    let copy_w = src_w.min(buf_width.saturating_sub(ox));
    let copy_h = src_h.min(buf_height.saturating_sub(oy));

    if buf_width > src_w || buf_height > src_h {
        buf.fill(BORDER);
    }

    let pixels = canvas.pixels();
    for y in 0..copy_h {
        let src_start = y * src_w;
        let dst_start = (y + oy) * buf_width + ox;
        let src_end = src_start + copy_w;
        let dst_end = dst_start + copy_w;
        if src_end <= pixels.len() && dst_end <= buf.len() {
            buf[dst_start..dst_end].copy_from_slice(&pixels[src_start..src_end]);
        }
    }
}
