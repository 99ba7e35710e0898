// Software 2D render surface.
// Holds an RGBA byte raster (4 bytes per pixel, row-major) and supports the
// handful of primitives the sketches need: clear, filled circle, filled text,
// image blit and pixel readback. `present` packs it into the window buffer.

use crate::font::TextFont;
use crate::pixel::{pixel_offset, CHANNELS};
use crate::types::{Color, FrameBuffer, Viewport};
use image::imageops::{self, FilterType};
use image::RgbaImage;

pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// A fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, data: vec![0u8; width as usize * height as usize * CHANNELS] }
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Resize and clear (like setting a canvas element's width/height).
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(width as usize * height as usize * CHANNELS, 0);
    }

    /// Back to fully transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Pixel readback: the whole raster as RGBA bytes.
    pub fn image_data(&self) -> &[u8] {
        &self.data
    }

    /// Source-over blend one RGBA sample at (x,y); out-of-bounds is ignored.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8, a: u8) {
        if x < 0 || y < 0 || a == 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = pixel_offset(x as usize, y as usize, self.width as usize);
        let dst = &mut self.data[idx..idx + CHANNELS];

        if a == 255 || dst[3] == 0 {
            dst.copy_from_slice(&[r, g, b, a]);
            return;
        }

        let sa = a as f32 / 255.0;
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let mix = |s: u8, d: u8| -> u8 {
            ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a).round().clamp(0.0, 255.0) as u8
        };
        dst[0] = mix(r, dst[0]);
        dst[1] = mix(g, dst[1]);
        dst[2] = mix(b, dst[2]);
        dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    /// Filled disc centered at (cx,cy). A pixel is covered when its center
    /// lies inside the circle.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        if !(radius > 0.0) || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let a = color.alpha_u8();
        let r2 = radius * radius;

        // Scan just the bounding box, clipped to the surface
        let x0 = (cx - radius).floor().max(0.0) as i32;
        let y0 = (cy - radius).floor().max(0.0) as i32;
        let x1 = (cx + radius).ceil().min(self.width as f32) as i32;
        let y1 = (cy + radius).ceil().min(self.height as f32) as i32;

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(x, y, color.r, color.g, color.b, a);
                }
            }
        }
    }

    /// Text centered horizontally on `x`, with its baseline on `y`.
    pub fn fill_text(&mut self, font: &TextFont, text: &str, x: f32, y: f32, size: f32, color: Color) {
        font.fill_text(self, text, x, y, size, color);
    }

    /// Blit `image` scaled to `w`x`h` with its top-left corner at (x,y).
    pub fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32, w: u32, h: u32) {
        if w == 0 || h == 0 || image.width() == 0 || image.height() == 0 {
            return;
        }
        let scaled;
        let src = if image.dimensions() == (w, h) {
            image
        } else {
            scaled = imageops::resize(image, w, h, FilterType::Nearest);
            &scaled
        };

        for (sx, sy, px) in src.enumerate_pixels() {
            let [r, g, b, a] = px.0;
            self.blend_pixel(x + sx as i32, y + sy as i32, r, g, b, a);
        }
    }

    /// Composite the raster over `background` into the window buffer.
    /// The frame buffer is resized to match if needed.
    pub fn present(&self, background: Color, fb: &mut FrameBuffer) {
        if fb.width != self.width as usize || fb.height != self.height as usize {
            fb.resize(self.width as usize, self.height as usize);
        }
        for (dst, src) in fb.pixels.iter_mut().zip(self.data.chunks_exact(CHANNELS)) {
            let a = src[3] as u32;
            let over = |s: u8, d: u8| -> u32 { (s as u32 * a + d as u32 * (255 - a) + 127) / 255 };
            let r = over(src[0], background.r);
            let g = over(src[1], background.g);
            let b = over(src[2], background.b);
            *dst = (r << 16) | (g << 8) | b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn alpha_at(c: &Canvas, x: usize, y: usize) -> u8 {
        c.image_data()[pixel_offset(x, y, c.width() as usize) + 3]
    }

    #[test]
    fn new_canvas_is_transparent() {
        let c = Canvas::new(4, 3);
        assert_eq!(c.image_data().len(), 4 * 3 * 4);
        assert!(c.image_data().iter().all(|&b| b == 0));
    }

    #[test]
    fn circle_covers_center_not_corners() {
        let mut c = Canvas::new(20, 20);
        c.fill_circle(10.0, 10.0, 4.0, Color::rgb(255, 0, 0));
        assert_eq!(alpha_at(&c, 10, 10), 255);
        assert_eq!(alpha_at(&c, 0, 0), 0);
        assert_eq!(alpha_at(&c, 6, 6), 0);
        let i = pixel_offset(10, 10, 20);
        assert_eq!(&c.image_data()[i..i + 4], &[255, 0, 0, 255]);
    }

    #[test]
    fn circle_off_surface_is_clipped() {
        let mut c = Canvas::new(10, 10);
        c.fill_circle(-50.0, -50.0, 5.0, Color::rgb(1, 2, 3));
        c.fill_circle(f32::NAN, 2.0, 5.0, Color::rgb(1, 2, 3));
        assert!(c.image_data().iter().all(|&b| b == 0));
        c.fill_circle(0.0, 0.0, 3.0, Color::rgb(1, 2, 3));
        assert_eq!(alpha_at(&c, 0, 0), 255);
    }

    #[test]
    fn translucent_blend_over_opaque() {
        let mut c = Canvas::new(1, 1);
        c.blend_pixel(0, 0, 0, 0, 0, 255);
        c.blend_pixel(0, 0, 255, 255, 255, 128);
        let px = c.image_data();
        assert_eq!(px[3], 255);
        assert!((126..=130).contains(&px[0]));
    }

    #[test]
    fn draw_image_scales_and_clips() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        let mut c = Canvas::new(10, 10);
        c.draw_image(&img, 8, 8, 4, 4);
        assert_eq!(alpha_at(&c, 9, 9), 255);
        assert_eq!(alpha_at(&c, 7, 7), 0);
    }

    #[test]
    fn present_composites_over_background() {
        let mut c = Canvas::new(2, 1);
        c.blend_pixel(0, 0, 255, 0, 0, 255);
        let mut fb = FrameBuffer::new(0, 0);
        c.present(Color::from_u32(0x0000_00FF), &mut fb);
        assert_eq!((fb.width, fb.height), (2, 1));
        assert_eq!(fb.pixels, vec![0x00FF_0000, 0x0000_00FF]);
    }

    #[test]
    fn clear_and_resize() {
        let mut c = Canvas::new(3, 3);
        c.fill_circle(1.5, 1.5, 2.0, Color::rgb(9, 9, 9));
        c.clear();
        assert!(c.image_data().iter().all(|&b| b == 0));
        c.resize(5, 2);
        assert_eq!(c.viewport(), Viewport::new(5, 2));
        assert_eq!(c.image_data().len(), 40);
    }
}
