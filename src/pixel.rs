// Reading single RGBA samples out of a raw raster (4 bytes per pixel, row-major).

use crate::types::Color;

/// Bytes per pixel in every raster this crate reads.
pub const CHANNELS: usize = 4;

/// Byte offset of pixel (x,y) in a raster `width` pixels wide.
#[inline]
pub fn pixel_offset(x: usize, y: usize, width: usize) -> usize {
    y * (width * CHANNELS) + x * CHANNELS
}

/// Offsets of the red, green, blue and alpha bytes of pixel (x,y).
#[inline]
pub fn channel_offsets(x: usize, y: usize, width: usize) -> [usize; 4] {
    let base = pixel_offset(x, y, width);
    [base, base + 1, base + 2, base + 3]
}

/// One sampled pixel. Channels are only ever set through [`Pixel::create`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
    red: u8,
    green: u8,
    blue: u8,
    alpha: f64,
}

/// Takes `value` if it lies in [0,255], otherwise 0. NaN counts as missing.
fn checked_channel(value: f64) -> f64 {
    if (0.0..=255.0).contains(&value) { value } else { 0.0 }
}

impl Pixel {
    /// Build a pixel from loosely-typed channel values.
    /// Out-of-range or missing (NaN) values become 0.
    pub fn create(x: u32, y: u32, r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            x,
            y,
            red: checked_channel(r) as u8,
            green: checked_channel(g) as u8,
            blue: checked_channel(b) as u8,
            alpha: checked_channel(a),
        }
    }

    /// Sample (x,y) from `data`. The alpha byte is divided by 255 before it
    /// reaches [`Pixel::create`], so the stored alpha is in [0,1].
    /// Returns `None` when the offset falls outside the buffer.
    pub fn from_raster(x: u32, y: u32, width: u32, data: &[u8]) -> Option<Self> {
        let [r, g, b, a] = channel_offsets(x as usize, y as usize, width as usize);
        let (red, green, blue, alpha) = (*data.get(r)?, *data.get(g)?, *data.get(b)?, *data.get(a)?);
        Some(Self::create(x, y, red as f64, green as f64, blue as f64, alpha as f64 / 255.0))
    }

    pub fn red(&self) -> u8 { self.red }
    pub fn green(&self) -> u8 { self.green }
    pub fn blue(&self) -> u8 { self.blue }
    pub fn alpha(&self) -> f64 { self.alpha }

    /// The fill style a particle spawned from this pixel is drawn with.
    pub fn fill_style(&self) -> Color {
        Color { r: self.red, g: self.green, b: self.blue, a: self.alpha }
    }

    /// `rgba(r,g,b,a)`
    pub fn to_rgba_string(&self) -> String {
        self.fill_style().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_row_major_rgba() {
        assert_eq!(pixel_offset(0, 0, 10), 0);
        assert_eq!(pixel_offset(3, 0, 10), 12);
        assert_eq!(pixel_offset(0, 2, 10), 80);
        assert_eq!(channel_offsets(1, 1, 2), [12, 13, 14, 15]);
    }

    #[test]
    fn channels_in_range_are_kept() {
        let p = Pixel::create(4, 5, 0.0, 128.0, 255.0, 1.0);
        assert_eq!((p.red(), p.green(), p.blue()), (0, 128, 255));
        assert_eq!(p.alpha(), 1.0);
        assert_eq!((p.x, p.y), (4, 5));
    }

    #[test]
    fn out_of_range_or_missing_channels_become_zero() {
        let p = Pixel::create(0, 0, -1.0, 256.0, f64::NAN, 300.0);
        assert_eq!((p.red(), p.green(), p.blue()), (0, 0, 0));
        assert_eq!(p.alpha(), 0.0);
    }

    #[test]
    fn every_channel_stays_within_byte_range() {
        for v in [-1000.0, -0.5, 0.0, 12.7, 254.9, 255.0, 255.1, 1e9, f64::INFINITY] {
            let p = Pixel::create(0, 0, v, v, v, v);
            assert!((0.0..=255.0).contains(&p.alpha()));
            // u8 channels cannot leave the range; make sure bad input maps to 0
            if !(0.0..=255.0).contains(&v) {
                assert_eq!(p.red(), 0);
            }
        }
    }

    #[test]
    fn raster_alpha_is_normalized() {
        // 2x1 raster: opaque red, half-transparent green
        let data = [255, 0, 0, 255, 0, 200, 0, 51];
        let red = Pixel::from_raster(0, 0, 2, &data).unwrap();
        assert_eq!(red.to_rgba_string(), "rgba(255,0,0,1)");
        let green = Pixel::from_raster(1, 0, 2, &data).unwrap();
        assert_eq!(green.green(), 200);
        assert!((green.alpha() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn translucent_alpha_keeps_full_precision() {
        let data = [10, 20, 30, 254];
        let p = Pixel::from_raster(0, 0, 1, &data).unwrap();
        assert_eq!(p.to_rgba_string(), "rgba(10,20,30,0.996078431372549)");
    }

    #[test]
    fn raster_read_past_end_is_none() {
        let data = [0u8; 8];
        assert!(Pixel::from_raster(0, 1, 2, &data).is_none());
    }
}
