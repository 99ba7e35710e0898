// Text rasterization for the text sketch and the HUD.
// Two backends: the built-in 5x7 bitmap font (scaled up in whole-pixel
// blocks, so every covered pixel is fully opaque) and an optional TrueType
// font loaded through rusttype.

use crate::canvas::Canvas;
use crate::error::Error;
use crate::types::Color;
use rusttype::{point, Font, Scale};
use std::path::Path;

/// Glyph cell size of the bitmap font, and its horizontal advance.
pub const GLYPH_W: i32 = 5;
pub const GLYPH_H: i32 = 7;
pub const GLYPH_ADVANCE: i32 = 6;

/// Return a 5x7 glyph bitmap for printable ASCII.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
pub fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b10001,0b01010,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Lowercase
        'a' => g!(0b00000,0b00000,0b01110,0b00001,0b01111,0b10001,0b01111),
        'b' => g!(0b10000,0b10000,0b10110,0b11001,0b10001,0b10001,0b11110),
        'c' => g!(0b00000,0b00000,0b01110,0b10000,0b10000,0b10001,0b01110),
        'd' => g!(0b00001,0b00001,0b01101,0b10011,0b10001,0b10001,0b01111),
        'e' => g!(0b00000,0b00000,0b01110,0b10001,0b11111,0b10000,0b01110),
        'f' => g!(0b00110,0b01001,0b01000,0b11100,0b01000,0b01000,0b01000),
        'g' => g!(0b00000,0b01111,0b10001,0b10001,0b01111,0b00001,0b01110),
        'h' => g!(0b10000,0b10000,0b10110,0b11001,0b10001,0b10001,0b10001),
        'i' => g!(0b00100,0b00000,0b01100,0b00100,0b00100,0b00100,0b01110),
        'j' => g!(0b00010,0b00000,0b00110,0b00010,0b00010,0b10010,0b01100),
        'k' => g!(0b10000,0b10000,0b10010,0b10100,0b11000,0b10100,0b10010),
        'l' => g!(0b01100,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'm' => g!(0b00000,0b00000,0b11010,0b10101,0b10101,0b10001,0b10001),
        'n' => g!(0b00000,0b00000,0b10110,0b11001,0b10001,0b10001,0b10001),
        'o' => g!(0b00000,0b00000,0b01110,0b10001,0b10001,0b10001,0b01110),
        'p' => g!(0b00000,0b00000,0b11110,0b10001,0b11110,0b10000,0b10000),
        'q' => g!(0b00000,0b00000,0b01101,0b10011,0b01111,0b00001,0b00001),
        'r' => g!(0b00000,0b00000,0b10110,0b11001,0b10000,0b10000,0b10000),
        's' => g!(0b00000,0b00000,0b01110,0b10000,0b01110,0b00001,0b11110),
        't' => g!(0b01000,0b01000,0b11100,0b01000,0b01000,0b01001,0b00110),
        'u' => g!(0b00000,0b00000,0b10001,0b10001,0b10001,0b10011,0b01101),
        'v' => g!(0b00000,0b00000,0b10001,0b10001,0b10001,0b01010,0b00100),
        'w' => g!(0b00000,0b00000,0b10001,0b10001,0b10101,0b10101,0b01010),
        'x' => g!(0b00000,0b00000,0b10001,0b01010,0b00100,0b01010,0b10001),
        'y' => g!(0b00000,0b00000,0b10001,0b10001,0b01111,0b00001,0b01110),
        'z' => g!(0b00000,0b00000,0b11111,0b00010,0b00100,0b01000,0b11111),

        // Punctuation
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '"' => g!(0b01010,0b01010,0b01010,0b00000,0b00000,0b00000,0b00000),
        '#' => g!(0b01010,0b01010,0b11111,0b01010,0b11111,0b01010,0b01010),
        '$' => g!(0b00100,0b01111,0b10100,0b01110,0b00101,0b11110,0b00100),
        '%' => g!(0b11000,0b11001,0b00010,0b00100,0b01000,0b10011,0b00011),
        '&' => g!(0b01100,0b10010,0b10100,0b01000,0b10101,0b10010,0b01101),
        '\'' => g!(0b01100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),
        '*' => g!(0b00000,0b00100,0b10101,0b01110,0b10101,0b00100,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b01100,0b00100,0b01000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b01100,0b01100),
        '/' => g!(0b00000,0b00001,0b00010,0b00100,0b01000,0b10000,0b00000),
        ':' => g!(0b00000,0b01100,0b01100,0b00000,0b01100,0b01100,0b00000),
        ';' => g!(0b00000,0b01100,0b01100,0b00000,0b01100,0b00100,0b01000),
        '<' => g!(0b00010,0b00100,0b01000,0b10000,0b01000,0b00100,0b00010),
        '=' => g!(0b00000,0b00000,0b11111,0b00000,0b11111,0b00000,0b00000),
        '>' => g!(0b01000,0b00100,0b00010,0b00001,0b00010,0b00100,0b01000),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),
        '@' => g!(0b01110,0b10001,0b00001,0b01101,0b10101,0b10101,0b01110),
        '[' => g!(0b01110,0b01000,0b01000,0b01000,0b01000,0b01000,0b01110),
        '\\' => g!(0b00000,0b10000,0b01000,0b00100,0b00010,0b00001,0b00000),
        ']' => g!(0b01110,0b00010,0b00010,0b00010,0b00010,0b00010,0b01110),
        '^' => g!(0b00100,0b01010,0b10001,0b00000,0b00000,0b00000,0b00000),
        '_' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b11111),
        '`' => g!(0b01000,0b00100,0b00010,0b00000,0b00000,0b00000,0b00000),
        '{' => g!(0b00010,0b00100,0b00100,0b01000,0b00100,0b00100,0b00010),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        '}' => g!(0b01000,0b00100,0b00100,0b00010,0b00100,0b00100,0b01000),
        '~' => g!(0b00000,0b00000,0b01000,0b10101,0b00010,0b00000,0b00000),

        _ => None,
    }
}

/// The font the text sketch rasterizes with.
pub enum TextFont {
    Bitmap,
    TrueType(Font<'static>),
}

impl TextFont {
    /// Load a .ttf/.otf file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let bytes = std::fs::read(path)
            .map_err(|e| Error::FontLoad(format!("{}: {e}", path.display())))?;
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| Error::FontLoad(format!("{}: not a TrueType font", path.display())))?;
        Ok(TextFont::TrueType(font))
    }

    /// Advance of one character as a fraction of the font size, about what a
    /// proportional sans font averages.
    pub const BITMAP_EM_ADVANCE: f32 = 0.55;

    /// Block size the bitmap font is scaled by for a given font size in px.
    /// One glyph cell (5 dots + 1 gap) spans `BITMAP_EM_ADVANCE` em.
    pub fn bitmap_scale(size: f32) -> i32 {
        ((size * Self::BITMAP_EM_ADVANCE / GLYPH_ADVANCE as f32).round() as i32).max(1)
    }

    /// Rendered width of `text` in pixels.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        match self {
            TextFont::Bitmap => {
                let n = text.chars().count() as i32;
                if n == 0 {
                    return 0.0;
                }
                let s = Self::bitmap_scale(size);
                ((n * GLYPH_ADVANCE - (GLYPH_ADVANCE - GLYPH_W)) * s) as f32
            }
            TextFont::TrueType(font) => {
                let scale = Scale::uniform(size);
                font.layout(text, scale, point(0.0, 0.0))
                    .last()
                    .map_or(0.0, |g| g.position().x + g.unpositioned().h_metrics().advance_width)
            }
        }
    }

    /// Draw `text` centered on `x` with its baseline at `y`.
    pub fn fill_text(&self, canvas: &mut Canvas, text: &str, x: f32, y: f32, size: f32, color: Color) {
        let start_x = x - self.measure(text, size) / 2.0;
        match self {
            TextFont::Bitmap => {
                let s = Self::bitmap_scale(size);
                let top = y.round() as i32 - GLYPH_H * s;
                let a = color.alpha_u8();
                let mut pen = start_x.round() as i32;
                for ch in text.chars() {
                    if let Some(rows) = glyph5x7(ch) {
                        for (ry, rowbits) in rows.iter().enumerate() {
                            for rx in 0..GLYPH_W {
                                if (rowbits & (1 << (4 - rx))) == 0 {
                                    continue;
                                }
                                // one glyph cell = an s x s block
                                let bx = pen + rx * s;
                                let by = top + ry as i32 * s;
                                for py in by..by + s {
                                    for px in bx..bx + s {
                                        canvas.blend_pixel(px, py, color.r, color.g, color.b, a);
                                    }
                                }
                            }
                        }
                    }
                    pen += GLYPH_ADVANCE * s;
                }
            }
            TextFont::TrueType(font) => {
                let scale = Scale::uniform(size);
                for glyph in font.layout(text, scale, point(start_x, y)) {
                    if let Some(bb) = glyph.pixel_bounding_box() {
                        glyph.draw(|gx, gy, coverage| {
                            let a = (coverage * color.a.clamp(0.0, 1.0) as f32 * 255.0).round().clamp(0.0, 255.0) as u8;
                            canvas.blend_pixel(bb.min.x + gx as i32, bb.min.y + gy as i32, color.r, color.g, color.b, a);
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::pixel_offset;

    #[test]
    fn printable_ascii_has_glyphs() {
        for ch in ' '..='~' {
            assert!(glyph5x7(ch).is_some(), "missing glyph for {ch:?}");
        }
        assert!(glyph5x7('é').is_none());
    }

    #[test]
    fn glyph_rows_fit_five_bits() {
        for ch in ' '..='~' {
            let rows = glyph5x7(ch).unwrap();
            assert!(rows.iter().all(|r| *r < 32), "{ch:?}");
        }
    }

    #[test]
    fn bitmap_measure() {
        // 8px -> scale 1: "Hi" = 2*6 - 1 = 11
        assert_eq!(TextFont::Bitmap.measure("Hi", 8.0), 11.0);
        // 160px -> 160 * 0.55 / 6 = 14.67 -> scale 15
        assert_eq!(TextFont::bitmap_scale(160.0), 15);
        assert_eq!(TextFont::Bitmap.measure("Hi", 160.0), 165.0);
        assert_eq!(TextFont::Bitmap.measure("", 16.0), 0.0);
        assert_eq!(TextFont::bitmap_scale(0.0), 1);
    }

    #[test]
    fn bitmap_text_is_opaque_and_centered() {
        let mut c = Canvas::new(40, 20);
        TextFont::Bitmap.fill_text(&mut c, "I", 20.0, 15.0, 8.0, Color::rgb(0xCC, 0xCC, 0xCC));
        // 'I' is 5 wide centered on 20 -> cell columns 18..22, rows 8..14;
        // its top bar covers the middle three columns
        let top_bar = pixel_offset(19, 8, 40);
        assert_eq!(&c.image_data()[top_bar..top_bar + 4], &[0xCC, 0xCC, 0xCC, 255]);
        let stem = pixel_offset(20, 12, 40);
        assert_eq!(c.image_data()[stem + 3], 255);
        let outside = pixel_offset(18, 12, 40);
        assert_eq!(c.image_data()[outside + 3], 0);
    }

    #[test]
    fn missing_font_file_is_font_error() {
        let err = TextFont::load(Path::new("/definitely/not/here.ttf")).err().unwrap();
        assert!(matches!(err, Error::FontLoad(_)));
    }
}
