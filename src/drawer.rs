// Window + input plumbing around minifb.
// Visual effects provided here:
// 1) A resizable window that shows the canvas.
// 2) Keyboard/mouse state the frame loop turns into sketch commands.
// 3) A tiny 5x7 HUD line drawn straight into the frame buffer.

use minifb::{InputCallback, Key, KeyRepeat, MouseMode, Window, WindowOptions};
use particle_sketch::font::{glyph5x7, GLYPH_ADVANCE, GLYPH_W};
use particle_sketch::{Error, FrameBuffer, TextEdit};
use std::cell::RefCell;
use std::rc::Rc;

/// Collects typed characters between frames.
struct CharSink(Rc<RefCell<Vec<char>>>);

impl InputCallback for CharSink {
    fn add_char(&mut self, uni_char: u32) {
        if let Some(ch) = char::from_u32(uni_char) {
            self.0.borrow_mut().push(ch);
        }
    }
}

pub struct Drawer {
    window: Window,
    typed: Rc<RefCell<Vec<char>>>,
}

impl Drawer {
    /// Create a resizable window.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);

        let typed = Rc::new(RefCell::new(Vec::new()));
        window.set_input_callback(Box::new(CharSink(Rc::clone(&typed))));
        Ok(Self { window, typed })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current inner size of the window; changes when the user resizes it.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Mouse position in window pixels, `None` while the pointer is outside.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    fn pressed(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    /// F1: show the text sketch.
    pub fn text_pressed(&self) -> bool { self.pressed(Key::F1) }

    /// F2: show the image sketch.
    pub fn image_pressed(&self) -> bool { self.pressed(Key::F2) }

    /// Tab: next sketch.
    pub fn cycle_pressed(&self) -> bool { self.pressed(Key::Tab) }

    /// Ctrl+O: pick an image file.
    pub fn open_pressed(&self) -> bool {
        let ctrl = self.window.is_key_down(Key::LeftCtrl) || self.window.is_key_down(Key::RightCtrl);
        ctrl && self.pressed(Key::O)
    }

    /// Edits to the text input since the last frame.
    pub fn text_edits(&mut self) -> Vec<TextEdit> {
        let ctrl = self.window.is_key_down(Key::LeftCtrl) || self.window.is_key_down(Key::RightCtrl);
        let mut edits: Vec<TextEdit> = self
            .typed
            .borrow_mut()
            .drain(..)
            .filter(|_| !ctrl)
            .map(TextEdit::Insert)
            .collect();

        for key in self.window.get_keys_pressed(KeyRepeat::Yes) {
            match key {
                Key::Backspace => edits.push(TextEdit::Backspace),
                Key::Left | Key::Right | Key::Up | Key::Down => edits.push(TextEdit::Navigate),
                _ => {}
            }
        }
        edits
    }
}

/* ---------- HUD text straight into the frame buffer ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    fb.pixels[y * fb.width + x] = color;
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel black shadow.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (offset, c) in [(1, 0x0000_0000), (0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..GLYPH_W {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx + offset, y + ry as i32 + offset, c);
                }
            }
        }
    }
}

/// Draw a HUD string using 5x7 glyphs, left to right from (x,y).
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += GLYPH_ADVANCE;
    }
}
