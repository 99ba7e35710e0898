// The render session: every piece of state the sketches and the frame loop
// share, in one place. Only the frame-loop thread ever touches it.

use crate::canvas::Canvas;
use crate::config::Config;
use crate::font::TextFont;
use crate::particle::Particle;
use crate::sampler::GridBounds;
use crate::types::{Color, Pointer, Viewport};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// One edit coming from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    /// Arrow keys: caret movement only, never a refresh.
    Navigate,
}

pub struct RenderSession {
    pub canvas: Canvas,
    pub pointer: Pointer,
    pub particles: Vec<Particle>,
    /// Number of live particles; the frame tick walks exactly this many.
    pub particle_count: usize,
    pub resolution: u32,
    pub alpha_threshold: u8,
    pub grid_bounds: GridBounds,
    pub jitter: f32,
    pub repel_radius: f32,
    /// Contents of the text input.
    pub text: String,
    pub text_color: Color,
    pub font: TextFont,
    pub rng: StdRng,
}

impl RenderSession {
    pub fn new(viewport: Viewport, config: &Config, font: TextFont) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            canvas: Canvas::new(viewport.width, viewport.height),
            pointer: Pointer::default(),
            particles: Vec::new(),
            particle_count: 0,
            resolution: 0,
            alpha_threshold: config.alpha_threshold,
            grid_bounds: config.grid_bounds,
            jitter: config.jitter,
            repel_radius: config.repel_radius,
            text: config.initial_text.clone(),
            text_color: Color::from_u32(config.text_color),
            font,
            rng,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.canvas.viewport()
    }

    /// Follow the window. Returns true when the size actually changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.viewport() == Viewport::new(width, height) {
            return false;
        }
        self.canvas.resize(width, height);
        true
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Pointer { x, y };
    }

    /// Drop the old field wholesale and install a new one.
    pub fn replace_particles(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
        self.particle_count = self.particles.len();
    }

    /// Apply a keyboard edit to the text input.
    /// Returns true when the text changed and the field should be rebuilt.
    pub fn edit_text(&mut self, edit: TextEdit) -> bool {
        match edit {
            TextEdit::Insert(ch) if !ch.is_control() => {
                self.text.push(ch);
                true
            }
            TextEdit::Backspace => self.text.pop().is_some(),
            TextEdit::Insert(_) | TextEdit::Navigate => false,
        }
    }

    /// One animation frame: clear, then for every particle draw, repel from
    /// the pointer and jitter. Repulsion and jitter land after the dot has
    /// been painted, so they only show on the next frame.
    pub fn tick(&mut self) {
        let Self { canvas, particles, particle_count, pointer, jitter, repel_radius, rng, .. } = self;
        canvas.clear();
        for particle in particles.iter_mut().take(*particle_count) {
            particle.draw(canvas);
            particle.push_from_point(pointer.x, pointer.y, *repel_radius);
            particle.vibrate(*jitter, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> RenderSession {
        let config = Config { seed: Some(1), ..Config::default() };
        RenderSession::new(Viewport::new(200, 100), &config, TextFont::Bitmap)
    }

    #[test]
    fn text_edits() {
        let mut s = session();
        s.text.clear();
        assert!(s.edit_text(TextEdit::Insert('H')));
        assert!(s.edit_text(TextEdit::Insert('i')));
        assert!(!s.edit_text(TextEdit::Insert('\r')));
        assert!(!s.edit_text(TextEdit::Navigate));
        assert_eq!(s.text, "Hi");
        assert!(s.edit_text(TextEdit::Backspace));
        assert!(s.edit_text(TextEdit::Backspace));
        assert!(!s.edit_text(TextEdit::Backspace));
        assert!(s.text.is_empty());
    }

    #[test]
    fn resize_reports_change() {
        let mut s = session();
        assert!(!s.resize(200, 100));
        assert!(s.resize(300, 100));
        assert_eq!(s.viewport(), Viewport::new(300, 100));
    }

    #[test]
    fn tick_paints_particles() {
        let mut s = session();
        let p = Particle::new((100.0, 50.0), (100.0, 50.0), Some(4.0), Some(4.0), &mut s.rng);
        s.replace_particles(vec![p]);
        assert_eq!(s.particle_count, 1);
        s.tick();
        assert!(s.canvas.image_data().iter().any(|&b| b != 0));
    }

    #[test]
    fn repulsion_shows_one_frame_late() {
        let mut near = session();
        let mut far = session();
        let a = Particle::new((100.0, 50.0), (100.0, 50.0), Some(2.0), Some(2.0), &mut near.rng);
        let b = Particle::new((100.0, 50.0), (100.0, 50.0), Some(2.0), Some(2.0), &mut far.rng);
        near.replace_particles(vec![a]);
        far.replace_particles(vec![b]);
        near.set_pointer(100.0, 50.0);
        far.set_pointer(-1000.0, -1000.0);

        near.tick();
        far.tick();

        // the painted frame is the same: the kick came after the draw
        assert_eq!(near.canvas.image_data(), far.canvas.image_data());
        // but the particle already moves differently for the next frame
        assert_ne!(near.particles[0].vel_x, far.particles[0].vel_x);
    }
}
