// Text sketch: draws the input text onto the canvas and turns the opaque
// glyph pixels into particles.

use crate::geometry::centered;
use crate::sampler::{text_tier, FieldSampler};
use crate::session::RenderSession;
use crate::sketch::Sketch;

pub struct TextSketch {
    name: String,
}

impl TextSketch {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for TextSketch {
    fn default() -> Self {
        Self::new("text")
    }
}

impl Sketch for TextSketch {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, session: &mut RenderSession) {
        let viewport = session.viewport();
        let tier = text_tier(viewport.width);
        session.resolution = tier.resolution;

        // Visual: the text flashes onto the canvas until the first frame clears it
        session.canvas.clear();
        session.canvas.fill_text(
            &session.font,
            &session.text,
            centered(0.0, viewport.width as f32),
            centered(0.0, viewport.height as f32),
            tier.font_size,
            session.text_color,
        );

        let sampler = FieldSampler::new(viewport, tier.resolution, session.alpha_threshold, session.grid_bounds)
            .with_radius(Some(tier.radius_max / 1.5), Some(tier.radius_max));
        let particles = sampler.sample(session.canvas.image_data(), viewport, &mut session.rng);
        session.replace_particles(particles);
    }
}
