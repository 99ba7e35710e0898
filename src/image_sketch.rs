// Image sketch: fits the uploaded image into the middle of the canvas and
// samples it the same way the text sketch samples glyphs.

use crate::geometry::{centered_origin, fit_dimension};
use crate::loader::DecodedImage;
use crate::sampler::{image_tier, FieldSampler};
use crate::session::RenderSession;
use crate::sketch::Sketch;
use crate::sniff::ImageKind;

pub struct ImageSketch {
    name: String,
    image: Option<DecodedImage>,
}

impl ImageSketch {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), image: None }
    }

    /// Type of the image currently shown, if any.
    pub fn image_kind(&self) -> Option<ImageKind> {
        self.image.as_ref().map(|i| i.kind)
    }

    /// Draw the image centered, scaled to the tier's max width.
    /// Returns false when there is nothing to draw.
    fn render(&self, session: &mut RenderSession, max_width: f32) -> bool {
        let Some(image) = &self.image else {
            return false;
        };
        let (w, h) = image.pixels.dimensions();
        let Some((dw, dh)) = fit_dimension(w, h, max_width) else {
            return false;
        };
        let viewport = session.viewport();
        let (x, y) = centered_origin(viewport.width, viewport.height, dw, dh);
        session.canvas.draw_image(&image.pixels, x, y, dw.round() as u32, dh.round() as u32);
        true
    }
}

impl Default for ImageSketch {
    fn default() -> Self {
        Self::new("image")
    }
}

impl Sketch for ImageSketch {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, session: &mut RenderSession) {
        let viewport = session.viewport();
        let tier = image_tier(viewport.width);
        session.resolution = tier.resolution;
        session.canvas.clear();

        if !self.render(session, tier.max_width) {
            log::debug!("image sketch has nothing to draw yet");
            session.replace_particles(Vec::new());
            return;
        }

        let sampler = FieldSampler::new(viewport, tier.resolution, session.alpha_threshold, session.grid_bounds)
            .with_radius(Some(tier.radius_min), None);
        let particles = sampler.sample(session.canvas.image_data(), viewport, &mut session.rng);
        session.replace_particles(particles);
    }

    fn accepts_images(&self) -> bool {
        true
    }

    fn load_image(&mut self, image: DecodedImage) {
        self.image = Some(image);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::font::TextFont;
    use crate::types::Viewport;
    use image::{Rgba, RgbaImage};

    fn session(width: u32, height: u32) -> RenderSession {
        let config = Config { seed: Some(5), ..Config::default() };
        RenderSession::new(Viewport::new(width, height), &config, TextFont::Bitmap)
    }

    fn solid(w: u32, h: u32, px: [u8; 4]) -> DecodedImage {
        DecodedImage { kind: ImageKind::Png, pixels: RgbaImage::from_pixel(w, h, Rgba(px)) }
    }

    #[test]
    fn no_image_no_particles() {
        let mut s = session(1280, 720);
        let mut sketch = ImageSketch::default();
        sketch.initialize(&mut s);
        assert_eq!(s.particle_count, 0);
        assert_eq!(s.resolution, 90);
        assert_eq!(sketch.image_kind(), None);
    }

    #[test]
    fn opaque_image_spawns_colored_particles() {
        let mut s = session(1280, 720);
        let mut sketch = ImageSketch::default();
        sketch.load_image(solid(100, 50, [10, 200, 30, 255]));
        sketch.initialize(&mut s);

        assert!(s.particle_count > 0);
        assert_eq!(sketch.image_kind(), Some(ImageKind::Png));
        // fitted to 1280/1.8 wide, half as tall, centered
        let w = 1280.0 / 1.8;
        let (x0, y0) = (640.0 - w / 2.0 - 1.0, 360.0 - w / 4.0 - 1.0);
        for p in &s.particles {
            assert!(p.point_x >= x0 && p.point_x <= 1280.0 - x0);
            assert!(p.point_y >= y0 && p.point_y <= 720.0 - y0);
            assert_eq!(p.color.to_string(), "rgba(10,200,30,1)");
            assert!((10.0..=15.0).contains(&p.radius()));
        }
    }

    #[test]
    fn transparent_image_spawns_nothing() {
        let mut s = session(800, 600);
        let mut sketch = ImageSketch::default();
        sketch.load_image(solid(40, 40, [255, 255, 255, 0]));
        sketch.initialize(&mut s);
        assert_eq!(s.particle_count, 0);
    }

    #[test]
    fn portrait_image_fills_height_of_box() {
        let mut s = session(600, 600);
        let mut sketch = ImageSketch::default();
        sketch.load_image(solid(50, 100, [0, 0, 0, 255]));
        sketch.initialize(&mut s);
        // max size 400: 200 x 400 box centered at (300,300)
        assert!(s.particles.iter().all(|p| p.point_x >= 199.0 && p.point_x <= 401.0));
        assert!(s.particles.iter().any(|p| p.point_y < 150.0));
    }
}
