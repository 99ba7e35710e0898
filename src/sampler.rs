// Field sampler shared by the text and image sketches.
// Walks a sparse grid over the rendered raster and turns every opaque enough
// sample into a particle that flies in from the viewport center.

use crate::particle::Particle;
use crate::pixel::{channel_offsets, Pixel};
use crate::types::Viewport;
use rand::Rng;
use serde::Deserialize;

/// Default alpha threshold: only fully opaque pixels spawn particles.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 255;

/// How far the inner (row) loop of the grid walk runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridBounds {
    /// Rows run to the viewport *width*, as the field has always been
    /// scanned. Rows past the raster are skipped; when the viewport is taller
    /// than wide the bottom part is never sampled.
    #[default]
    Square,
    /// Rows run to the viewport height.
    Viewport,
}

/// Breakpoint settings for the text sketch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextTier {
    pub resolution: u32,
    pub radius_max: f32,
    pub font_size: f32,
}

/// Breakpoint settings for the image sketch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageTier {
    pub resolution: u32,
    pub radius_min: f32,
    pub max_width: f32,
}

/// Denser grids on wide viewports, sparser ones on small screens.
pub fn text_tier(width: u32) -> TextTier {
    let w = width as f32;
    let resolution = if width >= 1200 {
        140
    } else if width >= 700 {
        100
    } else {
        85
    };
    let font_size = if width <= 900 { w / 5.0 } else { w / 8.0 };
    TextTier { resolution, radius_max: w * 0.005, font_size }
}

pub fn image_tier(width: u32) -> ImageTier {
    let w = width as f32;
    if width >= 1200 {
        ImageTier { resolution: 90, radius_min: 10.0, max_width: w / 1.8 }
    } else if width >= 700 {
        ImageTier { resolution: 80, radius_min: 5.0, max_width: w / 1.7 }
    } else {
        ImageTier { resolution: 70, radius_min: 4.0, max_width: w / 1.5 }
    }
}

/// Grid step in pixels: `round(width / resolution)`, never 0.
pub fn grid_step(width: u32, resolution: u32) -> u32 {
    if resolution == 0 {
        return 1;
    }
    ((width as f32 / resolution as f32).round() as u32).max(1)
}

#[derive(Clone, Copy, Debug)]
pub struct FieldSampler {
    pub step: u32,
    pub alpha_threshold: u8,
    pub bounds: GridBounds,
    pub radius_min: Option<f32>,
    pub radius_max: Option<f32>,
}

impl FieldSampler {
    pub fn new(viewport: Viewport, resolution: u32, alpha_threshold: u8, bounds: GridBounds) -> Self {
        Self {
            step: grid_step(viewport.width, resolution),
            alpha_threshold,
            bounds,
            radius_min: None,
            radius_max: None,
        }
    }

    pub fn with_radius(mut self, min: Option<f32>, max: Option<f32>) -> Self {
        self.radius_min = min;
        self.radius_max = max;
        self
    }

    /// Grid coordinates in scan order: column-major, x outer and y inner.
    pub fn grid_points(&self, viewport: Viewport) -> impl Iterator<Item = (u32, u32)> {
        let step = self.step.max(1) as usize;
        let row_limit = match self.bounds {
            GridBounds::Square => viewport.width,
            GridBounds::Viewport => viewport.height,
        };
        (0..viewport.width)
            .step_by(step)
            .flat_map(move |x| (0..row_limit).step_by(step).map(move |y| (x, y)))
    }

    /// Scan `data` (a `viewport`-sized RGBA raster) and build the particle field.
    pub fn sample<R: Rng + ?Sized>(&self, data: &[u8], viewport: Viewport, rng: &mut R) -> Vec<Particle> {
        let start = viewport.center();
        let mut particles = Vec::new();

        for (x, y) in self.grid_points(viewport) {
            let [.., alpha_idx] = channel_offsets(x as usize, y as usize, viewport.width as usize);
            let Some(&alpha) = data.get(alpha_idx) else {
                continue; // past the end of the raster
            };
            if alpha < self.alpha_threshold {
                continue;
            }
            let Some(pixel) = Pixel::from_raster(x, y, viewport.width, data) else {
                continue;
            };
            let mut particle = Particle::new((x as f32, y as f32), start, self.radius_min, self.radius_max, rng);
            particle.color = pixel.fill_style();
            particles.push(particle);
        }

        log::debug!(
            "sampled {} particles (step {}, threshold {}, {:?})",
            particles.len(),
            self.step,
            self.alpha_threshold,
            self.bounds
        );
        particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::pixel_offset;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Transparent raster with an opaque white rectangle [x0,x1) x [y0,y1).
    fn raster_with_rect(w: u32, h: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> Vec<u8> {
        let mut data = vec![0u8; (w * h * 4) as usize];
        for y in y0..y1 {
            for x in x0..x1 {
                let i = pixel_offset(x as usize, y as usize, w as usize);
                data[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
            }
        }
        data
    }

    #[test]
    fn tiers_follow_breakpoints() {
        assert_eq!(text_tier(1280).resolution, 140);
        assert_eq!(text_tier(1200).resolution, 140);
        assert_eq!(text_tier(1199).resolution, 100);
        assert_eq!(text_tier(700).resolution, 100);
        assert_eq!(text_tier(699).resolution, 85);
        assert_eq!(text_tier(800).font_size, 160.0);
        assert_eq!(text_tier(1600).font_size, 200.0);
        assert_eq!(text_tier(1000).radius_max, 5.0);

        assert_eq!(image_tier(1300).resolution, 90);
        assert_eq!(image_tier(900).radius_min, 5.0);
        assert_eq!(image_tier(600).resolution, 70);
        assert_eq!(image_tier(600).max_width, 400.0);
    }

    #[test]
    fn step_is_rounded_and_positive() {
        assert_eq!(grid_step(1280, 140), 9);
        assert_eq!(grid_step(1280, 90), 14);
        assert_eq!(grid_step(10, 140), 1);
        assert_eq!(grid_step(100, 0), 1);
    }

    #[test]
    fn opaque_rectangle_count_matches_grid() {
        let vp = Viewport::new(100, 100);
        let data = raster_with_rect(100, 100, 20, 30, 61, 52);
        let sampler = FieldSampler::new(vp, 10, 255, GridBounds::Square);
        assert_eq!(sampler.step, 10);

        let mut rng = StdRng::seed_from_u64(1);
        let particles = sampler.sample(&data, vp, &mut rng);

        // x in {20,30,40,50,60}, y in {30,40,50}
        assert_eq!(particles.len(), 15);
        for p in &particles {
            assert!((20.0..61.0).contains(&p.point_x));
            assert!((30.0..52.0).contains(&p.point_y));
            assert_eq!((p.x, p.y), (50.0, 50.0));
            assert_eq!(p.color.to_string(), "rgba(255,255,255,1)");
        }
    }

    #[test]
    fn threshold_filters_translucent_pixels() {
        let vp = Viewport::new(20, 20);
        let mut data = raster_with_rect(20, 20, 0, 0, 20, 20);
        // knock (0,0) down to alpha 254
        data[3] = 254;
        let mut rng = StdRng::seed_from_u64(1);
        let strict = FieldSampler::new(vp, 10, 255, GridBounds::Square).sample(&data, vp, &mut rng);
        let loose = FieldSampler::new(vp, 10, 200, GridBounds::Square).sample(&data, vp, &mut rng);
        assert_eq!(loose.len(), 100);
        assert_eq!(strict.len(), 99);
    }

    #[test]
    fn square_bounds_skip_rows_below_width() {
        // Tall viewport, everything opaque: square bounds only reach y < width.
        let vp = Viewport::new(10, 30);
        let data = raster_with_rect(10, 30, 0, 0, 10, 30);
        let mut rng = StdRng::seed_from_u64(1);

        let square = FieldSampler::new(vp, 5, 255, GridBounds::Square).sample(&data, vp, &mut rng);
        assert_eq!(square.len(), 5 * 5);
        assert!(square.iter().all(|p| p.point_y < 10.0));

        let full = FieldSampler::new(vp, 5, 255, GridBounds::Viewport).sample(&data, vp, &mut rng);
        assert_eq!(full.len(), 5 * 15);
    }

    #[test]
    fn square_bounds_on_wide_viewport_stay_in_raster() {
        // Wide viewport: rows past the raster are read past the end and skipped.
        let vp = Viewport::new(30, 10);
        let data = raster_with_rect(30, 10, 0, 0, 30, 10);
        let mut rng = StdRng::seed_from_u64(1);
        let sampler = FieldSampler::new(vp, 10, 255, GridBounds::Square);
        assert_eq!(sampler.step, 3);
        let particles = sampler.sample(&data, vp, &mut rng);
        // 10 columns x rows {0,3,6,9}; rows 12..27 fall past the end
        assert_eq!(particles.len(), 40);
    }

    #[test]
    fn grid_scans_columns_first() {
        let vp = Viewport::new(4, 4);
        let s = FieldSampler::new(vp, 2, 255, GridBounds::Square);
        let pts: Vec<_> = s.grid_points(vp).collect();
        assert_eq!(pts, vec![(0, 0), (0, 2), (2, 0), (2, 2)]);
    }
}
