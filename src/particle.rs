// Spring particles: each one settles toward a target point, trembles around it
// and gets shoved away by the pointer. Fully software-drawn onto the Canvas.

use crate::canvas::Canvas;
use crate::types::Color;
use rand::Rng;

/// Radius the driver passes to [`Particle::push_from_point`].
pub const DEFAULT_REPEL_RADIUS: f32 = 100.0;
/// Jitter used when `vibrate` is given a non-positive amount.
pub const DEFAULT_VIBRATION: f32 = 10.0;

/// Uniform value between two bounds (swapped if reversed). Never panics on an
/// empty range, unlike `gen_range`.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    let (lo, hi) = if min > max { (max, min) } else { (min, max) };
    rng.r#gen::<f32>() * (hi - lo) + lo
}

/// One particle. Visual: a filled dot that eases toward its target.
#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub acc_x: f32,
    pub acc_y: f32,
    pub point_x: f32,
    pub point_y: f32,
    friction: f32,
    strength: f32,
    radius: f32,
    pub color: Color,
}

impl Particle {
    /// Spawn at `start` heading for `target`. Friction, strength and the
    /// initial kick are random; radius is drawn once from `[radius_min, radius_max]`.
    pub fn new<R: Rng + ?Sized>(
        target: (f32, f32),
        start: (f32, f32),
        radius_min: Option<f32>,
        radius_max: Option<f32>,
        rng: &mut R,
    ) -> Self {
        let mut p = Self {
            x: start.0,
            y: start.1,
            vel_x: random_between(rng, 5.0, 15.0),
            vel_y: random_between(rng, 5.0, 15.0),
            acc_x: 0.0,
            acc_y: 0.0,
            point_x: target.0,
            point_y: target.1,
            friction: random_between(rng, 0.8, 0.98),
            strength: random_between(rng, 50.0, 90.0),
            radius: 0.0,
            color: Color::STEELBLUE,
        };
        p.set_radius(radius_min, radius_max, rng);
        p
    }

    pub fn friction(&self) -> f32 { self.friction }
    pub fn strength(&self) -> f32 { self.strength }
    pub fn radius(&self) -> f32 { self.radius }

    /// Pick a new radius. A missing bound is derived from the other one
    /// (min = max/1.5, max = min*1.5); with both missing the radius is 0.
    pub fn set_radius<R: Rng + ?Sized>(&mut self, min: Option<f32>, max: Option<f32>, rng: &mut R) {
        let (min, max) = match (min, max) {
            (Some(min), Some(max)) => (min, max),
            (None, Some(max)) => (max / 1.5, max),
            (Some(min), None) => (min, min * 1.5),
            (None, None) => (0.0, 0.0),
        };
        self.radius = random_between(rng, min, max);
    }

    /// Spring toward (tx,ty), damp, integrate.
    #[inline]
    fn seek(&mut self, tx: f32, ty: f32) {
        self.acc_x = (tx - self.x) / self.strength;
        self.acc_y = (ty - self.y) / self.strength;
        self.vel_x += self.acc_x;
        self.vel_y += self.acc_y;

        // friction < 1, so velocity decays without new forces
        self.vel_x *= self.friction;
        self.vel_y *= self.friction;

        self.x += self.vel_x;
        self.y += self.vel_y;
    }

    /// Advance one frame toward the target, then paint the dot.
    /// Visual: the dot is drawn where it lands this frame.
    pub fn draw(&mut self, canvas: &mut Canvas) {
        self.seek(self.point_x, self.point_y);
        canvas.fill_circle(self.x, self.y, self.radius, self.color);
    }

    /// Same motion as `draw`, but the target is nudged by up to `amount` on each axis.
    /// Visual: the resting dot trembles.
    pub fn vibrate<R: Rng + ?Sized>(&mut self, amount: f32, rng: &mut R) {
        let amount = if amount > 0.0 { amount } else { DEFAULT_VIBRATION };
        let tx = self.point_x - random_between(rng, -amount, amount);
        let ty = self.point_y - random_between(rng, -amount, amount);
        self.seek(tx, ty);
    }

    /// Shift the target by (dx,dy).
    pub fn move_to(&mut self, dx: f32, dy: f32) {
        self.point_x += dx;
        self.point_y += dy;
    }

    /// Kick away from (px,py) when closer than `radius`. The radius only gates
    /// the kick; its size depends on distance and strength, not on a falloff.
    pub fn push_from_point(&mut self, px: f32, py: f32, radius: f32) {
        let dx = self.x - px;
        let dy = self.y - py;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance < radius {
            self.acc_x = dx / self.strength / 3.0;
            self.acc_y = dy / self.strength / 3.0;
            self.vel_x += self.acc_x;
            self.vel_y += self.acc_y;
        }
    }

    pub fn speed(&self) -> f32 {
        (self.vel_x * self.vel_x + self.vel_y * self.vel_y).sqrt()
    }
}
