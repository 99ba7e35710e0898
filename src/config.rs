// Runtime settings, optionally read from a JSON file given on the command line.
// Every field has a default, so `{}` is a valid config.

use crate::error::Error;
use crate::particle::DEFAULT_REPEL_RADIUS;
use crate::sampler::{GridBounds, DEFAULT_ALPHA_THRESHOLD};
use crate::sketch::FRAME_JITTER;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub title: String,
    /// Initial window size; the sketches follow the window when it is resized.
    pub width: u32,
    pub height: u32,
    pub initial_text: String,
    /// Minimum alpha byte a sampled pixel needs to spawn a particle.
    pub alpha_threshold: u8,
    /// Jitter passed to `vibrate` every frame.
    pub jitter: f32,
    /// Pointer repulsion radius.
    pub repel_radius: f32,
    /// 0x00RRGGBB behind the transparent canvas.
    pub background: u32,
    pub text_color: u32,
    pub font_path: Option<PathBuf>,
    pub grid_bounds: GridBounds,
    /// Fixed RNG seed for reproducible fields.
    pub seed: Option<u64>,
    /// Image to load in the background at startup.
    pub image_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Particle Sketch".into(),
            width: 1280,
            height: 720,
            initial_text: "Hello world!".into(),
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            jitter: FRAME_JITTER,
            repel_radius: DEFAULT_REPEL_RADIUS,
            background: 0x0011_1111,
            text_color: 0x00CC_CCCC,
            font_path: None,
            grid_bounds: GridBounds::Square,
            seed: None,
            image_path: None,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Config from the first command-line argument, or the defaults.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, Error> {
        match args.into_iter().nth(1) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
