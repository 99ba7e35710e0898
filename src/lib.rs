//! Interactive particle sketches.
//!
//! Text or an uploaded image is rendered onto a software canvas, sampled on a
//! sparse grid, and every opaque sample becomes a spring particle that eases
//! toward its spot, trembles there and flees the pointer.
//!
//! Everything here runs headless; the window loop lives in the binary.

pub mod canvas;
pub mod config;
pub mod error;
pub mod font;
pub mod geometry;
pub mod image_sketch;
pub mod loader;
pub mod particle;
pub mod pixel;
pub mod sampler;
pub mod session;
pub mod sketch;
pub mod sniff;
pub mod text_sketch;
pub mod types;

pub use canvas::Canvas;
pub use config::Config;
pub use error::Error;
pub use font::TextFont;
pub use image_sketch::ImageSketch;
pub use loader::{DecodedImage, ImageLoader};
pub use particle::Particle;
pub use pixel::Pixel;
pub use session::{RenderSession, TextEdit};
pub use sketch::{Sketch, Sketchbook};
pub use text_sketch::TextSketch;
pub use types::{Color, FrameBuffer, Pointer, Viewport};
