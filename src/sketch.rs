// Sketches are the visual modes (text, image). Exactly one is active at a
// time; activating one rebuilds the whole particle field from scratch.

use crate::loader::DecodedImage;
use crate::session::RenderSession;

/// Jitter applied to every particle each frame.
pub const FRAME_JITTER: f32 = 5.0;

pub trait Sketch {
    /// Unique name the registry selects by.
    fn name(&self) -> &str;

    /// Render the source content and rebuild `session.particles` from it.
    fn initialize(&mut self, session: &mut RenderSession);

    /// Advance and paint one frame.
    fn update(&self, session: &mut RenderSession) {
        session.tick();
    }

    /// Whether this sketch displays uploaded images.
    fn accepts_images(&self) -> bool {
        false
    }

    /// Hand the sketch a decoded upload. Only called when `accepts_images` is true.
    fn load_image(&mut self, _image: DecodedImage) {}
}

struct Entry {
    id: String,
    sketch: Box<dyn Sketch>,
}

/// Flat registry of sketches plus the active selection.
#[derive(Default)]
pub struct Sketchbook {
    entries: Vec<Entry>,
    active: Option<usize>,
    next_id: u32,
}

impl Sketchbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sketch and return its id (`name` + a running number).
    pub fn register(&mut self, sketch: Box<dyn Sketch>) -> String {
        let id = format!("{}{}", sketch.name(), self.next_id);
        self.next_id += 1;
        log::debug!("registered sketch {id}");
        self.entries.push(Entry { id: id.clone(), sketch });
        id
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.sketch.name()).collect()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.map(|i| self.entries[i].sketch.name())
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.map(|i| self.entries[i].id.as_str())
    }

    fn activate(&mut self, index: usize, session: &mut RenderSession) {
        self.active = Some(index);
        let entry = &mut self.entries[index];
        entry.sketch.initialize(session);
        log::info!("sketch '{}' active with {} particles", entry.sketch.name(), session.particle_count);
    }

    /// Make the sketch called `name` active and rebuild the field.
    /// Unknown names change nothing and return false.
    pub fn select(&mut self, name: &str, session: &mut RenderSession) -> bool {
        match self.entries.iter().position(|e| e.sketch.name() == name) {
            Some(index) => {
                self.activate(index, session);
                true
            }
            None => {
                log::debug!("no sketch named '{name}'");
                false
            }
        }
    }

    /// Re-initialize the active sketch (after a resize or a content change).
    pub fn reload(&mut self, session: &mut RenderSession) -> bool {
        match self.active {
            Some(index) => {
                self.activate(index, session);
                true
            }
            None => false,
        }
    }

    /// Activate the next registered sketch, wrapping around.
    pub fn cycle(&mut self, session: &mut RenderSession) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let next = self.active.map_or(0, |i| (i + 1) % self.entries.len());
        self.activate(next, session);
        true
    }

    /// Give `image` to the first sketch that takes it, then make that sketch active.
    pub fn deliver_image(&mut self, image: DecodedImage, session: &mut RenderSession) -> bool {
        let Some(index) = self.entries.iter().position(|e| e.sketch.accepts_images()) else {
            log::warn!("no sketch accepts images");
            return false;
        };
        self.entries[index].sketch.load_image(image);
        self.activate(index, session);
        true
    }

    /// Per-frame tick of the active sketch. Nothing happens before a selection.
    pub fn update(&self, session: &mut RenderSession) {
        if let Some(index) = self.active {
            self.entries[index].sketch.update(session);
        }
    }
}
