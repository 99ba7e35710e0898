// Background image loading.
// Reading and decoding a file runs off the frame loop; the result comes back
// through a channel the loop polls once per frame. Each request gets a
// generation number and a cancel token, and starting a new request cancels
// the previous one, so a slow old upload can never overwrite a newer one.

use crate::error::Error;
use crate::sniff::{self, ImageKind};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

/// A decoded upload, ready to be blitted.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub kind: ImageKind,
    pub pixels: RgbaImage,
}

/// Shared flag a running load checks between its steps.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Sniff the header of `bytes` and decode them. Rejects unknown types
/// before any decoding is attempted.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, Error> {
    let kind = sniff::sniff(bytes)?;
    let pixels = image::load_from_memory_with_format(bytes, kind.format())?.to_rgba8();
    Ok(DecodedImage { kind, pixels })
}

/// Read `path` and decode it, bailing out early (`Ok(None)`) once `token` is cancelled.
pub fn load_file(path: &Path, token: &CancelToken) -> Result<Option<DecodedImage>, Error> {
    let bytes = std::fs::read(path)?;
    if token.is_cancelled() {
        return Ok(None);
    }

    if let Some(declared) = ImageKind::declared_mime(path) {
        let actual = sniff::header_hex(&bytes);
        if sniff::kind_from_header(&actual) != ImageKind::from_mime(declared) {
            log::warn!("{} claims {declared} but its header is \"{actual}\"", path.display());
        }
    }

    let decoded = decode_bytes(&bytes)?;
    if token.is_cancelled() {
        return Ok(None);
    }
    Ok(Some(decoded))
}

struct Finished {
    generation: u64,
    path: PathBuf,
    result: Result<Option<DecodedImage>, Error>,
}

/// Owns the in-flight load (at most one that matters) and its result channel.
pub struct ImageLoader {
    tx: Sender<Finished>,
    rx: Receiver<Finished>,
    generation: u64,
    current: Option<CancelToken>,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx, generation: 0, current: None }
    }

    /// Start loading `path` in the background, cancelling any earlier load.
    pub fn request(&mut self, path: PathBuf) -> u64 {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }
        self.generation += 1;
        let generation = self.generation;
        let token = CancelToken::default();
        self.current = Some(token.clone());

        log::debug!("loading {} (generation {generation})", path.display());
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = load_file(&path, &token);
            // the receiver only goes away when the loader is dropped
            let _ = tx.send(Finished { generation, path, result });
        });
        generation
    }

    /// True while the newest request has not reported back.
    pub fn is_loading(&self) -> bool {
        self.current.is_some()
    }

    /// Collect the newest finished load, if any. Results of superseded or
    /// cancelled requests are dropped here.
    pub fn poll(&mut self) -> Option<Result<DecodedImage, Error>> {
        loop {
            let finished = match self.rx.try_recv() {
                Ok(f) => f,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            };
            if finished.generation != self.generation {
                log::debug!("dropping stale load of {} (generation {})", finished.path.display(), finished.generation);
                continue;
            }
            self.current = None;
            match finished.result {
                Ok(Some(image)) => {
                    log::info!(
                        "loaded {} ({}, {}x{})",
                        finished.path.display(),
                        image.kind.mime(),
                        image.pixels.width(),
                        image.pixels.height()
                    );
                    return Some(Ok(image));
                }
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
