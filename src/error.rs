// One error type for the whole crate.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// Reading or parsing the JSON config failed
    #[error("Config error: {0}")]
    Config(String),

    /// Reading the uploaded file from disk failed
    #[error("File read error: {0}")]
    FileRead(#[from] std::io::Error),

    /// The header bytes matched no known image type (hex of the first 4 bytes)
    #[error("Unsupported image type (header \"{0}\")")]
    UnsupportedImage(String),

    /// The header looked fine but the image could not be decoded
    #[error("Image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The configured TrueType font could not be loaded
    #[error("Font load error: {0}")]
    FontLoad(String),
}
