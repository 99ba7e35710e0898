// Image type detection from the first bytes of an uploaded file.
// The extension is never trusted: a renamed file is still caught by its header.

use crate::error::Error;

/// Image kinds the canvas can draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    Bmp,
}

impl ImageKind {
    pub fn mime(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
            ImageKind::Gif => "image/gif",
            ImageKind::Bmp => "image/bmp",
        }
    }

    /// Validate a declared MIME type string.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(ImageKind::Jpeg),
            "image/png" => Some(ImageKind::Png),
            "image/gif" => Some(ImageKind::Gif),
            "image/bmp" => Some(ImageKind::Bmp),
            _ => None,
        }
    }

    /// The MIME type a file name claims, judged by its extension only.
    pub fn declared_mime(path: &std::path::Path) -> Option<&'static str> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "gif" => Some("image/gif"),
            "bmp" => Some("image/bmp"),
            _ => None,
        }
    }

    pub fn format(self) -> image::ImageFormat {
        match self {
            ImageKind::Jpeg => image::ImageFormat::Jpeg,
            ImageKind::Png => image::ImageFormat::Png,
            ImageKind::Gif => image::ImageFormat::Gif,
            ImageKind::Bmp => image::ImageFormat::Bmp,
        }
    }
}

/// Hex of the first 4 bytes, lowercase, each byte without zero padding
/// (0x0a becomes "a"). Shorter input yields fewer digits.
pub fn header_hex(bytes: &[u8]) -> String {
    bytes.iter().take(4).map(|b| format!("{b:x}")).collect()
}

/// Match a header hex string against the known magic numbers.
pub fn kind_from_header(header: &str) -> Option<ImageKind> {
    match header {
        // JPEG; the last byte is the APPn marker, e0 - e3 and e8 are accepted
        "ffd8ffe0" | "ffd8ffe1" | "ffd8ffe2" | "ffd8ffe3" | "ffd8ffe8" => Some(ImageKind::Jpeg),
        "89504e47" => Some(ImageKind::Png),
        // "GIF8"
        "47494638" => Some(ImageKind::Gif),
        // "BM" followed by the low bytes of the file size
        h if h.len() >= 4 && h.starts_with("424d") => Some(ImageKind::Bmp),
        _ => None,
    }
}

/// Sniff the type of `bytes`, rejecting anything not in the table.
pub fn sniff(bytes: &[u8]) -> Result<ImageKind, Error> {
    let header = header_hex(bytes);
    kind_from_header(&header).ok_or(Error::UnsupportedImage(header))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_header() {
        assert_eq!(sniff(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]).unwrap(), ImageKind::Png);
    }

    #[test]
    fn jpeg_headers() {
        assert_eq!(sniff(&[0xFF, 0xD8, 0xFF, 0xE1]).unwrap(), ImageKind::Jpeg);
        for last in [0xE0, 0xE2, 0xE3, 0xE8] {
            assert_eq!(sniff(&[0xFF, 0xD8, 0xFF, last]).unwrap(), ImageKind::Jpeg);
        }
        // e4 is not in the table
        assert!(sniff(&[0xFF, 0xD8, 0xFF, 0xE4]).is_err());
    }

    #[test]
    fn gif_header() {
        assert_eq!(sniff(b"GIF89a").unwrap(), ImageKind::Gif);
    }

    #[test]
    fn unknown_and_empty_are_rejected() {
        match sniff(&[0x12, 0x34, 0x56, 0x78]) {
            Err(Error::UnsupportedImage(h)) => assert_eq!(h, "12345678"),
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(matches!(sniff(&[]), Err(Error::UnsupportedImage(h)) if h.is_empty()));
        assert!(sniff(&[0x89, 0x50]).is_err());
    }

    #[test]
    fn bmp_header() {
        assert_eq!(sniff(&[0x42, 0x4D, 0x36, 0x10]).unwrap(), ImageKind::Bmp);
    }

    #[test]
    fn declared_mime_from_extension() {
        use std::path::Path;
        assert_eq!(ImageKind::declared_mime(Path::new("cat.JPG")), Some("image/jpeg"));
        assert_eq!(ImageKind::declared_mime(Path::new("notes.txt")), None);
        assert_eq!(ImageKind::declared_mime(Path::new("noext")), None);
    }

    #[test]
    fn hex_is_unpadded() {
        assert_eq!(header_hex(&[0x0A, 0x00, 0xFF, 0x10, 0x99]), "a0ff10");
    }

    #[test]
    fn mime_strings() {
        assert_eq!(ImageKind::from_mime("image/bmp"), Some(ImageKind::Bmp));
        assert_eq!(ImageKind::from_mime("image/webp"), None);
        assert_eq!(ImageKind::Png.mime(), "image/png");
    }
}
