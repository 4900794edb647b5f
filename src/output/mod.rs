//! Framebuffer encoders
//!
//! Channels are clamped to [0, 255] here and nowhere earlier.

mod png;
mod ppm;

pub use self::png::save_png;
pub use self::ppm::{encode_ppm, save_ppm};

use crate::render::Framebuffer;
use anyhow::Result;
use std::path::Path;

/// Image container chosen for an output path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ppm,
    Png,
}

impl Format {
    /// `.png` selects PNG; everything else is written as binary PPM
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => Format::Png,
            _ => Format::Ppm,
        }
    }
}

/// Encode and write the framebuffer, picking the format from the extension
pub fn save(framebuffer: &Framebuffer, path: impl AsRef<Path>) -> Result<Format> {
    let path = path.as_ref();
    let format = Format::from_path(path);
    match format {
        Format::Ppm => save_ppm(framebuffer, path)?,
        Format::Png => save_png(framebuffer, path)?,
    }
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("out.png")), Format::Png);
        assert_eq!(Format::from_path(Path::new("OUT.PNG")), Format::Png);
        assert_eq!(Format::from_path(Path::new("out.ppm")), Format::Ppm);
        assert_eq!(Format::from_path(Path::new("out")), Format::Ppm);
    }
}
