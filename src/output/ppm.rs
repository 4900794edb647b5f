use crate::render::Framebuffer;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write a binary PPM (P6): text header, then 8-bit RGB triples row by row
pub fn encode_ppm<W: Write>(framebuffer: &Framebuffer, mut out: W) -> io::Result<()> {
    write!(out, "P6\n{} {}\n255\n", framebuffer.width(), framebuffer.height())?;
    out.write_all(&framebuffer.to_rgb8())?;
    out.flush()
}

pub fn save_ppm(framebuffer: &Framebuffer, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    encode_ppm(framebuffer, BufWriter::new(file))
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math3d::Vec3;

    #[test]
    fn test_header_and_payload() {
        let mut fb = Framebuffer::new(2, 2);
        fb.set(0, 0, Vec3::new(1.7, 1.3, 1.0));
        fb.set(1, 1, Vec3::new(-0.5, 0.5, 0.2));

        let mut bytes = Vec::new();
        encode_ppm(&fb, &mut bytes).unwrap();

        let header = b"P6\n2 2\n255\n";
        assert_eq!(&bytes[..header.len()], header);
        let payload = &bytes[header.len()..];
        assert_eq!(payload.len(), 2 * 2 * 3);
        assert_eq!(&payload[0..3], &[255, 255, 255]);
        assert_eq!(&payload[3..9], &[0; 6]);
        assert_eq!(&payload[9..12], &[0, 127, 51]);
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let fb = Framebuffer::new(1, 1);
        let err = save_ppm(&fb, Path::new("/nonexistent/dir/out.ppm")).unwrap_err();
        assert!(err.to_string().contains("creating"));
    }

    #[test]
    fn test_save_writes_file() {
        let path = std::env::temp_dir().join(format!("kaboom-{}.ppm", std::process::id()));
        let fb = Framebuffer::new(3, 2);
        save_ppm(&fb, &path).unwrap();
        let written = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(written.len(), b"P6\n3 2\n255\n".len() + 3 * 2 * 3);
    }
}
