use crate::render::Framebuffer;
use anyhow::{anyhow, Context, Result};
use image::{ImageFormat, RgbImage};
use std::path::Path;

pub fn save_png(framebuffer: &Framebuffer, path: &Path) -> Result<()> {
    let width = u32::try_from(framebuffer.width()).context("image width exceeds u32")?;
    let height = u32::try_from(framebuffer.height()).context("image height exceeds u32")?;
    let img = RgbImage::from_raw(width, height, framebuffer.to_rgb8())
        .ok_or_else(|| anyhow!("framebuffer size does not match {}x{}", width, height))?;
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math3d::Vec3;

    #[test]
    fn test_png_round_trip_pixels() {
        let path = std::env::temp_dir().join(format!("kaboom-{}.png", std::process::id()));
        let mut fb = Framebuffer::new(3, 2);
        fb.set(2, 1, Vec3::new(0.2, 0.7, 0.8));
        save_png(&fb, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).ok();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1).0, [51, 178, 204]);
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0]);
    }
}
