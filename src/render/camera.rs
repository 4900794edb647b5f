use super::config::RenderConfig;
use crate::math3d::Vec3;

/// Fixed pinhole camera at `eye`, looking down -z
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    half_width: f64,
    half_height: f64,
    /// Distance from the eye to the image plane, in pixels
    focal: f64,
}

impl Camera {
    pub fn new(config: &RenderConfig) -> Self {
        let height = config.height as f64;
        Self {
            eye: config.eye,
            half_width: config.width as f64 / 2.0,
            half_height: height / 2.0,
            focal: height / (2.0 * (config.fov / 2.0).tan()),
        }
    }

    /// Unit direction through the center of pixel (i, j).
    /// Row 0 is the top of the scene.
    #[inline]
    pub fn ray_dir(&self, i: usize, j: usize) -> Vec3 {
        let x = (i as f64 + 0.5) - self.half_width;
        let y = -(j as f64 + 0.5) + self.half_height;
        Vec3::new(x, y, -self.focal).normalize()
    }
}
