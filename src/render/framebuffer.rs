use crate::math3d::Vec3;

/// Row-major HDR framebuffer, index `x + y * width`, row 0 at the top.
/// Channels are unclamped until encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Vec3>,
}

impl Framebuffer {
    /// Create a black framebuffer
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec3::zero(); width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Vec3 {
        self.pixels[x + y * self.width]
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, x: usize, y: usize, color: Vec3) {
        self.pixels[x + y * self.width] = color;
    }

    #[inline]
    pub fn pixels(&self) -> &[Vec3] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Vec3] {
        &mut self.pixels
    }

    /// Quantize to interleaved 8-bit RGB, clamping each channel
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for c in &self.pixels {
            bytes.push(channel_to_u8(c.x));
            bytes.push(channel_to_u8(c.y));
            bytes.push(channel_to_u8(c.z));
        }
        bytes
    }
}

/// Scale to [0, 255], clamp, truncate. NaN maps to 0.
#[inline]
fn channel_to_u8(v: f64) -> u8 {
    (255.0 * v).clamp(0.0, 255.0) as u8
}
