//! Fire palette and per-hit shading
//!
//! Colors are emissive and allowed to run above 1.0 per channel; they are
//! only clamped when the framebuffer is encoded.

use crate::explosion::Explosion;
use crate::math3d::{lerp, Vec3};

pub const GRAY: Vec3 = Vec3::new(0.4, 0.4, 0.4);
pub const DARK_GRAY: Vec3 = Vec3::new(0.2, 0.2, 0.2);
pub const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
pub const ORANGE: Vec3 = Vec3::new(1.0, 0.6, 0.0);
/// "Hot" yellow, overexposed on purpose
pub const YELLOW: Vec3 = Vec3::new(1.7, 1.3, 1.0);

/// Lower bound on diffuse intensity so facets facing away stay visible
const AMBIENT: f64 = 0.4;

/// Maps the typical heat range onto the interesting part of the palette
const HEAT_OFFSET: f64 = -0.2;
const HEAT_SCALE: f64 = 2.0;

/// Piecewise-linear gradient gray -> dark gray -> red -> orange -> yellow.
/// `d` is clamped to [0, 1]; each of the four bands is 0.25 wide.
pub fn palette_fire(d: f64) -> Vec3 {
    let x = d.clamp(0.0, 1.0);
    if x < 0.25 {
        lerp(GRAY, DARK_GRAY, x * 4.0)
    } else if x < 0.5 {
        lerp(DARK_GRAY, RED, x * 4.0 - 1.0)
    } else if x < 0.75 {
        lerp(RED, ORANGE, x * 4.0 - 2.0)
    } else {
        lerp(ORANGE, YELLOW, x * 4.0 - 3.0)
    }
}

/// Color of a surface point lit by a single point light
pub fn shade_hit(explosion: &Explosion, hit: Vec3, light: Vec3) -> Vec3 {
    let heat = explosion.heat(hit);
    let light_dir = (light - hit).normalize();
    let intensity = light_dir.dot(&explosion.estimate_normal(hit)).max(AMBIENT);
    palette_fire((HEAT_OFFSET + heat) * HEAT_SCALE) * intensity
}
