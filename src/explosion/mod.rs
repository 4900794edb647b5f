//! Explosion Surface
//!
//! A sphere carved inward by fBm noise, expressed as a signed distance
//! field. The tracer and the normal estimator both query it on demand.

mod normal;
mod tracer;

pub use tracer::Trace;

use crate::math3d::Vec3;
use crate::noise::fbm;
use serde::{Deserialize, Serialize};

/// Spatial frequency of the carving noise relative to the sphere
const NOISE_FREQUENCY: f64 = 3.4;

/// Shape parameters of the explosion. The sphere is centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Explosion {
    /// All of the explosion fits in a sphere of this radius
    pub sphere_radius: f64,
    /// How deep the noise may carve towards the center
    pub noise_amplitude: f64,
}

impl Explosion {
    pub const fn new(sphere_radius: f64, noise_amplitude: f64) -> Self {
        Self {
            sphere_radius,
            noise_amplitude,
        }
    }

    /// Signed distance from `p` to the carved surface (negative inside).
    ///
    /// fBm is non-negative, so the displacement only ever pushes the surface
    /// inward and the whole shape stays inside `sphere_radius`.
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f64 {
        let displacement = -fbm(p * NOISE_FREQUENCY) * self.noise_amplitude;
        p.length() - (self.sphere_radius + displacement)
    }

    /// How far below the nominal sphere a surface point sits, in units of
    /// the noise amplitude. Deeper carving reads as hotter.
    #[inline]
    pub fn heat(&self, hit: Vec3) -> f64 {
        (self.sphere_radius - hit.length()) / self.noise_amplitude
    }
}

impl Default for Explosion {
    fn default() -> Self {
        Self::new(1.5, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<Vec3> {
        let mut points = Vec::new();
        for i in 0..400 {
            let t = i as f64 * 0.061;
            let r = 0.05 + (i % 40) as f64 * 0.09;
            let dir = Vec3::new(t.cos() * (t * 0.7).sin(), (t * 1.3).cos(), t.sin());
            points.push(dir.normalize() * r);
        }
        points
    }

    #[test]
    fn test_distance_bounded_by_amplitude() {
        let explosion = Explosion::default();
        let r = explosion.sphere_radius;
        let a = explosion.noise_amplitude;
        for p in sample_points() {
            let d = explosion.signed_distance(p);
            let len = p.length();
            assert!(d <= len - r + a, "above bound at {:?}: {}", p, d);
            assert!(d >= len - r - a, "below bound at {:?}: {}", p, d);
        }
    }

    #[test]
    fn test_surface_never_bulges_outside_sphere() {
        let explosion = Explosion::default();
        for p in sample_points() {
            let d = explosion.signed_distance(p);
            assert!(d >= p.length() - explosion.sphere_radius);
        }
    }

    #[test]
    fn test_zero_amplitude_is_plain_sphere() {
        let explosion = Explosion::new(2.0, 0.0);
        let p = Vec3::new(0.0, 3.0, 4.0);
        assert!((explosion.signed_distance(p) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_heat_increases_inward() {
        let explosion = Explosion::default();
        assert_eq!(explosion.heat(Vec3::new(1.5, 0.0, 0.0)), 0.0);
        assert!(explosion.heat(Vec3::new(0.0, 1.0, 0.0)) > explosion.heat(Vec3::new(0.0, 1.2, 0.0)));
    }
}
