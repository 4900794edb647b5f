//! Sphere tracing against the explosion's distance field

use super::Explosion;
use crate::math3d::Vec3;

/// Iteration budget per ray. Fewer steps leave holes in the surface.
const MAX_STEPS: u32 = 128;

/// Fraction of the distance estimate taken per step
const STEP_FACTOR: f64 = 0.1;

/// Smallest step, keeps the march moving where the field is unreliable
const MIN_STEP: f64 = 0.01;

/// Outcome of tracing a single ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trace {
    /// The march crossed the surface. The point is the first sample found
    /// inside, which may overshoot the true crossing by up to one step.
    Hit(Vec3),
    /// The iteration budget ran out without crossing
    Escaped,
    /// The ray never comes within the bounding sphere; no field evaluation
    Culled,
}

impl Trace {
    #[inline]
    pub fn hit(&self) -> Option<Vec3> {
        match self {
            Trace::Hit(p) => Some(*p),
            _ => None,
        }
    }
}

impl Explosion {
    /// Trace a ray from `origin` along the unit vector `dir`.
    ///
    /// Rays whose closest approach to the center lies outside the bounding
    /// sphere are culled up front. The noise only carves inward, so nothing
    /// beyond `sphere_radius` can be hit and the cull loses no hits.
    pub fn trace(&self, origin: Vec3, dir: Vec3) -> Trace {
        let along = origin.dot(&dir);
        if origin.dot(&origin) - along * along > self.sphere_radius * self.sphere_radius {
            return Trace::Culled;
        }
        self.march(origin, dir)
    }

    /// March along the ray with no bounding-sphere cull.
    ///
    /// The step is proportional to the current distance estimate, so the
    /// march takes large strides far from the surface.
    pub fn march(&self, origin: Vec3, dir: Vec3) -> Trace {
        let mut pos = origin;
        for _ in 0..MAX_STEPS {
            let d = self.signed_distance(pos);
            if d < 0.0 {
                return Trace::Hit(pos);
            }
            pos = pos + dir * (d * STEP_FACTOR).max(MIN_STEP);
        }
        Trace::Escaped
    }
}
