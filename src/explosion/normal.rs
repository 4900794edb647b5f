//! Surface normals from forward differences of the distance field

use super::Explosion;
use crate::math3d::Vec3;

/// Finite-difference offset. Smaller picks up the noise's own high-frequency
/// detail, larger blurs the real curvature.
const NORMAL_EPS: f64 = 0.1;

impl Explosion {
    /// Unit surface normal at `p` from forward differences of the field
    pub fn estimate_normal(&self, p: Vec3) -> Vec3 {
        let d = self.signed_distance(p);
        let nx = self.signed_distance(p + Vec3::new(NORMAL_EPS, 0.0, 0.0)) - d;
        let ny = self.signed_distance(p + Vec3::new(0.0, NORMAL_EPS, 0.0)) - d;
        let nz = self.signed_distance(p + Vec3::new(0.0, 0.0, NORMAL_EPS)) - d;
        Vec3::new(nx, ny, nz).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_normal_points_outward() {
        let sphere = Explosion::new(1.5, 0.0);
        for p in [
            Vec3::new(1.5, 0.0, 0.0),
            Vec3::new(0.0, -1.5, 0.0),
            Vec3::new(0.6, 0.9, 1.0),
        ] {
            let n = sphere.estimate_normal(p);
            assert!((n.length() - 1.0).abs() < 1e-9);
            assert!(n.dot(&p.normalize()) > 0.99, "normal {:?} at {:?}", n, p);
        }
    }

    #[test]
    fn test_carved_normal_is_unit() {
        let explosion = Explosion::default();
        let n = explosion.estimate_normal(Vec3::new(0.2, 0.4, 0.9));
        assert!(n.is_finite());
        assert!((n.length() - 1.0).abs() < 1e-9);
    }
}
