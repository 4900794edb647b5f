//! Noise Generation
//!
//! Sine-hash value noise and the rotated fractional Brownian motion (fBm)
//! that carves the explosion surface.

use crate::math3d::{lerp_f64, Mat3, Vec3};

/// Scrambling multiplier for the sine hash
const HASH_SCALE: f64 = 43758.5453;

/// Lattice weights mapping an integer cell to a single hash seed.
/// The 8 corners of small cells never collide.
const CELL_WEIGHTS: Vec3 = Vec3::new(1.0, 57.0, 113.0);

/// Basis change applied before the octaves so lattice-aligned banding does
/// not line up with the render axes. Orthonormal.
const DOMAIN_ROTATION: Mat3 = Mat3::from_rows(
    Vec3::new(0.00, 0.80, 0.60),
    Vec3::new(-0.80, 0.36, -0.48),
    Vec3::new(-0.60, -0.48, 0.64),
);

/// Octave amplitudes, halving each time
const OCTAVE_WEIGHTS: [f64; 4] = [0.5, 0.25, 0.125, 0.0625];

/// Frequency step applied to the sample point after each octave.
/// Deliberately not powers of two.
const OCTAVE_LACUNARITY: [f64; 3] = [2.32, 3.03, 2.61];

/// Deterministic pseudo-random value for a scalar seed.
/// Returns a value in [0.0, 1.0).
#[inline]
pub fn hash(n: f64) -> f64 {
    let x = n.sin() * HASH_SCALE;
    x - x.floor()
}

/// Smoothstep easing: 3t² - 2t³
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// 3D value noise with smoothstep interpolation.
/// Returns a value in approximately [0.0, 1.0).
pub fn value_noise(p: Vec3) -> f64 {
    let cell = p.floor();
    let fx = smoothstep(p.x - cell.x);
    let fy = smoothstep(p.y - cell.y);
    let fz = smoothstep(p.z - cell.z);
    let n = cell.dot(&CELL_WEIGHTS);

    // Corner offsets follow CELL_WEIGHTS: +1 in x, +57 in y, +113 in z
    let x0 = lerp_f64(hash(n), hash(n + 1.0), fx);
    let x1 = lerp_f64(hash(n + 57.0), hash(n + 58.0), fx);
    let x2 = lerp_f64(hash(n + 113.0), hash(n + 114.0), fx);
    let x3 = lerp_f64(hash(n + 170.0), hash(n + 171.0), fx);

    let y0 = lerp_f64(x0, x1, fy);
    let y1 = lerp_f64(x2, x3, fy);

    lerp_f64(y0, y1, fz)
}

/// Fractional Brownian motion over rotated value noise.
///
/// Four octaves, amplitude halving, frequency stepped by
/// [`OCTAVE_LACUNARITY`]. The sum is divided by the total weight so the
/// result stays in the same [0, 1) range as a single [`value_noise`] call.
pub fn fbm(x: Vec3) -> f64 {
    let mut p = DOMAIN_ROTATION.apply(x);
    let mut value = 0.0;
    for (octave, weight) in OCTAVE_WEIGHTS.iter().enumerate() {
        value += weight * value_noise(p);
        if let Some(step) = OCTAVE_LACUNARITY.get(octave) {
            p = p * *step;
        }
    }
    value / OCTAVE_WEIGHTS.iter().sum::<f64>()
}
