//! kaboom: a sphere-traced procedural explosion
//!
//! A sphere carved by rotated fBm value noise, marched per pixel against its
//! signed distance field and shaded with an emissive fire palette. Row bands
//! of the image render in parallel into disjoint slices of one framebuffer.

pub mod explosion;
pub mod math3d;
pub mod noise;
pub mod output;
pub mod render;
pub mod shading;
