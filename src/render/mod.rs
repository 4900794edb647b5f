//! Frame rendering: camera, framebuffer, configuration and the parallel
//! row-band renderer.

mod camera;
mod config;
mod framebuffer;
mod renderer;

pub use camera::Camera;
pub use config::{RenderConfig, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use framebuffer::Framebuffer;
pub use renderer::{partition_rows, RenderStats, Renderer, Tally};
