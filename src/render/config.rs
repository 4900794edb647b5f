use crate::explosion::Explosion;
use crate::math3d::Vec3;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

pub const DEFAULT_WIDTH: usize = 640;
pub const DEFAULT_HEIGHT: usize = 480;

/// Every tunable of a render. Built once and handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// Vertical field of view in radians
    pub fov: f64,
    /// Camera position; the camera looks along -z
    pub eye: Vec3,
    /// Point light position
    pub light: Vec3,
    /// Color of rays that miss the explosion
    pub background: Vec3,
    pub explosion: Explosion,
    /// Row bands rendered in parallel (None = one per core)
    pub workers: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fov: PI / 3.0,
            eye: Vec3::new(0.0, 0.0, 3.0),
            light: Vec3::new(10.0, 10.0, 10.0),
            background: Vec3::new(0.2, 0.7, 0.8),
            explosion: Explosion::default(),
            workers: None,
        }
    }
}

impl RenderConfig {
    /// Number of workers to split the image across
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        })
    }

    /// Reject parameters that cannot produce an image
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("image size must be non-zero, got {}x{}", self.width, self.height);
        }
        if !(self.fov > 0.0 && self.fov < PI) {
            bail!("field of view must be within (0, pi) radians, got {}", self.fov);
        }
        if !(self.explosion.sphere_radius > 0.0) {
            bail!("sphere radius must be positive, got {}", self.explosion.sphere_radius);
        }
        if !(self.explosion.noise_amplitude > 0.0) {
            bail!(
                "noise amplitude must be positive, got {}",
                self.explosion.noise_amplitude
            );
        }
        if self.workers == Some(0) {
            bail!("worker count must be at least 1");
        }
        Ok(())
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).with_context(|| format!("writing config {}", path.display()))
    }

    /// Load config from a JSON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert_eq!(config.explosion, Explosion::new(1.5, 1.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: RenderConfig =
            serde_json::from_str(r#"{ "width": 320, "explosion": { "noise_amplitude": 0.5 } }"#)
                .unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.explosion.sphere_radius, 1.5);
        assert_eq!(config.explosion.noise_amplitude, 0.5);
        assert_eq!(config.workers, None);
    }

    #[test]
    fn test_save_load_file() {
        let path = std::env::temp_dir().join(format!("kaboom-config-{}.json", std::process::id()));
        let config = RenderConfig {
            width: 64,
            workers: Some(3),
            light: Vec3::new(-4.0, 2.0, 8.0),
            ..RenderConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = RenderConfig::load(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = RenderConfig::load("/nonexistent/kaboom.json").unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn test_validate_rejects_degenerate() {
        let bad = [
            RenderConfig {
                width: 0,
                ..RenderConfig::default()
            },
            RenderConfig {
                fov: PI,
                ..RenderConfig::default()
            },
            RenderConfig {
                explosion: Explosion::new(-1.0, 1.0),
                ..RenderConfig::default()
            },
            RenderConfig {
                explosion: Explosion::new(1.5, 0.0),
                ..RenderConfig::default()
            },
            RenderConfig {
                workers: Some(0),
                ..RenderConfig::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{:?}", config);
        }
    }

    #[test]
    fn test_worker_count() {
        let config = RenderConfig {
            workers: Some(5),
            ..RenderConfig::default()
        };
        assert_eq!(config.worker_count(), 5);
        assert!(RenderConfig::default().worker_count() >= 1);
    }
}
