use super::camera::Camera;
use super::config::RenderConfig;
use super::framebuffer::Framebuffer;
use crate::explosion::Trace;
use crate::math3d::Vec3;
use crate::shading::shade_hit;
use anyhow::{Context, Result};
use log::debug;
use rayon::prelude::*;
use std::ops::{Add, Range};
use std::time::{Duration, Instant};

/// Split `[0, height)` into contiguous bands, one per worker.
///
/// Every band has `height / workers` rows except the last, which also takes
/// the remainder. Worker count is clamped to `[1, height]` so no band is
/// empty. The bands cover every row exactly once.
pub fn partition_rows(height: usize, workers: usize) -> Vec<Range<usize>> {
    if height == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, height);
    let rows_per_band = height / workers;
    (0..workers)
        .map(|i| {
            let start = i * rows_per_band;
            let end = if i + 1 == workers {
                height
            } else {
                start + rows_per_band
            };
            start..end
        })
        .collect()
}

/// Pixel outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub hits: usize,
    pub escaped: usize,
    pub culled: usize,
}

impl Tally {
    #[inline]
    fn record(&mut self, trace: &Trace) {
        match trace {
            Trace::Hit(_) => self.hits += 1,
            Trace::Escaped => self.escaped += 1,
            Trace::Culled => self.culled += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.hits + self.escaped + self.culled
    }
}

impl Add for Tally {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            hits: self.hits + other.hits,
            escaped: self.escaped + other.escaped,
            culled: self.culled + other.culled,
        }
    }
}

/// Summary of a finished render
#[derive(Debug, Clone, Copy)]
pub struct RenderStats {
    pub workers: usize,
    pub tally: Tally,
    pub elapsed: Duration,
}

/// Renders the explosion into a framebuffer, fanning row bands out over a
/// thread pool
pub struct Renderer {
    config: RenderConfig,
    camera: Camera,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        let camera = Camera::new(&config);
        Self { config, camera }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Trace and shade a single pixel
    pub fn render_pixel(&self, i: usize, j: usize) -> (Vec3, Trace) {
        let explosion = &self.config.explosion;
        let trace = explosion.trace(self.camera.eye, self.camera.ray_dir(i, j));
        let color = match trace {
            Trace::Hit(hit) => shade_hit(explosion, hit, self.config.light),
            Trace::Escaped | Trace::Culled => self.config.background,
        };
        (color, trace)
    }

    /// Fill one band of rows. `pixels` holds exactly those rows.
    fn render_band(&self, rows: Range<usize>, pixels: &mut [Vec3]) -> Tally {
        let width = self.config.width;
        debug!("band {}..{} started", rows.start, rows.end);
        let mut tally = Tally::default();
        for (row, j) in pixels.chunks_mut(width).zip(rows.clone()) {
            for (i, px) in row.iter_mut().enumerate() {
                let (color, trace) = self.render_pixel(i, j);
                tally.record(&trace);
                *px = color;
            }
        }
        debug!("band {}..{} done, {} hits", rows.start, rows.end, tally.hits);
        tally
    }

    /// Render the whole frame.
    ///
    /// Each worker owns a disjoint slice of the framebuffer, so writes need
    /// no locking; the call returns once every band has finished. Pixel
    /// values do not depend on the worker count. An invalid config is
    /// rejected before any worker starts.
    pub fn render(&self) -> Result<(Framebuffer, RenderStats)> {
        self.config.validate()?;
        let width = self.config.width;
        let height = self.config.height;
        let bands = partition_rows(height, self.config.worker_count());
        let workers = bands.len().max(1);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("kaboom-worker-{}", i))
            .build()
            .context("building render thread pool")?;

        let start = Instant::now();
        let mut framebuffer = Framebuffer::new(width, height);

        let mut jobs = Vec::with_capacity(bands.len());
        let mut rest: &mut [Vec3] = framebuffer.pixels_mut();
        for band in bands {
            let (slice, tail) = std::mem::take(&mut rest).split_at_mut(band.len() * width);
            jobs.push((band, slice));
            rest = tail;
        }

        let tally = pool.install(|| {
            jobs.into_par_iter()
                .map(|(rows, slice)| self.render_band(rows, slice))
                .reduce(Tally::default, Tally::add)
        });

        let stats = RenderStats {
            workers,
            tally,
            elapsed: start.elapsed(),
        };
        Ok((framebuffer, stats))
    }
}
