use anyhow::{bail, Context, Result};
use kaboom::output;
use kaboom::render::{RenderConfig, RenderStats, Renderer, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_OUTPUT: &str = "out.ppm";

/// Settings gathered from the command line. `None` keeps the config value.
#[derive(Debug, Default)]
struct Args {
    width: Option<usize>,
    height: Option<usize>,
    fov_deg: Option<f64>,
    workers: Option<usize>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    dump_config: bool,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T> {
    let value = value.with_context(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid value for {}: {:?}", flag, value))
}

fn print_help() {
    println!("Usage: kaboom [OPTIONS]");
    println!();
    println!("Renders a sphere-traced fireball to an image file.");
    println!();
    println!("Options:");
    println!(
        "  --width W, -w W           Image width (default: {})",
        DEFAULT_WIDTH
    );
    println!(
        "  --height H, -h H          Image height (default: {})",
        DEFAULT_HEIGHT
    );
    println!("  --resolution WxH, -r WxH  Set both (e.g., 1280x960)");
    println!("  --fov DEG                 Vertical field of view in degrees (default: 60)");
    println!("  --workers N, -j N         Parallel row bands (default: one per core)");
    println!(
        "  --output PATH, -o PATH    Output image, .ppm or .png (default: {})",
        DEFAULT_OUTPUT
    );
    println!("  --config PATH, -c PATH    Load render settings from a JSON file");
    println!("  --dump-config             Print the effective settings as JSON and exit");
    println!("  --help                    Show this help message");
    println!();
    println!("Set RUST_LOG=debug for per-band progress.");
}

/// Parse command line arguments. `argv[0]` is the program name.
fn parse_args(argv: &[String]) -> Result<Args> {
    let mut args = Args::default();

    let mut i = 1;
    while i < argv.len() {
        let flag = argv[i].as_str();
        let value = argv.get(i + 1);
        match flag {
            "--width" | "-w" => {
                args.width = Some(parse_value(flag, value)?);
                i += 1;
            },
            "--height" | "-h" => {
                args.height = Some(parse_value(flag, value)?);
                i += 1;
            },
            "--resolution" | "-r" => {
                let res: String = parse_value(flag, value)?;
                let Some((w, h)) = res.split_once('x') else {
                    bail!("resolution must look like WxH, got {:?}", res);
                };
                args.width = Some(parse_value(flag, Some(&w.to_string()))?);
                args.height = Some(parse_value(flag, Some(&h.to_string()))?);
                i += 1;
            },
            "--fov" => {
                args.fov_deg = Some(parse_value(flag, value)?);
                i += 1;
            },
            "--workers" | "-j" => {
                args.workers = Some(parse_value(flag, value)?);
                i += 1;
            },
            "--output" | "-o" => {
                args.output = Some(PathBuf::from(parse_value::<String>(flag, value)?));
                i += 1;
            },
            "--config" | "-c" => {
                args.config = Some(PathBuf::from(parse_value::<String>(flag, value)?));
                i += 1;
            },
            "--dump-config" => args.dump_config = true,
            "--help" => {
                print_help();
                std::process::exit(0);
            },
            other => bail!("unknown argument {:?} (try --help)", other),
        }
        i += 1;
    }

    Ok(args)
}

/// Defaults, then the config file, then command line flags
fn build_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if let Some(deg) = args.fov_deg {
        config.fov = deg.to_radians();
    }
    if let Some(n) = args.workers {
        config.workers = Some(n);
    }
    config.validate()?;
    Ok(config)
}

fn log_stats(stats: &RenderStats, pixels: usize) {
    let tally = &stats.tally;
    info!(
        "rendered {} pixels on {} workers in {:.2}s",
        pixels,
        stats.workers,
        stats.elapsed.as_secs_f64()
    );
    info!(
        "hits: {}, escaped: {}, culled: {}",
        tally.hits, tally.escaped, tally.culled
    );
}

fn run() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    let args = parse_args(&argv)?;
    let config = build_config(&args)?;

    if args.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let out_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    println!("=== kaboom ===");
    println!("Resolution: {}x{}", config.width, config.height);
    println!("FOV: {:.1} deg", config.fov.to_degrees());
    println!(
        "Explosion: radius {}, noise amplitude {}",
        config.explosion.sphere_radius, config.explosion.noise_amplitude
    );
    println!("Output: {}", out_path.display());
    info!("rendering with {} workers", config.worker_count());

    let renderer = Renderer::new(config);
    let (framebuffer, stats) = renderer.render()?;
    log_stats(&stats, framebuffer.width() * framebuffer.height());

    let format = output::save(&framebuffer, &out_path)?;
    info!("saved {:?} image to {}", format, out_path.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        },
    }
}
