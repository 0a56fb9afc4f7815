use clap::{Parser, Subcommand};
use rust_barcode::config::load_config;
use rust_barcode::tools::{
    batch_limit_from_env, dataset_iter, load_rects_json, load_rgb, write_json,
};
use rust_barcode::{
    Frame, ImageBounds, LocateReport, Locator, LocatorConfig, OrientedRect, locate_batch,
};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "barcodetool", version, about = "Barcode region locator")]
struct Cli {
    /// JSON config file; missing keys keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log per-stage runtime
    #[arg(long, global = true)]
    timing: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Locate barcodes in a single image
    Locate {
        #[arg(long)]
        image: PathBuf,
        /// Write the full report (telemetry, timings) as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Run the clustering core on a JSON list of raw rectangles
    Rects {
        #[arg(long)]
        input: PathBuf,
        /// Image size used to clip rectangles, as WIDTHxHEIGHT
        #[arg(long)]
        bounds: Option<String>,
    },
    /// Locate barcodes in every image under a directory
    Batch {
        #[arg(long)]
        root: PathBuf,
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();
    let default_filter = if cli.timing { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = match &cli.config {
        Some(path) => load_config(path).map_err(|e| format!("config {}: {e}", path.display()))?,
        None => LocatorConfig::default(),
    }
    .with_env_overrides();
    config.runtime_reporting |= cli.timing;
    let locator = Locator::with_config(config).map_err(|e| e.to_string())?;

    match cli.command {
        Command::Locate { image, report } => locate_cmd(&locator, &image, report.as_deref()),
        Command::Rects { input, bounds } => rects_cmd(&locator, &input, bounds.as_deref()),
        Command::Batch { root, limit } => batch_cmd(&locator, &root, limit),
    }
}

fn print_barcodes(barcodes: Option<&[OrientedRect]>) {
    match barcodes {
        Some(rects) => {
            println!("Found {} barcode(s)", rects.len());
            for (i, rect) in rects.iter().enumerate() {
                println!("  Barcode {i}: {rect}");
            }
        }
        None => println!("None"),
    }
}

fn locate_cmd(locator: &Locator, image: &Path, report_path: Option<&Path>) -> Result<(), String> {
    let (pixels, width, height) =
        load_rgb(image).map_err(|e| format!("failed to load image {}: {e}", image.display()))?;
    println!("Image: {} ({}x{})", image.display(), width, height);

    let report: LocateReport = locator
        .report_image(&pixels, width, height)
        .map_err(|e| e.to_string())?;
    let t = &report.telemetry;
    println!(
        "Regions: {} raw, {} bar-like, {} after merging, {} clusters, {} candidates",
        t.raw_rects, t.normalized, t.merged, t.clusters, t.candidates
    );
    print_barcodes(report.barcodes.as_deref());

    if let Some(path) = report_path {
        write_json(path, &report).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    }
    Ok(())
}

fn parse_bounds(text: &str) -> Result<ImageBounds, String> {
    let (w, h) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("bounds must look like WIDTHxHEIGHT, got {text}"))?;
    let width = w.trim().parse::<usize>().map_err(|e| format!("width {w}: {e}"))?;
    let height = h.trim().parse::<usize>().map_err(|e| format!("height {h}: {e}"))?;
    Ok(ImageBounds::new(width, height))
}

fn rects_cmd(locator: &Locator, input: &Path, bounds: Option<&str>) -> Result<(), String> {
    let raw = load_rects_json(input)
        .map_err(|e| format!("failed to read {}: {e}", input.display()))?;
    let bounds = bounds.map(parse_bounds).transpose()?;
    println!("Loaded {} rectangles from {}", raw.len(), input.display());
    let barcodes = locator.locate_rects(&raw, bounds).map_err(|e| e.to_string())?;
    print_barcodes(barcodes.as_deref());
    Ok(())
}

fn batch_cmd(locator: &Locator, root: &Path, limit: Option<usize>) -> Result<(), String> {
    let limit = limit.or_else(batch_limit_from_env);
    let paths: Vec<PathBuf> = dataset_iter(root, limit).collect();
    if paths.is_empty() {
        return Err(format!("no images found under {}", root.display()));
    }

    let mut loaded = Vec::with_capacity(paths.len());
    for path in &paths {
        match load_rgb(path) {
            Ok(image) => loaded.push((path, image)),
            Err(err) => eprintln!("Skipping {}: {err}", path.display()),
        }
    }
    let frames: Vec<Frame<'_>> = loaded
        .iter()
        .map(|(_, (rgb, width, height))| Frame {
            rgb,
            width: *width,
            height: *height,
        })
        .collect();

    let start = Instant::now();
    let outcomes = locate_batch(&frames, locator.config());
    let elapsed = start.elapsed();

    let mut with_barcode = 0usize;
    for ((path, _), outcome) in loaded.iter().zip(&outcomes) {
        match outcome {
            Ok(Some(rects)) => {
                with_barcode += 1;
                let listed: Vec<String> = rects.iter().map(ToString::to_string).collect();
                println!("{}: {}", path.display(), listed.join(" "));
            }
            Ok(None) => println!("{}: None", path.display()),
            Err(err) => println!("{}: error: {err}", path.display()),
        }
    }
    println!(
        "{}/{} images with a barcode in {:.2?}",
        with_barcode,
        outcomes.len(),
        elapsed
    );
    Ok(())
}
