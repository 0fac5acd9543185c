mod cli_options;
mod tracer;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use indicatif::ProgressBar;
use log::info;
use rayon::prelude::*;

use algebra::AlgebraError;
use cli_options::CliOptions;
use scene::Scene;

fn main() {
    env_logger::init();
    let options = match cli_options::parse_args(std::env::args().collect()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("usage: {}", CliOptions::message());
            std::process::exit(1);
        }
    };
    if options.help {
        println!("usage: {}", CliOptions::message());
        return;
    }
    let scene_file = match options.scene_file.clone() {
        Some(file) => file,
        None => {
            eprintln!("no scene file given");
            eprintln!("usage: {}", CliOptions::message());
            std::process::exit(1);
        }
    };

    let scene = match Scene::load(&scene_file) {
        Ok(scene) => scene,
        Err(error) => {
            eprintln!("can't load scene {}: {}", scene_file, error);
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    let rows = match render(&scene, &options) {
        Ok(rows) => rows,
        Err(error) => {
            eprintln!("render failed: {}", error);
            std::process::exit(1);
        }
    };
    info!(
        "rendered {}x{} at depth {} in {:?}",
        options.width,
        options.height,
        options.depth,
        start.elapsed()
    );

    if let Err(error) = write_png(&options.output, &rows, options.width, options.height) {
        eprintln!("can't write {}: {}", options.output, error);
        std::process::exit(1);
    }
    info!("wrote {}", options.output);
}

/// Renders one scanline into packed RGB bytes.
fn render_row(scene: &Scene, row: usize, options: &CliOptions) -> Result<Vec<u8>, AlgebraError> {
    let mut band = Vec::with_capacity(options.width * 3);
    for col in 0..options.width {
        let ray = scene
            .camera
            .primary_ray(col, row, options.width, options.height)?;
        let color = tracer::trace(scene, &ray.origin, &ray.dir, options.depth)?;
        band.extend_from_slice(&color.to_u8());
    }
    Ok(band)
}

/// Renders every scanline, bottom row first. Rows are independent, so the
/// parallel path hands each one to rayon and collects them back in order.
fn render(scene: &Scene, options: &CliOptions) -> Result<Vec<Vec<u8>>, AlgebraError> {
    let progress = ProgressBar::new(options.height as u64);
    let rows = if options.use_multi_thread {
        (0..options.height)
            .into_par_iter()
            .map(|row| {
                let band = render_row(scene, row, options);
                progress.inc(1);
                band
            })
            .collect::<Result<Vec<_>, _>>()
    } else {
        (0..options.height)
            .map(|row| {
                let band = render_row(scene, row, options);
                progress.inc(1);
                band
            })
            .collect()
    };
    progress.finish_and_clear();
    rows
}

/// Writes the scanlines as an 8-bit RGB PNG. Row 0 is the bottom of the
/// picture but PNG stores top-down, so rows go out in reverse.
fn write_png(
    path: &str,
    rows: &[Vec<u8>],
    width: usize,
    height: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(Path::new(path))?;
    let ref mut w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width as u32, height as u32);
    encoder.set_color(png::ColorType::RGB);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    let mut data = Vec::with_capacity(width * height * 3);
    for row in rows.iter().rev() {
        data.extend_from_slice(row);
    }
    writer.write_image_data(&data)?;
    Ok(())
}
