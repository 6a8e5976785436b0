//! Command-line rMQR encoder: reads a data string, picks (or is told) a
//! version, and rasterizes the result to an image file. Ported from
//! `rmqrcode`'s `console.py` argument layout.

use clap::Parser;
use image::{GrayImage, Luma};

use rmqrcode::{fit, EccLevel, FitStrategy, Mode, Symbol};

/// Encode data into an rMQR Code image.
#[derive(Parser, Debug)]
#[command(name = "rmqrcode", about = "Rectangular Micro QR Code encoder")]
struct Args {
    /// Data to encode.
    data: String,

    /// Output file path.
    output: String,

    /// Error correction level.
    #[arg(long, value_parser = ["M", "H"], default_value = "M")]
    ecc: String,

    /// rMQR Code version, like "R11x139". If omitted, one is chosen to fit.
    #[arg(long)]
    version: Option<String>,

    /// Strategy for picking a version when --version is not given.
    #[arg(long = "fit-strategy", value_parser = ["min_width", "min_height", "balanced"], default_value = "balanced")]
    fit_strategy: String,

    /// Module size in pixels.
    #[arg(long, default_value_t = 8)]
    scale: u32,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let ecc = match args.ecc.as_str() {
        "H" => EccLevel::H,
        _ => EccLevel::M,
    };
    let strategy = match args.fit_strategy.as_str() {
        "min_width" => FitStrategy::MinimizeWidth,
        "min_height" => FitStrategy::MinimizeHeight,
        _ => FitStrategy::Balanced,
    };

    let symbol = match make_symbol(&args.data, ecc, args.version.as_deref(), strategy) {
        Ok(symbol) => symbol,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = save_image(&symbol, args.scale, &args.output) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn make_symbol(
    data: &str,
    ecc: EccLevel,
    version: Option<&str>,
    strategy: FitStrategy,
) -> rmqrcode::Result<Symbol> {
    match version {
        Some(version_name) => {
            let mut symbol = Symbol::new(version_name, ecc)?;
            symbol.add_segment(Mode::Byte, data);
            symbol.make()?;
            Ok(symbol)
        }
        None => fit(data, ecc, strategy),
    }
}

fn save_image(symbol: &Symbol, scale: u32, output: &str) -> image::ImageResult<()> {
    let grid = symbol.to_grid(true);
    let height = grid.len() as u32;
    let width = grid[0].len() as u32;

    let mut image = GrayImage::new(width * scale, height * scale);
    for (y, row) in grid.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            let value = if cell == 1 { 0u8 } else { 255u8 };
            for dy in 0..scale {
                for dx in 0..scale {
                    image.put_pixel(x as u32 * scale + dx, y as u32 * scale + dy, Luma([value]));
                }
            }
        }
    }
    image.save(output)
}
