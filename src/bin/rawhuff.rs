use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use rawhuff::{compress, decompress, CompressOptions};

/// Compress and decompress raw 8-bit grayscale images.
///
/// A raw image is a headerless byte stream of row-major pixels; its height
/// is derived from the file size and the width given on the command line.
#[derive(Parser)]
#[command(name = "rawhuff", version, about)]
struct Cli {
    /// Compress the input image.
    #[arg(short = 'c')]
    compress: bool,

    /// Decompress the input data.
    #[arg(short = 'd', conflicts_with = "compress")]
    decompress: bool,

    /// Input file: a raw image with -c, compressed data with -d.
    #[arg(short = 'i')]
    input: PathBuf,

    /// Output file.
    #[arg(short = 'o')]
    output: PathBuf,

    /// Width of the input image in pixels, required with -c.
    #[arg(short = 'w', value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Preprocess the image with the differential model.
    #[arg(short = 'm')]
    model: bool,

    /// Let the run-length stage pick the scan direction that packs best.
    #[arg(short = 'a')]
    adaptive: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.compress == cli.decompress {
        bail!("exactly one of -c or -d is required");
    }

    let data = fs::read(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let output = if cli.compress {
        let width = cli.width.context("-w is required with -c")?;
        let options = CompressOptions {
            model: cli.model,
            adaptive: cli.adaptive,
        };
        let packed = compress(&data, width, options)
            .with_context(|| format!("compressing {}", cli.input.display()))?;
        log::info!(
            "compressed {} bytes into {} ({:.1}%)",
            data.len(),
            packed.len(),
            packed.len() as f64 / data.len() as f64 * 100.0
        );
        packed
    } else {
        let pixels = decompress(&data)
            .with_context(|| format!("decompressing {}", cli.input.display()))?;
        log::info!("restored {} pixels from {} bytes", pixels.len(), data.len());
        pixels
    };

    fs::write(&cli.output, &output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    Ok(())
}
