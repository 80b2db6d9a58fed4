use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use depth_falsecolor_rs::image_pipeline::{
    ConversionConfig, DepthToTiffPipeline, FrameSizePolicy, TiffCompression,
};
use depth_falsecolor_rs::logger;

use tracing::info;

/// Render a raw depth + player-index recording as a false-color TIFF
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Headerless recording of little-endian 16-bit depth frames
    input: PathBuf,

    /// Multi-page TIFF to create, one page per frame
    output: PathBuf,

    /// Frame width in pixels
    #[arg(long, default_value_t = 320)]
    width: usize,

    /// Frame height in pixels
    #[arg(long, default_value_t = 240)]
    height: usize,

    /// TIFF compression method
    #[arg(long, value_enum, default_value_t = Compression::None)]
    compression: Compression,

    /// Use horizontal differencing before compression
    #[arg(long)]
    predictor: bool,

    /// Skip a trailing partial frame instead of failing
    #[arg(long)]
    truncate: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Compression {
    None,
    Lzw,
    DeflateFast,
    DeflateBalanced,
    DeflateBest,
}

impl From<Compression> for TiffCompression {
    fn from(value: Compression) -> Self {
        match value {
            Compression::None => TiffCompression::None,
            Compression::Lzw => TiffCompression::Lzw,
            Compression::DeflateFast => TiffCompression::DeflateFast,
            Compression::DeflateBalanced => TiffCompression::DeflateBalanced,
            Compression::DeflateBest => TiffCompression::DeflateBest,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_with_default(if args.verbose { "debug" } else { "info" });

    info!("Starting depth-falsecolor...");

    let config = ConversionConfig::builder()
        .frame_size(args.width, args.height)
        .size_policy(if args.truncate {
            FrameSizePolicy::Truncate
        } else {
            FrameSizePolicy::Reject
        })
        .compression(args.compression.into())
        .predictor(args.predictor.then_some(2))
        .build();
    let pipeline = DepthToTiffPipeline::new(config);

    info!(
        "Frame size: {}x{}, compression: {:?}, size policy: {:?}",
        pipeline.config().frame_width,
        pipeline.config().frame_height,
        pipeline.config().compression,
        pipeline.config().size_policy
    );

    let frames = pipeline
        .convert_file(&args.input, &args.output)
        .with_context(|| format!("converting {}", args.input.display()))?;

    info!("Wrote {} frame(s) to {}", frames, args.output.display());
    Ok(())
}
