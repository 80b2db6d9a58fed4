use std::io::Write;
use crate::image_pipeline::colorize::types::RgbImageData;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::tiff::types::ConversionConfig;

pub trait TiffWriter {
    fn write_tiff(&self, frames: &[RgbImageData], output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}
