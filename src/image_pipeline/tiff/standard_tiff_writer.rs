use std::io::Write;
use tracing::debug;
use crate::image_pipeline::colorize::types::RgbImageData;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::tiff::types::{ConversionConfig, TiffCompression};
use crate::image_pipeline::tiff::writer::TiffWriter;

/// Writes every frame as one RGB8 page of a single TIFF file.
pub struct StandardTiffWriter;

fn page_dimensions(frame: &RgbImageData) -> Result<(u32, u32)> {
    let invalid = || ConversionError::InvalidDimensions(frame.width, frame.height);
    let width = u32::try_from(frame.width).map_err(|_| invalid())?;
    let height = u32::try_from(frame.height).map_err(|_| invalid())?;

    if frame.data.len() != frame.width * frame.height * 3 {
        return Err(ConversionError::EncodeError(format!(
            "RGB frame {}x{} holds {} bytes",
            frame.width,
            frame.height,
            frame.data.len()
        )));
    }

    Ok((width, height))
}

impl TiffWriter for StandardTiffWriter {
    fn write_tiff(&self, frames: &[RgbImageData], output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        if frames.is_empty() {
            return Err(ConversionError::EncodeError("no frames to write".to_string()));
        }
        debug!("Encoding {} TIFF page(s)", frames.len());

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => tiff::tags::Predictor::Horizontal,
                _ => tiff::tags::Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        for (page, frame) in frames.iter().enumerate() {
            let (width, height) = page_dimensions(frame)?;
            debug!("Encoding page {}: {}x{}", page, width, height);

            encoder.write_image::<tiff::encoder::colortype::RGB8>(
                width,
                height,
                &frame.data,
            ).map_err(|e| ConversionError::EncodeError(e.to_string()))?;
        }

        drop(encoder);
        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
