use tracing::{debug, info, instrument};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    colorize::{DepthFrameDecoder, RgbImageData},
    common::error::{ConversionError, Result},
    depth::{DepthFrameReader, RawDepthReader},
    tiff::{TiffWriter, StandardTiffWriter, ConversionConfig},
    timing::{FrameRateCounter, PipelineTimings, Timer},
};

pub struct DepthToTiffPipeline<R: DepthFrameReader, W: TiffWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl DepthToTiffPipeline<RawDepthReader, StandardTiffWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: RawDepthReader::new(config.frame_width, config.frame_height, config.size_policy),
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<R: DepthFrameReader, W: TiffWriter> DepthToTiffPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    /// Reads every depth frame in `input_data`, colorizes it and writes the
    /// frames as TIFF pages to `output`. Returns the number of frames written.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<usize> {
        info!("Starting depth to TIFF conversion");
        let mut timings = PipelineTimings::new();

        let depth_frames = {
            let _span = tracing::info_span!("read_depth").entered();
            let timer = Timer::start("read");
            let frames = self.reader.read_frames(input_data)?;
            timings.record(timer);
            frames
        };

        if depth_frames.is_empty() {
            return Err(ConversionError::DecodeError(
                "input contains no complete depth frame".to_string(),
            ));
        }

        let color_frames: Vec<RgbImageData> = {
            let _span = tracing::info_span!("colorize",
                frames = depth_frames.len(),
                width = self.config.frame_width,
                height = self.config.frame_height
            ).entered();

            let mut decoder = DepthFrameDecoder::with_policy(
                self.config.frame_width,
                self.config.frame_height,
                self.config.size_policy,
            )?;
            let mut frame_rate = FrameRateCounter::new();
            let mut frames = Vec::with_capacity(depth_frames.len());

            for depth_frame in &depth_frames {
                let timer = Timer::start("decode");
                let color = decoder.decode_frame(depth_frame)?;
                frames.push(color.to_rgb());
                timings.record(timer);

                if let Some(fps) = frame_rate.tick() {
                    info!(fps, "Colorizing depth frames");
                }
            }
            frames
        };

        {
            let _span = tracing::info_span!("encode_tiff").entered();
            let timer = Timer::start("encode");
            self.writer.write_tiff(&color_frames, output, &self.config)?;
            timings.record(timer);
        }

        debug!("Step timings:");
        timings.log_summary();

        info!(
            frames = color_frames.len(),
            width = self.config.frame_width,
            height = self.config.frame_height,
            "Conversion complete"
        );
        Ok(color_frames.len())
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<usize> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.convert(&input_data, &mut output_file)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }
}
