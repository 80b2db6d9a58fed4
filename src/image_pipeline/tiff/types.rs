//! Conversion configuration types

use crate::image_pipeline::depth::types::FrameSizePolicy;

/// Default depth stream geometry (320x240).
pub const DEFAULT_FRAME_WIDTH: usize = 320;
pub const DEFAULT_FRAME_HEIGHT: usize = 240;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced (default)
    DeflateBalanced,
}

/// Configuration for depth stream to TIFF conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Width of every depth frame in the stream, in pixels
    pub frame_width: usize,
    /// Height of every depth frame in the stream, in pixels
    pub frame_height: usize,
    /// What to do with frames whose size does not match the geometry
    pub size_policy: FrameSizePolicy,
    /// Compression method to use
    pub compression: TiffCompression,
    /// Predictor value for compression (typically 2 for horizontal differencing)
    /// Note: Predictor adds processing time, set to None for maximum speed
    pub predictor: Option<u16>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            size_policy: FrameSizePolicy::Reject,
            compression: TiffCompression::None,
            predictor: None,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    frame_size: Option<(usize, usize)>,
    size_policy: Option<FrameSizePolicy>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
}

impl ConversionConfigBuilder {
    pub fn frame_size(mut self, width: usize, height: usize) -> Self {
        self.frame_size = Some((width, height));
        self
    }

    pub fn size_policy(mut self, policy: FrameSizePolicy) -> Self {
        self.size_policy = Some(policy);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        let (frame_width, frame_height) = self
            .frame_size
            .unwrap_or((default.frame_width, default.frame_height));
        ConversionConfig {
            frame_width,
            frame_height,
            size_policy: self.size_policy.unwrap_or(default.size_policy),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
        }
    }
}
