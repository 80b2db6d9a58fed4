//! Depth visualization pipeline module
//!
//! This module provides a structured approach to turning packed depth frames
//! into viewable images, with separate modules for reading depth streams,
//! colorizing frames, TIFF writing, and conversion orchestration.

pub mod depth;
pub mod colorize;
pub mod tiff;
pub mod conversions;
pub mod timing;
pub mod common;

pub use common::{
    ConversionError,
    Result,
};

pub use depth::{
    DepthFrame,
    DepthSample,
    DepthFrameReader,
    FrameSizePolicy,
    RawDepthReader,
    MAX_DEPTH_MAGNITUDE,
};

pub use colorize::{
    ColorFrame,
    ColorPixel,
    DepthFrameDecoder,
    PlayerIndex,
    RgbImageData,
    colorize_into,
    colorize_sample,
};

pub use self::tiff::{
    TiffCompression,
    ConversionConfig,
    ConversionConfigBuilder,
    TiffWriter,
    StandardTiffWriter,
};

pub use conversions::{
    DepthToTiffPipeline,
};

pub use timing::FrameRateCounter;
