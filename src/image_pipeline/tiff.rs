//! TIFF writing module
//!
//! This module persists colorized depth frames as multi-page RGB TIFF files
//! with various compression options.

mod writer;
mod standard_tiff_writer;
pub mod types;

pub use writer::TiffWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{TiffCompression, ConversionConfig, ConversionConfigBuilder};
