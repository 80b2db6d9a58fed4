//! Depth stream reading module
//!
//! This module provides the packed depth sample model and readers that split
//! recorded depth streams into frames.

mod reader;
mod raw_reader;
pub mod types;

pub use reader::DepthFrameReader;
pub use raw_reader::RawDepthReader;
pub use types::{DepthFrame, DepthSample, FrameSizePolicy, MAX_DEPTH_MAGNITUDE};
