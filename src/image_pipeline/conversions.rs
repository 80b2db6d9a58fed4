//! Pipeline conversions module
//!
//! This module contains orchestration logic for turning depth recordings into images.

mod depth_to_tiff;


pub use depth_to_tiff::DepthToTiffPipeline;
