//! Reader for headerless raw depth recordings.
//!
//! A recording is simply consecutive frames of little-endian packed samples,
//! exactly as the sensor hands them out, with no header or per-frame framing.
//! The frame geometry therefore has to be known up front.

use tracing::{debug, warn};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::depth::reader::DepthFrameReader;
use crate::image_pipeline::depth::types::{DepthFrame, FrameSizePolicy, frame_byte_len};

/// Splits a raw recording into fixed-size depth frames.
#[derive(Debug, Clone, Copy)]
pub struct RawDepthReader {
    width: usize,
    height: usize,
    policy: FrameSizePolicy,
}

impl RawDepthReader {
    pub fn new(width: usize, height: usize, policy: FrameSizePolicy) -> Self {
        Self { width, height, policy }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

impl DepthFrameReader for RawDepthReader {
    /// Splits `data` into frames of `width * height` samples.
    ///
    /// A trailing partial frame is an error under [`FrameSizePolicy::Reject`]
    /// and is dropped with a warning under [`FrameSizePolicy::Truncate`].
    ///
    /// # Examples
    ///
    /// ```
    /// use depth_falsecolor_rs::image_pipeline::{DepthFrameReader, FrameSizePolicy, RawDepthReader};
    ///
    /// let reader = RawDepthReader::new(2, 2, FrameSizePolicy::Reject);
    /// let frames = reader.read_frames(&[0u8; 16]).unwrap();
    /// assert_eq!(frames.len(), 2);
    /// ```
    fn read_frames(&self, data: &[u8]) -> Result<Vec<DepthFrame>> {
        let frame_len = frame_byte_len(self.width, self.height)?;
        debug!(
            "Splitting {} bytes into {}x{} depth frames ({} bytes each)",
            data.len(),
            self.width,
            self.height,
            frame_len
        );

        let chunks = data.chunks_exact(frame_len);
        let remainder = chunks.remainder();

        if !remainder.is_empty() {
            match self.policy {
                FrameSizePolicy::Reject => {
                    return Err(ConversionError::FrameSizeMismatch {
                        expected: frame_len,
                        actual: remainder.len(),
                    });
                }
                FrameSizePolicy::Truncate => {
                    warn!(
                        "Skipping trailing partial frame: {} of {} bytes",
                        remainder.len(),
                        frame_len
                    );
                }
            }
        }

        chunks
            .map(|chunk| DepthFrame::from_bytes(self.width, self.height, chunk.to_vec()))
            .collect()
    }
}
