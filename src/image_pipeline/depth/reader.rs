use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::depth::types::DepthFrame;

pub trait DepthFrameReader {
    fn read_frames(&self, data: &[u8]) -> Result<Vec<DepthFrame>>;
}
