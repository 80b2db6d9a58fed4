//! Depth colorization module
//!
//! Turns packed depth + player frames into 32-bit BGRX bitmaps using a fixed
//! per-player palette.

mod depth_decoder;
pub mod palette;
pub mod types;

pub use depth_decoder::{DepthFrameDecoder, colorize_into, colorize_sample};
pub use palette::{ChannelLevel, PALETTE, PlayerColor, PlayerIndex};
pub use types::{ColorFrame, ColorPixel, RgbImageData};
