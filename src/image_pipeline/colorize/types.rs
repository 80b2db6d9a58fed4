//! Types for colorized depth output

use bytemuck::{Pod, Zeroable};

/// Bytes per output pixel (B, G, R, reserved).
pub const BYTES_PER_PIXEL: usize = 4;

/// One 32-bit BGRX pixel, laid out as the bytes appear in the frame buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct ColorPixel {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    /// Unused, always written as 0
    pub reserved: u8,
}

impl ColorPixel {
    pub const fn from_rgb([red, green, blue]: [u8; 3]) -> Self {
        Self {
            blue,
            green,
            red,
            reserved: 0,
        }
    }

    pub const fn rgb(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

/// A decoded frame borrowed from the decoder's scratch buffer.
///
/// Holding a `ColorFrame` keeps the decoder borrowed, so the buffer cannot be
/// overwritten by another decode while the frame is in use.
#[derive(Debug, Clone, Copy)]
pub struct ColorFrame<'a> {
    width: usize,
    height: usize,
    data: &'a [u8],
}

impl<'a> ColorFrame<'a> {
    pub(crate) fn new(width: usize, height: usize, data: &'a [u8]) -> Self {
        Self { width, height, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row stride in bytes for bitmap consumers.
    pub fn stride(&self) -> usize {
        self.width * BYTES_PER_PIXEL
    }

    /// Number of pixels actually decoded into this frame.
    pub fn pixel_count(&self) -> usize {
        self.data.len() / BYTES_PER_PIXEL
    }

    /// Packed BGRX bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn pixels(&self) -> &'a [ColorPixel] {
        bytemuck::cast_slice(self.data)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<ColorPixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels().get(y * self.width + x).copied()
    }

    /// Copies the frame into an owned, tightly packed RGB8 image.
    pub fn to_rgb(&self) -> RgbImageData {
        let data = self.pixels().iter().flat_map(|p| p.rgb()).collect();
        RgbImageData {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// RGB image data ready for encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// RGB pixel data interleaved [R, G, B, R, G, B, ...]
    pub data: Vec<u8>,
}
