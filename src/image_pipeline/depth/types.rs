//! Packed depth sample and frame types

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Number of bits at the bottom of every sample that carry the player index.
pub const PLAYER_INDEX_BITS: u32 = 3;

/// Mask selecting the player index from the low byte of a sample.
pub const PLAYER_INDEX_MASK: u8 = 0x07;

/// Largest depth magnitude mapped onto the intensity scale.
///
/// The 13-bit field can reach 8191, but only the low 12 bits are displayed:
/// anything above this value saturates to the far end of the scale.
pub const MAX_DEPTH_MAGNITUDE: u16 = 0x0fff;

/// Bytes per packed sample.
pub const BYTES_PER_SAMPLE: usize = 2;

/// How a frame whose byte length does not match its declared dimensions is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameSizePolicy {
    /// Fail with `FrameSizeMismatch` (default)
    #[default]
    Reject,
    /// Decode as many whole samples as fit and ignore the rest
    Truncate,
}

/// One packed 16-bit depth + player-index sample.
///
/// Bits 0-2 hold the player index, bits 3-15 the depth magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthSample(u16);

impl DepthSample {
    /// Builds a sample from its little-endian byte pair `[low, high]`.
    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }

    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Packs a player index and depth magnitude. Depth bits above 13 are dropped.
    pub const fn pack(player_bits: u8, depth: u16) -> Self {
        Self((depth << PLAYER_INDEX_BITS) | (player_bits & PLAYER_INDEX_MASK) as u16)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    /// The 3-bit player index (0 = background).
    pub const fn player_bits(self) -> u8 {
        (self.0 as u8) & PLAYER_INDEX_MASK
    }

    /// The full 13-bit depth field: `(high << 5) | (low >> 3)`.
    pub const fn raw_depth(self) -> u16 {
        self.0 >> PLAYER_INDEX_BITS
    }

    /// Depth on the display scale, saturated at [`MAX_DEPTH_MAGNITUDE`].
    pub const fn depth_magnitude(self) -> u16 {
        let depth = self.raw_depth();
        if depth > MAX_DEPTH_MAGNITUDE {
            MAX_DEPTH_MAGNITUDE
        } else {
            depth
        }
    }

    /// 8-bit brightness for this sample; nearer is brighter.
    ///
    /// `255 - 255 * depth / 4095` with truncating integer division.
    pub const fn intensity(self) -> u8 {
        let depth = self.depth_magnitude() as u32;
        (255 - (255 * depth) / MAX_DEPTH_MAGNITUDE as u32) as u8
    }
}

/// A single row-major frame of packed depth samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthFrame {
    width: usize,
    height: usize,
    /// Little-endian packed samples, `width * height * 2` bytes
    data: Vec<u8>,
}

impl DepthFrame {
    /// Wraps raw bytes, checking they hold exactly `width * height` samples.
    pub fn from_bytes(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = frame_byte_len(width, height)?;
        if data.len() != expected {
            return Err(ConversionError::FrameSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { width, height, data })
    }

    pub fn from_samples(width: usize, height: usize, samples: &[DepthSample]) -> Result<Self> {
        let data = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        Self::from_bytes(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn samples(&self) -> impl Iterator<Item = DepthSample> + '_ {
        self.data
            .chunks_exact(BYTES_PER_SAMPLE)
            .map(|pair| DepthSample::from_le_bytes([pair[0], pair[1]]))
    }

    pub fn sample(&self, x: usize, y: usize) -> Option<DepthSample> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * BYTES_PER_SAMPLE;
        Some(DepthSample::from_le_bytes([
            self.data[offset],
            self.data[offset + 1],
        ]))
    }
}

/// Byte length of a packed frame, rejecting empty or overflowing dimensions.
pub fn frame_byte_len(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(ConversionError::InvalidDimensions(width, height));
    }
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(BYTES_PER_SAMPLE))
        .ok_or(ConversionError::InvalidDimensions(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpacks_player_and_depth_from_bytes() {
        // depth 2490, player 7 -> 0x4DD7
        let sample = DepthSample::from_le_bytes([0xD7, 0x4D]);
        assert_eq!(sample.player_bits(), 7);
        assert_eq!(sample.raw_depth(), 2490);
        assert_eq!(sample.intensity(), 100);
    }

    #[test]
    fn test_raw_depth_matches_byte_formula() {
        for raw in 0..=u16::MAX {
            let [low, high] = raw.to_le_bytes();
            let expected = ((high as u16) << 5) | ((low as u16) >> 3);
            assert_eq!(DepthSample::from_raw(raw).raw_depth(), expected);
        }
    }

    #[test]
    fn test_depth_magnitude_never_exceeds_display_range() {
        for raw in 0..=u16::MAX {
            let sample = DepthSample::from_raw(raw);
            assert!(sample.raw_depth() <= 0x1fff);
            assert!(sample.depth_magnitude() <= MAX_DEPTH_MAGNITUDE);
        }
    }

    #[test]
    fn test_intensity_extremes() {
        assert_eq!(DepthSample::pack(0, 0).intensity(), 255);
        assert_eq!(DepthSample::pack(0, MAX_DEPTH_MAGNITUDE).intensity(), 0);
        // top bit set saturates to far
        assert_eq!(DepthSample::pack(0, 0x1fff).intensity(), 0);
    }

    #[test]
    fn test_intensity_is_non_increasing_in_depth() {
        let mut previous = u8::MAX;
        for depth in 0..=0x1fff {
            let intensity = DepthSample::pack(3, depth).intensity();
            assert!(intensity <= previous, "depth {} brightened", depth);
            previous = intensity;
        }
    }

    #[test]
    fn test_pack_masks_player_bits() {
        let sample = DepthSample::pack(0xff, 10);
        assert_eq!(sample.player_bits(), 7);
        assert_eq!(sample.raw_depth(), 10);
    }

    #[test]
    fn test_frame_rejects_wrong_length() {
        let result = DepthFrame::from_bytes(4, 2, vec![0u8; 15]);
        assert!(matches!(
            result,
            Err(ConversionError::FrameSizeMismatch { expected: 16, actual: 15 })
        ));
    }

    #[test]
    fn test_frame_rejects_zero_dimensions() {
        let result = DepthFrame::from_bytes(0, 240, Vec::new());
        assert!(matches!(result, Err(ConversionError::InvalidDimensions(0, 240))));
    }

    #[test]
    fn test_frame_sample_lookup() {
        let samples: Vec<DepthSample> = (0..6).map(|i| DepthSample::pack(1, i * 100)).collect();
        let frame = DepthFrame::from_samples(3, 2, &samples).unwrap();

        assert_eq!(frame.pixel_count(), 6);
        assert_eq!(frame.sample(2, 1), Some(samples[5]));
        assert_eq!(frame.sample(3, 0), None);
        assert_eq!(frame.samples().collect::<Vec<_>>(), samples);
    }
}
