//! False-color decoding of packed depth frames.
//!
//! Each 16-bit depth + player sample becomes one BGRX pixel: the depth is
//! turned into a brightness (nearer is brighter) and the player index picks
//! which channels that brightness lands in, see [`PALETTE`](super::palette::PALETTE).

use tracing::{trace, warn};

use crate::image_pipeline::colorize::palette::PlayerIndex;
use crate::image_pipeline::colorize::types::{BYTES_PER_PIXEL, ColorFrame, ColorPixel};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::depth::types::{
    BYTES_PER_SAMPLE, DepthFrame, DepthSample, FrameSizePolicy, frame_byte_len,
};

/// Colors a single sample.
#[inline]
pub fn colorize_sample(sample: DepthSample) -> ColorPixel {
    let intensity = sample.intensity();
    ColorPixel::from_rgb(PlayerIndex::of(sample).color().shade(intensity))
}

/// Colors `input` into a caller-owned BGRX buffer.
///
/// Input and output cursors advance in lockstep, two bytes in for four bytes
/// out, and the loop stops as soon as either side runs out. Excess input and
/// a trailing odd byte are ignored. Returns the number of pixels written.
pub fn colorize_into(input: &[u8], output: &mut [u8]) -> usize {
    let mut written = 0;
    for (pair, pixel) in input
        .chunks_exact(BYTES_PER_SAMPLE)
        .zip(output.chunks_exact_mut(BYTES_PER_PIXEL))
    {
        let color = colorize_sample(DepthSample::from_le_bytes([pair[0], pair[1]]));
        pixel.copy_from_slice(bytemuck::bytes_of(&color));
        written += 1;
    }
    written
}

/// Decoder owning a reusable output buffer.
///
/// The buffer is sized once for the largest frame the decoder accepts and is
/// overwritten on every call. [`decode`](Self::decode) takes `&mut self`, so at
/// most one decode can write the buffer at a time, and the returned
/// [`ColorFrame`] must be dropped before the next decode.
#[derive(Debug)]
pub struct DepthFrameDecoder {
    width: usize,
    height: usize,
    policy: FrameSizePolicy,
    buffer: Vec<u8>,
}

impl DepthFrameDecoder {
    /// Creates a decoder for frames up to `width x height` that rejects
    /// mismatched input.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_policy(width, height, FrameSizePolicy::default())
    }

    pub fn with_policy(width: usize, height: usize, policy: FrameSizePolicy) -> Result<Self> {
        let input_len = frame_byte_len(width, height)?;
        let buffer_len = (input_len / BYTES_PER_SAMPLE)
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or(ConversionError::InvalidDimensions(width, height))?;

        Ok(Self {
            width,
            height,
            policy,
            buffer: vec![0u8; buffer_len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn policy(&self) -> FrameSizePolicy {
        self.policy
    }

    /// Maximum number of pixels a single decode can produce.
    pub fn capacity(&self) -> usize {
        self.buffer.len() / BYTES_PER_PIXEL
    }

    /// Decodes a packed frame declared as `width x height`.
    ///
    /// # Arguments
    ///
    /// * `input` - Little-endian packed depth samples
    /// * `width`, `height` - Declared frame geometry
    ///
    /// # Returns
    ///
    /// * `Ok(ColorFrame)` - View into the decoder's buffer, always holding
    ///   exactly `width * height()` pixels. Under [`FrameSizePolicy::Truncate`]
    ///   excess input is ignored, missing samples are left black, and a frame
    ///   taller than the buffer keeps only the rows that fit.
    /// * `Err(ConversionError::FrameSizeMismatch)` - Under
    ///   [`FrameSizePolicy::Reject`], when `input` is not exactly
    ///   `width * height * 2` bytes
    /// * `Err(ConversionError::InvalidDimensions)` - Zero dimensions, more
    ///   pixels than the decoder was built for (`Reject`), or a single row
    ///   wider than the buffer (`Truncate`)
    ///
    /// # Examples
    ///
    /// ```
    /// use depth_falsecolor_rs::image_pipeline::DepthFrameDecoder;
    ///
    /// let mut decoder = DepthFrameDecoder::new(2, 1).unwrap();
    /// // background pixel at depth 0, player 1 pixel at max depth
    /// let frame = decoder.decode(&[0x00, 0x00, 0xF9, 0x7F], 2, 1).unwrap();
    /// assert_eq!(frame.as_bytes(), &[127, 127, 127, 0, 0, 0, 0, 0]);
    /// ```
    pub fn decode(&mut self, input: &[u8], width: usize, height: usize) -> Result<ColorFrame<'_>> {
        let expected = frame_byte_len(width, height)?;

        let rows = match self.policy {
            FrameSizePolicy::Reject => {
                if input.len() != expected {
                    return Err(ConversionError::FrameSizeMismatch {
                        expected,
                        actual: input.len(),
                    });
                }
                if width * height > self.capacity() {
                    return Err(ConversionError::InvalidDimensions(width, height));
                }
                height
            }
            FrameSizePolicy::Truncate => {
                let rows = height.min(self.capacity() / width);
                if rows == 0 {
                    return Err(ConversionError::InvalidDimensions(width, height));
                }
                if input.len() != expected || rows < height {
                    warn!(
                        "Depth frame is {} bytes, expected {} for {}x{}; truncating to {}x{}",
                        input.len(),
                        expected,
                        width,
                        height,
                        width,
                        rows
                    );
                }
                rows
            }
        };

        let frame_len = width * rows * BYTES_PER_PIXEL;
        let output = &mut self.buffer[..frame_len];
        let written = colorize_into(input, output);
        output[written * BYTES_PER_PIXEL..].fill(0);
        trace!("Decoded {} of {} depth pixels", written, width * rows);

        Ok(ColorFrame::new(width, rows, &self.buffer[..frame_len]))
    }

    pub fn decode_frame(&mut self, frame: &DepthFrame) -> Result<ColorFrame<'_>> {
        self.decode(frame.as_bytes(), frame.width(), frame.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel_bytes(samples: &[DepthSample]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn test_background_at_zero_depth_is_mid_gray() {
        let pixel = colorize_sample(DepthSample::pack(0, 0));
        assert_eq!(pixel.rgb(), [127, 127, 127]);
        assert_eq!(pixel.reserved, 0);
    }

    #[test]
    fn test_player_one_at_max_depth_is_black() {
        let pixel = colorize_sample(DepthSample::pack(1, 4095));
        assert_eq!(pixel.rgb(), [0, 0, 0]);
    }

    #[test]
    fn test_player_seven_inverts_intensity() {
        // depth 2490 gives intensity 100
        let pixel = colorize_sample(DepthSample::pack(7, 2490));
        assert_eq!(pixel.rgb(), [155, 155, 155]);
    }

    #[test]
    fn test_output_byte_order_is_bgrx() {
        let mut out = [0xAAu8; 4];
        // player 1 at depth 0: pure red
        let written = colorize_into(&DepthSample::pack(1, 0).to_le_bytes(), &mut out);
        assert_eq!(written, 1);
        assert_eq!(out, [0, 0, 255, 0]);
    }

    #[test]
    fn test_colorize_into_stops_at_output_boundary() {
        let input = pixel_bytes(&[DepthSample::pack(2, 0); 10]);
        let mut out = vec![0u8; 4 * 3 + 2];

        let written = colorize_into(&input, &mut out);

        assert_eq!(written, 3);
        assert_eq!(&out[12..], &[0, 0]);
    }

    #[test]
    fn test_colorize_into_ignores_odd_trailing_byte() {
        let mut input = pixel_bytes(&[DepthSample::pack(2, 0); 2]);
        input.push(0xFF);
        let mut out = vec![0u8; 16];

        assert_eq!(colorize_into(&input, &mut out), 2);
        assert_eq!(&out[8..], &[0u8; 8]);
    }

    #[test]
    fn test_colorize_into_output_is_twice_input_length() {
        let mut out = vec![0u8; 8 * 4 * BYTES_PER_PIXEL];
        for samples in 0..=32usize {
            let input = pixel_bytes(&vec![DepthSample::pack(3, 100); samples]);
            let written = colorize_into(&input, &mut out);
            assert_eq!(written * BYTES_PER_PIXEL, 2 * input.len());
        }
    }

    #[test]
    fn test_truncate_geometry_matches_pixels() {
        let mut decoder = DepthFrameDecoder::with_policy(8, 4, FrameSizePolicy::Truncate).unwrap();
        for samples in 0..=40usize {
            let input = pixel_bytes(&vec![DepthSample::pack(3, 100); samples]);
            let frame = decoder.decode(&input, 8, 4).unwrap();
            assert_eq!((frame.width(), frame.height()), (8, 4));
            assert_eq!(frame.pixel_count(), frame.width() * frame.height());
        }
    }

    #[test]
    fn test_truncate_ignores_excess_input() {
        let mut decoder = DepthFrameDecoder::with_policy(320, 240, FrameSizePolicy::Truncate).unwrap();
        let input = pixel_bytes(&[DepthSample::pack(1, 0); 100]);

        let frame = decoder.decode(&input, 3, 2).unwrap();

        assert_eq!((frame.width(), frame.height()), (3, 2));
        assert_eq!(frame.pixel_count(), 6);
        assert_eq!(frame.stride() * frame.height(), frame.as_bytes().len());
    }

    #[test]
    fn test_truncate_leaves_missing_samples_black() {
        let mut decoder = DepthFrameDecoder::with_policy(4, 4, FrameSizePolicy::Truncate).unwrap();
        // fill the buffer first so stale pixels would show
        decoder.decode(&pixel_bytes(&[DepthSample::pack(2, 0); 16]), 4, 4).unwrap();

        let frame = decoder.decode(&pixel_bytes(&[DepthSample::pack(1, 0); 3]), 4, 4).unwrap();

        assert_eq!(frame.pixel_count(), 16);
        assert_eq!(frame.pixel(2, 0).map(|p| p.rgb()), Some([255, 0, 0]));
        assert!(frame.pixels()[3..].iter().all(|p| *p == ColorPixel::default()));
    }

    #[test]
    fn test_truncate_keeps_rows_that_fit() {
        let mut decoder = DepthFrameDecoder::with_policy(2, 2, FrameSizePolicy::Truncate).unwrap();
        let input = pixel_bytes(&[DepthSample::pack(1, 0); 9]);

        let frame = decoder.decode(&input, 3, 3).unwrap();

        assert_eq!((frame.width(), frame.height()), (3, 1));
        assert_eq!(frame.pixel_count(), 3);
        assert_eq!(decoder.capacity(), 4);
    }

    #[test]
    fn test_truncate_rejects_row_wider_than_buffer() {
        let mut decoder = DepthFrameDecoder::with_policy(2, 2, FrameSizePolicy::Truncate).unwrap();
        let input = pixel_bytes(&[DepthSample::pack(1, 0); 5]);

        assert!(matches!(
            decoder.decode(&input, 5, 1),
            Err(ConversionError::InvalidDimensions(5, 1))
        ));
    }

    #[test]
    fn test_reject_short_and_long_input() {
        let mut decoder = DepthFrameDecoder::new(2, 2).unwrap();

        let short = pixel_bytes(&[DepthSample::pack(0, 0); 3]);
        assert!(matches!(
            decoder.decode(&short, 2, 2),
            Err(ConversionError::FrameSizeMismatch { expected: 8, actual: 6 })
        ));

        let long = pixel_bytes(&[DepthSample::pack(0, 0); 5]);
        assert!(matches!(
            decoder.decode(&long, 2, 2),
            Err(ConversionError::FrameSizeMismatch { expected: 8, actual: 10 })
        ));

        let odd = vec![0u8; 7];
        assert!(matches!(
            decoder.decode(&odd, 2, 2),
            Err(ConversionError::FrameSizeMismatch { expected: 8, actual: 7 })
        ));
    }

    #[test]
    fn test_reject_frame_larger_than_capacity() {
        let mut decoder = DepthFrameDecoder::new(2, 2).unwrap();
        let input = pixel_bytes(&[DepthSample::pack(0, 0); 9]);

        assert!(matches!(
            decoder.decode(&input, 3, 3),
            Err(ConversionError::InvalidDimensions(3, 3))
        ));
    }

    #[test]
    fn test_smaller_frame_fits_larger_decoder() {
        let mut decoder = DepthFrameDecoder::new(320, 240).unwrap();
        let input = pixel_bytes(&[DepthSample::pack(1, 0); 6]);

        let frame = decoder.decode(&input, 3, 2).unwrap();

        assert_eq!(frame.pixel_count(), 6);
        assert_eq!(frame.stride(), 12);
        assert_eq!(frame.pixel(2, 1).map(|p| p.rgb()), Some([255, 0, 0]));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            DepthFrameDecoder::new(0, 240),
            Err(ConversionError::InvalidDimensions(0, 240))
        ));
    }

    #[test]
    fn test_decode_is_repeatable() {
        let samples: Vec<DepthSample> = (0..64u16)
            .map(|i| DepthSample::pack((i % 8) as u8, i * 61))
            .collect();
        let frame = DepthFrame::from_samples(8, 8, &samples).unwrap();

        let mut first = DepthFrameDecoder::new(8, 8).unwrap();
        let mut second = DepthFrameDecoder::new(8, 8).unwrap();
        let a = first.decode_frame(&frame).unwrap().as_bytes().to_vec();
        let b = second.decode_frame(&frame).unwrap().as_bytes().to_vec();
        // reusing the same buffer gives the same result
        let c = first.decode_frame(&frame).unwrap().as_bytes().to_vec();

        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_every_sample_matches_palette() {
        for raw in 0..=u16::MAX {
            let sample = DepthSample::from_raw(raw);
            let intensity = sample.intensity();
            let [r, g, b] = colorize_sample(sample).rgb();
            let (er, eg, eb) = match sample.player_bits() {
                0 => (intensity / 2, intensity / 2, intensity / 2),
                1 => (intensity, 0, 0),
                2 => (0, intensity, 0),
                3 => (intensity / 4, intensity, intensity),
                4 => (intensity, intensity, intensity / 4),
                5 => (intensity, intensity / 4, intensity),
                6 => (intensity / 2, intensity / 2, intensity),
                7 => (255 - intensity, 255 - intensity, 255 - intensity),
                other => panic!("unexpected player {}", other),
            };
            assert_eq!((r, g, b), (er, eg, eb), "sample {:#06x}", raw);
        }
    }

    #[test]
    fn test_brightness_never_increases_with_depth() {
        for player in 0..8u8 {
            let mut previous = colorize_sample(DepthSample::pack(player, 0));
            for depth in 1..=0x1fffu16 {
                let current = colorize_sample(DepthSample::pack(player, depth));
                if player == 7 {
                    // inverted channels darken as things get nearer
                    assert!(current.red >= previous.red);
                } else {
                    assert!(current.red <= previous.red);
                    assert!(current.green <= previous.green);
                    assert!(current.blue <= previous.blue);
                }
                previous = current;
            }
        }
    }
}
