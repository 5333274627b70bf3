//! The raster shape the rest of the crate is built around.

use crate::error::{EncodeError, EncodeResult};

/// Sample depth of an RGBA raster: either 8 or 16 bits per channel.
///
/// PNG allows other depths for other color types, but this crate only emits
/// color type 6 (RGBA), for which the spec permits 8 or 16.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
  Eight,
  Sixteen,
}

impl BitDepth {
  /// Bytes per pixel for RGBA at this depth: 4 for 8-bit, 8 for 16-bit.
  #[inline]
  #[must_use]
  pub const fn bytes_per_pixel(self) -> usize {
    match self {
      Self::Eight => 4,
      Self::Sixteen => 8,
    }
  }

  /// The IHDR bit-depth byte.
  #[inline]
  #[must_use]
  pub const fn as_u8(self) -> u8 {
    match self {
      Self::Eight => 8,
      Self::Sixteen => 16,
    }
  }

  pub fn try_from_u8(value: u8) -> EncodeResult<Self> {
    match value {
      8 => Ok(Self::Eight),
      16 => Ok(Self::Sixteen),
      other => Err(EncodeError::Config(format!(
        "bit depth must be 8 or 16 for RGBA, got {other}"
      ))),
    }
  }
}

/// The width, height and sample depth of the raster being encoded.
///
/// Color type is implicitly fixed to RGBA (type 6); see spec.md's Non-goals
/// for why no other color type is supported.
#[derive(Debug, Clone, Copy)]
pub struct ImageDescriptor {
  pub width: u32,
  pub height: u32,
  pub bit_depth: BitDepth,
}

impl ImageDescriptor {
  /// The 31-bit signed limit PNG (and this crate) imposes on each dimension.
  pub const MAX_DIMENSION: u32 = i32::MAX as u32;

  pub fn new(width: u32, height: u32, bit_depth: BitDepth) -> EncodeResult<Self> {
    if width == 0 || height == 0 {
      return Err(EncodeError::Config("width and height must both be positive".into()));
    }
    if width > Self::MAX_DIMENSION || height > Self::MAX_DIMENSION {
      return Err(EncodeError::Config(format!(
        "width and height must fit in 31 bits, got {width}x{height}"
      )));
    }
    Ok(Self { width, height, bit_depth })
  }

  /// Bytes per pixel: 4 for 8-bit RGBA, 8 for 16-bit RGBA.
  #[inline]
  #[must_use]
  pub const fn bytes_per_pixel(self) -> usize {
    self.bit_depth.bytes_per_pixel()
  }

  /// Bytes in one prepared scanline, including the leading filter byte.
  #[inline]
  #[must_use]
  pub fn stride(self) -> usize {
    self.width as usize * self.bytes_per_pixel() + 1
  }

  /// Bytes in the fully prepared buffer for the whole image (all `height`
  /// scanlines). This is the length the decompressed IDAT payload must have.
  #[inline]
  #[must_use]
  pub fn prepared_len(self) -> usize {
    self.stride() * self.height as usize
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_zero_dimensions() {
    assert!(ImageDescriptor::new(0, 10, BitDepth::Eight).is_err());
    assert!(ImageDescriptor::new(10, 0, BitDepth::Eight).is_err());
  }

  #[test]
  fn rejects_oversized_dimensions() {
    assert!(ImageDescriptor::new(ImageDescriptor::MAX_DIMENSION + 1, 10, BitDepth::Eight).is_err());
  }

  #[test]
  fn stride_and_prepared_len() {
    let desc = ImageDescriptor::new(4, 4, BitDepth::Eight).unwrap();
    assert_eq!(desc.stride(), 4 * 4 + 1);
    assert_eq!(desc.prepared_len(), (4 * 4 + 1) * 4);
  }
}
