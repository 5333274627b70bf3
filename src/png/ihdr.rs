//! IHDR: the one chunk that must come first and fully determines how
//! every later scanline is laid out.

use crate::image::ImageDescriptor;

/// Color type 6 (truecolor with alpha) is the only one this encoder ever
/// emits; RGB without alpha or palette images aren't in scope (spec.md
/// §1 Non-goals).
const COLOR_TYPE_RGBA: u8 = 6;
const COMPRESSION_METHOD_DEFLATE: u8 = 0;
const FILTER_METHOD_ADAPTIVE: u8 = 0;
const INTERLACE_METHOD_NONE: u8 = 0;

pub fn encode(image: ImageDescriptor) -> Vec<u8> {
  let mut data = Vec::with_capacity(13);
  data.extend_from_slice(&image.width.to_be_bytes());
  data.extend_from_slice(&image.height.to_be_bytes());
  data.push(image.bit_depth.as_u8());
  data.push(COLOR_TYPE_RGBA);
  data.push(COMPRESSION_METHOD_DEFLATE);
  data.push(FILTER_METHOD_ADAPTIVE);
  data.push(INTERLACE_METHOD_NONE);
  data
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::image::BitDepth;

  #[test]
  fn encodes_a_13_byte_body_with_fixed_trailing_fields() {
    let image = ImageDescriptor::new(800, 600, BitDepth::Eight).unwrap();
    let body = encode(image);
    assert_eq!(body.len(), 13);
    assert_eq!(&body[0..4], &800u32.to_be_bytes());
    assert_eq!(&body[4..8], &600u32.to_be_bytes());
    assert_eq!(body[8], 8);
    assert_eq!(body[9], 6);
    assert_eq!(body[10], 0);
    assert_eq!(body[11], 0);
    assert_eq!(body[12], 0);
  }

  #[test]
  fn sixteen_bit_depth_is_reflected() {
    let image = ImageDescriptor::new(4, 4, BitDepth::Sixteen).unwrap();
    let body = encode(image);
    assert_eq!(body[8], 16);
  }
}
