//! The `--input` raster container the CLI front-end reads.
//!
//! PNG decoding is explicitly out of scope for this crate, so the CLI
//! doesn't re-decode an existing PNG for round-tripping; it reads a small
//! raw container instead: an 8-byte header (4-byte magic `PRAS`, big-endian
//! `u32` width, big-endian `u32` height, one bit-depth byte: `8` or `16`)
//! followed by the raster's BGRA bytes, row-major, with no padding.
//! Embedders linking this crate as a library skip this entirely and hand
//! [`facade::encode`] their own [`pixel_source::PixelSource`].

use std::fs;
use std::path::Path;

use crate::error::{EncodeError, EncodeResult};
use crate::image::BitDepth;
use crate::pixel_source::InMemoryPixelSource;

const MAGIC: &[u8; 4] = b"PRAS";
const HEADER_LEN: usize = 4 + 4 + 4 + 1;

pub struct Raster {
  pub bit_depth: BitDepth,
  pub source: InMemoryPixelSource,
}

pub fn read(path: &Path) -> EncodeResult<Raster> {
  let bytes = fs::read(path).map_err(|e| EncodeError::InputOpen(e.to_string()))?;
  if bytes.len() < HEADER_LEN {
    return Err(EncodeError::InputOpen("raster file is shorter than its header".into()));
  }
  if &bytes[0..4] != MAGIC {
    return Err(EncodeError::InputOpen("raster file is missing the PRAS magic".into()));
  }

  let width = u32::from_be_bytes(bytes[4..8].try_into().unwrap());
  let height = u32::from_be_bytes(bytes[8..12].try_into().unwrap());
  let bit_depth = BitDepth::try_from_u8(bytes[12])?;
  let bytes_per_pixel = bit_depth.bytes_per_pixel();

  let bgra = bytes[HEADER_LEN..].to_vec();
  let source = InMemoryPixelSource::new(width, height, bytes_per_pixel, bgra)?;
  Ok(Raster { bit_depth, source })
}
