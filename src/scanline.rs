//! Per-band pixel preparation: BGRA→RGBA channel reorder, alpha
//! normalization, and the filter-byte prefix every PNG scanline needs.
//!
//! Fixing the filter type to `0` (None) is what makes bands independent —
//! see spec.md §4.2's "Why this design" for the full rationale. Nothing in
//! this module reads state from a neighboring band.

use crate::band::Band;
use crate::error::EncodeResult;
use crate::image::ImageDescriptor;
use crate::pixel_source::PixelSource;

/// Builds the prepared buffer for one band: one leading zero filter byte
/// per row, followed by that row's `width * bytes_per_pixel` RGBA bytes
/// with alpha forced to the transparent quantum.
///
/// The returned buffer has exactly `(width * bpp + 1) * band.height()`
/// bytes, per spec.md §3's "Prepared band buffer" invariant.
pub fn prepare_band(
  source: &dyn PixelSource,
  image: ImageDescriptor,
  band: Band,
  pass_through_alpha: bool,
) -> EncodeResult<Vec<u8>> {
  let bpp = image.bytes_per_pixel();
  let width = image.width as usize;
  let row_count = band.height() as usize;

  let mut staging = vec![0u8; width * bpp * row_count];
  source.read_rows(band.row_lo, band.row_hi, &mut staging)?;

  let mut out = Vec::with_capacity((width * bpp + 1) * row_count);
  for row in staging.chunks_exact_mut(width * bpp) {
    reorder_row_in_place(row, bpp, pass_through_alpha);
    out.push(0u8); // filter type: None
    out.extend_from_slice(row);
  }

  debug_assert_eq!(out.len(), image.stride() * row_count);
  Ok(out)
}

/// Swaps each pixel's red and blue channels (BGRA → RGBA) and, unless
/// `pass_through_alpha` is set, forces alpha to the transparent quantum
/// (all-zero bytes), per spec.md §4.2 and §6.
fn reorder_row_in_place(row: &mut [u8], bpp: usize, pass_through_alpha: bool) {
  let channel_width = bpp / 4;
  for pixel in row.chunks_exact_mut(bpp) {
    let (blue, rest) = pixel.split_at_mut(channel_width);
    let (_green, rest) = rest.split_at_mut(channel_width);
    let (red, alpha) = rest.split_at_mut(channel_width);
    for i in 0..channel_width {
      (blue[i], red[i]) = (red[i], blue[i]);
    }
    if !pass_through_alpha {
      alpha.fill(0);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::image::BitDepth;
  use crate::pixel_source::InMemoryPixelSource;

  #[test]
  fn one_by_one_opaque_red_pixel_8bit() {
    // Source delivers BGRA with B=0x00, G=0x00, R=0xFF, A=0xFF.
    let source = InMemoryPixelSource::new(1, 1, 4, vec![0x00, 0x00, 0xFF, 0xFF]).unwrap();
    let image = ImageDescriptor::new(1, 1, BitDepth::Eight).unwrap();
    let band = Band { row_lo: 0, row_hi: 1, is_tail: true };

    let prepared = prepare_band(&source, image, band, false).unwrap();
    assert_eq!(prepared, vec![0x00, 0xFF, 0x00, 0x00, 0x00]);
  }

  #[test]
  fn pass_through_alpha_keeps_source_alpha() {
    let source = InMemoryPixelSource::new(1, 1, 4, vec![0x10, 0x20, 0x30, 0x40]).unwrap();
    let image = ImageDescriptor::new(1, 1, BitDepth::Eight).unwrap();
    let band = Band { row_lo: 0, row_hi: 1, is_tail: true };

    let prepared = prepare_band(&source, image, band, true).unwrap();
    // filter byte, R, G, B, A (alpha untouched at 0x40)
    assert_eq!(prepared, vec![0x00, 0x30, 0x20, 0x10, 0x40]);
  }

  #[test]
  fn sixteen_bit_swaps_two_byte_channel_pairs() {
    // One pixel, BGRA16: B=0x0102, G=0x0304, R=0x0506, A=0x0708.
    let bgra16 = vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
    let source = InMemoryPixelSource::new(1, 1, 8, bgra16).unwrap();
    let image = ImageDescriptor::new(1, 1, BitDepth::Sixteen).unwrap();
    let band = Band { row_lo: 0, row_hi: 1, is_tail: true };

    let prepared = prepare_band(&source, image, band, false).unwrap();
    assert_eq!(prepared, vec![0x00, 0x05, 0x06, 0x03, 0x04, 0x01, 0x02, 0x00, 0x00]);
  }

  #[test]
  fn every_row_gets_a_zero_filter_prefix() {
    let bgra = vec![0u8; 4 * 4 * 3];
    let source = InMemoryPixelSource::new(4, 3, 4, bgra).unwrap();
    let image = ImageDescriptor::new(4, 3, BitDepth::Eight).unwrap();
    let band = Band { row_lo: 0, row_hi: 3, is_tail: true };

    let prepared = prepare_band(&source, image, band, false).unwrap();
    let stride = image.stride();
    for row in prepared.chunks_exact(stride) {
      assert_eq!(row[0], 0x00);
    }
  }
}
