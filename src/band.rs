//! Splitting an image's rows into contiguous bands for parallel compression.

use crate::error::{EncodeError, EncodeResult};

/// A half-open row range `[row_lo, row_hi)` assigned to one worker.
///
/// `is_tail` marks the unique band containing the image's last row; its
/// [`crate::compressor::BandCompressor`] finalizes the DEFLATE stream
/// instead of sync-flushing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
  pub row_lo: u32,
  pub row_hi: u32,
  pub is_tail: bool,
}

impl Band {
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.row_hi - self.row_lo
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.row_lo == self.row_hi
  }
}

/// Splits `height` rows into `num_threads` contiguous bands of size
/// `s = ceil(height / num_threads)`, per spec.md §4.1.
///
/// When `num_threads > height`, the trailing bands come out empty
/// (`row_lo == row_hi`); they still participate in compression as
/// zero-length streams rather than being dropped, so the total band count
/// always equals `num_threads` and band indices stay contiguous. The tail
/// designation always lands on the unique band whose `row_hi == height`
/// (ties are impossible because bands are disjoint and ordered).
pub fn plan_bands(height: u32, num_threads: usize) -> EncodeResult<Vec<Band>> {
  if height == 0 {
    return Err(EncodeError::Config("image height must be positive".into()));
  }
  if num_threads == 0 {
    return Err(EncodeError::Config("num_threads must be at least 1".into()));
  }

  let band_size = (height as u64).div_ceil(num_threads as u64);
  let mut bands = Vec::with_capacity(num_threads);
  for k in 0..num_threads as u64 {
    let row_lo = (k * band_size).min(height as u64) as u32;
    let row_hi = ((k + 1) * band_size).min(height as u64) as u32;
    bands.push(Band { row_lo, row_hi, is_tail: false });
  }

  // The tail band is the unique one reaching row `height`; with a ceil-based
  // split that is always the last band in the list.
  let last = bands.last_mut().expect("num_threads is at least 1");
  last.is_tail = true;

  debug_assert!(bands.iter().map(Band::height).sum::<u32>() == height);
  log::debug!("planned {} band(s) of up to {band_size} row(s) for height {height}", bands.len());
  Ok(bands)
}
