//! The external "raster acquisition" collaborator.
//!
//! [`PixelSource`] is deliberately narrow: random-access reads of a
//! contiguous row range, delivered in whatever channel order the source
//! naturally has (this crate assumes BGRA, matching how many raster
//! decoders hand back rows — the [`crate::scanline::ScanlinePreparer`] does
//! the reordering into PNG's RGBA). A real embedder supplies their own
//! implementation (wrapping a decoded image, a memory-mapped file, …); this
//! module also provides [`InMemoryPixelSource`], a simple in-memory impl
//! used by the CLI and by tests.

use crate::error::{EncodeError, EncodeResult};

/// Random-access provider of BGRA pixel rows.
///
/// Implementations must be safe to read from multiple threads at once, as
/// long as the row ranges requested don't overlap — the
/// [`crate::orchestrator::ParallelOrchestrator`] only ever asks for disjoint
/// row ranges, one per band.
pub trait PixelSource: Sync {
  /// Image width in pixels.
  fn width(&self) -> u32;

  /// Image height in pixels.
  fn height(&self) -> u32;

  /// Bytes per pixel as delivered by this source (4 for 8-bit, 8 for
  /// 16-bit samples).
  fn bytes_per_pixel(&self) -> usize;

  /// Copies the pixel bytes for rows `[row_lo, row_hi)` into `out`, in
  /// BGRA channel order, row-major, with no padding between rows.
  ///
  /// `out` must be exactly `(row_hi - row_lo) * width() * bytes_per_pixel()`
  /// bytes long.
  fn read_rows(&self, row_lo: u32, row_hi: u32, out: &mut [u8]) -> EncodeResult<()>;
}

/// A [`PixelSource`] backed by a single in-memory BGRA buffer.
///
/// This is the "portable choice" spec.md §5 describes: the whole raster is
/// already addressable by row in one contiguous allocation, so
/// `read_rows` is a plain slice copy and is trivially safe to call
/// concurrently for disjoint ranges.
pub struct InMemoryPixelSource {
  width: u32,
  height: u32,
  bytes_per_pixel: usize,
  bgra: Vec<u8>,
}

impl InMemoryPixelSource {
  /// Builds a source from a BGRA buffer. `bgra.len()` must equal
  /// `width * height * bytes_per_pixel`.
  pub fn new(width: u32, height: u32, bytes_per_pixel: usize, bgra: Vec<u8>) -> EncodeResult<Self> {
    let expected = (width as usize)
      .checked_mul(height as usize)
      .and_then(|n| n.checked_mul(bytes_per_pixel))
      .ok_or_else(|| EncodeError::InputOpen("raster dimensions overflow".into()))?;
    if bgra.len() != expected {
      return Err(EncodeError::InputOpen(format!(
        "raster buffer is {} bytes, expected {expected}",
        bgra.len()
      )));
    }
    Ok(Self { width, height, bytes_per_pixel, bgra })
  }
}

impl PixelSource for InMemoryPixelSource {
  fn width(&self) -> u32 {
    self.width
  }

  fn height(&self) -> u32 {
    self.height
  }

  fn bytes_per_pixel(&self) -> usize {
    self.bytes_per_pixel
  }

  fn read_rows(&self, row_lo: u32, row_hi: u32, out: &mut [u8]) -> EncodeResult<()> {
    let stride = self.width as usize * self.bytes_per_pixel;
    let start = row_lo as usize * stride;
    let end = row_hi as usize * stride;
    let src = self.bgra.get(start..end).ok_or_else(|| {
      EncodeError::Internal(format!("row range [{row_lo}, {row_hi}) out of bounds"))
    })?;
    if out.len() != src.len() {
      return Err(EncodeError::Internal(format!(
        "read_rows output buffer is {} bytes, expected {}",
        out.len(),
        src.len()
      )));
    }
    out.copy_from_slice(src);
    Ok(())
  }
}
