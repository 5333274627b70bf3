//! DEFLATEs one band's prepared buffer into a zlib-shaped byte stream.
//!
//! Every band — tail or not — gets its own independent `flate2::Compress`
//! configured for zlib framing, so `bytes` always starts with a 2-byte
//! CMF/FLG header. The tail band calls it through to `Z_FINISH`, so its
//! output ends with flate2's own genuine Adler-32 trailer. A non-tail band
//! is only sync-flushed (spec.md §4.3: its DEFLATE payload must end on a
//! byte boundary so it composes with what follows), which means flate2
//! never appends a trailer for it — so this module appends one itself,
//! computed independently over the same bytes via [`crate::adler`]. That
//! keeps every band's `bytes` in the same header+payload+trailer shape the
//! [`crate::stitcher::StreamStitcher`] expects to strip uniformly; see
//! DESIGN.md for why this is a faithful reading of spec.md §4.5.

use flate2::{Compress, Compression, FlushCompress, Status};

use crate::adler;
use crate::error::{EncodeError, EncodeResult};

/// One band's compressed output, ready for the stitcher.
#[derive(Debug, Clone)]
pub struct CompressedBand {
  pub bytes: Vec<u8>,
  pub adler: u32,
  pub uncompressed_len: u64,
  pub is_tail: bool,
}

/// Chunk size used to drain compressor output, per spec.md §4.3 ("in
/// fixed-size chunks (implementation-defined, e.g., 16 KiB)").
const DRAIN_CHUNK: usize = 16 * 1024;

/// Compresses one band's prepared buffer.
///
/// `level` is validated by [`crate::config::EncoderConfig`] before this is
/// ever called; an out-of-range level here is an internal error, not a
/// user-facing one.
pub fn compress_band(prepared: &[u8], level: u8, is_tail: bool) -> EncodeResult<CompressedBand> {
  if !(1..=9).contains(&level) {
    return Err(EncodeError::CompressionInit(format!("invalid compression level {level}")));
  }

  let mut compress = Compress::new(Compression::new(level as u32), true);
  let mut bytes = Vec::with_capacity(prepared.len() / 2 + 64);

  let flush = if is_tail { FlushCompress::Finish } else { FlushCompress::Sync };
  run_to_completion(&mut compress, prepared, flush, &mut bytes)?;
  log::trace!(
    "compressed band ({} bytes in, {} bytes out, tail={is_tail})",
    prepared.len(),
    bytes.len()
  );

  let band_adler = adler::adler32(prepared);
  if !is_tail {
    // flate2 never wrote a trailer for a sync-flushed (unfinished) stream;
    // append one ourselves so the stitcher can strip header/trailer
    // uniformly across every band.
    bytes.extend_from_slice(&band_adler.to_be_bytes());
  }

  Ok(CompressedBand {
    bytes,
    adler: band_adler,
    uncompressed_len: prepared.len() as u64,
    is_tail,
  })
}

/// Drives a `Compress` through `input` with the given terminal flush,
/// draining output through a fixed-size scratch buffer until the flush is
/// fully satisfied (`Status::StreamEnd` for `Finish`, or input exhaustion
/// with no further output pending for `Sync`).
fn run_to_completion(
  compress: &mut Compress,
  mut input: &[u8],
  flush: FlushCompress,
  out: &mut Vec<u8>,
) -> EncodeResult<()> {
  let mut scratch = [0u8; DRAIN_CHUNK];
  loop {
    let before_in = compress.total_in();
    let before_out = compress.total_out();
    let status = compress
      .compress(input, &mut scratch, flush)
      .map_err(|e| EncodeError::CompressionFault(e.to_string()))?;

    let consumed = (compress.total_in() - before_in) as usize;
    let produced = (compress.total_out() - before_out) as usize;
    out.extend_from_slice(&scratch[..produced]);
    input = &input[consumed..];

    match status {
      Status::StreamEnd => return Ok(()),
      Status::Ok | Status::BufError => {
        if input.is_empty() && produced == 0 {
          if flush == FlushCompress::Finish {
            // Finish hasn't reached StreamEnd yet; keep asking.
            continue;
          }
          return Ok(());
        }
      }
    }
  }
}
