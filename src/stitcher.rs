//! Fuses N independently-compressed bands into one zlib stream, per
//! spec.md §4.5.

use crate::adler;
use crate::compressor::CompressedBand;
use crate::error::{EncodeError, EncodeResult};

const ZLIB_HEADER_LEN: usize = 2;
const ADLER_TRAILER_LEN: usize = 4;

/// Stitches compressed band records (already in band order, see
/// [`crate::orchestrator::run_bands`]) into the final IDAT payload.
///
/// * `N = 1`: the single band's bytes are returned unchanged — it's
///   already a complete, correctly-trailed zlib stream.
/// * `N > 1`: band 0 contributes everything but its trailing 4-byte
///   Adler-32; every later band (including the tail) contributes its
///   bytes with both the 2-byte zlib header and the trailing 4-byte
///   Adler-32 stripped, leaving only DEFLATE payload. The combined
///   Adler-32 over all bands' uncompressed bytes is appended last, in
///   big-endian order, per RFC 1950.
pub fn stitch(bands: &[CompressedBand]) -> EncodeResult<Vec<u8>> {
  if bands.is_empty() {
    return Err(EncodeError::Internal("no compressed bands to stitch".into()));
  }

  if bands.len() == 1 {
    return Ok(bands[0].bytes.clone());
  }

  let mut payload = Vec::new();

  let first = &bands[0];
  strip_trailer(&first.bytes)
    .map(|prefix| payload.extend_from_slice(prefix))
    .ok_or_else(|| EncodeError::Internal("band 0 output shorter than an Adler-32 trailer".into()))?;

  for band in &bands[1..] {
    let stripped = strip_header_and_trailer(&band.bytes).ok_or_else(|| {
      EncodeError::Internal("band output shorter than header + Adler-32 trailer".into())
    })?;
    payload.extend_from_slice(stripped);
  }

  let combined_adler =
    adler::combine_all(bands.iter().map(|b| (b.adler, b.uncompressed_len)));
  payload.extend_from_slice(&combined_adler.to_be_bytes());

  Ok(payload)
}

fn strip_trailer(bytes: &[u8]) -> Option<&[u8]> {
  bytes.len().checked_sub(ADLER_TRAILER_LEN).map(|cut| &bytes[..cut])
}

fn strip_header_and_trailer(bytes: &[u8]) -> Option<&[u8]> {
  let without_trailer_len = bytes.len().checked_sub(ADLER_TRAILER_LEN)?;
  if without_trailer_len < ZLIB_HEADER_LEN {
    return None;
  }
  Some(&bytes[ZLIB_HEADER_LEN..without_trailer_len])
}
