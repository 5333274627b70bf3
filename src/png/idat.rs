//! IDAT chunk splitting.
//!
//! A single chunk's length field is 4 bytes, so its data is capped at
//! `u32::MAX` bytes; PNG actually mandates the stricter `2^31 - 1` (ISO/IEC
//! 15948 §5.3). Large images split their payload across multiple IDAT
//! chunks, each independently length-prefixed and CRC'd, with no framing
//! of its own between them — a decoder treats consecutive IDATs as one
//! concatenated zlib stream.

pub const MAX_CHUNK_DATA_LEN: usize = (1u32 << 31) as usize - 1;

/// Splits `payload` into chunk-sized slices, none longer than
/// [`MAX_CHUNK_DATA_LEN`]. Always yields at least one slice, even for an
/// empty payload, so a zero-byte image still gets a single empty IDAT.
pub fn split_into_chunks(payload: &[u8]) -> Vec<&[u8]> {
  if payload.is_empty() {
    return vec![payload];
  }
  payload.chunks(MAX_CHUNK_DATA_LEN).collect()
}
