//! Generic length-prefixed, CRC-trailed PNG chunk framing (ISO/IEC
//! 15948 §5.3).

use std::io::{self, Write};

/// Writes one chunk: 4-byte big-endian length, 4-byte ASCII type, `data`,
/// then a CRC-32 over type+data (per the PNG spec, not zlib's Adler-32).
pub fn write_chunk<W: Write>(writer: &mut W, chunk_type: &[u8; 4], data: &[u8]) -> io::Result<()> {
  let len = u32::try_from(data.len()).expect("chunk data must fit in u32 length");
  writer.write_all(&len.to_be_bytes())?;

  let mut hasher = crc32fast::Hasher::new();
  hasher.update(chunk_type);
  hasher.update(data);
  let crc = hasher.finalize();

  writer.write_all(chunk_type)?;
  writer.write_all(data)?;
  writer.write_all(&crc.to_be_bytes())?;
  Ok(())
}
