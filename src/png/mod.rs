//! PNG container assembly: signature, IHDR, one or more IDAT chunks, IEND.
//!
//! This module only ever emits the shape spec.md §1 asks for — truecolor
//! with alpha, no interlacing, no ancillary chunks — so it's much smaller
//! than a general-purpose PNG writer needs to be.

mod chunk;
mod idat;
mod iend;
mod ihdr;
mod signature;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{EncodeError, EncodeResult};
use crate::image::ImageDescriptor;

/// Destination for an encoded PNG's chunks.
///
/// Implementations must not write anything for a call that returns `Err`
/// from an earlier call in the sequence — the facade only starts calling
/// a sink once the whole image is compressed and stitched, so a sink is
/// free to buffer nothing and still guarantee no partial file on failure
/// (spec.md §4.6).
pub trait ChunkSink {
  fn write_signature(&mut self) -> EncodeResult<()>;
  fn write_ihdr(&mut self, image: ImageDescriptor) -> EncodeResult<()>;
  fn write_idat(&mut self, compressed_payload: &[u8]) -> EncodeResult<()>;
  fn write_iend(&mut self) -> EncodeResult<()>;
}

/// Writes a full PNG datastream to a [`std::fs::File`].
pub struct FileChunkSink {
  writer: BufWriter<File>,
}

impl FileChunkSink {
  pub fn create(path: &Path) -> EncodeResult<Self> {
    let file = File::create(path).map_err(EncodeError::OutputOpen)?;
    Ok(Self { writer: BufWriter::new(file) })
  }

  fn write_chunk(&mut self, chunk_type: &[u8; 4], data: &[u8]) -> EncodeResult<()> {
    chunk::write_chunk(&mut self.writer, chunk_type, data).map_err(EncodeError::ChunkWrite)
  }
}

impl ChunkSink for FileChunkSink {
  fn write_signature(&mut self) -> EncodeResult<()> {
    self.writer.write_all(&signature::BYTES).map_err(EncodeError::ChunkWrite)
  }

  fn write_ihdr(&mut self, image: ImageDescriptor) -> EncodeResult<()> {
    let body = ihdr::encode(image);
    self.write_chunk(b"IHDR", &body)
  }

  fn write_idat(&mut self, compressed_payload: &[u8]) -> EncodeResult<()> {
    for chunk in idat::split_into_chunks(compressed_payload) {
      self.write_chunk(b"IDAT", chunk)?;
    }
    Ok(())
  }

  fn write_iend(&mut self) -> EncodeResult<()> {
    self.write_chunk(b"IEND", iend::BODY)
  }
}

/// An in-memory sink, used by tests that want to inspect or decode the
/// emitted bytes without touching the filesystem.
pub struct BufferChunkSink {
  pub bytes: Vec<u8>,
}

impl BufferChunkSink {
  pub fn new() -> Self {
    Self { bytes: Vec::new() }
  }
}

impl Default for BufferChunkSink {
  fn default() -> Self {
    Self::new()
  }
}

impl ChunkSink for BufferChunkSink {
  fn write_signature(&mut self) -> EncodeResult<()> {
    self.bytes.extend_from_slice(&signature::BYTES);
    Ok(())
  }

  fn write_ihdr(&mut self, image: ImageDescriptor) -> EncodeResult<()> {
    let body = ihdr::encode(image);
    write_chunk_to_vec(&mut self.bytes, b"IHDR", &body)
  }

  fn write_idat(&mut self, compressed_payload: &[u8]) -> EncodeResult<()> {
    for chunk in idat::split_into_chunks(compressed_payload) {
      write_chunk_to_vec(&mut self.bytes, b"IDAT", chunk)?;
    }
    Ok(())
  }

  fn write_iend(&mut self) -> EncodeResult<()> {
    write_chunk_to_vec(&mut self.bytes, b"IEND", iend::BODY)
  }
}

fn write_chunk_to_vec(out: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) -> EncodeResult<()> {
  chunk::write_chunk(out, chunk_type, data).map_err(EncodeError::ChunkWrite)
}
