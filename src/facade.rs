//! Wires the pipeline together: `PixelSource` → band plan → per-band
//! prepare+compress → stitch → [`crate::png::ChunkSink`], per spec.md §4.6.

use crate::band::{self, Band};
use crate::compressor::{self, CompressedBand};
use crate::config::EncoderConfig;
use crate::error::EncodeResult;
use crate::image::ImageDescriptor;
use crate::orchestrator;
use crate::pixel_source::PixelSource;
use crate::png::ChunkSink;
use crate::scanline;
use crate::stitcher;

/// Encodes `source` as a PNG and writes it to `sink`.
///
/// The whole payload is assembled in memory before `sink` sees its first
/// byte, so a failure partway through never leaves a truncated IHDR/IDAT
/// sequence behind — `sink` only receives calls once encoding has fully
/// succeeded.
pub fn encode<S: PixelSource, K: ChunkSink>(
  source: &S,
  bit_depth: crate::image::BitDepth,
  config: &EncoderConfig,
  sink: &mut K,
) -> EncodeResult<()> {
  let image = ImageDescriptor::new(source.width(), source.height(), bit_depth)?;

  if let Ok(available) = std::thread::available_parallelism() {
    if config.num_threads.get() > available.get() {
      log::warn!(
        "num_threads={} exceeds available_parallelism={}; proceeding anyway",
        config.num_threads,
        available
      );
    }
  }

  let bands = band::plan_bands(image.height, config.num_threads.get())?;

  let compressed = compress_all_bands(source, image, &bands, config)?;
  let payload = stitcher::stitch(&compressed)?;

  sink.write_signature()?;
  sink.write_ihdr(image)?;
  sink.write_idat(&payload)?;
  sink.write_iend()?;
  Ok(())
}

fn compress_all_bands<S: PixelSource>(
  source: &S,
  image: ImageDescriptor,
  bands: &[Band],
  config: &EncoderConfig,
) -> EncodeResult<Vec<CompressedBand>> {
  orchestrator::run_bands(bands, |_index, band| {
    let prepared = scanline::prepare_band(source, image, *band, config.pass_through_alpha)?;
    compressor::compress_band(&prepared, config.compression_level, band.is_tail)
  })
}
