//! End-to-end encodes, decoded back with the `png` crate to confirm the
//! emitted files are ordinary, conformant PNGs — not just internally
//! self-consistent byte streams.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use parapng::{BitDepth, EncodeError, EncoderConfig, FileChunkSink, InMemoryPixelSource};

fn config(num_threads: usize, pass_through_alpha: bool) -> EncoderConfig {
  EncoderConfig {
    num_threads: NonZeroUsize::new(num_threads).unwrap(),
    compression_level: 6,
    pass_through_alpha,
  }
}

fn solid_bgra(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
  let mut bgra = Vec::with_capacity(width as usize * height as usize * 4);
  for _ in 0..(width * height) {
    bgra.extend_from_slice(&pixel);
  }
  bgra
}

fn temp_path(name: &str) -> PathBuf {
  let mut path = std::env::temp_dir();
  path.push(format!("parapng-test-{name}-{:?}.png", std::thread::current().id()));
  path
}

fn encode_and_decode(
  width: u32,
  height: u32,
  pixel: [u8; 4],
  config: &EncoderConfig,
  name: &str,
) -> (png::OutputInfo, Vec<u8>) {
  let bgra = solid_bgra(width, height, pixel);
  let source = InMemoryPixelSource::new(width, height, 4, bgra).unwrap();
  let path = temp_path(name);

  let mut sink = FileChunkSink::create(&path).unwrap();
  parapng::encode(&source, BitDepth::Eight, config, &mut sink).unwrap();
  drop(sink);

  let decoder = png::Decoder::new(std::fs::File::open(&path).unwrap());
  let mut reader = decoder.read_info().unwrap();
  let mut buf = vec![0; reader.output_buffer_size()];
  let info = reader.next_frame(&mut buf).unwrap();
  let out = buf[..info.buffer_size()].to_vec();
  std::fs::remove_file(&path).ok();
  (info, out)
}

#[test]
fn one_by_one_pixel_decodes_as_opaque_red() {
  let (info, pixels) = encode_and_decode(1, 1, [0x00, 0x00, 0xff, 0xff], &config(1, false), "1x1");
  assert_eq!(info.width, 1);
  assert_eq!(info.height, 1);
  assert_eq!(info.color_type, png::ColorType::Rgba);
  assert_eq!(pixels, vec![0xff, 0x00, 0x00, 0xff]);
}

#[test]
fn four_by_four_with_four_bands_decodes_to_the_uniform_fill() {
  let pixel = [0x20, 0x40, 0x60, 0x80];
  let (info, pixels) = encode_and_decode(4, 4, pixel, &config(4, true), "4x4-4band");
  assert_eq!(info.width, 4);
  assert_eq!(info.height, 4);
  for rgba in pixels.chunks_exact(4) {
    assert_eq!(rgba, [0x60, 0x40, 0x20, 0x80]);
  }
}

#[test]
fn hundred_by_hundred_with_three_bands_matches_serial_output() {
  let pixel = [0x12, 0x34, 0x56, 0xff];
  let (_info, parallel) = encode_and_decode(100, 100, pixel, &config(3, false), "100x100-3band");
  let (_info, serial) = encode_and_decode(100, 100, pixel, &config(1, false), "100x100-1band");
  assert_eq!(parallel, serial);
}

#[test]
fn more_bands_than_rows_still_decodes() {
  let pixel = [0x00, 0xff, 0x00, 0xff];
  let (info, pixels) = encode_and_decode(1, 10, pixel, &config(16, false), "1x10-16band");
  assert_eq!(info.height, 10);
  assert_eq!(pixels.len(), 10 * 4);
}

#[test]
fn pass_through_alpha_keeps_the_source_alpha_channel() {
  let pixel = [0x00, 0x00, 0x00, 0x7f];
  let (_info, pixels) = encode_and_decode(2, 2, pixel, &config(2, true), "alpha-passthrough");
  for rgba in pixels.chunks_exact(4) {
    assert_eq!(rgba[3], 0x7f);
  }
}

#[test]
fn default_alpha_handling_forces_full_transparency_byte_to_zero() {
  let pixel = [0x00, 0x00, 0x00, 0x7f];
  let (_info, pixels) = encode_and_decode(2, 2, pixel, &config(2, false), "alpha-forced");
  for rgba in pixels.chunks_exact(4) {
    assert_eq!(rgba[3], 0x00);
  }
}

#[test]
fn rejects_zero_sized_raster() {
  let source = InMemoryPixelSource::new(0, 0, 4, vec![]).unwrap();
  let mut sink = parapng::png::BufferChunkSink::new();
  let err = parapng::encode(&source, BitDepth::Eight, &config(1, false), &mut sink).unwrap_err();
  assert!(matches!(err, EncodeError::Config(_)));
}
