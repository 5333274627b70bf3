//! A parallel PNG encoder.
//!
//! Splits a raster into row bands, DEFLATEs each band on its own thread,
//! then stitches the independently-compressed streams into a single
//! conformant zlib payload (RFC 1950 / RFC 1951) wrapped in a minimal PNG
//! container (ISO/IEC 15948): signature, `IHDR`, one or more `IDAT`, `IEND`.
//! Only truecolor-with-alpha (color type 6), non-interlaced output is
//! produced — see [`image::ImageDescriptor`].
//!
//! This crate never installs a logger itself; the `parapng` binary does
//! that at startup. Call sites embedding [`facade::encode`] directly are
//! free to configure `log` however they like.

#![forbid(unsafe_code)]

pub mod adler;
pub mod band;
pub mod compressor;
pub mod config;
pub mod error;
pub mod facade;
pub mod image;
pub mod orchestrator;
pub mod pixel_source;
pub mod png;
pub mod raster_file;
pub mod scanline;
pub mod stitcher;

pub use config::EncoderConfig;
pub use error::{EncodeError, EncodeResult};
pub use facade::encode;
pub use image::{BitDepth, ImageDescriptor};
pub use pixel_source::{InMemoryPixelSource, PixelSource};
pub use png::{ChunkSink, FileChunkSink};
