use thiserror::Error;

/// Every way a [`crate::EncoderFacade`] run can fail.
///
/// Variant names match the error kinds a reviewer would expect from the
/// pipeline stage that raises them: configuration and I/O failures surface
/// before any band work starts, `Compression*` failures come out of a
/// worker band, `ChunkWrite` comes from the [`crate::png::ChunkSink`], and
/// `Internal` is reserved for invariant violations that should never
/// actually happen (mismatched band lengths, a missing collated slot, …).
#[derive(Debug, Error)]
pub enum EncodeError {
  /// The raster source could not be read or its dimensions are invalid.
  #[error("could not read input raster: {0}")]
  InputOpen(String),

  /// The destination could not be opened for writing.
  #[error("could not open output file: {0}")]
  OutputOpen(#[source] std::io::Error),

  /// A flag, thread count, or compression level was out of range.
  #[error("invalid configuration: {0}")]
  Config(String),

  /// The DEFLATE encoder for a band could not be initialized.
  #[error("DEFLATE encoder could not be initialized: {0}")]
  CompressionInit(String),

  /// The DEFLATE encoder reported a stream error mid-band.
  #[error("DEFLATE encoder reported a stream error: {0}")]
  CompressionFault(String),

  /// The [`crate::png::ChunkSink`] failed to accept a chunk.
  #[error("PNG chunk sink write failed: {0}")]
  ChunkWrite(#[source] std::io::Error),

  /// An invariant the encoder relies on was violated.
  #[error("internal invariant violated: {0}")]
  Internal(String),
}

impl EncodeError {
  /// The process exit code this error should map to.
  ///
  /// Configuration and input/output problems are the caller's fault (`1`);
  /// everything else is an encoder-internal failure (`2`). Exact codes are
  /// not part of any stability guarantee, only their non-zero-ness is.
  pub fn exit_code(&self) -> i32 {
    match self {
      Self::InputOpen(_) | Self::OutputOpen(_) | Self::Config(_) => 1,
      Self::CompressionInit(_)
      | Self::CompressionFault(_)
      | Self::ChunkWrite(_)
      | Self::Internal(_) => 2,
    }
  }
}

pub type EncodeResult<T> = Result<T, EncodeError>;
