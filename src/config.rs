//! Encoder-wide knobs: thread count, compression level, alpha handling.
//!
//! Grouped into one struct so the facade and the CLI front-end share a
//! single validated source of truth, the way spec.md §4.7 describes.

use std::env;
use std::num::NonZeroUsize;

use crate::error::{EncodeError, EncodeResult};

const ENV_NUM_THREADS: &str = "PARAPNG_NUM_THREADS";
const DEFAULT_NUM_THREADS: usize = 2;
const DEFAULT_COMPRESSION_LEVEL: u8 = 9;

#[derive(Debug, Clone, Copy)]
pub struct EncoderConfig {
  pub num_threads: NonZeroUsize,
  pub compression_level: u8,
  pub pass_through_alpha: bool,
}

impl EncoderConfig {
  /// Builds a config from explicit values, applying the
  /// `PARAPNG_NUM_THREADS` environment override (spec.md §4.7) when
  /// `num_threads_cli` wasn't set on the command line.
  pub fn from_cli(
    num_threads_cli: Option<usize>,
    compression_level: u8,
    pass_through_alpha: bool,
  ) -> EncodeResult<Self> {
    let env_value = env::var(ENV_NUM_THREADS).ok();
    let num_threads = resolve_num_threads(num_threads_cli, env_value.as_deref())?;

    let config = Self {
      num_threads: NonZeroUsize::new(num_threads)
        .ok_or_else(|| EncodeError::Config("num_threads must be at least 1".into()))?,
      compression_level,
      pass_through_alpha,
    };
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> EncodeResult<()> {
    if !(1..=9).contains(&self.compression_level) {
      return Err(EncodeError::Config(format!(
        "compression_level must be in 1..=9, got {}",
        self.compression_level
      )));
    }
    Ok(())
  }
}

impl Default for EncoderConfig {
  fn default() -> Self {
    Self {
      num_threads: NonZeroUsize::new(DEFAULT_NUM_THREADS).unwrap(),
      compression_level: DEFAULT_COMPRESSION_LEVEL,
      pass_through_alpha: false,
    }
  }
}

/// CLI value wins if present; otherwise an `env_value` (already read from
/// `PARAPNG_NUM_THREADS`) is parsed; otherwise the default of 2. Split out
/// from [`EncoderConfig::from_cli`] so the precedence logic is testable
/// without mutating process-global environment state.
fn resolve_num_threads(cli_value: Option<usize>, env_value: Option<&str>) -> EncodeResult<usize> {
  if let Some(n) = cli_value {
    return Ok(n);
  }
  match env_value {
    Some(val) => val
      .parse::<usize>()
      .map_err(|_| EncodeError::Config(format!("{ENV_NUM_THREADS}={val:?} is not a positive integer"))),
    None => Ok(DEFAULT_NUM_THREADS),
  }
}
