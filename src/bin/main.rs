use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use parapng::config::EncoderConfig;
use parapng::png::FileChunkSink;
use parapng::{raster_file, EncodeError, PixelSource};

/// Parallel PNG encoder: splits a raster into row bands, DEFLATEs each
/// band concurrently, and stitches the results into one PNG.
#[derive(Debug, Parser)]
#[command(name = "parapng", version, about)]
struct Cli {
  /// Raster to encode (see `raster_file` for the container format).
  #[arg(long)]
  input: PathBuf,

  /// Destination PNG path.
  #[arg(long)]
  output: PathBuf,

  /// Worker thread count; falls back to `PARAPNG_NUM_THREADS`, then 2.
  #[arg(long)]
  num_threads: Option<usize>,

  /// DEFLATE compression level, 1-9.
  #[arg(long, default_value_t = 9)]
  compression_level: u8,

  /// Keep the source alpha channel instead of forcing full opacity.
  #[arg(long)]
  keep_alpha: bool,
}

fn main() -> ExitCode {
  env_logger::init();
  let cli = Cli::parse();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      log::error!("{e}");
      ExitCode::from(e.exit_code() as u8)
    }
  }
}

fn run(cli: Cli) -> Result<(), EncodeError> {
  let config = EncoderConfig::from_cli(cli.num_threads, cli.compression_level, cli.keep_alpha)?;

  log::info!("reading {}", cli.input.display());
  let raster = raster_file::read(&cli.input)?;

  log::info!(
    "encoding {}x{} with {} thread(s) at level {}",
    raster.source.width(),
    raster.source.height(),
    config.num_threads,
    config.compression_level,
  );

  let mut sink = FileChunkSink::create(&cli.output)?;
  parapng::encode(&raster.source, raster.bit_depth, &config, &mut sink)?;

  log::info!("wrote {}", cli.output.display());
  Ok(())
}
