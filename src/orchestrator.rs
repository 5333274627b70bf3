//! Runs one worker per band concurrently and collates results in band
//! order, per spec.md §4.4 and §5.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::band::Band;
use crate::compressor::CompressedBand;
use crate::error::{EncodeError, EncodeResult};

/// Runs `work` once per band, in parallel, and returns the results in band
/// order.
///
/// `work(index, band)` must prepare and compress that band's buffer and
/// return its [`CompressedBand`]. Bands are independent: `work` must not
/// read or write any shared mutable state other than what this function
/// manages itself. On the first failure, the cancellation flag passed to
/// `work` via its own internal checks is irrelevant here — this function
/// simply records the first error and lets already-dispatched closures run
/// to completion (spec.md §5: "they may complete if already past the
/// cancellation check"), then returns that first error once every thread
/// has joined.
pub fn run_bands<F>(bands: &[Band], work: F) -> EncodeResult<Vec<CompressedBand>>
where
  F: Fn(usize, &Band) -> EncodeResult<CompressedBand> + Sync,
{
  let mut slots: Vec<Option<CompressedBand>> = (0..bands.len()).map(|_| None).collect();
  let first_error: Mutex<Option<EncodeError>> = Mutex::new(None);
  let cancelled = AtomicBool::new(false);

  rayon::scope(|scope| {
    for (index, (band, slot)) in bands.iter().zip(slots.iter_mut()).enumerate() {
      let first_error = &first_error;
      let cancelled = &cancelled;
      let work = &work;
      scope.spawn(move |_| {
        if cancelled.load(Ordering::Acquire) {
          return;
        }
        match work(index, band) {
          Ok(compressed) => *slot = Some(compressed),
          Err(e) => {
            cancelled.store(true, Ordering::Release);
            log::debug!("band {index} failed, cancelling remaining bands: {e}");
            let mut guard = first_error.lock().unwrap();
            if guard.is_none() {
              *guard = Some(e);
            }
          }
        }
      });
    }
  });

  if let Some(error) = first_error.into_inner().unwrap() {
    return Err(error);
  }

  // happens-before: `rayon::scope` only returns once every spawned closure
  // has joined, so every `Some` write above is visible here.
  slots
    .into_iter()
    .enumerate()
    .map(|(index, slot)| {
      slot.ok_or_else(|| EncodeError::Internal(format!("band {index} produced no output")))
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn band(row_lo: u32, row_hi: u32, is_tail: bool) -> Band {
    Band { row_lo, row_hi, is_tail }
  }

  #[test]
  fn collates_results_in_band_order_regardless_of_completion_order() {
    let bands = vec![band(0, 1, false), band(1, 2, false), band(2, 3, true)];
    // Make earlier-indexed bands "finish later" by doing more (fake) work,
    // to exercise that collation is by index, not completion order.
    let results = run_bands(&bands, |index, b| {
      let spin = (bands.len() - index) * 10_000;
      let mut acc = 0u64;
      for i in 0..spin {
        acc = acc.wrapping_add(i as u64);
      }
      Ok(CompressedBand {
        bytes: vec![index as u8, (acc % 7) as u8],
        adler: index as u32,
        uncompressed_len: b.height() as u64,
        is_tail: b.is_tail,
      })
    })
    .unwrap();

    assert_eq!(results.len(), 3);
    for (index, r) in results.iter().enumerate() {
      assert_eq!(r.bytes[0], index as u8);
      assert_eq!(r.adler, index as u32);
    }
  }

  #[test]
  fn first_failure_wins_and_propagates() {
    let bands = vec![band(0, 1, false), band(1, 2, false), band(2, 3, false), band(3, 4, true)];
    let result = run_bands(&bands, |index, _band| {
      if index == 2 {
        Err(EncodeError::CompressionInit("forced failure on band 2".into()))
      } else {
        Ok(CompressedBand { bytes: vec![], adler: 1, uncompressed_len: 0, is_tail: false })
      }
    });

    assert!(matches!(result, Err(EncodeError::CompressionInit(_))));
  }

  #[test]
  fn single_band_runs_without_a_thread_pool_hiccup() {
    let bands = vec![band(0, 5, true)];
    let results = run_bands(&bands, |_index, _band| {
      Ok(CompressedBand { bytes: vec![1, 2, 3], adler: 42, uncompressed_len: 5, is_tail: true })
    })
    .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].adler, 42);
  }
}
