//! Adler-32 checksums and the combine operation that lets the
//! [`crate::stitcher::StreamStitcher`] merge per-band checksums into one
//! trailer without re-hashing the whole image.

const MOD_ADLER: u64 = 65521;

/// The Adler-32 of an empty input, matching zlib's `adler32(0, NULL, 0)`.
pub const INITIAL: u32 = 1;

/// Computes the Adler-32 checksum of `data`.
#[must_use]
pub fn adler32(data: &[u8]) -> u32 {
  adler2::adler32_slice(data)
}

/// Given `adler32(a)`, `adler32(b)` and `len(b)`, returns `adler32(a ++ b)`.
///
/// This is the standard zlib `adler32_combine` operation: it lets two
/// checksums computed independently (e.g. on separate threads, over
/// separate bands) be merged into the checksum of their concatenation
/// without revisiting either byte string.
///
/// `adler32_combine(a, b, 0)` returns `a` unchanged, which is required for
/// legal empty bands (spec.md §9: "Adler-32 combination across empty
/// inputs").
#[must_use]
pub fn adler32_combine(adler_a: u32, adler_b: u32, len_b: u64) -> u32 {
  if len_b == 0 {
    return adler_a;
  }

  let rem = len_b % MOD_ADLER;

  let sum1_a = u64::from(adler_a & 0xffff);
  let sum2_a = u64::from(adler_a >> 16);
  let sum1_b = u64::from(adler_b & 0xffff);
  let sum2_b = u64::from(adler_b >> 16);

  let mut sum1 = sum1_a;
  let mut sum2 = (rem * sum1) % MOD_ADLER;

  sum1 = (sum1 + sum1_b + MOD_ADLER - 1) % MOD_ADLER;
  sum2 = (sum2 + sum2_a + sum2_b + MOD_ADLER - 1) % MOD_ADLER;

  ((sum2 << 16) | sum1) as u32
}

/// Folds a sequence of `(adler, uncompressed_len)` pairs, in order, into the
/// Adler-32 of their logical concatenation.
pub fn combine_all(parts: impl IntoIterator<Item = (u32, u64)>) -> u32 {
  let mut iter = parts.into_iter();
  let Some((mut acc, _first_len)) = iter.next() else {
    return INITIAL;
  };
  // The accumulator starts as band 0's own Adler-32 (covering band 0's
  // bytes already); each subsequent combine folds in one more band.
  for (adler, len) in iter {
    acc = adler32_combine(acc, adler, len);
  }
  acc
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn combine_with_empty_second_input_is_identity() {
    let a = adler32(b"hello world");
    assert_eq!(adler32_combine(a, INITIAL, 0), a);
  }

  #[test]
  fn combine_matches_direct_hash_of_concatenation() {
    let a_bytes: &[u8] = b"the quick brown fox";
    let b_bytes: &[u8] = b" jumps over the lazy dog";
    let a = adler32(a_bytes);
    let b = adler32(b_bytes);
    let combined = adler32_combine(a, b, b_bytes.len() as u64);

    let mut concatenated = Vec::new();
    concatenated.extend_from_slice(a_bytes);
    concatenated.extend_from_slice(b_bytes);
    assert_eq!(combined, adler32(&concatenated));
  }

  #[test]
  fn combine_all_three_way() {
    let parts: Vec<&[u8]> = vec![b"abc", b"", b"defgh"];
    let adlers: Vec<(u32, u64)> =
      parts.iter().map(|p| (adler32(p), p.len() as u64)).collect();
    let combined = combine_all(adlers);

    let mut concatenated = Vec::new();
    for p in &parts {
      concatenated.extend_from_slice(p);
    }
    assert_eq!(combined, adler32(&concatenated));
  }

  #[test]
  fn empty_input_is_initial() {
    assert_eq!(adler32(&[]), INITIAL);
  }
}
